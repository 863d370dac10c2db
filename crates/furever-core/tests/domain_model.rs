// crates/furever-core/tests/domain_model.rs
// ============================================================================
// Module: Domain Model Tests
// Description: Unit and property tests for status, category, and role parsing.
// Purpose: Pin the canonical stored spellings and legacy folding rules.
// ============================================================================

//! Unit and property tests for the shared domain vocabulary.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use furever_core::PetCategory;
use furever_core::PetId;
use furever_core::PetStatus;
use furever_core::RequestId;
use furever_core::RequestStatus;
use furever_core::Role;
use furever_core::Timestamp;
use proptest::prelude::*;

// ============================================================================
// SECTION: Request Status
// ============================================================================

/// Confirms declined spellings fold into the canonical rejected bucket.
#[test]
fn declined_folds_into_rejected() {
    assert_eq!(RequestStatus::normalize("declined"), RequestStatus::Rejected);
    assert_eq!(RequestStatus::normalize("Declined"), RequestStatus::Rejected);
    assert_eq!(RequestStatus::normalize("rejected"), RequestStatus::Rejected);
    assert_eq!(RequestStatus::Rejected.as_str(), "rejected");
}

/// Confirms normalization trims whitespace and ignores case.
#[test]
fn normalize_trims_and_lowercases() {
    assert_eq!(RequestStatus::normalize("  APPROVED  "), RequestStatus::Approved);
    assert_eq!(RequestStatus::normalize("Canceled"), RequestStatus::Cancelled);
    assert_eq!(RequestStatus::normalize("cancelled"), RequestStatus::Cancelled);
}

/// Confirms empty and unknown text classifies as pending.
#[test]
fn unknown_status_classifies_as_pending() {
    assert_eq!(RequestStatus::normalize(""), RequestStatus::Pending);
    assert_eq!(RequestStatus::normalize("in-review"), RequestStatus::Pending);
}

// ============================================================================
// SECTION: Pet Category And Status
// ============================================================================

/// Confirms category parsing accepts plural and mixed-case spellings.
#[test]
fn category_parsing_accepts_variants() {
    assert_eq!(PetCategory::parse("Dogs"), PetCategory::Dog);
    assert_eq!(PetCategory::parse(" cat "), PetCategory::Cat);
    assert_eq!(PetCategory::parse("rabbit"), PetCategory::Other);
    assert_eq!(PetCategory::Other.label(), "Other");
}

/// Confirms unrecognized pet status text is carried verbatim.
#[test]
fn custom_pet_status_round_trips_verbatim() {
    let status = PetStatus::parse("Fostered");
    assert_eq!(status.as_str(), "Fostered");
    assert_eq!(PetStatus::parse("ADOPTED"), PetStatus::Adopted);
    assert_eq!(PetStatus::parse("available"), PetStatus::Available);
}

// ============================================================================
// SECTION: Roles And Identifiers
// ============================================================================

/// Confirms role parsing defaults to adopter for anything but admin.
#[test]
fn role_parsing_defaults_to_adopter() {
    assert_eq!(Role::parse("Admin"), Role::Admin);
    assert_eq!(Role::parse("adopter"), Role::Adopter);
    assert_eq!(Role::parse("staff"), Role::Adopter);
}

/// Confirms zero is never a valid identifier.
#[test]
fn zero_is_not_a_valid_identifier() {
    assert!(PetId::from_raw(0).is_none());
    assert!(RequestId::from_raw(0).is_none());
    let id = PetId::from_raw(7).unwrap();
    assert_eq!(id.get(), 7);
    assert_eq!(id.to_string(), "7");
}

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// Confirms the date accessor strips the time component.
#[test]
fn timestamp_date_strips_time() {
    let stamp = Timestamp::from_stored("2024-05-17 09:30:00");
    assert_eq!(stamp.date(), "2024-05-17");
    let bare = Timestamp::from_stored("2024-05-17");
    assert_eq!(bare.date(), "2024-05-17");
}

/// Confirms generated stamps carry the legacy text shape.
#[test]
fn generated_timestamps_use_the_legacy_shape() {
    let stamp = Timestamp::now();
    let text = stamp.as_str();
    assert_eq!(text.len(), 19);
    assert_eq!(&text[4 ..5], "-");
    assert_eq!(&text[10 ..11], " ");
    assert_eq!(&text[13 ..14], ":");
}

// ============================================================================
// SECTION: Properties
// ============================================================================

proptest! {
    #[test]
    fn normalize_is_idempotent_over_canonical_text(raw in ".{0,24}") {
        let first = RequestStatus::normalize(&raw);
        prop_assert_eq!(RequestStatus::normalize(first.as_str()), first);
    }

    #[test]
    fn category_canonical_text_round_trips(raw in ".{0,24}") {
        let category = PetCategory::parse(&raw);
        prop_assert_eq!(PetCategory::parse(category.as_str()), category);
    }

    #[test]
    fn pet_status_text_round_trips(raw in "[^\\r\\n]{1,24}") {
        let status = PetStatus::parse(&raw);
        prop_assert_eq!(PetStatus::parse(status.as_str()), status.clone());
        prop_assert_eq!(status.to_string(), status.as_str());
    }

    #[test]
    fn role_round_trips(raw in ".{0,16}") {
        let role = Role::parse(&raw);
        prop_assert_eq!(Role::parse(role.as_str()), role);
    }
}
