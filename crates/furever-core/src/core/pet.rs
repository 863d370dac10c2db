// crates/furever-core/src/core/pet.rs
// ============================================================================
// Module: FurEver Home Pet Model
// Description: Pet records, categories, and availability statuses.
// Purpose: Provide stable pet types with lenient legacy-text parsing.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Pets are the adoptable inventory. Category and status values are stored as
//! free text in legacy databases, so both parse leniently: unknown categories
//! bucket into [`PetCategory::Other`], and unknown statuses are preserved
//! verbatim as [`PetStatus::Custom`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::PetId;

// ============================================================================
// SECTION: Category
// ============================================================================

/// Pet category bucket.
///
/// # Invariants
/// - Parsing is case-insensitive; unrecognized values bucket into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PetCategory {
    /// Dogs.
    Dog,
    /// Cats.
    Cat,
    /// Everything else (birds, rabbits, reptiles, unparsed legacy text).
    #[default]
    Other,
}

impl PetCategory {
    /// Parses a stored or user-supplied category value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dog" | "dogs" => Self::Dog,
            "cat" | "cats" => Self::Cat,
            _ => Self::Other,
        }
    }

    /// Returns the canonical stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
            Self::Other => "other",
        }
    }

    /// Returns the title-cased display bucket used by dashboard groupings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// Pet availability status.
///
/// # Invariants
/// - `Adopted` is entered only as a side effect of request approval.
/// - Unrecognized stored text round-trips unchanged through `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PetStatus {
    /// Pet is listed for adoption.
    #[default]
    Available,
    /// Pet has been adopted.
    Adopted,
    /// Free-text status carried from legacy data.
    Custom(String),
}

impl PetStatus {
    /// Parses a stored status value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Self::Available,
            "adopted" => Self::Adopted,
            _ => Self::Custom(value.to_string()),
        }
    }

    /// Returns the stored text form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Adopted => "adopted",
            Self::Custom(value) => value,
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PetStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<PetStatus> for String {
    fn from(value: PetStatus) -> Self {
        value.as_str().to_string()
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// A pet row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet identifier.
    pub id: PetId,
    /// Display name.
    pub name: String,
    /// Category bucket.
    pub category: PetCategory,
    /// Breed description.
    pub breed: String,
    /// Age in years.
    pub age: u32,
    /// Sex as free text (`Male` / `Female` in practice).
    pub sex: String,
    /// Vaccination flag.
    pub vaccinated: bool,
    /// Availability status.
    pub status: PetStatus,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Stored photo reference (a file name under the images directory or a path).
    pub photo: Option<String>,
}

/// Payload for inserting a new pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPet {
    /// Display name.
    pub name: String,
    /// Category bucket.
    pub category: PetCategory,
    /// Breed description.
    pub breed: String,
    /// Age in years.
    pub age: u32,
    /// Sex as free text.
    pub sex: String,
    /// Vaccination flag.
    pub vaccinated: bool,
    /// Availability status (defaults to `available` at the boundary).
    pub status: PetStatus,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
}

/// Field updates applied to an existing pet.
///
/// # Invariants
/// - `category`, `vaccinated`, and `status` keep their stored values when
///   `None`; all other fields overwrite unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetUpdate {
    /// Display name.
    pub name: String,
    /// Breed description.
    pub breed: String,
    /// Age in years.
    pub age: u32,
    /// Sex as free text.
    pub sex: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Stored photo reference.
    pub photo: Option<String>,
    /// Category replacement, when changing.
    pub category: Option<PetCategory>,
    /// Vaccination replacement, when changing.
    pub vaccinated: Option<bool>,
    /// Status replacement, when changing.
    pub status: Option<PetStatus>,
}
