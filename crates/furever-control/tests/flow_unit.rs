// crates/furever-control/tests/flow_unit.rs
// ============================================================================
// Module: Flow Unit Tests
// Description: End-to-end tests for adoption lifecycle flows.
// Purpose: Validate decision semantics, side-effect reporting, auth rules,
//          and photo handling over a real SQLite store.
// ============================================================================

//! ## Overview
//! Flow-level tests running against the `SQLite` store:
//! - Submission guards (availability, duplicate-pending)
//! - Approval and rejection with side-effect reporting, including a failing
//!   notifier that must not undo the decision
//! - Deletion rules for approved rows and history survival
//! - Auth: first-admin bootstrap, staged signups, OTP password reset
//! - Directory photo storage and legacy resolution

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

use std::fs;
use std::sync::Mutex;

use furever_control::AdminFlows;
use furever_control::AdminSignup;
use furever_control::AdopterFlows;
use furever_control::AuthFlows;
use furever_control::DirPhotoStore;
use furever_control::FlowError;
use furever_control::SideEffectKind;
use furever_control::StoreNotifier;
use furever_core::Account;
use furever_core::AdminUpdate;
use furever_core::DirectoryStore;
use furever_core::HistoryStore;
use furever_core::MailerError;
use furever_core::NewAdmin;
use furever_core::NewAdopter;
use furever_core::NewPet;
use furever_core::NotificationStore;
use furever_core::Notifier;
use furever_core::NotifyError;
use furever_core::OtpMailer;
use furever_core::PetCategory;
use furever_core::PetId;
use furever_core::PetStatus;
use furever_core::PetStore;
use furever_core::PhotoStore;
use furever_core::RequestStatus;
use furever_core::RequestStore;
use furever_core::Role;
use furever_store_sqlite::SqliteAdoptionStore;
use furever_store_sqlite::SqliteStoreConfig;
use furever_store_sqlite::SqliteStoreMode;
use furever_store_sqlite::SqliteSyncMode;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn open_store(dir: &TempDir) -> SqliteAdoptionStore {
    let config = SqliteStoreConfig {
        path: dir.path().join("adoption.db"),
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    };
    SqliteAdoptionStore::new(&config).expect("open store")
}

fn sample_pet(name: &str) -> NewPet {
    NewPet {
        name: name.to_string(),
        category: PetCategory::Dog,
        breed: "Aspin".to_string(),
        age: 3,
        sex: "male".to_string(),
        vaccinated: true,
        status: PetStatus::Available,
        description: None,
        photo: None,
    }
}

fn sample_adopter(email: &str) -> NewAdopter {
    NewAdopter {
        name: "Alex Reyes".to_string(),
        email: email.to_string(),
        password: "pass1234".to_string(),
        birthdate: None,
        phone: None,
        photo: None,
    }
}

fn sample_admin(name: &str, email: &str) -> NewAdmin {
    NewAdmin {
        name: name.to_string(),
        email: email.to_string(),
        password: "admin123".to_string(),
        phone: None,
        birthdate: None,
        photo: None,
        facebook_url: None,
        instagram_url: None,
    }
}

/// Notifier that always fails delivery.
struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _user_id: u64, _role: Role, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("inbox offline".to_string()))
    }

    fn notify_all_admins(&self, _message: &str) -> Result<u64, NotifyError> {
        Err(NotifyError::Delivery("inbox offline".to_string()))
    }
}

/// Mailer that records the last code instead of sending it.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Option<(String, String)>>,
}

impl RecordingMailer {
    fn last_code(&self) -> Option<String> {
        self.sent.lock().expect("mailer lock").as_ref().map(|(_, code)| code.clone())
    }
}

impl OtpMailer for RecordingMailer {
    fn send_otp(&self, email: &str, code: &str) -> Result<(), MailerError> {
        *self.sent.lock().expect("mailer lock") = Some((email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Mailer standing in for a deployment without SMTP settings.
struct UnconfiguredMailer;

impl OtpMailer for UnconfiguredMailer {
    fn send_otp(&self, _email: &str, _code: &str) -> Result<(), MailerError> {
        Err(MailerError::NotConfigured("smtp settings are missing".to_string()))
    }
}

// ============================================================================
// SECTION: Submission
// ============================================================================

#[test]
fn submit_notifies_adopter_and_admins() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let admin_id = store.create_admin(&sample_admin("Sam", "sam@example.com")).expect("admin");
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let flows = AdopterFlows::new(store.clone(), StoreNotifier::new(store.clone()));

    let outcome = flows.submit_request(adopter_id, pet_id, Some("  has a yard  ")).expect("submit");
    assert!(outcome.side_effects.iter().all(furever_control::SideEffect::succeeded));

    let adopter_inbox =
        store.notifications_for(adopter_id.get(), Role::Adopter).expect("adopter inbox");
    assert_eq!(adopter_inbox.len(), 1);
    assert!(adopter_inbox[0].message.contains("Bantay"));
    let admin_inbox = store.notifications_for(admin_id.get(), Role::Admin).expect("admin inbox");
    assert_eq!(admin_inbox.len(), 1);

    let details = store.request_details(outcome.request_id).expect("details").expect("row");
    assert_eq!(details.request.note.as_deref(), Some("has a yard"));
}

#[test]
fn submit_guards_availability_and_duplicates() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let flows = AdopterFlows::new(store.clone(), StoreNotifier::new(store.clone()));

    flows.submit_request(adopter_id, pet_id, None).expect("first submit");
    let duplicate = flows.submit_request(adopter_id, pet_id, None);
    assert!(matches!(duplicate, Err(FlowError::Conflict(_))));

    let adopted = store.add_pet(&sample_pet("Muning")).expect("second pet");
    let admin = AdminFlows::new(store.clone(), StoreNotifier::new(store.clone()));
    let request = store.submit_request(adopter_id, adopted, None).expect("raw request");
    admin.approve_request(request).expect("approve");
    let unavailable = flows.submit_request(adopter_id, adopted, None);
    assert!(matches!(unavailable, Err(FlowError::Conflict(_))));

    let missing = PetId::from_raw(404).expect("id");
    let result = flows.submit_request(adopter_id, missing, None);
    assert!(matches!(result, Err(FlowError::NotFound(_))));
}

// ============================================================================
// SECTION: Decisions
// ============================================================================

#[test]
fn approval_survives_notifier_failure() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let request_id = store.submit_request(adopter_id, pet_id, None).expect("request");
    let flows = AdminFlows::new(store.clone(), FailingNotifier);

    let outcome = flows.approve_request(request_id).expect("approve");
    assert_eq!(outcome.record.adopter_id, adopter_id);
    assert_eq!(outcome.side_effects.len(), 1);
    assert_eq!(outcome.side_effects[0].kind, SideEffectKind::DirectNotice);
    assert!(!outcome.side_effects[0].succeeded());

    // The decision committed even though the notice failed.
    let details = store.request_details(request_id).expect("details").expect("row");
    assert_eq!(details.request.status, RequestStatus::Approved);
    assert_eq!(details.pet_status, PetStatus::Adopted);
}

#[test]
fn decisions_require_a_pending_request() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let request_id = store.submit_request(adopter_id, pet_id, None).expect("request");
    let flows = AdminFlows::new(store.clone(), StoreNotifier::new(store.clone()));

    flows.reject_request(request_id, "home check pending").expect("reject");
    let approve_after = flows.approve_request(request_id);
    assert!(matches!(approve_after, Err(FlowError::Conflict(_))));
    let reject_again = flows.reject_request(request_id, "again");
    assert!(matches!(reject_again, Err(FlowError::Conflict(_))));
}

#[test]
fn rejection_accepts_an_empty_reason() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let request_id = store.submit_request(adopter_id, pet_id, None).expect("request");
    let flows = AdminFlows::new(store.clone(), StoreNotifier::new(store.clone()));

    let outcome = flows.reject_request(request_id, "   ").expect("empty reason is allowed");
    assert!(outcome.side_effects.iter().all(furever_control::SideEffect::succeeded));
    let details = store.request_details(request_id).expect("details").expect("row");
    assert_eq!(details.request.status, RequestStatus::Rejected);
    assert_eq!(details.request.note.as_deref(), Some(""));
    let inbox = store.notifications_for(adopter_id.get(), Role::Adopter).expect("inbox");
    assert!(inbox[0].message.ends_with("was rejected."));
}

#[test]
fn approved_rows_resist_deletion_until_purged() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let request_id = store.submit_request(adopter_id, pet_id, None).expect("request");
    let admin = AdminFlows::new(store.clone(), StoreNotifier::new(store.clone()));
    let adopter = AdopterFlows::new(store.clone(), StoreNotifier::new(store.clone()));
    admin.approve_request(request_id).expect("approve");

    let mine = adopter.delete_request(request_id, adopter_id);
    assert!(matches!(mine, Err(FlowError::Conflict(_))));
    let guarded = admin.delete_request(request_id);
    assert!(matches!(guarded, Err(FlowError::Conflict(_))));

    assert!(admin.purge_request(request_id).expect("purge"));
    assert!(store.request_details(request_id).expect("details").is_none());
    // The history snapshot outlives the purged row.
    let history = store.adoption_history_for(adopter_id).expect("history");
    assert_eq!(history.len(), 1);
}

#[test]
fn cancel_reports_ownership_conflicts() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let stranger = store.create_adopter(&sample_adopter("bea@example.com")).expect("stranger");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let request_id = store.submit_request(adopter_id, pet_id, None).expect("request");
    let flows = AdopterFlows::new(store.clone(), StoreNotifier::new(store.clone()));

    let not_mine = flows.cancel_request(request_id, stranger);
    assert!(matches!(not_mine, Err(FlowError::Conflict(_))));
    flows.cancel_request(request_id, adopter_id).expect("cancel");
    let again = flows.cancel_request(request_id, adopter_id);
    assert!(matches!(again, Err(FlowError::Conflict(_))));
}

// ============================================================================
// SECTION: Dashboard
// ============================================================================

#[test]
fn dashboard_buckets_requests_and_categories() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let dog = store.add_pet(&sample_pet("Bantay")).expect("dog");
    let mut cat = sample_pet("Muning");
    cat.category = PetCategory::Cat;
    store.add_pet(&cat).expect("cat");
    let request_id = store.submit_request(adopter_id, dog, None).expect("request");
    let admin = AdminFlows::new(store.clone(), StoreNotifier::new(store.clone()));
    admin.approve_request(request_id).expect("approve");

    let snapshot = admin.dashboard().expect("dashboard");
    assert_eq!(snapshot.stats.available_pets, 1);
    assert_eq!(snapshot.stats.total_adoptions, 1);
    assert_eq!(snapshot.requests_by_status.get("approved"), Some(&1));
    assert_eq!(snapshot.pets_by_category.get("Cat"), Some(&1));
    assert_eq!(snapshot.history.len(), 1);
}

// ============================================================================
// SECTION: Auth
// ============================================================================

#[test]
fn first_admin_bootstraps_then_signups_are_staged() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let auth =
        AuthFlows::new(store.clone(), StoreNotifier::new(store.clone()), RecordingMailer::default());

    let first = auth
        .signup_admin(&sample_admin("Sam", "sam@example.com"), "admin123")
        .expect("first signup");
    let AdminSignup::Bootstrapped { admin_id } = first else {
        panic!("first admin signup must bootstrap directly");
    };

    let second =
        auth.signup_admin(&sample_admin("Pat", "pat@example.com"), "admin123").expect("second");
    let AdminSignup::Staged { pending_id, side_effects } = second else {
        panic!("later admin signups must be staged");
    };
    assert!(side_effects.iter().all(furever_control::SideEffect::succeeded));
    let inbox = store.notifications_for(admin_id.get(), Role::Admin).expect("inbox");
    assert_eq!(inbox.len(), 1);
    assert!(inbox[0].message.contains("Pat"));

    // The staged admin cannot sign in until approved.
    let early = auth.login("pat@example.com", "admin123", Role::Admin);
    assert!(matches!(early, Err(FlowError::NotFound(_))));
    let admin = AdminFlows::new(store.clone(), StoreNotifier::new(store));
    admin.approve_pending_admin(pending_id).expect("promote");
    let account = auth.login("pat@example.com", "admin123", Role::Admin).expect("login");
    assert!(matches!(account, Account::Admin(_)));
}

#[test]
fn login_validates_input_and_role_scope() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let auth =
        AuthFlows::new(store.clone(), StoreNotifier::new(store), RecordingMailer::default());

    let blank = auth.login("  ", "pass1234", Role::Adopter);
    assert!(matches!(blank, Err(FlowError::Invalid(_))));
    let cross_role = auth.login("alex@example.com", "pass1234", Role::Admin);
    assert!(matches!(cross_role, Err(FlowError::NotFound(_))));
    let account = auth.login(" alex@example.com ", "pass1234", Role::Adopter).expect("login");
    assert_eq!(account.role(), Role::Adopter);
}

#[test]
fn signup_enforces_password_length() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let auth =
        AuthFlows::new(store.clone(), StoreNotifier::new(store), RecordingMailer::default());
    let mut adopter = sample_adopter("alex@example.com");
    adopter.password = "short".to_string();
    let result = auth.signup_adopter(&adopter, "short");
    assert!(matches!(result, Err(FlowError::Invalid(_))));
    adopter.password = "pass1234".to_string();
    let mismatched = auth.signup_adopter(&adopter, "pass5678");
    assert!(matches!(mismatched, Err(FlowError::Invalid(_))));
    auth.signup_adopter(&adopter, "pass1234").expect("valid signup");
}

#[test]
fn otp_reset_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let mailer = RecordingMailer::default();
    let auth = AuthFlows::new(store.clone(), StoreNotifier::new(store), &mailer);

    auth.request_password_reset("alex@example.com", Role::Adopter).expect("request");
    let code = mailer.last_code().expect("code mailed");
    assert_eq!(code.len(), 6);

    let wrong = auth.reset_password("alex@example.com", Role::Adopter, "000000a", "newpass1");
    assert!(matches!(wrong, Err(FlowError::Invalid(_))));
    // A code issued for one role cannot reset the other role's account.
    let cross_role = auth.reset_password("alex@example.com", Role::Admin, &code, "newpass1");
    assert!(matches!(cross_role, Err(FlowError::Invalid(_))));
    auth.reset_password("alex@example.com", Role::Adopter, &code, "newpass1").expect("reset");
    // Codes are single-use.
    let reused = auth.reset_password("alex@example.com", Role::Adopter, &code, "newpass2");
    assert!(matches!(reused, Err(FlowError::Invalid(_))));

    let account = auth.login("alex@example.com", "newpass1", Role::Adopter).expect("login");
    assert_eq!(account.role(), Role::Adopter);
}

#[test]
fn unconfigured_mailer_blocks_reset_requests() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let auth = AuthFlows::new(store.clone(), StoreNotifier::new(store), UnconfiguredMailer);
    let result = auth.request_password_reset("alex@example.com", Role::Adopter);
    assert!(matches!(result, Err(FlowError::Mailer(MailerError::NotConfigured(_)))));
}

#[test]
fn admin_profile_updates_and_deletion() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let admin_id = store.create_admin(&sample_admin("Sam", "sam@example.com")).expect("admin");
    let admin = AdminFlows::new(store.clone(), StoreNotifier::new(store));

    let update = AdminUpdate {
        name: "Samira".to_string(),
        age: Some(41),
        email: "samira@example.com".to_string(),
        phone: Some("555-0100".to_string()),
        birthdate: None,
        photo: None,
        facebook_url: None,
        instagram_url: None,
    };
    let blank = AdminUpdate { name: "  ".to_string(), ..update.clone() };
    assert!(matches!(admin.update_profile(admin_id, &blank), Err(FlowError::Invalid(_))));

    admin.update_profile(admin_id, &update).expect("update");
    let profiles = admin.admins().expect("profiles");
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "Samira");
    assert_eq!(profiles[0].email, "samira@example.com");

    admin.delete_account(admin_id).expect("delete");
    assert!(admin.admins().expect("profiles").is_empty());
}

// ============================================================================
// SECTION: Photos
// ============================================================================

#[test]
fn photo_store_copies_removes_and_resolves() {
    let dir = TempDir::new().expect("tempdir");
    let images = dir.path().join("images");
    let photos = DirPhotoStore::new(&images);

    let source = dir.path().join("bantay.jpg");
    fs::write(&source, b"jpeg bytes").expect("write source");
    let reference = photos.store(&source).expect("store photo");
    assert_eq!(reference, "bantay.jpg");
    assert!(images.join("bantay.jpg").is_file());

    let resolved = photos.resolve(Some(&reference), None, "Bantay").expect("resolved");
    assert_eq!(resolved, images.join("bantay.jpg"));
    // A record without references still resolves by name guess.
    let guessed = photos.resolve(None, None, "Bantay").expect("guessed");
    assert_eq!(guessed, images.join("bantay.jpg"));

    photos.remove(&reference);
    assert!(!images.join("bantay.jpg").exists());
    assert!(photos.resolve(Some(&reference), None, "Bantay").is_none());

    let missing = photos.store(&dir.path().join("ghost.png"));
    assert!(missing.is_err());
}

#[test]
fn pet_deletion_reports_photo_cleanup() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let images = dir.path().join("images");
    let photos = DirPhotoStore::new(&images);
    let source = dir.path().join("bantay.jpg");
    fs::write(&source, b"jpeg bytes").expect("write source");
    let reference = photos.store(&source).expect("store photo");

    let mut pet = sample_pet("Bantay");
    pet.photo = Some(reference);
    let pet_id = store.add_pet(&pet).expect("pet");
    let admin = AdminFlows::new(store.clone(), StoreNotifier::new(store.clone()));
    let outcome = admin.delete_pet(pet_id, &photos).expect("delete");

    assert_eq!(outcome.side_effects.len(), 1);
    assert_eq!(outcome.side_effects[0].kind, SideEffectKind::PhotoCleanup);
    assert!(!images.join("bantay.jpg").exists());
    assert!(store.pet(pet_id).expect("lookup").is_none());
}
