// crates/furever-store-sqlite/tests/sqlite_store_unit.rs
// ============================================================================
// Module: SQLite Adoption Store Unit Tests
// Description: Targeted integrity tests for the SQLite adoption store.
// Purpose: Validate path checks, schema versioning, legacy upgrade, request
//          lifecycle transitions, cascades, and projections.
// ============================================================================

//! ## Overview
//! Unit-level tests for the `SQLite` adoption store:
//! - Path validation and schema version handling
//! - One-time legacy upgrade (column renames, role decoding, history dedupe)
//! - Request lifecycle: submit, approve, reject, cancel, delete
//! - Deletion cascades for pets and adopters
//! - Notifications, accounts, pending admins, and aggregate stats

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

use std::path::PathBuf;

use furever_core::AdopterId;
use furever_core::DirectoryStore;
use furever_core::HistoryStore;
use furever_core::NewAdmin;
use furever_core::NewAdopter;
use furever_core::NewPet;
use furever_core::NotificationStore;
use furever_core::PendingAdminStore;
use furever_core::PetCategory;
use furever_core::PetId;
use furever_core::PetStatus;
use furever_core::PetStore;
use furever_core::PetUpdate;
use furever_core::RequestId;
use furever_core::RequestStatus;
use furever_core::RequestStore;
use furever_core::Role;
use furever_core::StatsStore;
use furever_core::StoreError;
use furever_store_sqlite::SCHEMA_VERSION;
use furever_store_sqlite::SqliteAdoptionStore;
use furever_store_sqlite::SqliteStoreConfig;
use furever_store_sqlite::SqliteStoreError;
use furever_store_sqlite::SqliteStoreMode;
use furever_store_sqlite::SqliteSyncMode;
use rusqlite::Connection;
use rusqlite::params;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const fn config_for_path(path: PathBuf) -> SqliteStoreConfig {
    SqliteStoreConfig {
        path,
        busy_timeout_ms: 1_000,
        journal_mode: SqliteStoreMode::Wal,
        sync_mode: SqliteSyncMode::Full,
    }
}

fn open_store(dir: &TempDir) -> SqliteAdoptionStore {
    let config = config_for_path(dir.path().join("adoption.db"));
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
        description: Some("friendly".to_string()),
        photo: None,
    }
}

fn sample_adopter(email: &str) -> NewAdopter {
    NewAdopter {
        name: "Alex Reyes".to_string(),
        email: email.to_string(),
        password: "pass1234".to_string(),
        birthdate: Some("1999-04-12".to_string()),
        phone: Some("09171234567".to_string()),
        photo: None,
    }
}

fn sample_admin(email: &str) -> NewAdmin {
    NewAdmin {
        name: "Sam Cruz".to_string(),
        email: email.to_string(),
        password: "admin123".to_string(),
        phone: None,
        birthdate: None,
        photo: None,
        facebook_url: None,
        instagram_url: None,
    }
}

fn seeded_request(store: &SqliteAdoptionStore) -> (AdopterId, PetId, RequestId) {
    let adopter_id = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let request_id =
        store.submit_request(adopter_id, pet_id, Some("has a backyard")).expect("request");
    (adopter_id, pet_id, request_id)
}

// ============================================================================
// SECTION: Open + Schema
// ============================================================================

#[test]
fn rejects_directory_path() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_for_path(dir.path().to_path_buf());
    let result = SqliteAdoptionStore::new(&config);
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
}

#[test]
fn fresh_open_stamps_schema_version_and_reopens() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("adoption.db");
    {
        let config = config_for_path(path.clone());
        let _store = SqliteAdoptionStore::new(&config).expect("first open");
    }
    let version: i64 = {
        let connection = Connection::open(&path).expect("raw open");
        connection
            .query_row("SELECT version FROM store_meta", params![], |row| row.get(0))
            .expect("version row")
    };
    assert_eq!(version, SCHEMA_VERSION);
    let config = config_for_path(path);
    let _store = SqliteAdoptionStore::new(&config).expect("reopen");
}

#[test]
fn unknown_schema_version_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("adoption.db");
    {
        let config = config_for_path(path.clone());
        let _store = SqliteAdoptionStore::new(&config).expect("first open");
    }
    {
        let connection = Connection::open(&path).expect("raw open");
        connection.execute("UPDATE store_meta SET version = 99", params![]).expect("bump version");
    }
    let config = config_for_path(path);
    let result = SqliteAdoptionStore::new(&config);
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch(_))));
}

// ============================================================================
// SECTION: Legacy Upgrade
// ============================================================================

fn write_legacy_database(path: &PathBuf) {
    let connection = Connection::open(path).expect("raw open");
    connection
        .execute_batch(
            "CREATE TABLE pets (
                pet_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                breed TEXT NOT NULL,
                age INTEGER NOT NULL,
                sex TEXT NOT NULL,
                vaccinated TEXT,
                status TEXT NOT NULL DEFAULT 'available',
                description TEXT,
                photo_path TEXT
            );
            CREATE TABLE users (
                users_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                password TEXT NOT NULL,
                role TEXT DEFAULT 'adopter',
                age INTEGER,
                birthdate TEXT,
                phone_number TEXT,
                photo_path TEXT
            );
            CREATE TABLE admin (
                admin_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                password TEXT NOT NULL,
                age INTEGER,
                birthdate TEXT,
                phone_number TEXT,
                photo_path TEXT
            );
            CREATE TABLE adoption_requests (
                id INTEGER PRIMARY KEY,
                adopter_id INTEGER NOT NULL,
                pet_id INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                reason TEXT
            );
            CREATE TABLE adoption_history (
                id INTEGER PRIMARY KEY,
                adopter_id INTEGER,
                pet_id INTEGER,
                pet_name TEXT,
                category TEXT,
                breed TEXT,
                sex TEXT,
                adopted_at TEXT,
                adopter_name TEXT
            );
            CREATE TABLE notifications (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                message TEXT NOT NULL,
                date TEXT NOT NULL
            );
            INSERT INTO pets (name, category, breed, age, sex, vaccinated, status)
                VALUES ('Bantay', 'dog', 'Aspin', 3, 'male', 'yes', 'adopted');
            INSERT INTO users (name, email, password)
                VALUES ('Alex Reyes', 'alex@example.com', 'pass1234');
            INSERT INTO admin (name, email, password)
                VALUES ('Sam Cruz', 'sam@example.com', 'admin123');
            INSERT INTO adoption_requests (adopter_id, pet_id, status, created_at)
                VALUES (1, 1, 'Approved', '2024-01-05 10:00:00');
            INSERT INTO adoption_history
                (adopter_id, pet_id, pet_name, category, breed, sex, adopted_at, adopter_name)
                VALUES (1, 1, 'Bantay', 'dog', 'Aspin', 'male', '2024-01-05 10:05:00', 'Alex');
            INSERT INTO adoption_history
                (adopter_id, pet_id, pet_name, category, breed, sex, adopted_at, adopter_name)
                VALUES (1, 1, 'Bantay', 'dog', 'Aspin', 'male', '2024-01-05 10:06:00', 'Alex');
            INSERT INTO notifications (user_id, message, date)
                VALUES (1, 'Welcome!', '2024-01-01 09:00:00');
            INSERT INTO notifications (user_id, message, date)
                VALUES (1000001, 'New request', '2024-01-02 09:00:00');",
        )
        .expect("legacy schema");
}

#[test]
fn legacy_database_is_upgraded_in_place() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("adoption.db");
    write_legacy_database(&path);

    let config = config_for_path(path.clone());
    let store = SqliteAdoptionStore::new(&config).expect("upgrade open");

    // Offset-encoded admin recipients are decoded to (id, role) pairs.
    let admin_inbox = store.notifications_for(1, Role::Admin).expect("admin inbox");
    assert_eq!(admin_inbox.len(), 1);
    assert_eq!(admin_inbox[0].message, "New request");
    assert!(!admin_inbox[0].is_read);
    let adopter_inbox = store.notifications_for(1, Role::Adopter).expect("adopter inbox");
    assert_eq!(adopter_inbox.len(), 1);
    assert_eq!(adopter_inbox[0].message, "Welcome!");

    // Duplicate history snapshots collapse to one entry per (adopter, pet).
    let history = store.adoption_history().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].pet_name, "Bantay");

    // The renamed information column accepts new writes.
    let adopter_id = AdopterId::from_raw(1).expect("adopter id");
    let pet = store.add_pet(&sample_pet("Muning")).expect("second pet");
    let request_id = store.submit_request(adopter_id, pet, None).expect("new request");
    store.reject_request(request_id, "home check pending").expect("reject");
    let details = store.request_details(request_id).expect("details").expect("row");
    assert_eq!(details.request.status, RequestStatus::Rejected);
    assert_eq!(details.request.note.as_deref(), Some("home check pending"));

    drop(store);
    // A second open of the upgraded database is a no-op.
    let config = config_for_path(path);
    let _store = SqliteAdoptionStore::new(&config).expect("reopen after upgrade");
}

// ============================================================================
// SECTION: Pets
// ============================================================================

#[test]
fn pet_update_keeps_unset_fields() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let update = PetUpdate {
        name: "Bantay Jr".to_string(),
        breed: "Aspin".to_string(),
        age: 4,
        sex: "male".to_string(),
        description: None,
        photo: None,
        category: None,
        vaccinated: None,
        status: None,
    };
    store.update_pet(pet_id, &update).expect("update");
    let pet = store.pet(pet_id).expect("lookup").expect("row");
    assert_eq!(pet.name, "Bantay Jr");
    assert_eq!(pet.category, PetCategory::Dog);
    assert!(pet.vaccinated);
    assert_eq!(pet.status, PetStatus::Available);
}

#[test]
fn pet_update_missing_row_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let update = PetUpdate {
        name: "Ghost".to_string(),
        breed: "Aspin".to_string(),
        age: 1,
        sex: "female".to_string(),
        description: None,
        photo: None,
        category: None,
        vaccinated: None,
        status: None,
    };
    let missing = PetId::from_raw(42).expect("id");
    let result = store.update_pet(missing, &update);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn delete_pet_purges_pending_requests_but_keeps_approved() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let adopter = store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    let other = store.create_adopter(&sample_adopter("bea@example.com")).expect("other");
    let pet_id = store.add_pet(&sample_pet("Bantay")).expect("pet");
    let approved = store.submit_request(adopter, pet_id, None).expect("first request");
    store.approve_request(approved).expect("approve");
    let pending = store.submit_request(other, pet_id, None).expect("second request");

    store.delete_pet(pet_id).expect("delete pet");

    assert!(store.pet(pet_id).expect("lookup").is_none());
    assert!(store.request_details(pending).expect("pending lookup").is_none());
    // The approved row survives for history but its pet join is gone.
    let remaining = store.adopter_requests(adopter).expect("remaining");
    assert!(remaining.is_empty());
    let raw: i64 = {
        let connection = Connection::open(dir.path().join("adoption.db")).expect("raw open");
        connection
            .query_row(
                "SELECT COUNT(*) FROM adoption_requests WHERE status = 'approved'",
                params![],
                |row| row.get(0),
            )
            .expect("count")
    };
    assert_eq!(raw, 1);
}

// ============================================================================
// SECTION: Request Lifecycle
// ============================================================================

#[test]
fn approve_marks_pet_adopted_and_snapshots_history_once() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, pet_id, request_id) = seeded_request(&store);

    let record = store.approve_request(request_id).expect("approve");
    assert_eq!(record.adopter_id, adopter_id);
    assert_eq!(record.pet_id, pet_id);

    let pet = store.pet(pet_id).expect("lookup").expect("row");
    assert_eq!(pet.status, PetStatus::Adopted);

    let history = store.adoption_history_for(adopter_id).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].pet_name, "Bantay");
    assert_eq!(history[0].adopter_email.as_deref(), Some("alex@example.com"));

    // Approving again re-runs the update but never duplicates the snapshot.
    store.approve_request(request_id).expect("re-approve");
    let history = store.adoption_history_for(adopter_id).expect("history again");
    assert_eq!(history.len(), 1);
}

#[test]
fn approve_missing_request_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let missing = RequestId::from_raw(7).expect("id");
    let result = store.approve_request(missing);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn reject_requires_pending_status() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (_, _, request_id) = seeded_request(&store);

    store.reject_request(request_id, "not a match").expect("reject");
    let details = store.request_details(request_id).expect("details").expect("row");
    assert_eq!(details.request.status, RequestStatus::Rejected);
    assert_eq!(details.request.note.as_deref(), Some("not a match"));

    let again = store.reject_request(request_id, "again");
    assert!(matches!(again, Err(StoreError::Conflict(_))));
    let missing = RequestId::from_raw(99).expect("id");
    let result = store.reject_request(missing, "nope");
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn cancel_enforces_ownership_and_pending_status() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, _, request_id) = seeded_request(&store);
    let stranger = AdopterId::from_raw(999).expect("id");

    assert!(!store.cancel_request(request_id, Some(stranger)).expect("wrong owner"));
    assert!(store.cancel_request(request_id, Some(adopter_id)).expect("owner cancel"));
    // Already cancelled rows report false rather than erroring.
    assert!(!store.cancel_request(request_id, Some(adopter_id)).expect("second cancel"));
}

#[test]
fn delete_request_excludes_approved_unless_allowed() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, _, request_id) = seeded_request(&store);
    store.approve_request(request_id).expect("approve");

    assert!(!store.delete_request(request_id, Some(adopter_id), false).expect("guarded delete"));
    assert!(store.delete_request(request_id, None, true).expect("override delete"));
    assert!(store.request_details(request_id).expect("details").is_none());
    // History snapshots survive request deletion.
    let history = store.adoption_history_for(adopter_id).expect("history");
    assert_eq!(history.len(), 1);
}

#[test]
fn has_pending_request_tracks_only_pending_rows() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, pet_id, request_id) = seeded_request(&store);
    assert!(store.has_pending_request(adopter_id, pet_id).expect("pending"));
    store.reject_request(request_id, "slow down").expect("reject");
    assert!(!store.has_pending_request(adopter_id, pet_id).expect("after reject"));
}

// ============================================================================
// SECTION: History Backfill
// ============================================================================

#[test]
fn empty_history_backfills_from_approved_requests() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, _, request_id) = seeded_request(&store);
    store.approve_request(request_id).expect("approve");
    {
        let connection = Connection::open(dir.path().join("adoption.db")).expect("raw open");
        connection.execute("DELETE FROM adoption_history", params![]).expect("clear history");
    }
    let history = store.adoption_history().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].pet_name, "Bantay");
    assert_eq!(history[0].adopter_id, Some(adopter_id));
}

// ============================================================================
// SECTION: Notifications
// ============================================================================

#[test]
fn notifications_round_trip_per_recipient() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let first = store.create_notification(1, Role::Adopter, "first").expect("first");
    store.create_notification(1, Role::Admin, "for the admin").expect("admin note");
    store.create_notification(2, Role::Adopter, "other adopter").expect("other");

    let inbox = store.notifications_for(1, Role::Adopter).expect("inbox");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].message, "first");
    assert!(!inbox[0].is_read);

    store.mark_notification_read(first).expect("mark read");
    store.mark_notification_read(first).expect("mark read again");
    let inbox = store.notifications_for(1, Role::Adopter).expect("inbox");
    assert!(inbox[0].is_read);

    store.clear_notifications_for(1, Role::Adopter).expect("clear");
    assert!(store.notifications_for(1, Role::Adopter).expect("empty").is_empty());
    // Other recipients keep their rows.
    assert_eq!(store.notifications_for(1, Role::Admin).expect("admin inbox").len(), 1);
    assert_eq!(store.notifications_for(2, Role::Adopter).expect("other inbox").len(), 1);

    let remaining = store.notifications_for(2, Role::Adopter).expect("other inbox")[0].id;
    store.delete_notification(remaining).expect("delete one");
    assert!(store.notifications_for(2, Role::Adopter).expect("emptied").is_empty());
}

// ============================================================================
// SECTION: Accounts
// ============================================================================

#[test]
fn duplicate_adopter_email_is_a_conflict() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    store.create_adopter(&sample_adopter("alex@example.com")).expect("first");
    let result = store.create_adopter(&sample_adopter("alex@example.com"));
    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

#[test]
fn authenticate_checks_credentials_per_role() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    store.create_admin(&sample_admin("sam@example.com")).expect("admin");

    let hit = store
        .authenticate("alex@example.com", "pass1234", Role::Adopter)
        .expect("auth query");
    assert!(hit.is_some_and(|account| account.role() == Role::Adopter));
    let wrong_password = store
        .authenticate("alex@example.com", "wrong", Role::Adopter)
        .expect("auth query");
    assert!(wrong_password.is_none());
    // Adopter credentials never unlock the admin table.
    let wrong_table = store
        .authenticate("alex@example.com", "pass1234", Role::Admin)
        .expect("auth query");
    assert!(wrong_table.is_none());
}

#[test]
fn password_update_reports_whether_a_row_changed() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    store.create_adopter(&sample_adopter("alex@example.com")).expect("adopter");
    assert!(
        store
            .update_password_by_email("alex@example.com", Role::Adopter, "newpass1")
            .expect("update")
    );
    assert!(
        !store
            .update_password_by_email("ghost@example.com", Role::Adopter, "newpass1")
            .expect("missing update")
    );
    let hit = store
        .authenticate("alex@example.com", "newpass1", Role::Adopter)
        .expect("auth query");
    assert!(hit.is_some());
}

#[test]
fn delete_adopter_cascades_requests() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, _, request_id) = seeded_request(&store);
    store.delete_adopter(adopter_id).expect("delete adopter");
    assert!(store.adopter(adopter_id).expect("lookup").is_none());
    assert!(store.request_details(request_id).expect("details").is_none());
}

// ============================================================================
// SECTION: Pending Admins
// ============================================================================

#[test]
fn pending_admin_promotion_moves_the_row() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let pending_id = store.create_pending_admin(&sample_admin("sam@example.com")).expect("stage");
    assert_eq!(store.pending_admins().expect("staged").len(), 1);
    assert_eq!(store.admin_count().expect("count"), 0);

    let admin_id = store.approve_pending_admin(pending_id).expect("promote");
    assert!(store.pending_admins().expect("staged").is_empty());
    assert_eq!(store.admin_count().expect("count"), 1);
    let admins = store.admin_profiles().expect("profiles");
    assert_eq!(admins[0].id, admin_id);
    assert_eq!(admins[0].email, "sam@example.com");
    // The staged password carries over.
    let hit = store.authenticate("sam@example.com", "admin123", Role::Admin).expect("auth");
    assert!(hit.is_some());

    let result = store.approve_pending_admin(pending_id);
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn decline_pending_admin_reports_removal() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let pending_id = store.create_pending_admin(&sample_admin("sam@example.com")).expect("stage");
    assert!(store.decline_pending_admin(pending_id).expect("decline"));
    assert!(!store.decline_pending_admin(pending_id).expect("second decline"));
    assert_eq!(store.admin_count().expect("count"), 0);
}

// ============================================================================
// SECTION: Stats
// ============================================================================

#[test]
fn summary_counts_follow_the_lifecycle() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);
    let (adopter_id, _, request_id) = seeded_request(&store);
    let second_pet = store.add_pet(&sample_pet("Muning")).expect("second pet");
    store.submit_request(adopter_id, second_pet, None).expect("second request");
    store.approve_request(request_id).expect("approve");

    let stats = store.summary_stats().expect("stats");
    assert_eq!(stats.available_pets, 1);
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.total_adoptions, 1);

    let breeds = store.most_adopted_breeds().expect("breeds");
    assert_eq!(breeds.len(), 1);
    assert_eq!(breeds[0].breed, "Aspin");
    assert_eq!(breeds[0].adoptions, 1);

    let trend = store.adoption_trend().expect("trend");
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].approvals, 1);
}
