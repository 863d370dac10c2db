// crates/furever-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Adoption Store
// Description: Durable adoption store backed by SQLite WAL.
// Purpose: Persist pets, accounts, requests, history, and notifications.
// Dependencies: furever-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements every store capability trait from `furever-core`
//! over one `SQLite` database file. A single write connection is shared
//! behind a mutex; multi-statement operations (approval, account deletion,
//! pending-admin promotion) run inside one transaction.
//!
//! Databases created by the legacy application are upgraded once at open:
//! column probes and lazy `ALTER`s are replaced by a deterministic, idempotent
//! migration recorded in `store_meta`. After open, no query branches on
//! schema shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::num::NonZeroU64;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use furever_core::Account;
use furever_core::AdminId;
use furever_core::AdminProfile;
use furever_core::AdminUpdate;
use furever_core::AdopterId;
use furever_core::AdopterProfile;
use furever_core::AdopterUpdate;
use furever_core::AdoptionHistoryEntry;
use furever_core::AdoptionRequest;
use furever_core::ApprovalRecord;
use furever_core::BreedCount;
use furever_core::DirectoryStore;
use furever_core::HistoryStore;
use furever_core::NewAdmin;
use furever_core::NewAdopter;
use furever_core::NewPet;
use furever_core::Notification;
use furever_core::NotificationId;
use furever_core::NotificationStore;
use furever_core::PendingAdmin;
use furever_core::PendingAdminId;
use furever_core::PendingAdminStore;
use furever_core::Pet;
use furever_core::PetCategory;
use furever_core::PetId;
use furever_core::PetStatus;
use furever_core::PetStore;
use furever_core::PetUpdate;
use furever_core::RequestDetails;
use furever_core::RequestId;
use furever_core::RequestStatus;
use furever_core::RequestStore;
use furever_core::Role;
use furever_core::StatsStore;
use furever_core::StoreError;
use furever_core::SummaryStats;
use furever_core::Timestamp;
use furever_core::TrendPoint;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
///
/// Databases without a `store_meta` table are either empty (created fresh at
/// this version) or were written by the legacy application (upgraded in
/// place, then stamped with this version).
pub const SCHEMA_VERSION: i64 = 2;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Legacy admin-id offset used by pre-role notification schemas.
const LEGACY_ADMIN_ID_OFFSET: i64 = 1_000_000;

/// Join selecting one request with its adopter and pet display fields.
const REQUEST_DETAILS_SELECT: &str = "SELECT ar.id, ar.adopter_id, ar.pet_id, ar.status, \
                                      ar.created_at, ar.information, u.name, u.email, \
                                      u.phone_number, u.photo_path, p.name, p.category, p.breed, \
                                      p.age, p.sex, p.vaccinated, p.status, p.photo_path FROM \
                                      adoption_requests ar JOIN users u ON ar.adopter_id = \
                                      u.users_id JOIN pets p ON ar.pet_id = p.pet_id";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` adoption store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the legacy default database file name.
fn default_store_path() -> PathBuf {
    PathBuf::from("fureverhome.db")
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding credentials or message bodies.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data or configuration.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps a `rusqlite` error into a store error.
fn db_err(err: &rusqlite::Error) -> StoreError {
    StoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed adoption store with WAL support.
///
/// # Invariants
/// - Connection access is serialized through a mutex.
/// - The schema is upgraded, when needed, exactly once at open.
#[derive(Clone)]
pub struct SqliteAdoptionStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteAdoptionStore {
    /// Opens (and, when needed, creates or upgrades) the store at the
    /// configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid, the database
    /// cannot be opened, or the schema version is unsupported.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(config)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the shared connection.
    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Io("sqlite connection mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Identifier Conversion
// ============================================================================

/// Converts a stored rowid into a non-zero identifier value.
fn decode_id(raw: i64, what: &str) -> Result<NonZeroU64, StoreError> {
    let value = u64::try_from(raw)
        .map_err(|_| StoreError::Invalid(format!("{what} out of range: {raw}")))?;
    NonZeroU64::new(value).ok_or_else(|| StoreError::Invalid(format!("{what} must be >= 1")))
}

/// Converts a raw identifier into a parameter value.
fn encode_id(value: u64, what: &str) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::Invalid(format!("{what} out of range: {value}")))
}

/// Converts a stored age column into years.
fn decode_age(raw: Option<i64>, what: &str) -> Result<Option<u32>, StoreError> {
    raw.map(|value| {
        u32::try_from(value).map_err(|_| StoreError::Invalid(format!("{what} out of range: {value}")))
    })
    .transpose()
}

/// Converts a stored count into an unsigned value.
fn decode_count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or_default()
}

/// Parses the legacy vaccinated column (`yes`/`no`, but also truthy text).
fn vaccinated_from(value: Option<&str>) -> bool {
    value.is_some_and(|text| {
        matches!(text.trim().to_ascii_lowercase().as_str(), "yes" | "true" | "1")
    })
}

/// Returns the stored vaccinated text for a flag.
const fn vaccinated_label(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

// ============================================================================
// SECTION: Row Mapping
// ============================================================================

/// Raw pet row as read from `SQLite`.
struct PetRow {
    /// Rowid.
    id: i64,
    /// Name column.
    name: String,
    /// Category text.
    category: String,
    /// Breed text.
    breed: String,
    /// Age column.
    age: i64,
    /// Sex text.
    sex: String,
    /// Vaccinated text.
    vaccinated: Option<String>,
    /// Status text.
    status: String,
    /// Description column.
    description: Option<String>,
    /// Photo reference column.
    photo: Option<String>,
}

impl PetRow {
    /// Reads a pet row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            breed: row.get(3)?,
            age: row.get(4)?,
            sex: row.get(5)?,
            vaccinated: row.get(6)?,
            status: row.get(7)?,
            description: row.get(8)?,
            photo: row.get(9)?,
        })
    }

    /// Converts the raw row into a domain record.
    fn into_pet(self) -> Result<Pet, StoreError> {
        Ok(Pet {
            id: PetId::new(decode_id(self.id, "pet_id")?),
            name: self.name,
            category: PetCategory::parse(&self.category),
            breed: self.breed,
            age: u32::try_from(self.age)
                .map_err(|_| StoreError::Invalid(format!("pet age out of range: {}", self.age)))?,
            sex: self.sex,
            vaccinated: vaccinated_from(self.vaccinated.as_deref()),
            status: PetStatus::parse(&self.status),
            description: self.description,
            photo: self.photo,
        })
    }
}

/// Raw joined request row as read from `SQLite`.
struct RequestRow {
    /// Request rowid.
    id: i64,
    /// Adopter rowid.
    adopter_id: i64,
    /// Pet rowid.
    pet_id: i64,
    /// Status text.
    status: String,
    /// Creation stamp.
    created_at: String,
    /// Note or rejection reason.
    note: Option<String>,
    /// Adopter name.
    adopter_name: String,
    /// Adopter email.
    adopter_email: String,
    /// Adopter phone.
    adopter_phone: Option<String>,
    /// Adopter photo reference.
    adopter_photo: Option<String>,
    /// Pet name.
    pet_name: String,
    /// Pet category text.
    category: String,
    /// Pet breed.
    breed: String,
    /// Pet age.
    age: i64,
    /// Pet sex.
    sex: String,
    /// Pet vaccinated text.
    vaccinated: Option<String>,
    /// Pet status text.
    pet_status: String,
    /// Pet photo reference.
    pet_photo: Option<String>,
}

impl RequestRow {
    /// Reads a joined request row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            adopter_id: row.get(1)?,
            pet_id: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
            note: row.get(5)?,
            adopter_name: row.get(6)?,
            adopter_email: row.get(7)?,
            adopter_phone: row.get(8)?,
            adopter_photo: row.get(9)?,
            pet_name: row.get(10)?,
            category: row.get(11)?,
            breed: row.get(12)?,
            age: row.get(13)?,
            sex: row.get(14)?,
            vaccinated: row.get(15)?,
            pet_status: row.get(16)?,
            pet_photo: row.get(17)?,
        })
    }

    /// Converts the raw row into a display record.
    fn into_details(self) -> Result<RequestDetails, StoreError> {
        Ok(RequestDetails {
            request: AdoptionRequest {
                id: RequestId::new(decode_id(self.id, "request_id")?),
                adopter_id: AdopterId::new(decode_id(self.adopter_id, "adopter_id")?),
                pet_id: PetId::new(decode_id(self.pet_id, "pet_id")?),
                status: RequestStatus::normalize(&self.status),
                created_at: Timestamp::from_stored(self.created_at),
                note: self.note,
            },
            adopter_name: self.adopter_name,
            adopter_email: self.adopter_email,
            adopter_phone: self.adopter_phone,
            adopter_photo: self.adopter_photo,
            pet_name: self.pet_name,
            category: PetCategory::parse(&self.category),
            breed: self.breed,
            age: u32::try_from(self.age)
                .map_err(|_| StoreError::Invalid(format!("pet age out of range: {}", self.age)))?,
            sex: self.sex,
            vaccinated: vaccinated_from(self.vaccinated.as_deref()),
            pet_status: PetStatus::parse(&self.pet_status),
            pet_photo: self.pet_photo,
        })
    }
}

/// Raw history row as read from `SQLite`.
struct HistoryRow {
    /// Adopter rowid, when recorded.
    adopter_id: Option<i64>,
    /// Pet rowid, when recorded.
    pet_id: Option<i64>,
    /// Coalesced pet name.
    pet_name: String,
    /// Coalesced category text.
    category: Option<String>,
    /// Coalesced breed.
    breed: Option<String>,
    /// Coalesced sex.
    sex: Option<String>,
    /// Adoption stamp.
    adopted_at: Option<String>,
    /// Coalesced adopter name.
    adopter_name: Option<String>,
    /// Live adopter email.
    adopter_email: Option<String>,
    /// Live pet photo reference.
    pet_photo: Option<String>,
}

impl HistoryRow {
    /// Reads a history row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            adopter_id: row.get(0)?,
            pet_id: row.get(1)?,
            pet_name: row.get(2)?,
            category: row.get(3)?,
            breed: row.get(4)?,
            sex: row.get(5)?,
            adopted_at: row.get(6)?,
            adopter_name: row.get(7)?,
            adopter_email: row.get(8)?,
            pet_photo: row.get(9)?,
        })
    }

    /// Converts the raw row into a history entry.
    fn into_entry(self) -> Result<AdoptionHistoryEntry, StoreError> {
        let adopter_id = self
            .adopter_id
            .map(|raw| decode_id(raw, "adopter_id").map(AdopterId::new))
            .transpose()?;
        let pet_id =
            self.pet_id.map(|raw| decode_id(raw, "pet_id").map(PetId::new)).transpose()?;
        Ok(AdoptionHistoryEntry {
            adopter_id,
            pet_id,
            pet_name: self.pet_name,
            category: self.category.as_deref().map(PetCategory::parse),
            breed: self.breed,
            sex: self.sex,
            adopted_at: self.adopted_at.map(Timestamp::from_stored),
            adopter_name: self.adopter_name,
            adopter_email: self.adopter_email,
            pet_photo: self.pet_photo,
        })
    }
}

/// Raw notification row as read from `SQLite`.
struct NotificationRow {
    /// Rowid.
    id: i64,
    /// Recipient rowid.
    user_id: i64,
    /// Role text.
    role: String,
    /// Message body.
    message: String,
    /// Creation stamp.
    created_at: String,
    /// Read flag.
    is_read: i64,
}

impl NotificationRow {
    /// Reads a notification row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            role: row.get(2)?,
            message: row.get(3)?,
            created_at: row.get(4)?,
            is_read: row.get(5)?,
        })
    }

    /// Converts the raw row into a notification record.
    fn into_notification(self) -> Result<Notification, StoreError> {
        Ok(Notification {
            id: NotificationId::new(decode_id(self.id, "notification_id")?),
            user_id: u64::try_from(self.user_id).map_err(|_| {
                StoreError::Invalid(format!("notification user_id out of range: {}", self.user_id))
            })?,
            role: Role::parse(&self.role),
            message: self.message,
            created_at: Timestamp::from_stored(self.created_at),
            is_read: self.is_read != 0,
        })
    }
}

/// Raw admin row as read from `SQLite`.
struct AdminRow {
    /// Rowid.
    id: i64,
    /// Name column.
    name: String,
    /// Email column.
    email: String,
    /// Age column.
    age: Option<i64>,
    /// Birthdate column.
    birthdate: Option<String>,
    /// Phone column.
    phone: Option<String>,
    /// Photo reference column.
    photo: Option<String>,
    /// Facebook link column.
    facebook_url: Option<String>,
    /// Instagram link column.
    instagram_url: Option<String>,
}

impl AdminRow {
    /// Reads an admin row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            age: row.get(3)?,
            birthdate: row.get(4)?,
            phone: row.get(5)?,
            photo: row.get(6)?,
            facebook_url: row.get(7)?,
            instagram_url: row.get(8)?,
        })
    }

    /// Converts the raw row into an admin profile.
    fn into_profile(self) -> Result<AdminProfile, StoreError> {
        Ok(AdminProfile {
            id: AdminId::new(decode_id(self.id, "admin_id")?),
            name: self.name,
            email: self.email,
            age: decode_age(self.age, "admin age")?,
            birthdate: self.birthdate,
            phone: self.phone,
            photo: self.photo,
            facebook_url: self.facebook_url,
            instagram_url: self.instagram_url,
        })
    }
}

/// Raw adopter row as read from `SQLite`.
struct AdopterRow {
    /// Rowid.
    id: i64,
    /// Name column.
    name: String,
    /// Email column.
    email: String,
    /// Age column.
    age: Option<i64>,
    /// Birthdate column.
    birthdate: Option<String>,
    /// Phone column.
    phone: Option<String>,
    /// Photo reference column.
    photo: Option<String>,
}

impl AdopterRow {
    /// Reads an adopter row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            age: row.get(3)?,
            birthdate: row.get(4)?,
            phone: row.get(5)?,
            photo: row.get(6)?,
        })
    }

    /// Converts the raw row into an adopter profile.
    fn into_profile(self) -> Result<AdopterProfile, StoreError> {
        Ok(AdopterProfile {
            id: AdopterId::new(decode_id(self.id, "adopter_id")?),
            name: self.name,
            email: self.email,
            age: decode_age(self.age, "adopter age")?,
            birthdate: self.birthdate,
            phone: self.phone,
            photo: self.photo,
        })
    }
}

/// Raw pending-admin row as read from `SQLite`.
struct PendingRow {
    /// Rowid.
    id: i64,
    /// Name column.
    name: String,
    /// Email column.
    email: String,
    /// Phone column.
    phone: Option<String>,
    /// Birthdate column.
    birthdate: Option<String>,
    /// Photo reference column.
    photo: Option<String>,
    /// Facebook link column.
    facebook_url: Option<String>,
    /// Instagram link column.
    instagram_url: Option<String>,
    /// Creation stamp.
    created_at: Option<String>,
}

impl PendingRow {
    /// Reads a pending-admin row from the standard column order.
    fn read(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            birthdate: row.get(4)?,
            photo: row.get(5)?,
            facebook_url: row.get(6)?,
            instagram_url: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    /// Converts the raw row into a pending-admin record.
    fn into_pending(self) -> Result<PendingAdmin, StoreError> {
        Ok(PendingAdmin {
            id: PendingAdminId::new(decode_id(self.id, "pending_id")?),
            name: self.name,
            email: self.email,
            phone: self.phone,
            birthdate: self.birthdate,
            photo: self.photo,
            facebook_url: self.facebook_url,
            instagram_url: self.instagram_url,
            created_at: Timestamp::from_stored(self.created_at.unwrap_or_default()),
        })
    }
}

// ============================================================================
// SECTION: Pet Store
// ============================================================================

impl PetStore for SqliteAdoptionStore {
    fn add_pet(&self, pet: &NewPet) -> Result<PetId, StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute(
                "INSERT INTO pets (name, category, breed, age, sex, vaccinated, status, \
                 description, photo_path) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    pet.name,
                    pet.category.as_str(),
                    pet.breed,
                    i64::from(pet.age),
                    pet.sex,
                    vaccinated_label(pet.vaccinated),
                    pet.status.as_str(),
                    pet.description,
                    pet.photo,
                ],
            )
            .map_err(|err| db_err(&err))?;
        Ok(PetId::new(decode_id(connection.last_insert_rowid(), "pet_id")?))
    }

    fn pet(&self, pet_id: PetId) -> Result<Option<Pet>, StoreError> {
        let connection = self.lock_connection()?;
        let row = connection
            .query_row(
                "SELECT pet_id, name, category, breed, age, sex, vaccinated, status, description, \
                 photo_path FROM pets WHERE pet_id = ?1",
                params![encode_id(pet_id.get(), "pet_id")?],
                PetRow::read,
            )
            .optional()
            .map_err(|err| db_err(&err))?;
        row.map(PetRow::into_pet).transpose()
    }

    fn available_pets(&self) -> Result<Vec<Pet>, StoreError> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare(
                "SELECT pet_id, name, category, breed, age, sex, vaccinated, status, description, \
                 photo_path FROM pets WHERE status = 'available' ORDER BY pet_id",
            )
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![], PetRow::read)
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(PetRow::into_pet).collect()
    }

    fn pets_by_category(&self, category: PetCategory) -> Result<Vec<Pet>, StoreError> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare(
                "SELECT pet_id, name, category, breed, age, sex, vaccinated, status, description, \
                 photo_path FROM pets WHERE LOWER(category) = ?1 AND status = 'available' ORDER \
                 BY pet_id",
            )
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![category.as_str()], PetRow::read)
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(PetRow::into_pet).collect()
    }

    fn update_pet(&self, pet_id: PetId, update: &PetUpdate) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        let changed = connection
            .execute(
                "UPDATE pets SET name = ?1, breed = ?2, age = ?3, sex = ?4, description = ?5, \
                 photo_path = ?6, category = COALESCE(?7, category), vaccinated = COALESCE(?8, \
                 vaccinated), status = COALESCE(?9, status) WHERE pet_id = ?10",
                params![
                    update.name,
                    update.breed,
                    i64::from(update.age),
                    update.sex,
                    update.description,
                    update.photo,
                    update.category.map(PetCategory::as_str),
                    update.vaccinated.map(vaccinated_label),
                    update.status.as_ref().map(PetStatus::as_str),
                    encode_id(pet_id.get(), "pet_id")?,
                ],
            )
            .map_err(|err| db_err(&err))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("pet {pet_id} does not exist")));
        }
        Ok(())
    }

    fn delete_pet(&self, pet_id: PetId) -> Result<(), StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        let raw_id = encode_id(pet_id.get(), "pet_id")?;
        // Approved rows stay behind for adoption history.
        tx.execute(
            "DELETE FROM adoption_requests WHERE pet_id = ?1 AND status != 'approved'",
            params![raw_id],
        )
        .map_err(|err| db_err(&err))?;
        let removed = tx
            .execute("DELETE FROM pets WHERE pet_id = ?1", params![raw_id])
            .map_err(|err| db_err(&err))?;
        if removed == 0 {
            return Err(StoreError::NotFound(format!("pet {pet_id} does not exist")));
        }
        tx.commit().map_err(|err| db_err(&err))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Request Store
// ============================================================================

impl RequestStore for SqliteAdoptionStore {
    fn submit_request(
        &self,
        adopter_id: AdopterId,
        pet_id: PetId,
        note: Option<&str>,
    ) -> Result<RequestId, StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute(
                "INSERT INTO adoption_requests (adopter_id, pet_id, information, status, \
                 created_at) VALUES (?1, ?2, ?3, 'pending', ?4)",
                params![
                    encode_id(adopter_id.get(), "adopter_id")?,
                    encode_id(pet_id.get(), "pet_id")?,
                    note,
                    Timestamp::now().as_str(),
                ],
            )
            .map_err(|err| db_err(&err))?;
        Ok(RequestId::new(decode_id(connection.last_insert_rowid(), "request_id")?))
    }

    fn has_pending_request(
        &self,
        adopter_id: AdopterId,
        pet_id: PetId,
    ) -> Result<bool, StoreError> {
        let connection = self.lock_connection()?;
        let row: Option<i64> = connection
            .query_row(
                "SELECT 1 FROM adoption_requests WHERE adopter_id = ?1 AND pet_id = ?2 AND status \
                 = 'pending' LIMIT 1",
                params![
                    encode_id(adopter_id.get(), "adopter_id")?,
                    encode_id(pet_id.get(), "pet_id")?
                ],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| db_err(&err))?;
        Ok(row.is_some())
    }

    fn approve_request(&self, request_id: RequestId) -> Result<ApprovalRecord, StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        let raw_id = encode_id(request_id.get(), "request_id")?;
        let pair: Option<(i64, i64)> = tx
            .query_row(
                "SELECT adopter_id, pet_id FROM adoption_requests WHERE id = ?1",
                params![raw_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|err| db_err(&err))?;
        let Some((raw_adopter, raw_pet)) = pair else {
            return Err(StoreError::NotFound(format!("request {request_id} does not exist")));
        };
        tx.execute("UPDATE adoption_requests SET status = 'approved' WHERE id = ?1", params![
            raw_id
        ])
        .map_err(|err| db_err(&err))?;
        // Pet and snapshot writes are secondary; approval stands even when
        // the pet row is gone. The snapshot insert dedupes per (adopter, pet).
        let _ = tx.execute("UPDATE pets SET status = 'adopted' WHERE pet_id = ?1", params![
            raw_pet
        ]);
        let _ = tx.execute(
            "INSERT OR IGNORE INTO adoption_history (adopter_id, pet_id, pet_name, category, \
             breed, sex, adopted_at, adopter_name) SELECT u.users_id, p.pet_id, p.name, \
             p.category, p.breed, p.sex, ?3, u.name FROM users u, pets p WHERE u.users_id = ?1 \
             AND p.pet_id = ?2",
            params![raw_adopter, raw_pet, Timestamp::now().as_str()],
        );
        tx.commit().map_err(|err| db_err(&err))?;
        Ok(ApprovalRecord {
            adopter_id: AdopterId::new(decode_id(raw_adopter, "adopter_id")?),
            pet_id: PetId::new(decode_id(raw_pet, "pet_id")?),
        })
    }

    fn reject_request(&self, request_id: RequestId, reason: &str) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        let raw_id = encode_id(request_id.get(), "request_id")?;
        let changed = connection
            .execute(
                "UPDATE adoption_requests SET status = 'rejected', information = ?2 WHERE id = ?1 \
                 AND status = 'pending'",
                params![raw_id, reason],
            )
            .map_err(|err| db_err(&err))?;
        if changed > 0 {
            return Ok(());
        }
        let status: Option<String> = connection
            .query_row("SELECT status FROM adoption_requests WHERE id = ?1", params![raw_id], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|err| db_err(&err))?;
        match status {
            None => Err(StoreError::NotFound(format!("request {request_id} does not exist"))),
            Some(current) => Err(StoreError::Conflict(format!(
                "request {request_id} is {} and cannot be rejected",
                RequestStatus::normalize(&current)
            ))),
        }
    }

    fn cancel_request(
        &self,
        request_id: RequestId,
        owner: Option<AdopterId>,
    ) -> Result<bool, StoreError> {
        let connection = self.lock_connection()?;
        let raw_id = encode_id(request_id.get(), "request_id")?;
        let changed = match owner {
            Some(adopter_id) => connection
                .execute(
                    "UPDATE adoption_requests SET status = 'cancelled' WHERE id = ?1 AND \
                     adopter_id = ?2 AND status = 'pending'",
                    params![raw_id, encode_id(adopter_id.get(), "adopter_id")?],
                )
                .map_err(|err| db_err(&err))?,
            None => connection
                .execute(
                    "UPDATE adoption_requests SET status = 'cancelled' WHERE id = ?1 AND status = \
                     'pending'",
                    params![raw_id],
                )
                .map_err(|err| db_err(&err))?,
        };
        Ok(changed > 0)
    }

    fn delete_request(
        &self,
        request_id: RequestId,
        owner: Option<AdopterId>,
        allow_approved: bool,
    ) -> Result<bool, StoreError> {
        let connection = self.lock_connection()?;
        let raw_id = encode_id(request_id.get(), "request_id")?;
        let mut sql = String::from("DELETE FROM adoption_requests WHERE id = ?1");
        let mut bound: Vec<i64> = vec![raw_id];
        if let Some(adopter_id) = owner {
            sql.push_str(" AND adopter_id = ?2");
            bound.push(encode_id(adopter_id.get(), "adopter_id")?);
        }
        if !allow_approved {
            sql.push_str(" AND status != 'approved'");
        }
        let changed = connection
            .execute(&sql, rusqlite::params_from_iter(bound))
            .map_err(|err| db_err(&err))?;
        Ok(changed > 0)
    }

    fn request_details(
        &self,
        request_id: RequestId,
    ) -> Result<Option<RequestDetails>, StoreError> {
        let connection = self.lock_connection()?;
        let sql = format!("{REQUEST_DETAILS_SELECT} WHERE ar.id = ?1");
        let row = connection
            .query_row(&sql, params![encode_id(request_id.get(), "request_id")?], RequestRow::read)
            .optional()
            .map_err(|err| db_err(&err))?;
        row.map(RequestRow::into_details).transpose()
    }

    fn all_requests(&self) -> Result<Vec<RequestDetails>, StoreError> {
        let connection = self.lock_connection()?;
        let sql = format!("{REQUEST_DETAILS_SELECT} ORDER BY ar.id");
        let mut statement = connection.prepare(&sql).map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![], RequestRow::read)
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(RequestRow::into_details).collect()
    }

    fn adopter_requests(&self, adopter_id: AdopterId) -> Result<Vec<RequestDetails>, StoreError> {
        let connection = self.lock_connection()?;
        let sql =
            format!("{REQUEST_DETAILS_SELECT} WHERE ar.adopter_id = ?1 ORDER BY ar.created_at DESC");
        let mut statement = connection.prepare(&sql).map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![encode_id(adopter_id.get(), "adopter_id")?], RequestRow::read)
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(RequestRow::into_details).collect()
    }
}

// ============================================================================
// SECTION: History Store
// ============================================================================

/// Seeds the history table from approved requests when it is empty.
///
/// Scoped to one adopter when given; a non-empty scope is left untouched.
fn backfill_history(tx: &Transaction<'_>, adopter_id: Option<i64>) -> Result<(), StoreError> {
    let existing: i64 = match adopter_id {
        Some(raw) => tx
            .query_row(
                "SELECT COUNT(*) FROM adoption_history WHERE adopter_id = ?1",
                params![raw],
                |row| row.get(0),
            )
            .map_err(|err| db_err(&err))?,
        None => tx
            .query_row("SELECT COUNT(*) FROM adoption_history", params![], |row| row.get(0))
            .map_err(|err| db_err(&err))?,
    };
    if existing > 0 {
        return Ok(());
    }
    let mut sql = String::from(
        "INSERT OR IGNORE INTO adoption_history (adopter_id, pet_id, pet_name, category, breed, \
         sex, adopted_at, adopter_name) SELECT ar.adopter_id, ar.pet_id, COALESCE(p.name, \
         '(Removed Pet)'), p.category, p.breed, p.sex, ar.created_at, u.name FROM \
         adoption_requests ar LEFT JOIN pets p ON ar.pet_id = p.pet_id LEFT JOIN users u ON \
         ar.adopter_id = u.users_id WHERE LOWER(TRIM(ar.status)) = 'approved'",
    );
    match adopter_id {
        Some(raw) => {
            sql.push_str(" AND ar.adopter_id = ?1");
            tx.execute(&sql, params![raw]).map_err(|err| db_err(&err))?;
        }
        None => {
            tx.execute(&sql, params![]).map_err(|err| db_err(&err))?;
        }
    }
    Ok(())
}

/// Select list shared by the history projections.
const HISTORY_SELECT: &str = "SELECT ah.adopter_id, ah.pet_id, COALESCE(ah.pet_name, p.name, \
                              '(Removed Pet)'), COALESCE(ah.category, p.category), \
                              COALESCE(ah.breed, p.breed), COALESCE(ah.sex, p.sex), \
                              ah.adopted_at, COALESCE(ah.adopter_name, u.name), u.email, \
                              p.photo_path FROM adoption_history ah LEFT JOIN pets p ON ah.pet_id \
                              = p.pet_id LEFT JOIN users u ON ah.adopter_id = u.users_id";

impl HistoryStore for SqliteAdoptionStore {
    fn adoption_history(&self) -> Result<Vec<AdoptionHistoryEntry>, StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        backfill_history(&tx, None)?;
        let sql = format!("{HISTORY_SELECT} ORDER BY ah.adopted_at DESC");
        let rows = {
            let mut statement = tx.prepare(&sql).map_err(|err| db_err(&err))?;
            statement
                .query_map(params![], HistoryRow::read)
                .map_err(|err| db_err(&err))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| db_err(&err))?
        };
        tx.commit().map_err(|err| db_err(&err))?;
        rows.into_iter().map(HistoryRow::into_entry).collect()
    }

    fn adoption_history_for(
        &self,
        adopter_id: AdopterId,
    ) -> Result<Vec<AdoptionHistoryEntry>, StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        let raw_id = encode_id(adopter_id.get(), "adopter_id")?;
        backfill_history(&tx, Some(raw_id))?;
        let sql = format!("{HISTORY_SELECT} WHERE ah.adopter_id = ?1 ORDER BY ah.adopted_at DESC");
        let rows = {
            let mut statement = tx.prepare(&sql).map_err(|err| db_err(&err))?;
            statement
                .query_map(params![raw_id], HistoryRow::read)
                .map_err(|err| db_err(&err))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|err| db_err(&err))?
        };
        tx.commit().map_err(|err| db_err(&err))?;
        rows.into_iter().map(HistoryRow::into_entry).collect()
    }
}

// ============================================================================
// SECTION: Notification Store
// ============================================================================

impl NotificationStore for SqliteAdoptionStore {
    fn create_notification(
        &self,
        user_id: u64,
        role: Role,
        message: &str,
    ) -> Result<NotificationId, StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute(
                "INSERT INTO notifications (user_id, role, message, created_at, is_read) VALUES \
                 (?1, ?2, ?3, ?4, 0)",
                params![
                    encode_id(user_id, "notification user_id")?,
                    role.as_str(),
                    message,
                    Timestamp::now().as_str(),
                ],
            )
            .map_err(|err| db_err(&err))?;
        Ok(NotificationId::new(decode_id(connection.last_insert_rowid(), "notification_id")?))
    }

    fn notifications_for(
        &self,
        user_id: u64,
        role: Role,
    ) -> Result<Vec<Notification>, StoreError> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare(
                "SELECT id, user_id, role, message, created_at, is_read FROM notifications WHERE \
                 user_id = ?1 AND role = ?2 ORDER BY created_at DESC, id DESC",
            )
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(
                params![encode_id(user_id, "notification user_id")?, role.as_str()],
                NotificationRow::read,
            )
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(NotificationRow::into_notification).collect()
    }

    fn mark_notification_read(&self, notification_id: NotificationId) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute("UPDATE notifications SET is_read = 1 WHERE id = ?1", params![encode_id(
                notification_id.get(),
                "notification_id"
            )?])
            .map_err(|err| db_err(&err))?;
        Ok(())
    }

    fn clear_notifications_for(&self, user_id: u64, role: Role) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute("DELETE FROM notifications WHERE user_id = ?1 AND role = ?2", params![
                encode_id(user_id, "notification user_id")?,
                role.as_str()
            ])
            .map_err(|err| db_err(&err))?;
        Ok(())
    }

    fn delete_notification(&self, notification_id: NotificationId) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute("DELETE FROM notifications WHERE id = ?1", params![encode_id(
                notification_id.get(),
                "notification_id"
            )?])
            .map_err(|err| db_err(&err))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Directory Store
// ============================================================================

/// Select list for admin profile reads.
const ADMIN_SELECT: &str = "SELECT admin_id, name, email, age, birthdate, phone_number, \
                            photo_path, facebook_url, instagram_url FROM admin";
/// Select list for adopter profile reads.
const ADOPTER_SELECT: &str =
    "SELECT users_id, name, email, age, birthdate, phone_number, photo_path FROM users";

impl DirectoryStore for SqliteAdoptionStore {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Account>, StoreError> {
        let connection = self.lock_connection()?;
        match role {
            Role::Admin => {
                let sql = format!("{ADMIN_SELECT} WHERE email = ?1 AND password = ?2");
                let row = connection
                    .query_row(&sql, params![email, password], AdminRow::read)
                    .optional()
                    .map_err(|err| db_err(&err))?;
                row.map(|raw| raw.into_profile().map(Account::Admin)).transpose()
            }
            Role::Adopter => {
                let sql = format!("{ADOPTER_SELECT} WHERE email = ?1 AND password = ?2");
                let row = connection
                    .query_row(&sql, params![email, password], AdopterRow::read)
                    .optional()
                    .map_err(|err| db_err(&err))?;
                row.map(|raw| raw.into_profile().map(Account::Adopter)).transpose()
            }
        }
    }

    fn account_by_email(&self, email: &str, role: Role) -> Result<Option<Account>, StoreError> {
        let connection = self.lock_connection()?;
        match role {
            Role::Admin => {
                let sql = format!("{ADMIN_SELECT} WHERE email = ?1");
                let row = connection
                    .query_row(&sql, params![email], AdminRow::read)
                    .optional()
                    .map_err(|err| db_err(&err))?;
                row.map(|raw| raw.into_profile().map(Account::Admin)).transpose()
            }
            Role::Adopter => {
                let sql = format!("{ADOPTER_SELECT} WHERE email = ?1");
                let row = connection
                    .query_row(&sql, params![email], AdopterRow::read)
                    .optional()
                    .map_err(|err| db_err(&err))?;
                row.map(|raw| raw.into_profile().map(Account::Adopter)).transpose()
            }
        }
    }

    fn create_adopter(&self, adopter: &NewAdopter) -> Result<AdopterId, StoreError> {
        let connection = self.lock_connection()?;
        let existing: Option<i64> = connection
            .query_row("SELECT users_id FROM users WHERE email = ?1", params![adopter.email], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|err| db_err(&err))?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "adopter email already registered: {}",
                adopter.email
            )));
        }
        connection
            .execute(
                "INSERT INTO users (name, email, password, role, age, birthdate, phone_number, \
                 photo_path) VALUES (?1, ?2, ?3, 'adopter', NULL, ?4, ?5, ?6)",
                params![
                    adopter.name,
                    adopter.email,
                    adopter.password,
                    adopter.birthdate,
                    adopter.phone,
                    adopter.photo,
                ],
            )
            .map_err(|err| db_err(&err))?;
        Ok(AdopterId::new(decode_id(connection.last_insert_rowid(), "adopter_id")?))
    }

    fn create_admin(&self, admin: &NewAdmin) -> Result<AdminId, StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        let admin_id = insert_admin(&tx, admin)?;
        tx.commit().map_err(|err| db_err(&err))?;
        Ok(admin_id)
    }

    fn adopter(&self, adopter_id: AdopterId) -> Result<Option<AdopterProfile>, StoreError> {
        let connection = self.lock_connection()?;
        let sql = format!("{ADOPTER_SELECT} WHERE users_id = ?1");
        let row = connection
            .query_row(&sql, params![encode_id(adopter_id.get(), "adopter_id")?], AdopterRow::read)
            .optional()
            .map_err(|err| db_err(&err))?;
        row.map(AdopterRow::into_profile).transpose()
    }

    fn admin_count(&self) -> Result<u64, StoreError> {
        let connection = self.lock_connection()?;
        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM admin", params![], |row| row.get(0))
            .map_err(|err| db_err(&err))?;
        Ok(decode_count(count))
    }

    fn admin_profiles(&self) -> Result<Vec<AdminProfile>, StoreError> {
        let connection = self.lock_connection()?;
        let sql = format!("{ADMIN_SELECT} ORDER BY admin_id ASC");
        let mut statement = connection.prepare(&sql).map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![], AdminRow::read)
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(AdminRow::into_profile).collect()
    }

    fn update_adopter(
        &self,
        adopter_id: AdopterId,
        update: &AdopterUpdate,
    ) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        let changed = connection
            .execute(
                "UPDATE users SET name = ?1, email = ?2, phone_number = ?3, birthdate = ?4, \
                 photo_path = ?5, age = ?6 WHERE users_id = ?7",
                params![
                    update.name,
                    update.email,
                    update.phone,
                    update.birthdate,
                    update.photo,
                    update.age.map(i64::from),
                    encode_id(adopter_id.get(), "adopter_id")?,
                ],
            )
            .map_err(|err| db_err(&err))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("adopter {adopter_id} does not exist")));
        }
        Ok(())
    }

    fn update_admin(&self, admin_id: AdminId, update: &AdminUpdate) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        let changed = connection
            .execute(
                "UPDATE admin SET name = ?1, age = ?2, email = ?3, phone_number = ?4, birthdate = \
                 ?5, photo_path = ?6, facebook_url = ?7, instagram_url = ?8 WHERE admin_id = ?9",
                params![
                    update.name,
                    update.age.map(i64::from),
                    update.email,
                    update.phone,
                    update.birthdate,
                    update.photo,
                    update.facebook_url,
                    update.instagram_url,
                    encode_id(admin_id.get(), "admin_id")?,
                ],
            )
            .map_err(|err| db_err(&err))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("admin {admin_id} does not exist")));
        }
        Ok(())
    }

    fn update_password_by_email(
        &self,
        email: &str,
        role: Role,
        new_password: &str,
    ) -> Result<bool, StoreError> {
        let connection = self.lock_connection()?;
        let sql = match role {
            Role::Admin => "UPDATE admin SET password = ?1 WHERE email = ?2",
            Role::Adopter => "UPDATE users SET password = ?1 WHERE email = ?2",
        };
        let changed =
            connection.execute(sql, params![new_password, email]).map_err(|err| db_err(&err))?;
        Ok(changed > 0)
    }

    fn delete_adopter(&self, adopter_id: AdopterId) -> Result<(), StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        let raw_id = encode_id(adopter_id.get(), "adopter_id")?;
        tx.execute("DELETE FROM users WHERE users_id = ?1", params![raw_id])
            .map_err(|err| db_err(&err))?;
        tx.execute("DELETE FROM adoption_requests WHERE adopter_id = ?1", params![raw_id])
            .map_err(|err| db_err(&err))?;
        tx.commit().map_err(|err| db_err(&err))?;
        Ok(())
    }

    fn delete_admin(&self, admin_id: AdminId) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute("DELETE FROM admin WHERE admin_id = ?1", params![encode_id(
                admin_id.get(),
                "admin_id"
            )?])
            .map_err(|err| db_err(&err))?;
        Ok(())
    }
}

/// Inserts an admin row and returns the new identifier.
fn insert_admin(tx: &Transaction<'_>, admin: &NewAdmin) -> Result<AdminId, StoreError> {
    let existing: Option<i64> = tx
        .query_row("SELECT admin_id FROM admin WHERE email = ?1", params![admin.email], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|err| db_err(&err))?;
    if existing.is_some() {
        return Err(StoreError::Conflict(format!(
            "admin email already registered: {}",
            admin.email
        )));
    }
    tx.execute(
        "INSERT INTO admin (name, email, password, phone_number, birthdate, photo_path, \
         facebook_url, instagram_url) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            admin.name,
            admin.email,
            admin.password,
            admin.phone,
            admin.birthdate,
            admin.photo,
            admin.facebook_url,
            admin.instagram_url,
        ],
    )
    .map_err(|err| db_err(&err))?;
    Ok(AdminId::new(decode_id(tx.last_insert_rowid(), "admin_id")?))
}

// ============================================================================
// SECTION: Pending Admin Store
// ============================================================================

impl PendingAdminStore for SqliteAdoptionStore {
    fn create_pending_admin(&self, admin: &NewAdmin) -> Result<PendingAdminId, StoreError> {
        let connection = self.lock_connection()?;
        connection
            .execute(
                "INSERT INTO admin_pending (name, email, password, phone_number, birthdate, \
                 photo_path, facebook_url, instagram_url, status, created_at) VALUES (?1, ?2, ?3, \
                 ?4, ?5, ?6, ?7, ?8, 'pending', ?9)",
                params![
                    admin.name,
                    admin.email,
                    admin.password,
                    admin.phone,
                    admin.birthdate,
                    admin.photo,
                    admin.facebook_url,
                    admin.instagram_url,
                    Timestamp::now().as_str(),
                ],
            )
            .map_err(|err| db_err(&err))?;
        Ok(PendingAdminId::new(decode_id(connection.last_insert_rowid(), "pending_id")?))
    }

    fn pending_admins(&self) -> Result<Vec<PendingAdmin>, StoreError> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare(
                "SELECT pending_id, name, email, phone_number, birthdate, photo_path, \
                 facebook_url, instagram_url, created_at FROM admin_pending ORDER BY created_at \
                 DESC, pending_id DESC",
            )
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![], PendingRow::read)
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        rows.into_iter().map(PendingRow::into_pending).collect()
    }

    fn approve_pending_admin(&self, pending_id: PendingAdminId) -> Result<AdminId, StoreError> {
        let mut connection = self.lock_connection()?;
        let tx = connection.transaction().map_err(|err| db_err(&err))?;
        let raw_id = encode_id(pending_id.get(), "pending_id")?;
        let staged = tx
            .query_row(
                "SELECT pending_id, name, email, phone_number, birthdate, photo_path, \
                 facebook_url, instagram_url, created_at FROM admin_pending WHERE pending_id = ?1",
                params![raw_id],
                PendingRow::read,
            )
            .optional()
            .map_err(|err| db_err(&err))?;
        let Some(staged) = staged else {
            return Err(StoreError::NotFound(format!(
                "pending admin {pending_id} does not exist"
            )));
        };
        let password: String = tx
            .query_row(
                "SELECT password FROM admin_pending WHERE pending_id = ?1",
                params![raw_id],
                |row| row.get(0),
            )
            .map_err(|err| db_err(&err))?;
        let admin = NewAdmin {
            name: staged.name,
            email: staged.email,
            password,
            phone: staged.phone,
            birthdate: staged.birthdate,
            photo: staged.photo,
            facebook_url: staged.facebook_url,
            instagram_url: staged.instagram_url,
        };
        let admin_id = insert_admin(&tx, &admin)?;
        tx.execute("DELETE FROM admin_pending WHERE pending_id = ?1", params![raw_id])
            .map_err(|err| db_err(&err))?;
        tx.commit().map_err(|err| db_err(&err))?;
        Ok(admin_id)
    }

    fn decline_pending_admin(&self, pending_id: PendingAdminId) -> Result<bool, StoreError> {
        let connection = self.lock_connection()?;
        let changed = connection
            .execute("DELETE FROM admin_pending WHERE pending_id = ?1", params![encode_id(
                pending_id.get(),
                "pending_id"
            )?])
            .map_err(|err| db_err(&err))?;
        Ok(changed > 0)
    }
}

// ============================================================================
// SECTION: Stats Store
// ============================================================================

impl StatsStore for SqliteAdoptionStore {
    fn summary_stats(&self) -> Result<SummaryStats, StoreError> {
        let connection = self.lock_connection()?;
        let available: i64 = connection
            .query_row("SELECT COUNT(*) FROM pets WHERE status = 'available'", params![], |row| {
                row.get(0)
            })
            .map_err(|err| db_err(&err))?;
        let requests: i64 = connection
            .query_row("SELECT COUNT(*) FROM adoption_requests", params![], |row| row.get(0))
            .map_err(|err| db_err(&err))?;
        let adoptions: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM adoption_requests WHERE LOWER(TRIM(status)) = 'approved'",
                params![],
                |row| row.get(0),
            )
            .map_err(|err| db_err(&err))?;
        Ok(SummaryStats {
            available_pets: decode_count(available),
            total_requests: decode_count(requests),
            total_adoptions: decode_count(adoptions),
        })
    }

    fn most_adopted_breeds(&self) -> Result<Vec<BreedCount>, StoreError> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare(
                "SELECT p.breed, COUNT(*) AS adoptions FROM adoption_requests ar JOIN pets p ON \
                 ar.pet_id = p.pet_id WHERE LOWER(TRIM(ar.status)) = 'approved' GROUP BY p.breed \
                 ORDER BY adoptions DESC LIMIT 5",
            )
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        Ok(rows
            .into_iter()
            .map(|(breed, count)| BreedCount {
                breed,
                adoptions: decode_count(count),
            })
            .collect())
    }

    fn adoption_trend(&self) -> Result<Vec<TrendPoint>, StoreError> {
        let connection = self.lock_connection()?;
        let mut statement = connection
            .prepare(
                "SELECT DATE(created_at), COUNT(*) FROM adoption_requests WHERE \
                 LOWER(TRIM(status)) = 'approved' GROUP BY DATE(created_at) ORDER BY \
                 DATE(created_at)",
            )
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params![], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
            })
            .map_err(|err| db_err(&err))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| db_err(&err))?;
        Ok(rows
            .into_iter()
            .map(|(date, count)| TrendPoint {
                date: date.unwrap_or_default(),
                approvals: decode_count(count),
            })
            .collect())
    }
}

// ============================================================================
// SECTION: Open + Schema
// ============================================================================

/// Validates the configured store path.
fn validate_store_path(config: &SqliteStoreConfig) -> Result<(), SqliteStoreError> {
    if config.path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    if config.path.exists() && config.path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection with durable defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Reports whether a table exists.
fn table_exists(tx: &Transaction<'_>, table: &str) -> Result<bool, SqliteStoreError> {
    let row: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(row.is_some())
}

/// Reports whether a column exists on a table.
fn column_exists(
    tx: &Transaction<'_>,
    table: &str,
    column: &str,
) -> Result<bool, SqliteStoreError> {
    let mut statement = tx
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let mut rows =
        statement.query(params![]).map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    while let Some(row) = rows.next().map_err(|err| SqliteStoreError::Db(err.to_string()))? {
        let name: String = row.get(1).map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Initializes the `SQLite` schema or validates the existing version.
///
/// Runs entirely inside one transaction: a database is either fully at
/// [`SCHEMA_VERSION`] after open or untouched.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            // No version row: either an empty database or one written by the
            // legacy application before store_meta existed.
            if table_exists(&tx, "adoption_requests")? || table_exists(&tx, "pets")? {
                upgrade_legacy_schema(&tx)?;
            }
            create_tables(&tx)?;
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Creates the current-version tables and indexes (idempotent).
fn create_tables(tx: &Transaction<'_>) -> Result<(), SqliteStoreError> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS pets (
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
        CREATE TABLE IF NOT EXISTS users (
            users_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            role TEXT DEFAULT 'adopter',
            age INTEGER,
            birthdate TEXT,
            phone_number TEXT,
            photo_path TEXT
        );
        CREATE TABLE IF NOT EXISTS admin (
            admin_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            age INTEGER,
            birthdate TEXT,
            phone_number TEXT,
            photo_path TEXT,
            facebook_url TEXT,
            instagram_url TEXT
        );
        CREATE TABLE IF NOT EXISTS admin_pending (
            pending_id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password TEXT NOT NULL,
            phone_number TEXT,
            birthdate TEXT,
            photo_path TEXT,
            facebook_url TEXT,
            instagram_url TEXT,
            status TEXT DEFAULT 'pending',
            created_at TEXT
        );
        CREATE TABLE IF NOT EXISTS adoption_requests (
            id INTEGER PRIMARY KEY,
            adopter_id INTEGER NOT NULL,
            pet_id INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL,
            information TEXT
        );
        CREATE TABLE IF NOT EXISTS adoption_history (
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
        CREATE TABLE IF NOT EXISTS notifications (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            role TEXT NOT NULL DEFAULT 'adopter',
            message TEXT NOT NULL,
            created_at TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0
        );
        CREATE UNIQUE INDEX IF NOT EXISTS ux_adoption_history_pair
            ON adoption_history (adopter_id, pet_id);
        CREATE INDEX IF NOT EXISTS idx_requests_adopter_pet
            ON adoption_requests (adopter_id, pet_id, status);
        CREATE INDEX IF NOT EXISTS idx_notifications_recipient
            ON notifications (user_id, role);",
    )
    .map_err(|err| SqliteStoreError::Db(err.to_string()))
}

/// Upgrades a database written by the legacy application in place.
///
/// Every step is idempotent, so a partially upgraded database (one the
/// legacy application had already altered lazily) converges to the same
/// shape:
/// - admin and staging tables gain social link columns;
/// - `adoption_requests.reason` is renamed to `information`;
/// - duplicate history snapshots are collapsed so the unique (adopter, pet)
///   index can be created;
/// - notifications gain `created_at`, `is_read`, and `role` columns, and
///   offset-encoded admin recipients are decoded to `(id, 'admin')`.
fn upgrade_legacy_schema(tx: &Transaction<'_>) -> Result<(), SqliteStoreError> {
    for table in ["admin", "admin_pending"] {
        if !table_exists(tx, table)? {
            continue;
        }
        for column in ["facebook_url", "instagram_url"] {
            if !column_exists(tx, table, column)? {
                tx.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {column} TEXT;"))
                    .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            }
        }
    }
    if table_exists(tx, "adoption_requests")?
        && column_exists(tx, "adoption_requests", "reason")?
        && !column_exists(tx, "adoption_requests", "information")?
    {
        tx.execute_batch("ALTER TABLE adoption_requests RENAME COLUMN reason TO information;")
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    }
    if table_exists(tx, "adoption_history")? {
        tx.execute(
            "DELETE FROM adoption_history WHERE id NOT IN (SELECT MIN(id) FROM adoption_history \
             GROUP BY adopter_id, pet_id)",
            params![],
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    }
    if table_exists(tx, "notifications")? {
        if column_exists(tx, "notifications", "date")?
            && !column_exists(tx, "notifications", "created_at")?
        {
            tx.execute_batch("ALTER TABLE notifications RENAME COLUMN date TO created_at;")
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        if !column_exists(tx, "notifications", "is_read")? {
            tx.execute_batch(
                "ALTER TABLE notifications ADD COLUMN is_read INTEGER NOT NULL DEFAULT 0;",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        if !column_exists(tx, "notifications", "role")? {
            tx.execute_batch(
                "ALTER TABLE notifications ADD COLUMN role TEXT NOT NULL DEFAULT '';",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        tx.execute(
            "UPDATE notifications SET role = 'admin', user_id = user_id - ?1 WHERE user_id > ?1 \
             AND (role IS NULL OR role = '')",
            params![LEGACY_ADMIN_ID_OFFSET],
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        tx.execute(
            "UPDATE notifications SET role = 'adopter' WHERE role IS NULL OR role = ''",
            params![],
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    }
    Ok(())
}
