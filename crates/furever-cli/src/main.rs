// crates/furever-cli/src/main.rs
// ============================================================================
// Module: FurEver Home CLI Entry Point
// Description: Command dispatcher for shelter administration workflows.
// Purpose: Manage pets, adoption requests, history, and notifications.
// Dependencies: clap, furever-config, furever-control, furever-core,
//               furever-store-sqlite, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The FurEver CLI operates one shelter database from the command line:
//! pet inventory, adoption request decisions, history and dashboard
//! projections, notification inboxes, and staged admin signups. Every
//! command loads the TOML configuration, opens the `SQLite` store, and runs
//! the same flows the embedding application uses. `--json` switches any
//! command's output to machine-readable JSON.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use furever_config::AppConfig;
use furever_control::AdminFlows;
use furever_control::AdopterFlows;
use furever_control::DirPhotoStore;
use furever_control::SideEffect;
use furever_control::SideEffectKind;
use furever_control::SideEffectStatus;
use furever_control::StoreNotifier;
use furever_core::AdopterId;
use furever_core::AdoptionHistoryEntry;
use furever_core::BreedCount;
use furever_core::DashboardSnapshot;
use furever_core::HistoryStore;
use furever_core::NewPet;
use furever_core::Notification;
use furever_core::NotificationId;
use furever_core::NotificationStore;
use furever_core::PendingAdmin;
use furever_core::PendingAdminId;
use furever_core::Pet;
use furever_core::PetCategory;
use furever_core::PetId;
use furever_core::PetStatus;
use furever_core::PetStore;
use furever_core::PetUpdate;
use furever_core::PhotoStore;
use furever_core::RequestDetails;
use furever_core::RequestId;
use furever_core::RequestStore;
use furever_core::Role;
use furever_core::StatsStore;
use furever_core::TrendPoint;
use furever_store_sqlite::SqliteAdoptionStore;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "furever", version, disable_help_subcommand = true)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH", default_value = "furever.toml", global = true)]
    config: PathBuf,
    /// Emit JSON instead of text lines.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    json: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Pet inventory management.
    Pets {
        /// Selected pets subcommand.
        #[command(subcommand)]
        command: PetsCommand,
    },
    /// Adoption request lifecycle.
    Requests {
        /// Selected requests subcommand.
        #[command(subcommand)]
        command: RequestsCommand,
    },
    /// Adoption history projection.
    History(HistoryCommand),
    /// Shelter dashboard projection.
    Dashboard,
    /// Notification inboxes.
    Notifications {
        /// Selected notifications subcommand.
        #[command(subcommand)]
        command: NotificationsCommand,
    },
    /// Admin accounts and staged signups.
    Admins {
        /// Selected admins subcommand.
        #[command(subcommand)]
        command: AdminsCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Pet inventory subcommands.
#[derive(Subcommand, Debug)]
enum PetsCommand {
    /// Add a pet to the inventory.
    Add(PetAddCommand),
    /// List available pets.
    List(PetListCommand),
    /// Update an existing pet.
    Update(PetUpdateCommand),
    /// Delete a pet and purge its non-approved requests.
    Delete(PetDeleteCommand),
}

/// Arguments for adding a pet.
#[derive(Args, Debug)]
struct PetAddCommand {
    /// Pet name.
    #[arg(long)]
    name: String,
    /// Category (dog, cat, other).
    #[arg(long, default_value = "other")]
    category: String,
    /// Breed.
    #[arg(long)]
    breed: String,
    /// Age in years.
    #[arg(long)]
    age: u32,
    /// Sex.
    #[arg(long)]
    sex: String,
    /// Mark the pet as vaccinated.
    #[arg(long, action = ArgAction::SetTrue)]
    vaccinated: bool,
    /// Free-text description.
    #[arg(long)]
    description: Option<String>,
    /// Photo file to copy into the images directory.
    #[arg(long, value_name = "PATH")]
    photo: Option<PathBuf>,
}

/// Arguments for listing pets.
#[derive(Args, Debug)]
struct PetListCommand {
    /// Restrict to one category (dog, cat, other).
    #[arg(long)]
    category: Option<String>,
}

/// Arguments for updating a pet.
#[derive(Args, Debug)]
struct PetUpdateCommand {
    /// Pet identifier.
    #[arg(long)]
    id: u64,
    /// New name.
    #[arg(long)]
    name: Option<String>,
    /// New breed.
    #[arg(long)]
    breed: Option<String>,
    /// New age in years.
    #[arg(long)]
    age: Option<u32>,
    /// New sex.
    #[arg(long)]
    sex: Option<String>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New category.
    #[arg(long)]
    category: Option<String>,
    /// New vaccinated flag (true or false).
    #[arg(long)]
    vaccinated: Option<bool>,
    /// New status (available, adopted, ...).
    #[arg(long)]
    status: Option<String>,
    /// New photo file to copy into the images directory.
    #[arg(long, value_name = "PATH")]
    photo: Option<PathBuf>,
}

/// Arguments for deleting a pet.
#[derive(Args, Debug)]
struct PetDeleteCommand {
    /// Pet identifier.
    #[arg(long)]
    id: u64,
}

/// Adoption request subcommands.
#[derive(Subcommand, Debug)]
enum RequestsCommand {
    /// Submit an adoption request on behalf of an adopter.
    Submit(RequestSubmitCommand),
    /// List requests.
    List(RequestListCommand),
    /// Show one request.
    Show(RequestIdCommand),
    /// Approve a pending request.
    Approve(RequestIdCommand),
    /// Reject a pending request, optionally with a reason.
    Reject(RequestRejectCommand),
    /// Cancel an adopter's pending request.
    Cancel(RequestCancelCommand),
    /// Delete a request row.
    Delete(RequestDeleteCommand),
}

/// Arguments for submitting a request.
#[derive(Args, Debug)]
struct RequestSubmitCommand {
    /// Adopter identifier.
    #[arg(long)]
    adopter: u64,
    /// Pet identifier.
    #[arg(long)]
    pet: u64,
    /// Optional note to the shelter.
    #[arg(long)]
    note: Option<String>,
}

/// Arguments for listing requests.
#[derive(Args, Debug)]
struct RequestListCommand {
    /// Restrict to one adopter's requests.
    #[arg(long)]
    adopter: Option<u64>,
}

/// Arguments addressing one request.
#[derive(Args, Debug)]
struct RequestIdCommand {
    /// Request identifier.
    #[arg(long)]
    id: u64,
}

/// Arguments for rejecting a request.
#[derive(Args, Debug)]
struct RequestRejectCommand {
    /// Request identifier.
    #[arg(long)]
    id: u64,
    /// Reason shared with the adopter; may be omitted.
    #[arg(long, default_value = "")]
    reason: String,
}

/// Arguments for cancelling a request.
#[derive(Args, Debug)]
struct RequestCancelCommand {
    /// Request identifier.
    #[arg(long)]
    id: u64,
    /// Owning adopter identifier.
    #[arg(long)]
    adopter: u64,
}

/// Arguments for deleting a request.
#[derive(Args, Debug)]
struct RequestDeleteCommand {
    /// Request identifier.
    #[arg(long)]
    id: u64,
    /// Also remove approved rows; history snapshots are kept.
    #[arg(long, action = ArgAction::SetTrue)]
    force: bool,
}

/// Arguments for the history projection.
#[derive(Args, Debug)]
struct HistoryCommand {
    /// Restrict to one adopter's history.
    #[arg(long)]
    adopter: Option<u64>,
    /// Restrict to one pet category (dog, cat, other).
    #[arg(long)]
    category: Option<String>,
}

/// Notification subcommands.
#[derive(Subcommand, Debug)]
enum NotificationsCommand {
    /// List one recipient's notifications.
    List(NotificationRecipientCommand),
    /// Mark one notification read.
    Read(NotificationIdCommand),
    /// Delete all of one recipient's notifications.
    Clear(NotificationRecipientCommand),
}

/// Arguments addressing one notification recipient.
#[derive(Args, Debug)]
struct NotificationRecipientCommand {
    /// Recipient account identifier.
    #[arg(long)]
    user: u64,
    /// Recipient role (adopter or admin).
    #[arg(long, default_value = "adopter")]
    role: String,
}

/// Arguments addressing one notification.
#[derive(Args, Debug)]
struct NotificationIdCommand {
    /// Notification identifier.
    #[arg(long)]
    id: u64,
}

/// Admin subcommands.
#[derive(Subcommand, Debug)]
enum AdminsCommand {
    /// List admin accounts.
    List,
    /// List staged admin signups.
    Pending,
    /// Promote a staged admin signup.
    ApprovePending(PendingIdCommand),
    /// Decline a staged admin signup.
    DeclinePending(PendingIdCommand),
}

/// Arguments addressing one staged admin signup.
#[derive(Args, Debug)]
struct PendingIdCommand {
    /// Staging row identifier.
    #[arg(long)]
    id: u64,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate the configuration file.
    Validate,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self { message }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Maps any displayable error into a [`CliError`].
fn cli_err(error: impl std::fmt::Display) -> CliError {
    CliError::new(error.to_string())
}

// ============================================================================
// SECTION: Application Context
// ============================================================================

/// Store notifier alias used by every flow in this binary.
type CliNotifier = StoreNotifier<SqliteAdoptionStore>;

/// Shared state opened once per invocation.
struct AppContext {
    /// The open adoption store.
    store: SqliteAdoptionStore,
    /// Photo storage rooted at the configured images directory.
    photos: DirPhotoStore,
    /// Whether output should be JSON.
    json: bool,
}

impl AppContext {
    /// Loads configuration and opens the store.
    fn open(config_path: &Path, json: bool) -> CliResult<Self> {
        let config = AppConfig::load(config_path).map_err(cli_err)?;
        let store = SqliteAdoptionStore::new(&config.store).map_err(cli_err)?;
        Ok(Self {
            store,
            photos: DirPhotoStore::new(config.photos.images_dir),
            json,
        })
    }

    /// Builds admin flows over the open store.
    fn admin_flows(&self) -> AdminFlows<SqliteAdoptionStore, CliNotifier> {
        AdminFlows::new(self.store.clone(), StoreNotifier::new(self.store.clone()))
    }

    /// Builds adopter flows over the open store.
    fn adopter_flows(&self) -> AdopterFlows<SqliteAdoptionStore, CliNotifier> {
        AdopterFlows::new(self.store.clone(), StoreNotifier::new(self.store.clone()))
    }

    /// Prints a value as JSON or line-by-line text.
    fn emit<T, F>(&self, value: &T, to_lines: F) -> CliResult<()>
    where
        T: Serialize,
        F: FnOnce(&T) -> Vec<String>,
    {
        if self.json {
            let text = serde_json::to_string_pretty(value).map_err(cli_err)?;
            write_stdout_line(&text).map_err(cli_err)
        } else {
            for line in to_lines(value) {
                write_stdout_line(&line).map_err(cli_err)?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// SECTION: Identifier Parsing
// ============================================================================

/// Parses a raw pet identifier.
fn pet_id(raw: u64) -> CliResult<PetId> {
    PetId::from_raw(raw).ok_or_else(|| CliError::new("pet id must be >= 1".to_string()))
}

/// Parses a raw adopter identifier.
fn adopter_id(raw: u64) -> CliResult<AdopterId> {
    AdopterId::from_raw(raw).ok_or_else(|| CliError::new("adopter id must be >= 1".to_string()))
}

/// Parses a raw request identifier.
fn request_id(raw: u64) -> CliResult<RequestId> {
    RequestId::from_raw(raw).ok_or_else(|| CliError::new("request id must be >= 1".to_string()))
}

/// Parses a raw notification identifier.
fn notification_id(raw: u64) -> CliResult<NotificationId> {
    NotificationId::from_raw(raw)
        .ok_or_else(|| CliError::new("notification id must be >= 1".to_string()))
}

/// Parses a raw pending-admin identifier.
fn pending_id(raw: u64) -> CliResult<PendingAdminId> {
    PendingAdminId::from_raw(raw)
        .ok_or_else(|| CliError::new("pending admin id must be >= 1".to_string()))
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if let Commands::Config {
        command: ConfigCommand::Validate,
    } = cli.command
    {
        return command_config_validate(&cli.config);
    }
    let context = AppContext::open(&cli.config, cli.json)?;
    match cli.command {
        Commands::Pets {
            command,
        } => command_pets(&context, command),
        Commands::Requests {
            command,
        } => command_requests(&context, command),
        Commands::History(command) => command_history(&context, &command),
        Commands::Dashboard => command_dashboard(&context),
        Commands::Notifications {
            command,
        } => command_notifications(&context, command),
        Commands::Admins {
            command,
        } => command_admins(&context, command),
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(&cli.config),
    }
}

// ============================================================================
// SECTION: Pets Commands
// ============================================================================

/// Dispatches pet subcommands.
fn command_pets(context: &AppContext, command: PetsCommand) -> CliResult<ExitCode> {
    match command {
        PetsCommand::Add(command) => command_pets_add(context, command),
        PetsCommand::List(command) => command_pets_list(context, &command),
        PetsCommand::Update(command) => command_pets_update(context, command),
        PetsCommand::Delete(command) => command_pets_delete(context, &command),
    }
}

/// Adds a pet, copying its photo into managed storage first.
fn command_pets_add(context: &AppContext, command: PetAddCommand) -> CliResult<ExitCode> {
    let photo = command
        .photo
        .as_deref()
        .map(|source| context.photos.store(source))
        .transpose()
        .map_err(cli_err)?;
    let pet = NewPet {
        name: command.name,
        category: PetCategory::parse(&command.category),
        breed: command.breed,
        age: command.age,
        sex: command.sex,
        vaccinated: command.vaccinated,
        status: PetStatus::Available,
        description: command.description,
        photo,
    };
    let new_id = context.admin_flows().add_pet(&pet).map_err(cli_err)?;
    write_stdout_line(&format!("added pet #{new_id}")).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

/// Lists available pets, optionally by category.
fn command_pets_list(context: &AppContext, command: &PetListCommand) -> CliResult<ExitCode> {
    let pets = match command.category.as_deref() {
        Some(category) => context
            .store
            .pets_by_category(PetCategory::parse(category))
            .map_err(cli_err)?,
        None => context.store.available_pets().map_err(cli_err)?,
    };
    context.emit(&pets, |pets| pets.iter().map(format_pet).collect())?;
    Ok(ExitCode::SUCCESS)
}

/// Updates a pet, defaulting unset fields from the stored row.
fn command_pets_update(context: &AppContext, command: PetUpdateCommand) -> CliResult<ExitCode> {
    let target = pet_id(command.id)?;
    let existing = context
        .store
        .pet(target)
        .map_err(cli_err)?
        .ok_or_else(|| CliError::new(format!("pet {target} does not exist")))?;
    let photo = match command.photo.as_deref() {
        Some(source) => Some(context.photos.store(source).map_err(cli_err)?),
        None => existing.photo,
    };
    let update = PetUpdate {
        name: command.name.unwrap_or(existing.name),
        breed: command.breed.unwrap_or(existing.breed),
        age: command.age.unwrap_or(existing.age),
        sex: command.sex.unwrap_or(existing.sex),
        description: command.description.or(existing.description),
        photo,
        category: command.category.as_deref().map(PetCategory::parse),
        vaccinated: command.vaccinated,
        status: command.status.as_deref().map(PetStatus::parse),
    };
    context.admin_flows().update_pet(target, &update).map_err(cli_err)?;
    write_stdout_line(&format!("updated pet #{target}")).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

/// Deletes a pet along with its photo file.
fn command_pets_delete(context: &AppContext, command: &PetDeleteCommand) -> CliResult<ExitCode> {
    let target = pet_id(command.id)?;
    let outcome = context.admin_flows().delete_pet(target, &context.photos).map_err(cli_err)?;
    report_side_effects(&outcome.side_effects)?;
    write_stdout_line(&format!("deleted pet #{target}")).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Requests Commands
// ============================================================================

/// Dispatches request subcommands.
fn command_requests(context: &AppContext, command: RequestsCommand) -> CliResult<ExitCode> {
    match command {
        RequestsCommand::Submit(command) => command_requests_submit(context, &command),
        RequestsCommand::List(command) => command_requests_list(context, &command),
        RequestsCommand::Show(command) => command_requests_show(context, &command),
        RequestsCommand::Approve(command) => command_requests_approve(context, &command),
        RequestsCommand::Reject(command) => command_requests_reject(context, &command),
        RequestsCommand::Cancel(command) => command_requests_cancel(context, &command),
        RequestsCommand::Delete(command) => command_requests_delete(context, &command),
    }
}

/// Submits a request on behalf of an adopter.
fn command_requests_submit(
    context: &AppContext,
    command: &RequestSubmitCommand,
) -> CliResult<ExitCode> {
    let outcome = context
        .adopter_flows()
        .submit_request(adopter_id(command.adopter)?, pet_id(command.pet)?, command.note.as_deref())
        .map_err(cli_err)?;
    report_side_effects(&outcome.side_effects)?;
    write_stdout_line(&format!("submitted request #{}", outcome.request_id)).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

/// Lists requests, optionally for one adopter.
fn command_requests_list(
    context: &AppContext,
    command: &RequestListCommand,
) -> CliResult<ExitCode> {
    let requests = match command.adopter {
        Some(raw) => context.store.adopter_requests(adopter_id(raw)?).map_err(cli_err)?,
        None => context.admin_flows().requests().map_err(cli_err)?,
    };
    context.emit(&requests, |requests| requests.iter().map(format_request).collect())?;
    Ok(ExitCode::SUCCESS)
}

/// Shows one request with display fields.
fn command_requests_show(context: &AppContext, command: &RequestIdCommand) -> CliResult<ExitCode> {
    let target = request_id(command.id)?;
    let details = context
        .admin_flows()
        .request(target)
        .map_err(cli_err)?
        .ok_or_else(|| CliError::new(format!("request {target} does not exist")))?;
    context.emit(&details, |details| {
        let mut lines = vec![format_request(details)];
        if let Some(note) = details.request.note.as_deref() {
            lines.push(format!("  note: {note}"));
        }
        lines.push(format!(
            "  adopter: {} <{}>",
            details.adopter_name, details.adopter_email
        ));
        lines
    })?;
    Ok(ExitCode::SUCCESS)
}

/// Approves a pending request.
fn command_requests_approve(
    context: &AppContext,
    command: &RequestIdCommand,
) -> CliResult<ExitCode> {
    let target = request_id(command.id)?;
    let outcome = context.admin_flows().approve_request(target).map_err(cli_err)?;
    report_side_effects(&outcome.side_effects)?;
    write_stdout_line(&format!(
        "approved request #{target}: pet #{} adopted by adopter #{}",
        outcome.record.pet_id, outcome.record.adopter_id
    ))
    .map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

/// Rejects a pending request.
fn command_requests_reject(
    context: &AppContext,
    command: &RequestRejectCommand,
) -> CliResult<ExitCode> {
    let target = request_id(command.id)?;
    let outcome = context.admin_flows().reject_request(target, &command.reason).map_err(cli_err)?;
    report_side_effects(&outcome.side_effects)?;
    write_stdout_line(&format!("rejected request #{target}")).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

/// Cancels an adopter's pending request.
fn command_requests_cancel(
    context: &AppContext,
    command: &RequestCancelCommand,
) -> CliResult<ExitCode> {
    let target = request_id(command.id)?;
    context
        .adopter_flows()
        .cancel_request(target, adopter_id(command.adopter)?)
        .map_err(cli_err)?;
    write_stdout_line(&format!("cancelled request #{target}")).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

/// Deletes a request row; `--force` also removes approved rows.
fn command_requests_delete(
    context: &AppContext,
    command: &RequestDeleteCommand,
) -> CliResult<ExitCode> {
    let target = request_id(command.id)?;
    if command.force {
        if !context.admin_flows().purge_request(target).map_err(cli_err)? {
            return Err(CliError::new(format!("request {target} does not exist")));
        }
    } else {
        context.admin_flows().delete_request(target).map_err(cli_err)?;
    }
    write_stdout_line(&format!("deleted request #{target}")).map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: History + Dashboard Commands
// ============================================================================

/// Prints the adoption history projection.
fn command_history(context: &AppContext, command: &HistoryCommand) -> CliResult<ExitCode> {
    let mut history = match command.adopter {
        Some(raw) => context.store.adoption_history_for(adopter_id(raw)?).map_err(cli_err)?,
        None => context.store.adoption_history().map_err(cli_err)?,
    };
    if let Some(raw) = command.category.as_deref() {
        let wanted = PetCategory::parse(raw);
        history.retain(|entry| entry.category == Some(wanted));
    }
    context.emit(&history, |history| history.iter().map(format_history_entry).collect())?;
    Ok(ExitCode::SUCCESS)
}

/// Everything the `dashboard` command prints in one shot.
#[derive(Debug, Serialize)]
struct DashboardReport {
    /// The assembled dashboard projection.
    snapshot: DashboardSnapshot,
    /// Most-adopted breeds, highest first.
    top_breeds: Vec<BreedCount>,
    /// Approved requests grouped by submission date.
    trend: Vec<TrendPoint>,
}

/// Prints the shelter dashboard projection with adoption aggregates.
fn command_dashboard(context: &AppContext) -> CliResult<ExitCode> {
    let report = DashboardReport {
        snapshot: context.admin_flows().dashboard().map_err(cli_err)?,
        top_breeds: context.store.most_adopted_breeds().map_err(cli_err)?,
        trend: context.store.adoption_trend().map_err(cli_err)?,
    };
    context.emit(&report, |report| {
        let mut lines = vec![
            format!("available pets: {}", report.snapshot.stats.available_pets),
            format!("total requests: {}", report.snapshot.stats.total_requests),
            format!("total adoptions: {}", report.snapshot.stats.total_adoptions),
        ];
        for (status, count) in &report.snapshot.requests_by_status {
            lines.push(format!("requests {status}: {count}"));
        }
        for (category, count) in &report.snapshot.pets_by_category {
            lines.push(format!("available {category}: {count}"));
        }
        for breed in &report.top_breeds {
            lines.push(format!("breed {}: {} adoptions", breed.breed, breed.adoptions));
        }
        for point in &report.trend {
            lines.push(format!("approvals {}: {}", point.date, point.approvals));
        }
        lines
    })?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Notifications Commands
// ============================================================================

/// Dispatches notification subcommands.
fn command_notifications(
    context: &AppContext,
    command: NotificationsCommand,
) -> CliResult<ExitCode> {
    match command {
        NotificationsCommand::List(command) => {
            let inbox = context
                .store
                .notifications_for(command.user, Role::parse(&command.role))
                .map_err(cli_err)?;
            context.emit(&inbox, |inbox| inbox.iter().map(format_notification).collect())?;
            Ok(ExitCode::SUCCESS)
        }
        NotificationsCommand::Read(command) => {
            let target = notification_id(command.id)?;
            context.store.mark_notification_read(target).map_err(cli_err)?;
            write_stdout_line(&format!("marked notification #{target} read")).map_err(cli_err)?;
            Ok(ExitCode::SUCCESS)
        }
        NotificationsCommand::Clear(command) => {
            context
                .store
                .clear_notifications_for(command.user, Role::parse(&command.role))
                .map_err(cli_err)?;
            write_stdout_line("cleared notifications").map_err(cli_err)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Admins Commands
// ============================================================================

/// Dispatches admin subcommands.
fn command_admins(context: &AppContext, command: AdminsCommand) -> CliResult<ExitCode> {
    match command {
        AdminsCommand::List => {
            let admins = context.admin_flows().admins().map_err(cli_err)?;
            context.emit(&admins, |admins| {
                admins
                    .iter()
                    .map(|admin| format!("#{} {} <{}>", admin.id, admin.name, admin.email))
                    .collect()
            })?;
            Ok(ExitCode::SUCCESS)
        }
        AdminsCommand::Pending => {
            let staged = context.admin_flows().pending_admins().map_err(cli_err)?;
            context.emit(&staged, |staged| staged.iter().map(format_pending_admin).collect())?;
            Ok(ExitCode::SUCCESS)
        }
        AdminsCommand::ApprovePending(command) => {
            let target = pending_id(command.id)?;
            let outcome = context.admin_flows().approve_pending_admin(target).map_err(cli_err)?;
            report_side_effects(&outcome.side_effects)?;
            match outcome.admin_id {
                Some(admin_id) => {
                    write_stdout_line(&format!("promoted pending #{target} to admin #{admin_id}"))
                        .map_err(cli_err)?;
                }
                None => write_stdout_line(&format!("promoted pending #{target}"))
                    .map_err(cli_err)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        AdminsCommand::DeclinePending(command) => {
            let target = pending_id(command.id)?;
            context.admin_flows().decline_pending_admin(target).map_err(cli_err)?;
            write_stdout_line(&format!("declined pending #{target}")).map_err(cli_err)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Loads, validates, and acknowledges the configuration file.
fn command_config_validate(config_path: &Path) -> CliResult<ExitCode> {
    AppConfig::load(config_path).map_err(cli_err)?;
    write_stdout_line("configuration is valid").map_err(cli_err)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Formats one pet as a text line.
fn format_pet(pet: &Pet) -> String {
    let vaccinated = if pet.vaccinated { "vaccinated" } else { "not vaccinated" };
    format!(
        "#{} {} ({} / {}, age {}, {}) [{}]",
        pet.id,
        pet.name,
        pet.category.label(),
        pet.breed,
        pet.age,
        vaccinated,
        pet.status
    )
}

/// Formats one request as a text line.
fn format_request(details: &RequestDetails) -> String {
    format!(
        "#{} {} requested by {} [{}] at {}",
        details.request.id,
        details.pet_name,
        details.adopter_name,
        details.request.status,
        details.request.created_at
    )
}

/// Formats one history entry as a text line.
fn format_history_entry(entry: &AdoptionHistoryEntry) -> String {
    let adopter = entry.adopter_name.as_deref().unwrap_or("(unknown adopter)");
    let adopted_at =
        entry.adopted_at.as_ref().map_or_else(String::new, |stamp| format!(" at {stamp}"));
    format!("{} adopted by {adopter}{adopted_at}", entry.pet_name)
}

/// Formats one notification as a text line.
fn format_notification(notification: &Notification) -> String {
    let marker = if notification.is_read { " " } else { "*" };
    format!("{marker} #{} [{}] {}", notification.id, notification.created_at, notification.message)
}

/// Formats one staged admin signup as a text line.
fn format_pending_admin(pending: &PendingAdmin) -> String {
    format!("#{} {} <{}> staged at {}", pending.id, pending.name, pending.email, pending.created_at)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Reports failed side effects as warnings on stderr.
fn report_side_effects(effects: &[SideEffect]) -> CliResult<()> {
    for effect in effects {
        if let SideEffectStatus::Failed {
            message,
        } = &effect.status
        {
            let label = match effect.kind {
                SideEffectKind::DirectNotice => "notice",
                SideEffectKind::AdminBroadcast => "admin broadcast",
                SideEffectKind::PhotoCleanup => "photo cleanup",
            };
            write_stderr_line(&format!("warning: {label} failed: {message}")).map_err(cli_err)?;
        }
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
