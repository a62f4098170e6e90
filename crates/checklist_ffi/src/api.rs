//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose checklist use cases to Dart via FRB as plain envelopes.
//! - Own the single process-wide `ChecklistService` instance.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Mutations are rejected until `checklist_init` has hydrated the store.
//! - Delete confirmation happens in Dart before `delete_list` is called.

use checklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Checklist, ChecklistItem, ChecklistService, CoreConfig, ServiceError,
};
use log::error;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

const DB_FILE_NAME: &str = "checklist.sqlite3";
const DB_PATH_ENV: &str = "CHECKLIST_DB_PATH";

struct Runtime {
    db_path: PathBuf,
    service: Mutex<ChecklistService>,
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for rolling log files.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the slot database and hydrates the checklist store.
///
/// Input semantics:
/// - `db_path`: database file; blank falls back to `CHECKLIST_DB_PATH`, then
///   the temp directory.
///
/// # FFI contract
/// - Must finish before the first frame that can issue a mutation.
/// - Repeating with the same path is a no-op; another path is an error.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_init(db_path: String) -> String {
    let requested = resolve_db_path(&db_path);
    if let Some(runtime) = RUNTIME.get() {
        return same_path_or_error(runtime, &requested);
    }

    let service = match ChecklistService::open_sqlite(&requested, &CoreConfig::from_env()) {
        Ok(service) => service,
        Err(err) => {
            error!("event=ffi_init module=ffi status=error error={err}");
            return format!("checklist_init failed: {err}");
        }
    };

    let runtime = RUNTIME.get_or_init(|| Runtime {
        db_path: requested.clone(),
        service: Mutex::new(service),
    });
    same_path_or_error(runtime, &requested)
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistActionResponse {
    /// Whether the operation was accepted.
    pub ok: bool,
    /// Created list/item id, when the action creates one.
    pub id: Option<String>,
    /// User-facing message on rejection; short status otherwise.
    pub message: String,
}

impl ChecklistActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// One card on the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCard {
    pub list_id: String,
    pub title: String,
    pub created_at: String,
    pub total_items: u32,
    pub completed_items: u32,
    pub progress_percent: u8,
}

/// Home screen read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSnapshot {
    pub list_count: u32,
    pub item_count: u32,
    pub lists: Vec<ListCard>,
}

/// One row on the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub completed: bool,
}

/// List screen read model: pending rows first, then completed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDetail {
    pub list_id: String,
    pub title: String,
    pub pending: Vec<ItemRow>,
    pub completed: Vec<ItemRow>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn create_list(title: String) -> ChecklistActionResponse {
    act(|service| service.create_list(&title).map(Some), "List created.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_list(list_id: String) -> ChecklistActionResponse {
    act(
        |service| {
            service.delete_list(&list_id);
            Ok(None)
        },
        "List deleted.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_item(list_id: String, name: String) -> ChecklistActionResponse {
    act(|service| service.add_item(&list_id, &name), "Item added.")
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_item(list_id: String, item_id: String) -> ChecklistActionResponse {
    act(
        |service| {
            service.toggle_item(&list_id, &item_id);
            Ok(None)
        },
        "Item updated.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_item(list_id: String, item_id: String) -> ChecklistActionResponse {
    act(
        |service| {
            service.delete_item(&list_id, &item_id);
            Ok(None)
        },
        "Item deleted.",
    )
}

/// Navigates to one list; rejected when the list does not exist.
#[flutter_rust_bridge::frb(sync)]
pub fn open_list(list_id: String) -> ChecklistActionResponse {
    act(
        |service| service.open_list(&list_id).map(|()| Some(list_id.clone())),
        "List opened.",
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn go_home() -> ChecklistActionResponse {
    act(
        |service| {
            service.go_home();
            Ok(None)
        },
        "Home.",
    )
}

/// Home screen data; empty before `checklist_init`.
#[flutter_rust_bridge::frb(sync)]
pub fn home_snapshot() -> HomeSnapshot {
    let Some(service) = lock_service() else {
        return HomeSnapshot {
            list_count: 0,
            item_count: 0,
            lists: Vec::new(),
        };
    };

    let snapshot = service.snapshot();
    let summary = snapshot.summary();
    HomeSnapshot {
        list_count: saturating_u32(summary.list_count),
        item_count: saturating_u32(summary.item_count),
        lists: snapshot.lists.iter().map(to_list_card).collect(),
    }
}

/// The open list, or `None` on the home screen.
#[flutter_rust_bridge::frb(sync)]
pub fn current_list_detail() -> Option<ListDetail> {
    lock_service()?.current_list().as_ref().map(to_list_detail)
}

/// One list by id, independent of navigation.
#[flutter_rust_bridge::frb(sync)]
pub fn list_detail(list_id: String) -> Option<ListDetail> {
    lock_service()?.list(&list_id).as_ref().map(to_list_detail)
}

/// Blocks until pending writes reach storage; call when the app backgrounds.
#[flutter_rust_bridge::frb(sync)]
pub fn checklist_flush() -> String {
    match lock_service() {
        Some(service) => {
            service.flush();
            String::new()
        }
        None => "checklist not initialized".to_string(),
    }
}

fn act(
    f: impl FnOnce(&mut ChecklistService) -> Result<Option<String>, ServiceError>,
    success_message: &str,
) -> ChecklistActionResponse {
    let Some(mut service) = lock_service() else {
        return ChecklistActionResponse::failure("checklist not initialized");
    };
    match f(&mut service) {
        Ok(id) => ChecklistActionResponse::success(success_message, id),
        Err(err) => ChecklistActionResponse::failure(err.to_string()),
    }
}

fn lock_service() -> Option<MutexGuard<'static, ChecklistService>> {
    RUNTIME
        .get()
        .map(|runtime| runtime.service.lock().unwrap_or_else(PoisonError::into_inner))
}

fn same_path_or_error(runtime: &Runtime, requested: &Path) -> String {
    if runtime.db_path.as_path() == requested {
        String::new()
    } else {
        format!(
            "checklist already initialized at `{}`; refusing to switch to `{}`",
            runtime.db_path.display(),
            requested.display()
        )
    }
}

fn resolve_db_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        return PathBuf::from(trimmed);
    }
    if let Ok(env_value) = std::env::var(DB_PATH_ENV) {
        let env_trimmed = env_value.trim();
        if !env_trimmed.is_empty() {
            return PathBuf::from(env_trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}

fn to_list_card(list: &Checklist) -> ListCard {
    let progress = list.progress();
    ListCard {
        list_id: list.id.clone(),
        title: list.title.clone(),
        created_at: list.created_at.clone(),
        total_items: saturating_u32(progress.total),
        completed_items: saturating_u32(progress.completed),
        progress_percent: progress.percent,
    }
}

fn to_list_detail(list: &Checklist) -> ListDetail {
    let partition = list.partition();
    ListDetail {
        list_id: list.id.clone(),
        title: list.title.clone(),
        pending: partition.pending.into_iter().map(to_item_row).collect(),
        completed: partition.completed.into_iter().map(to_item_row).collect(),
    }
}

fn to_item_row(item: &ChecklistItem) -> ItemRow {
    ItemRow {
        item_id: item.id.clone(),
        name: item.name.clone(),
        quantity: item.quantity,
        completed: item.completed,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
