//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose list/form use-cases of the session store to the UI via FRB.
//! - Translate typed core errors into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - All calls share one process-wide store; it is never persisted.
//! - Dates cross the boundary as `YYYY-MM-DD` text.

use experience_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_form_date,
    ping as ping_inner, ExperienceForm, ExperienceRecord, ExperienceRepository, ExperienceService,
    FormMode, InMemoryExperienceStore, Route, DATE_FORMAT,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};

type SessionService = ExperienceService<InMemoryExperienceStore>;

static SESSION: OnceLock<Mutex<SessionService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
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
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Editable experience fields as sent by the form view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExperienceInput {
    pub title: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`.
    pub end_date: String,
    pub duration: String,
    pub summary: String,
    pub details: String,
    pub keywords: String,
    pub notes: String,
}

/// One record as shown by list and form views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceItem {
    /// Current position; valid until the next delete.
    pub index: u32,
    /// Stable id in string form.
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    /// Derived `YYYY-MM-DD ~ YYYY-MM-DD`.
    pub date: String,
    pub duration: String,
    pub summary: String,
    pub details: String,
    pub keywords: String,
    pub notes: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceActionResponse {
    pub ok: bool,
    /// Saved or removed record, when the action produced one.
    pub item: Option<ExperienceItem>,
    pub message: String,
}

impl ExperienceActionResponse {
    fn success(message: impl Into<String>, item: Option<ExperienceItem>) -> Self {
        Self {
            ok: true,
            item,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item: None,
            message: message.into(),
        }
    }
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceListResponse {
    pub ok: bool,
    /// Records in insertion order; empty on failure.
    pub items: Vec<ExperienceItem>,
    pub message: String,
}

/// Form state resolved from a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceFormResponse {
    pub ok: bool,
    pub is_editing: bool,
    /// Present for edit routes.
    pub editing_index: Option<u32>,
    pub heading: String,
    pub form: ExperienceInput,
    pub message: String,
}

/// Lists all session records in insertion order.
///
/// # FFI contract
/// - Never panics.
/// - An unavailable session returns `ok = false`, never an empty success.
#[flutter_rust_bridge::frb(sync)]
pub fn experience_list() -> ExperienceListResponse {
    list_items(session_cell())
}

fn list_items(cell: &Mutex<SessionService>) -> ExperienceListResponse {
    let listed = lock(cell).and_then(|session| {
        session
            .repo()
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| to_item(index, entry.id.to_string(), &entry.record))
            .collect::<Result<Vec<_>, String>>()
    });

    match listed {
        Ok(items) => ExperienceListResponse {
            ok: true,
            message: format!("{} experience(s).", items.len()),
            items,
        },
        Err(err) => {
            warn!("event=experience_list module=ffi status=error error={err}");
            ExperienceListResponse {
                ok: false,
                items: Vec::new(),
                message: format!("experience_list failed: {err}"),
            }
        }
    }
}

/// Opens the form for a navigation path (`/add` or `/edit/{index}`).
#[flutter_rust_bridge::frb(sync)]
pub fn experience_open_form(path: String) -> ExperienceFormResponse {
    let opened = Route::parse(path.as_str())
        .map_err(|err| err.to_string())
        .and_then(|route| {
            let session = lock_session()?;
            session.open_form(route).map_err(|err| err.to_string())
        })
        .and_then(|opened| {
            let editing_index = match opened.mode {
                FormMode::Edit(index) => Some(to_ffi_index(index)?),
                FormMode::Add => None,
            };
            Ok((opened, editing_index))
        });

    match opened {
        Ok((opened, editing_index)) => ExperienceFormResponse {
            ok: true,
            is_editing: opened.mode.is_editing(),
            editing_index,
            heading: opened.mode.heading().to_string(),
            form: to_input(&opened.form),
            message: String::new(),
        },
        Err(err) => ExperienceFormResponse {
            ok: false,
            is_editing: false,
            editing_index: None,
            heading: String::new(),
            form: ExperienceInput::default(),
            message: format!("experience_open_form failed: {err}"),
        },
    }
}

/// Appends a new record built from `input`.
#[flutter_rust_bridge::frb(sync)]
pub fn experience_add(input: ExperienceInput) -> ExperienceActionResponse {
    save(FormMode::Add, input, "Experience added.", "experience_add")
}

/// Replaces the record at `index` with one built from `input`.
#[flutter_rust_bridge::frb(sync)]
pub fn experience_update(index: u32, input: ExperienceInput) -> ExperienceActionResponse {
    save(
        FormMode::Edit(index as usize),
        input,
        "Experience updated.",
        "experience_update",
    )
}

/// Removes the record at `index` once the UI has asked the user.
///
/// # FFI contract
/// - `confirmed = false` leaves the store untouched and still returns `ok`.
/// - Out-of-range indices return a failure envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn experience_delete(index: u32, confirmed: bool) -> ExperienceActionResponse {
    let index = index as usize;
    let result = lock_session().and_then(|mut session| {
        let id = session
            .repo()
            .entries()
            .get(index)
            .map(|entry| entry.id.to_string())
            .unwrap_or_default();
        let mut answer = |_: usize, _: &ExperienceRecord| confirmed;
        let removed = session
            .delete_with_confirmation(index, &mut answer)
            .map_err(|err| err.to_string())?;
        removed
            .map(|record| to_item(index, id, &record))
            .transpose()
    });

    match result {
        Ok(Some(item)) => ExperienceActionResponse::success("Experience deleted.", Some(item)),
        Ok(None) => ExperienceActionResponse::success("Delete cancelled.", None),
        Err(err) => ExperienceActionResponse::failure(format!("experience_delete failed: {err}")),
    }
}

fn save(
    mode: FormMode,
    input: ExperienceInput,
    message: &str,
    op: &str,
) -> ExperienceActionResponse {
    let form = match to_form(&input) {
        Ok(form) => form,
        Err(err) => return ExperienceActionResponse::failure(format!("{op} failed: {err}")),
    };

    let result = lock_session().and_then(|mut session| {
        let record = session.save_form(mode, form).map_err(|err| err.to_string())?;
        let index = match mode {
            FormMode::Add => session.repo().len() - 1,
            FormMode::Edit(index) => index,
        };
        let id = session
            .repo()
            .entries()
            .get(index)
            .map(|entry| entry.id.to_string())
            .unwrap_or_default();
        to_item(index, id, &record)
    });

    match result {
        Ok(item) => ExperienceActionResponse::success(message, Some(item)),
        Err(err) => ExperienceActionResponse::failure(format!("{op} failed: {err}")),
    }
}

fn session_cell() -> &'static Mutex<SessionService> {
    SESSION.get_or_init(|| Mutex::new(ExperienceService::new(InMemoryExperienceStore::new())))
}

fn lock_session() -> Result<MutexGuard<'static, SessionService>, String> {
    lock(session_cell())
}

fn lock(cell: &Mutex<SessionService>) -> Result<MutexGuard<'_, SessionService>, String> {
    cell.lock()
        .map_err(|_| "experience session is unavailable after a panic".to_string())
}

fn to_form(input: &ExperienceInput) -> Result<ExperienceForm, String> {
    let start_date = parse_form_date(&input.start_date)
        .map_err(|err| format!("invalid start_date `{}`: {err}", input.start_date))?;
    let end_date = parse_form_date(&input.end_date)
        .map_err(|err| format!("invalid end_date `{}`: {err}", input.end_date))?;
    Ok(ExperienceForm {
        title: input.title.clone(),
        start_date,
        end_date,
        duration: input.duration.clone(),
        summary: input.summary.clone(),
        details: input.details.clone(),
        keywords: input.keywords.clone(),
        notes: input.notes.clone(),
    })
}

fn to_input(form: &ExperienceForm) -> ExperienceInput {
    ExperienceInput {
        title: form.title.clone(),
        start_date: form.start_date.format(DATE_FORMAT).to_string(),
        end_date: form.end_date.format(DATE_FORMAT).to_string(),
        duration: form.duration.clone(),
        summary: form.summary.clone(),
        details: form.details.clone(),
        keywords: form.keywords.clone(),
        notes: form.notes.clone(),
    }
}

/// Positions cross the boundary as `u32`; larger ones are an error.
fn to_ffi_index(index: usize) -> Result<u32, String> {
    u32::try_from(index).map_err(|_| format!("experience index {index} does not fit in u32"))
}

fn to_item(
    index: usize,
    id: String,
    record: &ExperienceRecord,
) -> Result<ExperienceItem, String> {
    Ok(ExperienceItem {
        index: to_ffi_index(index)?,
        id,
        title: record.title().to_string(),
        start_date: record.start_date().format(DATE_FORMAT).to_string(),
        end_date: record.end_date().format(DATE_FORMAT).to_string(),
        date: record.date().to_string(),
        duration: record.duration().to_string(),
        summary: record.summary().to_string(),
        details: record.details().to_string(),
        keywords: record.keywords().to_string(),
        notes: record.notes().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, experience_add, experience_delete, experience_list, experience_open_form,
        experience_update, init_logging, list_items, ping, to_ffi_index, ExperienceInput,
        SessionService,
    };
    use experience_core::{ExperienceService, InMemoryExperienceStore};
    use std::sync::Mutex;

    // Every test shares the process-wide session store.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn input(title: &str) -> ExperienceInput {
        ExperienceInput {
            title: title.to_string(),
            start_date: "2024-01-05".to_string(),
            end_date: "2024-01-10".to_string(),
            ..ExperienceInput::default()
        }
    }

    fn clear_session() {
        while !experience_list().items.is_empty() {
            assert!(experience_delete(0, true).ok);
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(error.contains("absolute"));
    }

    #[test]
    fn add_update_delete_flow() {
        let _guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_session();

        let added = experience_add(input("A"));
        assert!(added.ok, "{}", added.message);
        let item = added.item.expect("added item");
        assert_eq!(item.index, 0);
        assert_eq!(item.date, "2024-01-05 ~ 2024-01-10");
        assert!(!item.id.is_empty());

        assert!(experience_add(input("B")).ok);
        let updated = experience_update(1, input("B2"));
        assert!(updated.ok, "{}", updated.message);
        assert_eq!(updated.item.map(|item| item.title), Some("B2".to_string()));

        let cancelled = experience_delete(0, false);
        assert!(cancelled.ok);
        assert!(cancelled.item.is_none());
        assert_eq!(experience_list().items.len(), 2);

        assert!(experience_delete(0, true).ok);
        let listed = experience_list();
        assert!(listed.ok, "{}", listed.message);
        let titles: Vec<String> = listed.items.into_iter().map(|item| item.title).collect();
        assert_eq!(titles, vec!["B2".to_string()]);
        clear_session();
    }

    #[test]
    fn out_of_range_and_bad_dates_fail() {
        let _guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_session();

        let update = experience_update(5, input("x"));
        assert!(!update.ok);
        assert!(update.message.contains("out of range"));
        assert!(!experience_delete(0, true).ok);

        let mut bad = input("bad");
        bad.end_date = "2024/01/10".to_string();
        let response = experience_add(bad);
        assert!(!response.ok);
        assert!(response.message.contains("end_date"));
        assert!(experience_list().items.is_empty());
    }

    #[test]
    fn list_reports_poisoned_session_as_failure() {
        let cell: Mutex<SessionService> =
            Mutex::new(ExperienceService::new(InMemoryExperienceStore::new()));
        assert!(list_items(&cell).ok);

        let poisoned = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _held = cell.lock().unwrap();
                    panic!("poison session");
                })
                .join()
        });
        assert!(poisoned.is_err());

        let response = list_items(&cell);
        assert!(!response.ok);
        assert!(response.items.is_empty());
        assert!(response.message.contains("unavailable"));
    }

    #[test]
    fn index_conversion_fails_instead_of_clamping() {
        assert_eq!(to_ffi_index(7), Ok(7));
        assert_eq!(to_ffi_index(u32::MAX as usize), Ok(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        {
            let err = to_ffi_index(u32::MAX as usize + 1).unwrap_err();
            assert!(err.contains("does not fit"));
        }
    }

    #[test]
    fn open_form_resolves_routes() {
        let _guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_session();

        let blank = experience_open_form("/add".to_string());
        assert!(blank.ok);
        assert!(!blank.is_editing);
        assert!(blank.form.title.is_empty());

        assert!(experience_add(input("Edit me")).ok);
        let edit = experience_open_form("/edit/0".to_string());
        assert!(edit.ok, "{}", edit.message);
        assert_eq!(edit.editing_index, Some(0));
        assert_eq!(edit.form.title, "Edit me");
        assert_eq!(edit.form.start_date, "2024-01-05");

        assert!(!experience_open_form("/".to_string()).ok);
        assert!(!experience_open_form("/edit/9".to_string()).ok);
        assert!(!experience_open_form("/nope".to_string()).ok);
        clear_session();
    }
}
