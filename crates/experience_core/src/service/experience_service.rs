//! Experience form use-case service.
//!
//! # Responsibility
//! - Open add/edit forms for a route.
//! - Save forms into the store, deriving the period text on every save.
//! - Gate deletion behind a confirmation collaborator.
//!
//! # Invariants
//! - Service APIs mutate only through `ExperienceRepository` operations.
//! - Saving never validates field contents; reversed ranges are logged only.
//! - A declined confirmation leaves the store untouched.

use crate::model::experience::{ExperienceForm, ExperienceRecord};
use crate::repo::experience_store::{ExperienceRepository, StoreError};
use crate::route::Route;
use crate::view::list_view::{render_list, ListCard};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for form use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Index-addressed store operation failed.
    Store(StoreError),
    /// A form was requested for a route that renders the list.
    NotAFormRoute(Route),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotAFormRoute(route) => write!(f, "route `{route}` has no form"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotAFormRoute(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Whether a form creates a new record or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(usize),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    /// Form heading shown by views.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Add => "New experience",
            Self::Edit(_) => "Edit experience",
        }
    }
}

/// Form state opened for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    pub mode: FormMode,
    pub form: ExperienceForm,
}

/// Confirmation collaborator asked before a record is removed.
pub trait DeleteConfirmation {
    /// Returns `true` when the user confirms removing `record`.
    fn confirm_delete(&mut self, index: usize, record: &ExperienceRecord) -> bool;
}

impl<F> DeleteConfirmation for F
where
    F: FnMut(usize, &ExperienceRecord) -> bool,
{
    fn confirm_delete(&mut self, index: usize, record: &ExperienceRecord) -> bool {
        self(index, record)
    }
}

/// Use-case service wrapper over one owned experience store.
pub struct ExperienceService<R: ExperienceRepository> {
    repo: R,
}

impl<R: ExperienceRepository> ExperienceService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Read access to the underlying store.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns all records in insertion order.
    pub fn list_all(&self) -> Vec<ExperienceRecord> {
        self.repo.list_all()
    }

    /// Returns list cards for the list view.
    pub fn list_cards(&self) -> Vec<ListCard> {
        self.repo
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| ListCard::from_record(index, &entry.record))
            .collect()
    }

    /// Renders the list view as text.
    pub fn render_list(&self) -> String {
        render_list(&self.list_cards())
    }

    /// Opens the form for `route`.
    ///
    /// # Contract
    /// - `Route::Add` yields a blank form dated today.
    /// - `Route::Edit(i)` yields record `i`'s fields, or `OutOfRange`.
    /// - `Route::List` is rejected with `NotAFormRoute`.
    pub fn open_form(&self, route: Route) -> ServiceResult<FormSession> {
        match route {
            Route::List => Err(ServiceError::NotAFormRoute(route)),
            Route::Add => Ok(FormSession {
                mode: FormMode::Add,
                form: ExperienceForm::new(),
            }),
            Route::Edit(index) => {
                let record = self.repo.get(index).ok_or(StoreError::OutOfRange {
                    index,
                    len: self.repo.len(),
                })?;
                Ok(FormSession {
                    mode: FormMode::Edit(index),
                    form: record.to_form(),
                })
            }
        }
    }

    /// Saves `form` as a new record or over an existing one.
    ///
    /// # Contract
    /// - `date` is derived from the form bounds on every save.
    /// - `FormMode::Add` appends; `FormMode::Edit(i)` replaces position `i`.
    /// - Returns the saved record.
    pub fn save_form(
        &mut self,
        mode: FormMode,
        form: ExperienceForm,
    ) -> ServiceResult<ExperienceRecord> {
        if form.has_reversed_range() {
            warn!(
                "event=experience_save module=service status=warn reason=reversed_range editing={}",
                mode.is_editing()
            );
        }

        let record = form.save();
        match mode {
            FormMode::Add => {
                self.repo.add(record.clone());
            }
            FormMode::Edit(index) => self.repo.update_at(index, record.clone())?,
        }

        info!(
            "event=experience_save module=service status=ok editing={} len={}",
            mode.is_editing(),
            self.repo.len()
        );
        Ok(record)
    }

    /// Removes record `index` after the collaborator confirms.
    ///
    /// Returns `Ok(None)` when confirmation is declined. The index is checked
    /// before the collaborator is asked.
    pub fn delete_with_confirmation(
        &mut self,
        index: usize,
        confirm: &mut dyn DeleteConfirmation,
    ) -> ServiceResult<Option<ExperienceRecord>> {
        let record = self.repo.get(index).ok_or(StoreError::OutOfRange {
            index,
            len: self.repo.len(),
        })?;

        if !confirm.confirm_delete(index, record) {
            info!("event=experience_delete module=service status=cancelled index={index}");
            return Ok(None);
        }

        let removed = self.repo.delete_at(index)?;
        info!(
            "event=experience_delete module=service status=ok index={index} len={}",
            self.repo.len()
        );
        Ok(Some(removed))
    }
}
