//! Experience store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Hold the ordered list of experience records for one session.
//! - Offer exactly three mutations: append, replace-at, remove-at.
//!
//! # Invariants
//! - Iteration order is insertion order.
//! - Out-of-range indices fail with `OutOfRange` and leave the list unchanged.
//! - An entry keeps its `ExperienceId` across `update_at`.

use crate::model::experience::{ExperienceId, ExperienceRecord};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for index-addressed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `index` is outside `[0, len)`.
    OutOfRange { index: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => write!(
                f,
                "experience index {index} is out of range for {len} record(s)"
            ),
        }
    }
}

impl Error for StoreError {}

/// One stored record with its stable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub id: ExperienceId,
    pub record: ExperienceRecord,
}

/// Repository interface for the experience list.
pub trait ExperienceRepository {
    /// Returns all records in insertion order.
    fn list_all(&self) -> Vec<ExperienceRecord>;
    /// Appends `record` and returns the id assigned to it.
    fn add(&mut self, record: ExperienceRecord) -> ExperienceId;
    /// Replaces the record at `index`.
    fn update_at(&mut self, index: usize, record: ExperienceRecord) -> StoreResult<()>;
    /// Removes the record at `index` and returns it.
    fn delete_at(&mut self, index: usize) -> StoreResult<ExperienceRecord>;
    /// Returns the record at `index`, if any.
    fn get(&self, index: usize) -> Option<&ExperienceRecord>;
    /// Returns id + record pairs in insertion order.
    fn entries(&self) -> &[ExperienceEntry];

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Resolves a stable id to its current position.
    fn position_of(&self, id: ExperienceId) -> Option<usize> {
        self.entries().iter().position(|entry| entry.id == id)
    }
}

/// Session-scoped experience store backed by a `Vec`.
#[derive(Debug, Default)]
pub struct InMemoryExperienceStore {
    entries: Vec<ExperienceEntry>,
}

impl InMemoryExperienceStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(&self, index: usize, op: &str) -> StoreResult<()> {
        let len = self.entries.len();
        if index >= len {
            warn!(
                "event={op} module=store status=error error_code=out_of_range index={index} len={len}"
            );
            return Err(StoreError::OutOfRange { index, len });
        }
        Ok(())
    }
}

impl ExperienceRepository for InMemoryExperienceStore {
    fn list_all(&self) -> Vec<ExperienceRecord> {
        self.entries
            .iter()
            .map(|entry| entry.record.clone())
            .collect()
    }

    fn add(&mut self, record: ExperienceRecord) -> ExperienceId {
        let id = Uuid::new_v4();
        self.entries.push(ExperienceEntry { id, record });
        debug!(
            "event=experience_add module=store status=ok index={} len={}",
            self.entries.len() - 1,
            self.entries.len()
        );
        id
    }

    fn update_at(&mut self, index: usize, record: ExperienceRecord) -> StoreResult<()> {
        self.check_index(index, "experience_update")?;
        self.entries[index].record = record;
        debug!(
            "event=experience_update module=store status=ok index={index} len={}",
            self.entries.len()
        );
        Ok(())
    }

    fn delete_at(&mut self, index: usize) -> StoreResult<ExperienceRecord> {
        self.check_index(index, "experience_delete")?;
        let removed = self.entries.remove(index);
        debug!(
            "event=experience_delete module=store status=ok index={index} len={}",
            self.entries.len()
        );
        Ok(removed.record)
    }

    fn get(&self, index: usize) -> Option<&ExperienceRecord> {
        self.entries.get(index).map(|entry| &entry.record)
    }

    fn entries(&self) -> &[ExperienceEntry] {
        &self.entries
    }
}
