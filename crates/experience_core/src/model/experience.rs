//! Experience domain model.
//!
//! # Responsibility
//! - Define the editable form shape and the saved record shape.
//! - Own the derivation of the `date` display text.
//!
//! # Invariants
//! - A record is only built by saving a form, so `date` always matches
//!   `start_date`/`end_date`.
//! - `start_date <= end_date` is not enforced.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Format used for both date bounds and the derived period text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static KEYWORD_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid keyword separator regex"));

/// Stable identifier assigned by the store when a record is appended.
pub type ExperienceId = Uuid;

/// Editable experience fields, as held by an add/edit form.
///
/// Carries everything a record has except the derived `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceForm {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free text, e.g. "3 months".
    pub duration: String,
    pub summary: String,
    pub details: String,
    /// Informally comma-separated.
    pub keywords: String,
    pub notes: String,
}

impl ExperienceForm {
    /// Creates an empty form with both bounds set to the current UTC day.
    pub fn new() -> Self {
        Self::blank_on(today())
    }

    /// Creates an empty form with both bounds set to `day`.
    pub fn blank_on(day: NaiveDate) -> Self {
        Self {
            title: String::new(),
            start_date: day,
            end_date: day,
            duration: String::new(),
            summary: String::new(),
            details: String::new(),
            keywords: String::new(),
            notes: String::new(),
        }
    }

    /// Builds the saved record, deriving `date` from the current bounds.
    pub fn save(self) -> ExperienceRecord {
        ExperienceRecord::from(self)
    }

    /// Returns whether the end bound precedes the start bound.
    pub fn has_reversed_range(&self) -> bool {
        self.end_date < self.start_date
    }
}

impl Default for ExperienceForm {
    fn default() -> Self {
        Self::new()
    }
}

/// One saved experience entry.
///
/// Fields are read-only; edits go through [`ExperienceRecord::to_form`] and a
/// new save. Deserialization ignores any incoming `date` and derives it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ExperienceForm")]
pub struct ExperienceRecord {
    title: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    /// `YYYY-MM-DD ~ YYYY-MM-DD`, derived at save time.
    date: String,
    duration: String,
    summary: String,
    details: String,
    keywords: String,
    notes: String,
}

impl ExperienceRecord {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Derived period text shown on list cards.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Splits `keywords` on commas, trimming and dropping empty pieces.
    pub fn keyword_list(&self) -> Vec<&str> {
        KEYWORD_SEPARATOR_RE
            .split(self.keywords.trim())
            .filter(|keyword| !keyword.is_empty())
            .collect()
    }

    /// Returns an editable copy of this record's fields.
    pub fn to_form(&self) -> ExperienceForm {
        ExperienceForm {
            title: self.title.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            duration: self.duration.clone(),
            summary: self.summary.clone(),
            details: self.details.clone(),
            keywords: self.keywords.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl From<ExperienceForm> for ExperienceRecord {
    fn from(form: ExperienceForm) -> Self {
        let date = format_period(form.start_date, form.end_date);
        Self {
            title: form.title,
            start_date: form.start_date,
            end_date: form.end_date,
            date,
            duration: form.duration,
            summary: form.summary,
            details: form.details,
            keywords: form.keywords,
            notes: form.notes,
        }
    }
}

/// Formats a date range as `YYYY-MM-DD ~ YYYY-MM-DD`.
pub fn format_period(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} ~ {}", start.format(DATE_FORMAT), end.format(DATE_FORMAT))
}

/// Parses a `YYYY-MM-DD` date as entered in forms.
pub fn parse_form_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{format_period, parse_form_date, ExperienceForm};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn period_pads_month_and_day() {
        assert_eq!(
            format_period(day(2024, 1, 5), day(2024, 1, 10)),
            "2024-01-05 ~ 2024-01-10"
        );
    }

    #[test]
    fn parse_form_date_trims_input() {
        assert_eq!(parse_form_date(" 2023-12-31 ").unwrap(), day(2023, 12, 31));
        assert!(parse_form_date("2023/12/31").is_err());
    }

    #[test]
    fn keyword_list_ignores_blank_entries() {
        let mut form = ExperienceForm::blank_on(day(2024, 3, 1));
        form.keywords = " rust ,  cli,, teamwork ,".to_string();
        let record = form.save();
        assert_eq!(record.keyword_list(), vec!["rust", "cli", "teamwork"]);
    }

    #[test]
    fn reversed_range_is_detected_but_still_saves() {
        let mut form = ExperienceForm::blank_on(day(2024, 3, 10));
        form.end_date = day(2024, 3, 1);
        assert!(form.has_reversed_range());
        assert_eq!(form.save().date(), "2024-03-10 ~ 2024-03-01");
    }
}
