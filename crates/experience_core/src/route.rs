//! Navigation routes between the list view and the form view.
//!
//! # Responsibility
//! - Parse `/`, `/add` and `/edit/{index}` into typed routes.
//! - Format routes back into paths for navigation calls.
//!
//! # Invariants
//! - `Route::parse(route.path())` returns the same route.
//! - The edit index is a position, resolved against the current list by
//!   the caller.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EDIT_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/edit/([0-9]+)$").expect("valid edit path regex"));

/// Logical routes of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Experience list (`/`).
    List,
    /// Blank form in add mode (`/add`).
    Add,
    /// Form for the record at the given position (`/edit/{index}`).
    Edit(usize),
}

/// Route parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Path matches none of the known routes.
    UnknownPath(String),
    /// Edit index does not fit in `usize`.
    InvalidIndex(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPath(path) => write!(f, "unknown route: `{path}`"),
            Self::InvalidIndex(value) => write!(f, "invalid edit index: `{value}`"),
        }
    }
}

impl Error for RouteError {}

impl Route {
    /// Parses a navigation path. A single trailing slash is tolerated.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let normalized = match trimmed.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => trimmed,
        };

        match normalized {
            "/" | "" => return Ok(Self::List),
            "/add" => return Ok(Self::Add),
            _ => {}
        }

        let caps = EDIT_PATH_RE
            .captures(normalized)
            .ok_or_else(|| RouteError::UnknownPath(path.to_string()))?;
        let raw_index = &caps[1];
        raw_index
            .parse::<usize>()
            .map(Self::Edit)
            .map_err(|_| RouteError::InvalidIndex(raw_index.to_string()))
    }

    /// Returns the navigation path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::List => "/".to_string(),
            Self::Add => "/add".to_string(),
            Self::Edit(index) => format!("/edit/{index}"),
        }
    }

    /// Returns whether this route renders the form view.
    pub fn is_form(&self) -> bool {
        !matches!(self, Self::List)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
