//! List view cards.
//!
//! # Responsibility
//! - Project stored records into the card fields the list view shows.
//! - Render cards as plain text for terminal front-ends.
//!
//! # Invariants
//! - Card order and `index` follow the store's current order.
//! - `details` and `notes` are form-only and never appear on cards.

use crate::model::experience::ExperienceRecord;
use crate::route::Route;

const EMPTY_LIST_MESSAGE: &str = "No experiences yet. Use `add` to create one.";

/// One card on the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCard {
    /// Current position; becomes the edit route index.
    pub index: usize,
    pub title: String,
    /// Derived period text.
    pub date: String,
    pub duration: String,
    pub summary: String,
    pub keywords: String,
}

impl ListCard {
    pub fn from_record(index: usize, record: &ExperienceRecord) -> Self {
        Self {
            index,
            title: record.title().to_string(),
            date: record.date().to_string(),
            duration: record.duration().to_string(),
            summary: record.summary().to_string(),
            keywords: record.keywords().to_string(),
        }
    }

    /// Route opened when the card is selected.
    pub fn edit_route(&self) -> Route {
        Route::Edit(self.index)
    }
}

/// Renders one card as a block of text lines.
pub fn render_card(card: &ListCard) -> String {
    let title = if card.title.is_empty() {
        "(untitled)"
    } else {
        card.title.as_str()
    };
    format!(
        "[{index}] {title}\n    📅 Period: {date}\n    📌 Duration: {duration}\n    📝 Summary: {summary}\n    🔍 Keywords: {keywords}",
        index = card.index,
        date = card.date,
        duration = card.duration,
        summary = card.summary,
        keywords = card.keywords,
    )
}

/// Renders all cards separated by blank lines, or an empty-state message.
pub fn render_list(cards: &[ListCard]) -> String {
    if cards.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    cards
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}
