//! Text projections of the experience list.

pub mod list_view;
