//! Playlist Insights: read-only aggregation queries over a playlist dataset.
//!
//! The library holds everything that does not touch egui: loading the
//! `playlist` and `tracks` tables, the five dashboard queries, and the pure
//! `render(params) -> ViewModel` step the UI calls on every interaction.

pub mod config;
pub mod data;
pub mod error;
pub mod query;
pub mod view;

pub use data::model::{Dataset, Playlist, TrackRow};
pub use error::QueryError;
