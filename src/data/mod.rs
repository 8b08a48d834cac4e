/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  playlist.{parquet,json,csv}   tracks.{parquet,json,csv}
///              │                          │
///              └────────────┬─────────────┘
///                           ▼
///                     ┌──────────┐
///                     │  loader   │  parse + validate → Dataset
///                     └──────────┘
///                           │
///                           ▼
///                     ┌──────────┐
///                     │ Dataset   │  Vec<Playlist>, Vec<TrackRow>
///                     └──────────┘
/// ```

pub mod loader;
pub mod model;
