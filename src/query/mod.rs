//! The five dashboard queries.
//!
//! Every query is a pure function of an immutable [`Dataset`](crate::Dataset)
//! and a few scalar parameters. Nothing is cached: callers re-run a query on
//! every parameter change. Orderings are total (ties are broken on a name
//! or id), so identical inputs always give identical output.

pub mod artists;
pub mod dominance;
pub mod drilldown;
pub mod duration;
pub mod followers;

pub use artists::{top_artists, ArtistFrequency};
pub use dominance::{artist_shares, top_artist_per_playlist, ArtistShare, DominantArtist, Heatmap};
pub use drilldown::{artist_tracks, ArtistTrack, DrillDown};
pub use duration::{average_duration_by_bucket, BucketSpec, DurationBucket};
pub use followers::{top_playlists_by_followers, PlaylistFollowers};
