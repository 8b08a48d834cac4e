use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Playlist – one row of the `playlist` table
// ---------------------------------------------------------------------------

/// A single playlist with its aggregate counters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Playlist {
    #[serde(deserialize_with = "null_as_empty")]
    pub playlist_name: String,
    pub num_followers: u64,
    pub num_tracks: u64,
    /// Total duration in minutes.
    pub playlist_duration_min: f64,
}

impl Playlist {
    pub fn new(name: &str, num_followers: u64, num_tracks: u64, duration_min: f64) -> Self {
        Playlist {
            playlist_name: name.to_string(),
            num_followers,
            num_tracks,
            playlist_duration_min: duration_min,
        }
    }
}

// ---------------------------------------------------------------------------
// TrackRow – one row of the `tracks` table
// ---------------------------------------------------------------------------

/// Membership of one track in one playlist.
///
/// The same song appears once per playlist containing it, so counting rows
/// counts appearances, not distinct songs.
///
/// Null text cells load as empty strings. A track with an empty
/// `artist_name` has no artist and is left out of every artist aggregate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackRow {
    #[serde(deserialize_with = "int_or_text_id")]
    pub playlist_id: i64,
    #[serde(deserialize_with = "null_as_empty")]
    pub playlist_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub track_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub album_name: String,
    pub track_duration_min: f64,
}

impl TrackRow {
    /// The credited artist, or `None` when the cell was null or blank.
    pub fn artist(&self) -> Option<&str> {
        let name = self.artist_name.as_str();
        (!name.trim().is_empty()).then_some(name)
    }
}

// -- serde helpers shared by the JSON and CSV loaders --

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Playlist ids are integers, but some exports store them as text.
fn int_or_text_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Int(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Int(id) => Ok(id),
        Id::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not an integer id"))),
    }
}

// ---------------------------------------------------------------------------
// Dataset – both tables, immutable once loaded
// ---------------------------------------------------------------------------

/// The loaded `playlist` and `tracks` tables.
///
/// Built once and shared behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub playlists: Vec<Playlist>,
    pub tracks: Vec<TrackRow>,
}

impl Dataset {
    pub fn new(playlists: Vec<Playlist>, tracks: Vec<TrackRow>) -> Self {
        Dataset { playlists, tracks }
    }

    /// Largest `num_tracks` over all playlists, 0 for an empty table.
    pub fn max_tracks(&self) -> u64 {
        self.playlists
            .iter()
            .map(|p| p.num_tracks)
            .max()
            .unwrap_or(0)
    }

    /// Sorted distinct artist names present in the tracks table.
    /// Rows without an artist are skipped.
    pub fn artist_names(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter_map(TrackRow::artist)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
