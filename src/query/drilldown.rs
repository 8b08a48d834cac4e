use crate::data::model::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistTrack {
    pub playlist_name: String,
    pub track_name: String,
    pub album_name: String,
    pub track_duration_min: f64,
}

/// Result of an artist drill-down. An artist without tracks is a normal
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum DrillDown {
    Tracks(Vec<ArtistTrack>),
    NoMatches { artist: String },
}

impl DrillDown {
    pub fn is_empty(&self) -> bool {
        matches!(self, DrillDown::NoMatches { .. })
    }

    /// Informational text shown instead of a table when nothing matched.
    pub fn empty_message(&self) -> Option<String> {
        match self {
            DrillDown::NoMatches { artist } => Some(format!("No playlists found for {artist}.")),
            DrillDown::Tracks(_) => None,
        }
    }
}

/// Every track row whose `artist_name` equals `artist` exactly, in source order.
/// A blank `artist` matches nothing.
pub fn artist_tracks(dataset: &Dataset, artist: &str) -> DrillDown {
    let rows: Vec<ArtistTrack> = dataset
        .tracks
        .iter()
        .filter(|t| t.artist() == Some(artist))
        .map(|t| ArtistTrack {
            playlist_name: t.playlist_name.clone(),
            track_name: t.track_name.clone(),
            album_name: t.album_name.clone(),
            track_duration_min: t.track_duration_min,
        })
        .collect();

    log::debug!("artist_tracks({artist:?}) -> {} rows", rows.len());
    if rows.is_empty() {
        DrillDown::NoMatches {
            artist: artist.to_string(),
        }
    } else {
        DrillDown::Tracks(rows)
    }
}
