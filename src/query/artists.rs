use std::collections::HashMap;

use crate::data::model::Dataset;
use crate::error::{ensure_at_least, QueryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFrequency {
    pub artist_name: String,
    /// Track-in-playlist appearances, not distinct songs.
    pub count: usize,
}

/// The `n` artists with the most track rows, ties ordered by name.
/// Rows without an artist are not counted.
pub fn top_artists(dataset: &Dataset, n: usize) -> Result<Vec<ArtistFrequency>, QueryError> {
    ensure_at_least("n", n, 1)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for artist in dataset.tracks.iter().filter_map(|t| t.artist()) {
        *counts.entry(artist).or_default() += 1;
    }

    let mut ranked: Vec<ArtistFrequency> = counts
        .into_iter()
        .map(|(artist, count)| ArtistFrequency {
            artist_name: artist.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.artist_name.cmp(&b.artist_name)));
    ranked.truncate(n);

    log::debug!("top_artists(n={n}) -> {} rows", ranked.len());
    Ok(ranked)
}
