use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::data::model::Dataset;
use crate::error::{ensure_at_least, QueryError};

// ---------------------------------------------------------------------------
// Top artist per playlist
// ---------------------------------------------------------------------------

/// The rank-1 artist of one playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominantArtist {
    pub playlist_id: i64,
    pub artist_name: String,
    pub track_count: usize,
}

/// For every playlist, the artist contributing the most tracks; then the `n`
/// playlists where that artist dominates most.
///
/// Within a playlist, equal counts go to the lexicographically smallest
/// artist name. Across playlists, equal counts are ordered by `playlist_id`.
/// Rows without an artist are ignored, so a playlist made only of such rows
/// has no entry.
pub fn top_artist_per_playlist(
    dataset: &Dataset,
    n: usize,
) -> Result<Vec<DominantArtist>, QueryError> {
    ensure_at_least("n", n, 1)?;

    // Stage 1: rows per (playlist, artist).
    let mut pair_counts: HashMap<(i64, &str), usize> = HashMap::new();
    for t in &dataset.tracks {
        if let Some(artist) = t.artist() {
            *pair_counts.entry((t.playlist_id, artist)).or_default() += 1;
        }
    }

    // Stage 2: keep the rank-1 artist of each playlist.
    let mut leaders: HashMap<i64, (&str, usize)> = HashMap::new();
    for ((playlist_id, artist), count) in pair_counts {
        leaders
            .entry(playlist_id)
            .and_modify(|best| {
                if count > best.1 || (count == best.1 && artist < best.0) {
                    *best = (artist, count);
                }
            })
            .or_insert((artist, count));
    }

    let mut ranked: Vec<DominantArtist> = leaders
        .into_iter()
        .map(|(playlist_id, (artist, track_count))| DominantArtist {
            playlist_id,
            artist_name: artist.to_string(),
            track_count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.track_count
            .cmp(&a.track_count)
            .then_with(|| a.playlist_id.cmp(&b.playlist_id))
    });
    ranked.truncate(n);

    log::debug!("top_artist_per_playlist(n={n}) -> {} rows", ranked.len());
    Ok(ranked)
}

// ---------------------------------------------------------------------------
// Pie chart: track_count summed per artist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistShare {
    pub artist_name: String,
    pub track_count: usize,
    /// Share of the summed track counts, 0–100.
    pub percent: f64,
}

/// Sum `track_count` per artist over the dominance rows, sorted by artist.
pub fn artist_shares(rows: &[DominantArtist]) -> Vec<ArtistShare> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.artist_name.as_str()).or_default() += row.track_count;
    }

    let grand_total: usize = totals.values().sum();
    totals
        .into_iter()
        .map(|(artist, track_count)| ArtistShare {
            artist_name: artist.to_string(),
            track_count,
            percent: if grand_total == 0 {
                0.0
            } else {
                track_count as f64 * 100.0 / grand_total as f64
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Heatmap: artist × playlist matrix
// ---------------------------------------------------------------------------

/// Dense `artist_name × playlist_id` matrix of track counts.
///
/// Both axes are sorted ascending; combinations absent from the rows are 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Heatmap {
    pub artists: Vec<String>,
    pub playlist_ids: Vec<i64>,
    /// `cells[artist][playlist]`.
    pub cells: Vec<Vec<usize>>,
}

impl Heatmap {
    pub fn from_rows(rows: &[DominantArtist]) -> Self {
        let artists: Vec<String> = rows
            .iter()
            .map(|r| r.artist_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let playlist_ids: Vec<i64> = rows
            .iter()
            .map(|r| r.playlist_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut cells = vec![vec![0; playlist_ids.len()]; artists.len()];
        for row in rows {
            // Both lookups hit: the axes were built from these rows.
            if let (Ok(a), Ok(p)) = (
                artists.binary_search(&row.artist_name),
                playlist_ids.binary_search(&row.playlist_id),
            ) {
                cells[a][p] += row.track_count;
            }
        }

        Heatmap {
            artists,
            playlist_ids,
            cells,
        }
    }

    /// Largest cell value, 0 when empty.
    pub fn max_value(&self) -> usize {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::{self, track};
    use approx::assert_relative_eq;

    fn row(playlist_id: i64, artist: &str, track_count: usize) -> DominantArtist {
        DominantArtist {
            playlist_id,
            artist_name: artist.to_string(),
            track_count,
        }
    }

    #[test]
    fn dominant_artist_sorted_by_count() {
        let ds = Dataset::new(
            Vec::new(),
            vec![track(1, "X", "p1"), track(1, "X", "p1"), track(2, "Y", "p2")],
        );
        assert_eq!(
            top_artist_per_playlist(&ds, 2).unwrap(),
            vec![row(1, "X", 2), row(2, "Y", 1)]
        );
    }

    #[test]
    fn ties_within_a_playlist_pick_smallest_name() {
        let top = top_artist_per_playlist(&fixtures::sample(), 10).unwrap();
        assert_eq!(
            top,
            vec![
                row(3, "Coldplay", 3),
                row(1, "Daft Punk", 2),
                row(2, "Adele", 1),
                row(4, "Justice", 1),
            ]
        );
    }

    #[test]
    fn rows_without_an_artist_never_lead() {
        let ds = Dataset::new(
            Vec::new(),
            vec![
                track(1, "", "a"),
                track(1, "", "b"),
                track(1, "Real", "c"),
                track(2, "", "d"),
            ],
        );
        assert_eq!(top_artist_per_playlist(&ds, 5).unwrap(), vec![row(1, "Real", 1)]);
    }

    #[test]
    fn truncates_to_n() {
        let top = top_artist_per_playlist(&fixtures::sample(), 2).unwrap();
        assert_eq!(top, vec![row(3, "Coldplay", 3), row(1, "Daft Punk", 2)]);
    }

    #[test]
    fn dominant_count_never_exceeds_playlist_rows() {
        let ds = fixtures::sample();
        for r in top_artist_per_playlist(&ds, 50).unwrap() {
            let rows_in_playlist = ds.tracks.iter().filter(|t| t.playlist_id == r.playlist_id).count();
            assert!(r.track_count <= rows_in_playlist);
        }
    }

    #[test]
    fn shares_sum_per_artist() {
        let shares = artist_shares(&[row(1, "X", 3), row(2, "Y", 1), row(3, "X", 4)]);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].artist_name, "X");
        assert_eq!(shares[0].track_count, 7);
        assert_relative_eq!(shares[0].percent, 87.5);
        assert_relative_eq!(shares[1].percent, 12.5);
    }

    #[test]
    fn shares_of_nothing_are_empty() {
        assert!(artist_shares(&[]).is_empty());
    }

    #[test]
    fn heatmap_fills_missing_cells_with_zero() {
        let map = Heatmap::from_rows(&[row(7, "Y", 2), row(3, "X", 5)]);
        assert_eq!(map.artists, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(map.playlist_ids, vec![3, 7]);
        assert_eq!(map.cells, vec![vec![5, 0], vec![0, 2]]);
        assert_eq!(map.max_value(), 5);
    }

    #[test]
    fn zero_rows_is_an_invalid_parameter() {
        assert!(top_artist_per_playlist(&fixtures::sample(), 0).is_err());
    }
}
