use crate::data::model::Dataset;
use crate::error::{ensure_at_least, QueryError};

// ---------------------------------------------------------------------------
// BucketSpec – equal-width ranges over `num_tracks`
// ---------------------------------------------------------------------------

/// `k` contiguous track-count ranges `0-w, w-2w, …, (k-1)w-kw` with
/// `w = max_tracks / k`.
///
/// Ranges are closed above: a value equal to an edge belongs to the lower
/// bucket. Values past `kw` (left over by the integer division) land in the
/// last bucket. When `w` truncates to zero the spec collapses to a single
/// `0-max_tracks` bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    /// `len() + 1` ascending boundaries, starting at 0.
    edges: Vec<u64>,
}

impl BucketSpec {
    pub fn new(max_tracks: u64, k: usize) -> Result<Self, QueryError> {
        ensure_at_least("k", k, 1)?;

        let width = max_tracks / k as u64;
        if width == 0 {
            log::warn!("{k} buckets over max_tracks={max_tracks} truncate to width 0; using one bucket");
            return Ok(BucketSpec {
                edges: vec![0, max_tracks],
            });
        }

        Ok(BucketSpec {
            edges: (0..=k as u64).map(|i| i * width).collect(),
        })
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(lower, upper)` boundaries of bucket `i`.
    pub fn bounds(&self, i: usize) -> (u64, u64) {
        (self.edges[i], self.edges[i + 1])
    }

    pub fn label(&self, i: usize) -> String {
        let (lower, upper) = self.bounds(i);
        format!("{lower}-{upper}")
    }

    /// Index of the bucket holding a playlist with `num_tracks` tracks.
    pub fn bucket_of(&self, num_tracks: u64) -> usize {
        let upper_edges = &self.edges[1..];
        upper_edges
            .partition_point(|&edge| edge < num_tracks)
            .min(self.len() - 1)
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Mean playlist duration within one track-count bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationBucket {
    pub label: String,
    pub lower: u64,
    pub upper: u64,
    pub playlist_count: usize,
    /// `None` when no playlist falls in the bucket.
    pub average_duration_min: Option<f64>,
}

/// Average `playlist_duration_min` per track-count bucket, `k` buckets wide.
///
/// Buckets come back in ascending boundary order and empty ones are kept,
/// so the output always has [`BucketSpec::len`] entries.
pub fn average_duration_by_bucket(
    dataset: &Dataset,
    k: usize,
) -> Result<Vec<DurationBucket>, QueryError> {
    let spec = BucketSpec::new(dataset.max_tracks(), k)?;

    let mut totals = vec![(0usize, 0.0f64); spec.len()];
    for p in &dataset.playlists {
        let (count, sum) = &mut totals[spec.bucket_of(p.num_tracks)];
        *count += 1;
        *sum += p.playlist_duration_min;
    }

    let buckets: Vec<DurationBucket> = totals
        .into_iter()
        .enumerate()
        .map(|(i, (count, sum))| {
            let (lower, upper) = spec.bounds(i);
            DurationBucket {
                label: spec.label(i),
                lower,
                upper,
                playlist_count: count,
                average_duration_min: (count > 0).then(|| sum / count as f64),
            }
        })
        .collect();

    log::debug!("average_duration_by_bucket(k={k}) -> {} buckets", buckets.len());
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Playlist;
    use crate::query::fixtures;
    use approx::assert_relative_eq;

    fn counts(buckets: &[DurationBucket]) -> Vec<usize> {
        buckets.iter().map(|b| b.playlist_count).collect()
    }

    #[test]
    fn five_buckets_over_fifty_tracks() {
        let buckets = average_duration_by_bucket(&fixtures::sample(), 5).unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["0-10", "10-20", "20-30", "30-40", "40-50"]);
        assert_eq!(counts(&buckets), vec![2, 1, 1, 1, 1]);
        assert_relative_eq!(buckets[0].average_duration_min.unwrap(), 5.5);
        assert_relative_eq!(buckets[4].average_duration_min.unwrap(), 170.0);
    }

    #[test]
    fn boundary_value_falls_into_lower_bucket() {
        let spec = BucketSpec::new(50, 5).unwrap();
        assert_eq!(spec.bucket_of(0), 0);
        assert_eq!(spec.bucket_of(10), 0);
        assert_eq!(spec.bucket_of(11), 1);
        assert_eq!(spec.bucket_of(50), 4);
    }

    #[test]
    fn values_past_the_last_edge_go_to_last_bucket() {
        // width 16, edges 0..48, max_tracks 50
        let spec = BucketSpec::new(50, 3).unwrap();
        assert_eq!(spec.bounds(2), (32, 48));
        assert_eq!(spec.bucket_of(49), 2);
        assert_eq!(spec.bucket_of(50), 2);

        let buckets = average_duration_by_bucket(&fixtures::sample(), 3).unwrap();
        assert_eq!(counts(&buckets), vec![3, 1, 2]);
    }

    #[test]
    fn empty_buckets_are_kept_without_an_average() {
        // width 12: nothing has 13..=24 tracks
        let buckets = average_duration_by_bucket(&fixtures::sample(), 4).unwrap();
        assert_eq!(buckets[1].label, "12-24");
        assert_eq!(buckets[1].playlist_count, 0);
        assert_eq!(buckets[1].average_duration_min, None);
    }

    #[test]
    fn buckets_partition_playlists_for_any_k() {
        let ds = fixtures::sample();
        for k in 1..=60 {
            let buckets = average_duration_by_bucket(&ds, k).unwrap();
            let total: usize = buckets.iter().map(|b| b.playlist_count).sum();
            assert_eq!(total, ds.playlists.len(), "k={k}");
            assert_eq!(buckets[0].lower, 0);
            assert!(buckets.windows(2).all(|w| w[0].upper == w[1].lower && w[0].lower < w[0].upper));
        }
    }

    #[test]
    fn width_zero_collapses_to_one_bucket() {
        let ds = Dataset::new(
            vec![Playlist::new("a", 1, 2, 6.0), Playlist::new("b", 1, 3, 9.0)],
            Vec::new(),
        );
        let buckets = average_duration_by_bucket(&ds, 5).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "0-3");
        assert_eq!(buckets[0].playlist_count, 2);
        assert_relative_eq!(buckets[0].average_duration_min.unwrap(), 7.5);
    }

    #[test]
    fn zero_max_tracks_collapses_to_one_bucket() {
        let ds = Dataset::new(vec![Playlist::new("empty", 0, 0, 0.0)], Vec::new());
        let buckets = average_duration_by_bucket(&ds, 2).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "0-0");
        assert_eq!(buckets[0].playlist_count, 1);
    }

    #[test]
    fn zero_buckets_is_an_invalid_parameter() {
        assert!(matches!(
            average_duration_by_bucket(&fixtures::sample(), 0),
            Err(QueryError::InvalidParameter { name: "k", .. })
        ));
    }
}
