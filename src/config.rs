use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// SliderRange – bounds and default of one integer control
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SliderRange {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl SliderRange {
    pub const fn new(min: usize, max: usize, default: usize) -> Self {
        SliderRange { min, max, default }
    }

    pub fn clamp(&self, value: usize) -> usize {
        value.clamp(self.min, self.max)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min == 0 {
            bail!("{name}: minimum must be at least 1");
        }
        if self.min > self.max {
            bail!("{name}: minimum {} exceeds maximum {}", self.min, self.max);
        }
        if !(self.min..=self.max).contains(&self.default) {
            bail!(
                "{name}: default {} outside {}..={}",
                self.default,
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Control ranges and table file names.
///
/// Read from an optional JSON file; any field left out keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub top_playlists: SliderRange,
    /// `max` caps the bucket count; the effective upper bound is also
    /// limited by the dataset's `max_tracks`.
    pub bins: SliderRange,
    pub top_artists: SliderRange,
    pub dominance_rows: SliderRange,
    /// File stem of the playlist table inside the data folder.
    pub playlist_stem: String,
    /// File stem of the tracks table inside the data folder.
    pub tracks_stem: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_playlists: SliderRange::new(1, 35, 10),
            bins: SliderRange::new(2, 20, 5),
            top_artists: SliderRange::new(1, 35, 10),
            dominance_rows: SliderRange::new(5, 50, 10),
            playlist_stem: "playlist".to_string(),
            tracks_stem: "tracks".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text).context("parsing config JSON")?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.top_playlists.validate("top_playlists")?;
        self.bins.validate("bins")?;
        self.top_artists.validate("top_artists")?;
        self.dominance_rows.validate("dominance_rows")?;
        if self.playlist_stem.is_empty() || self.tracks_stem.is_empty() {
            bail!("table file stems must not be empty");
        }
        Ok(())
    }

    /// Bucket-count range for a dataset: `min..=min(max_tracks, bins.max)`.
    ///
    /// With very small datasets the upper bound drops below the configured
    /// minimum; the minimum follows it down so the range stays non-empty.
    pub fn bins_range(&self, max_tracks: u64) -> SliderRange {
        let cap = usize::try_from(max_tracks).unwrap_or(usize::MAX);
        let max = self.bins.max.min(cap).max(1);
        let min = self.bins.min.min(max);
        SliderRange::new(min, max, self.bins.default.clamp(min, max))
    }
}
