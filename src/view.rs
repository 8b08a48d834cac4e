use crate::config::DashboardConfig;
use crate::data::model::Dataset;
use crate::error::QueryError;
use crate::query::{
    artist_shares, artist_tracks, average_duration_by_bucket, top_artist_per_playlist,
    top_artists, top_playlists_by_followers, ArtistFrequency, ArtistShare, DominantArtist,
    DrillDown, DurationBucket, Heatmap, PlaylistFollowers,
};

// ---------------------------------------------------------------------------
// Parameters – everything the user can change
// ---------------------------------------------------------------------------

/// How the top-artist-per-playlist rows are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DominanceMode {
    #[default]
    Table,
    BarGraph,
    PieChart,
    Heatmap,
}

impl DominanceMode {
    pub const ALL: [DominanceMode; 4] = [
        DominanceMode::Table,
        DominanceMode::BarGraph,
        DominanceMode::PieChart,
        DominanceMode::Heatmap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DominanceMode::Table => "Show table",
            DominanceMode::BarGraph => "Plot bar graph",
            DominanceMode::PieChart => "Plot pie chart",
            DominanceMode::Heatmap => "Plot heatmap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardParams {
    pub top_playlists: usize,
    pub bins: usize,
    pub top_artists: usize,
    pub dominance_rows: usize,
    pub dominance_mode: DominanceMode,
    /// Drill-down selection; `None` only when no track row names an artist.
    pub artist: Option<String>,
}

impl DashboardParams {
    /// Slider defaults from `config`; the first artist is pre-selected.
    pub fn defaults(config: &DashboardConfig, dataset: &Dataset) -> Self {
        DashboardParams {
            top_playlists: config.top_playlists.default,
            bins: config.bins_range(dataset.max_tracks()).default,
            top_artists: config.top_artists.default,
            dominance_rows: config.dominance_rows.default,
            dominance_mode: DominanceMode::default(),
            artist: dataset.artist_names().into_iter().next(),
        }
    }

    /// Copy with every count pulled back into its configured range.
    pub fn clamped(&self, config: &DashboardConfig, dataset: &Dataset) -> Self {
        let clamped = DashboardParams {
            top_playlists: config.top_playlists.clamp(self.top_playlists),
            bins: config.bins_range(dataset.max_tracks()).clamp(self.bins),
            top_artists: config.top_artists.clamp(self.top_artists),
            dominance_rows: config.dominance_rows.clamp(self.dominance_rows),
            dominance_mode: self.dominance_mode,
            artist: self.artist.clone(),
        };
        if clamped != *self {
            log::warn!("Clamped dashboard parameters {self:?} -> {clamped:?}");
        }
        clamped
    }
}

// ---------------------------------------------------------------------------
// ViewModel – query results ready to draw
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DominanceView {
    Table(Vec<DominantArtist>),
    BarGraph(Vec<DominantArtist>),
    PieChart(Vec<ArtistShare>),
    Heatmap(Heatmap),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub max_tracks: u64,
    pub top_playlists: Vec<PlaylistFollowers>,
    pub duration_buckets: Vec<DurationBucket>,
    pub top_artists: Vec<ArtistFrequency>,
    pub dominance: DominanceView,
    pub drill_down: Option<DrillDown>,
}

/// Run every dashboard query for `params`.
///
/// Nothing is reused from earlier calls; the UI calls this again whenever a
/// control changes.
pub fn render(dataset: &Dataset, params: &DashboardParams) -> Result<ViewModel, QueryError> {
    log::debug!("Rendering dashboard for {params:?}");

    let dominant = top_artist_per_playlist(dataset, params.dominance_rows)?;
    let dominance = match params.dominance_mode {
        DominanceMode::Table => DominanceView::Table(dominant),
        DominanceMode::BarGraph => DominanceView::BarGraph(dominant),
        DominanceMode::PieChart => DominanceView::PieChart(artist_shares(&dominant)),
        DominanceMode::Heatmap => DominanceView::Heatmap(Heatmap::from_rows(&dominant)),
    };

    Ok(ViewModel {
        max_tracks: dataset.max_tracks(),
        top_playlists: top_playlists_by_followers(dataset, params.top_playlists)?,
        duration_buckets: average_duration_by_bucket(dataset, params.bins)?,
        top_artists: top_artists(dataset, params.top_artists)?,
        dominance,
        drill_down: params
            .artist
            .as_deref()
            .map(|artist| artist_tracks(dataset, artist)),
    })
}
