use std::path::Path;
use std::sync::Arc;

use playlist_insights::config::DashboardConfig;
use playlist_insights::data::loader;
use playlist_insights::view::{render, DashboardParams, ViewModel};
use playlist_insights::Dataset;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded tables (None until the user opens a data folder).
    pub dataset: Option<Arc<Dataset>>,

    /// Options for the drill-down select box.
    pub artist_names: Vec<String>,

    /// Current control values.
    pub params: DashboardParams,

    /// Results of the last render, drawn every frame until a control changes.
    pub view: Option<ViewModel>,

    /// Artist → colour, shared by the bar graph and pie chart.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            params: DashboardParams::defaults(&config, &Dataset::default()),
            config,
            dataset: None,
            artist_names: Vec::new(),
            view: None,
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Load both tables from `dir`, replacing any current dataset.
    pub fn load_dir(&mut self, dir: &Path) {
        match loader::load_dir(dir, &self.config.playlist_stem, &self.config.tracks_stem) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load data folder: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset controls and render once.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.artist_names = dataset.artist_names();
        self.color_map = ColorMap::new(&self.artist_names);
        self.params = DashboardParams::defaults(&self.config, &dataset);
        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
        self.rerender();
    }

    /// Apply new control values; re-run the queries if anything changed.
    pub fn update_params(&mut self, params: DashboardParams) {
        if params != self.params {
            self.params = params;
            self.rerender();
        }
    }

    /// Show `msg` alongside any message already in the status bar.
    pub fn push_status(&mut self, msg: String) {
        self.status_message = Some(match self.status_message.take() {
            Some(earlier) => format!("{msg} | {earlier}"),
            None => msg,
        });
    }

    /// Re-run every query against the full dataset.
    pub fn rerender(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.view = None;
            return;
        };

        self.params = self.params.clamped(&self.config, dataset);
        match render(dataset, &self.params) {
            Ok(view) => {
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Query failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
