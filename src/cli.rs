use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use playlist_insights::config::DashboardConfig;

/// Interactive dashboard over a playlist / tracks dataset.
#[derive(Debug, Parser)]
#[command(name = "playlist-insights", version, about)]
pub struct Cli {
    /// Folder holding the playlist and tracks tables (.parquet, .json or .csv).
    #[arg(short, long, env = "PLAYLIST_INSIGHTS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// JSON file overriding slider ranges and table file names.
    #[arg(short, long, env = "PLAYLIST_INSIGHTS_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn dashboard_config(&self) -> Result<DashboardConfig> {
        match &self.config {
            Some(path) => DashboardConfig::load(path),
            None => Ok(DashboardConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_dir_and_config() {
        let cli = Cli::try_parse_from(["playlist-insights", "-d", "data", "--config", "dash.json"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("data")));
        assert_eq!(cli.config, Some(PathBuf::from("dash.json")));
    }

    #[test]
    fn no_config_means_defaults() {
        let cli = Cli {
            data_dir: None,
            config: None,
        };
        assert_eq!(cli.dashboard_config().unwrap(), DashboardConfig::default());
    }
}
