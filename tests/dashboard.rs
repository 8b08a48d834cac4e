//! End-to-end tests: write Parquet / CSV tables into a temporary data folder,
//! load them the way the app does, and render the dashboard.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

use playlist_insights::config::DashboardConfig;
use playlist_insights::data::loader::load_dir;
use playlist_insights::query::{DrillDown, PlaylistFollowers};
use playlist_insights::view::{render, DashboardParams, DominanceMode, DominanceView};

fn strings(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

fn nullable_strings(values: &[Option<&str>]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec()))
}

fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) -> Result<()> {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )?;
    let mut writer = ArrowWriter::try_new(std::fs::File::create(path)?, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Playlists "A"/"B" from the follower scenario plus three track rows.
fn write_sample_folder(dir: &Path) -> Result<()> {
    let followers: ArrayRef = Arc::new(Int64Array::from(vec![100, 200]));
    let num_tracks: ArrayRef = Arc::new(Int64Array::from(vec![10, 5]));
    let duration: ArrayRef = Arc::new(Float64Array::from(vec![30.0, 15.0]));
    write_parquet(
        &dir.join("playlist.parquet"),
        vec![
            ("playlist_name", strings(&["A", "B"])),
            ("num_followers", followers),
            ("num_tracks", num_tracks),
            ("playlist_duration_min", duration),
        ],
    )?;

    let pids: ArrayRef = Arc::new(Int64Array::from(vec![1, 1, 2]));
    let track_minutes: ArrayRef = Arc::new(Float64Array::from(vec![3.0, 3.0, 4.5]));
    write_parquet(
        &dir.join("tracks.parquet"),
        vec![
            ("playlist_id", pids),
            ("playlist_name", strings(&["A", "A", "B"])),
            ("track_name", strings(&["p1", "p1", "p2"])),
            ("artist_name", strings(&["X", "X", "Y"])),
            ("album_name", strings(&["Ax", "Ax", "Ay"])),
            ("track_duration_min", track_minutes),
        ],
    )
}

#[test]
fn parquet_folder_renders_every_section() -> Result<()> {
    let dir = TempDir::new()?;
    write_sample_folder(dir.path())?;

    let config = DashboardConfig::default();
    let ds = load_dir(dir.path(), &config.playlist_stem, &config.tracks_stem)?;
    assert_eq!(ds.max_tracks(), 10);

    let mut params = DashboardParams::defaults(&config, &ds);
    params.top_playlists = 1;
    params.dominance_mode = DominanceMode::BarGraph;
    let view = render(&ds, &params.clamped(&config, &ds))?;

    assert_eq!(
        view.top_playlists,
        vec![PlaylistFollowers {
            playlist_name: "B".to_string(),
            max_followers: 200
        }]
    );

    // max_tracks 10 with 5 bins → width 2; "B" (5 tracks) and "A" (10 tracks).
    let total: usize = view.duration_buckets.iter().map(|b| b.playlist_count).sum();
    assert_eq!(total, 2);
    assert_eq!(view.duration_buckets.len(), 5);
    assert_eq!(view.duration_buckets[2].label, "4-6");
    assert_eq!(view.duration_buckets[2].playlist_count, 1);

    let DominanceView::BarGraph(rows) = &view.dominance else {
        panic!("expected bar graph rows");
    };
    let triples: Vec<(i64, &str, usize)> = rows
        .iter()
        .map(|r| (r.playlist_id, r.artist_name.as_str(), r.track_count))
        .collect();
    assert_eq!(triples, vec![(1, "X", 2), (2, "Y", 1)]);

    let Some(DrillDown::Tracks(tracks)) = &view.drill_down else {
        panic!("expected tracks for the default artist");
    };
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].album_name, "Ax");
    Ok(())
}

#[test]
fn unknown_artist_renders_no_matches() -> Result<()> {
    let dir = TempDir::new()?;
    write_sample_folder(dir.path())?;

    let config = DashboardConfig::default();
    let ds = load_dir(dir.path(), &config.playlist_stem, &config.tracks_stem)?;
    let mut params = DashboardParams::defaults(&config, &ds);
    params.artist = Some("Z".to_string());

    let drill_down = render(&ds, &params)?.drill_down.expect("drill-down");
    assert_eq!(
        drill_down.empty_message().as_deref(),
        Some("No playlists found for Z.")
    );
    Ok(())
}

#[test]
fn narrow_types_and_text_ids_are_accepted() -> Result<()> {
    let dir = TempDir::new()?;

    let followers: ArrayRef = Arc::new(Int32Array::from(vec![7]));
    let num_tracks: ArrayRef = Arc::new(Int32Array::from(vec![2]));
    let duration: ArrayRef = Arc::new(Float32Array::from(vec![6.5]));
    write_parquet(
        &dir.path().join("playlist.parquet"),
        vec![
            ("playlist_name", strings(&["Only"])),
            ("num_followers", followers),
            ("num_tracks", num_tracks),
            ("playlist_duration_min", duration),
        ],
    )?;

    let minutes: ArrayRef = Arc::new(Float32Array::from(vec![3.25, 3.25]));
    write_parquet(
        &dir.path().join("tracks.parquet"),
        vec![
            ("playlist_id", strings(&["42", "42"])),
            ("playlist_name", strings(&["Only", "Only"])),
            ("track_name", strings(&["a", "b"])),
            ("artist_name", strings(&["X", "X"])),
            ("track_duration_min", minutes),
        ],
    )?;

    let ds = load_dir(dir.path(), "playlist", "tracks")?;
    assert_eq!(ds.playlists[0].num_followers, 7);
    assert!((ds.playlists[0].playlist_duration_min - 6.5).abs() < 1e-6);
    assert_eq!(ds.tracks[1].playlist_id, 42);
    assert_eq!(ds.tracks[1].album_name, "");
    Ok(())
}

#[test]
fn missing_column_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    write_sample_folder(dir.path())?;
    write_parquet(
        &dir.path().join("playlist.parquet"),
        vec![("playlist_name", strings(&["A"]))],
    )?;

    let err = load_dir(dir.path(), "playlist", "tracks").unwrap_err();
    assert!(format!("{err:#}").contains("num_followers"));
    Ok(())
}

#[test]
fn csv_folder_with_custom_stems_loads() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("lists.csv"),
        "playlist_name,num_followers,num_tracks,playlist_duration_min\n\
         A,100,10,30.0\n\
         B,200,5,15.0\n",
    )?;
    std::fs::write(
        dir.path().join("rows.csv"),
        "playlist_id,playlist_name,track_name,artist_name,album_name,track_duration_min\n\
         1,A,p1,X,Ax,3.0\n",
    )?;

    let config = DashboardConfig {
        playlist_stem: "lists".to_string(),
        tracks_stem: "rows".to_string(),
        ..Default::default()
    };
    let ds = load_dir(dir.path(), &config.playlist_stem, &config.tracks_stem)?;
    let view = render(&ds, &DashboardParams::defaults(&config, &ds))?;
    assert_eq!(view.top_playlists.len(), 2);
    assert_eq!(view.top_artists[0].count, 1);
    Ok(())
}

#[test]
fn null_artists_are_left_out_of_artist_sections() -> Result<()> {
    let dir = TempDir::new()?;
    let followers: ArrayRef = Arc::new(Int64Array::from(vec![10, 20]));
    let num_tracks: ArrayRef = Arc::new(Int64Array::from(vec![3, 1]));
    let duration: ArrayRef = Arc::new(Float64Array::from(vec![9.0, 3.0]));
    write_parquet(
        &dir.path().join("playlist.parquet"),
        vec![
            ("playlist_name", strings(&["A", "B"])),
            ("num_followers", followers),
            ("num_tracks", num_tracks),
            ("playlist_duration_min", duration),
        ],
    )?;

    let pids: ArrayRef = Arc::new(Int64Array::from(vec![1, 1, 1, 2]));
    let minutes: ArrayRef = Arc::new(Float64Array::from(vec![3.0, 3.0, 3.0, 3.0]));
    write_parquet(
        &dir.path().join("tracks.parquet"),
        vec![
            ("playlist_id", pids),
            ("playlist_name", strings(&["A", "A", "A", "B"])),
            ("track_name", strings(&["t1", "t2", "t3", "t4"])),
            ("artist_name", nullable_strings(&[None, None, None, Some("Real")])),
            ("track_duration_min", minutes),
        ],
    )?;

    let config = DashboardConfig::default();
    let ds = load_dir(dir.path(), &config.playlist_stem, &config.tracks_stem)?;
    let params = DashboardParams::defaults(&config, &ds);
    assert_eq!(params.artist.as_deref(), Some("Real"));

    let view = render(&ds, &params.clamped(&config, &ds))?;
    let artists: Vec<(&str, usize)> = view
        .top_artists
        .iter()
        .map(|a| (a.artist_name.as_str(), a.count))
        .collect();
    assert_eq!(artists, vec![("Real", 1)]);

    let DominanceView::Table(rows) = &view.dominance else {
        panic!("expected the default table view");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].playlist_id, rows[0].artist_name.as_str()), (2, "Real"));
    Ok(())
}
