use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;

use super::model::{Dataset, Playlist, TrackRow};

/// Extensions tried, in order, when looking a table up by file stem.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["parquet", "pq", "json", "csv"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load both tables from a data folder.
///
/// `playlist_stem` and `tracks_stem` are file names without extension
/// (`playlist` and `tracks` by default); see [`SUPPORTED_EXTENSIONS`].
pub fn load_dir(dir: &Path, playlist_stem: &str, tracks_stem: &str) -> Result<Dataset> {
    let playlist_path = find_table(dir, playlist_stem)?;
    let tracks_path = find_table(dir, tracks_stem)?;

    let playlists = load_playlists(&playlist_path)
        .with_context(|| format!("loading {}", playlist_path.display()))?;
    let tracks = load_tracks(&tracks_path)
        .with_context(|| format!("loading {}", tracks_path.display()))?;

    log::info!(
        "Loaded {} playlists and {} track rows from {}",
        playlists.len(),
        tracks.len(),
        dir.display()
    );
    Ok(Dataset::new(playlists, tracks))
}

/// Locate `<dir>/<stem>.<ext>` for the first supported extension present.
pub fn find_table(dir: &Path, stem: &str) -> Result<PathBuf> {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|candidate| candidate.is_file())
        .with_context(|| {
            format!(
                "No '{stem}' table in {} (looked for .{})",
                dir.display(),
                SUPPORTED_EXTENSIONS.join(", .")
            )
        })
}

/// Load the playlist table. Dispatch by extension.
pub fn load_playlists(path: &Path) -> Result<Vec<Playlist>> {
    let playlists = match extension(path).as_str() {
        "parquet" | "pq" => parquet_playlists(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    for (row, p) in playlists.iter().enumerate() {
        check_duration(p.playlist_duration_min)
            .with_context(|| format!("Row {row}: invalid 'playlist_duration_min'"))?;
    }
    Ok(playlists)
}

/// Load the tracks table. Dispatch by extension.
pub fn load_tracks(path: &Path) -> Result<Vec<TrackRow>> {
    let tracks = match extension(path).as_str() {
        "parquet" | "pq" => parquet_tracks(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    for (row, t) in tracks.iter().enumerate() {
        check_duration(t.track_duration_min)
            .with_context(|| format!("Row {row}: invalid 'track_duration_min'"))?;
    }
    Ok(tracks)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn check_duration(minutes: f64) -> Result<()> {
    if !minutes.is_finite() || minutes < 0.0 {
        bail!("duration must be a finite, non-negative number of minutes, got {minutes}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON / CSV loaders
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "playlist_name": "Chill", "num_followers": 12, "num_tracks": 40, "playlist_duration_min": 151.2 },
///   ...
/// ]
/// ```
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).context("opening JSON file")?;
    serde_json::from_reader(BufReader::new(file)).context("parsing JSON records")
}

/// Headered CSV whose column names match the table's field names.
fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, record)| record.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema:
/// - `playlist_name`: Utf8
/// - `num_followers`, `num_tracks`: any integer type, non-negative
/// - `playlist_duration_min`: Float64 / Float32 / integer
///
/// Extra columns are ignored.
fn parquet_playlists(path: &Path) -> Result<Vec<Playlist>> {
    let mut playlists = Vec::new();

    for batch in parquet_batches(path)? {
        let columns = PlaylistColumns {
            name: column(&batch, "playlist_name")?,
            followers: column(&batch, "num_followers")?,
            tracks: column(&batch, "num_tracks")?,
            duration: column(&batch, "playlist_duration_min")?,
        };

        for row in 0..batch.num_rows() {
            let offset = playlists.len();
            playlists.push(playlist_at(&columns, row).with_context(|| format!("Row {offset}"))?);
        }
    }

    Ok(playlists)
}

struct PlaylistColumns<'a> {
    name: &'a ArrayRef,
    followers: &'a ArrayRef,
    tracks: &'a ArrayRef,
    duration: &'a ArrayRef,
}

fn playlist_at(columns: &PlaylistColumns, row: usize) -> Result<Playlist> {
    Ok(Playlist {
        playlist_name: string_at(columns.name, row)?,
        num_followers: count_at(columns.followers, row).context("'num_followers'")?,
        num_tracks: count_at(columns.tracks, row).context("'num_tracks'")?,
        playlist_duration_min: float_at(columns.duration, row)
            .context("'playlist_duration_min'")?,
    })
}

/// Expected schema:
/// - `playlist_id`: integer (a numeric string is accepted too)
/// - `playlist_name`, `track_name`, `artist_name`, `album_name`: Utf8
/// - `track_duration_min`: Float64 / Float32 / integer
///
/// `album_name` may be absent, in which case it loads as empty.
fn parquet_tracks(path: &Path) -> Result<Vec<TrackRow>> {
    let mut tracks = Vec::new();

    for batch in parquet_batches(path)? {
        let columns = TrackColumns {
            pid: column(&batch, "playlist_id")?,
            playlist_name: column(&batch, "playlist_name")?,
            track_name: column(&batch, "track_name")?,
            artist_name: column(&batch, "artist_name")?,
            album_name: column(&batch, "album_name").ok(),
            duration: column(&batch, "track_duration_min")?,
        };

        for row in 0..batch.num_rows() {
            let offset = tracks.len();
            tracks.push(track_at(&columns, row).with_context(|| format!("Row {offset}"))?);
        }
    }

    Ok(tracks)
}

struct TrackColumns<'a> {
    pid: &'a ArrayRef,
    playlist_name: &'a ArrayRef,
    track_name: &'a ArrayRef,
    artist_name: &'a ArrayRef,
    album_name: Option<&'a ArrayRef>,
    duration: &'a ArrayRef,
}

fn track_at(columns: &TrackColumns, row: usize) -> Result<TrackRow> {
    Ok(TrackRow {
        playlist_id: id_at(columns.pid, row).context("'playlist_id'")?,
        playlist_name: string_at(columns.playlist_name, row)?,
        track_name: string_at(columns.track_name, row)?,
        artist_name: string_at(columns.artist_name, row)?,
        album_name: match columns.album_name {
            Some(col) => string_at(col, row)?,
            None => String::new(),
        },
        track_duration_min: float_at(columns.duration, row).context("'track_duration_min'")?,
    })
}

// -- Parquet / Arrow helpers --

fn parquet_batches(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    reader
        .map(|batch| batch.context("reading parquet record batch"))
        .collect()
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// Null strings load as empty text.
fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 or LargeUtf8 column, got {other:?}"),
    }
}

fn int_at(col: &ArrayRef, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as i64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row),
        DataType::UInt32 => col.as_primitive::<UInt32Type>().value(row) as i64,
        DataType::UInt64 => i64::try_from(col.as_primitive::<UInt64Type>().value(row))
            .context("integer does not fit in i64")?,
        other => bail!("Expected an integer column, got {other:?}"),
    };
    Ok(value)
}

fn count_at(col: &ArrayRef, row: usize) -> Result<u64> {
    let value = int_at(col, row)?;
    u64::try_from(value).map_err(|_| anyhow!("count must be non-negative, got {value}"))
}

/// Playlist ids are integers, but some exports store them as text.
fn id_at(col: &ArrayRef, row: usize) -> Result<i64> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if col.is_null(row) {
                bail!("null playlist id");
            }
            let text = string_at(col, row)?;
            text.trim()
                .parse::<i64>()
                .with_context(|| format!("'{text}' is not an integer id"))
        }
        _ => int_at(col, row),
    }
}

fn float_at(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(row) as f64),
        _ => int_at(col, row).map(|v| v as f64),
    }
}
