use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }
}

const PLAYLIST_NAMES: [&str; 12] = [
    "Chill", "Workout", "Road Trip", "Party", "Focus", "Throwbacks",
    "Summer", "Sleep", "Rock Classics", "Indie Mix", "Country", "Study",
];

/// (artist, albums) – earlier artists are picked more often.
const ARTISTS: [(&str, [&str; 2]); 8] = [
    ("Drake", ["Views", "Scorpion"]),
    ("Kanye West", ["Graduation", "The College Dropout"]),
    ("Rihanna", ["Anti", "Loud"]),
    ("Coldplay", ["Parachutes", "X&Y"]),
    ("The Chainsmokers", ["Memories...Do Not Open", "Collage"]),
    ("Daft Punk", ["Discovery", "Random Access Memories"]),
    ("Adele", ["21", "25"]),
    ("Kendrick Lamar", ["DAMN.", "good kid, m.A.A.d city"]),
];

struct Tables {
    // playlist table
    names: Vec<String>,
    followers: Vec<i64>,
    num_tracks: Vec<i64>,
    durations: Vec<f64>,
    // tracks table
    pids: Vec<i64>,
    track_playlists: Vec<String>,
    tracks: Vec<String>,
    artists: Vec<String>,
    albums: Vec<String>,
    track_durations: Vec<f64>,
}

fn generate(rng: &mut SimpleRng, playlists: usize) -> Tables {
    let mut t = Tables {
        names: Vec::new(),
        followers: Vec::new(),
        num_tracks: Vec::new(),
        durations: Vec::new(),
        pids: Vec::new(),
        track_playlists: Vec::new(),
        tracks: Vec::new(),
        artists: Vec::new(),
        albums: Vec::new(),
        track_durations: Vec::new(),
    };

    for pid in 0..playlists as i64 {
        let name = PLAYLIST_NAMES[rng.below(PLAYLIST_NAMES.len())].to_string();
        let n_tracks = 5 + rng.below(120);
        let mut total_min = 0.0;

        for _ in 0..n_tracks {
            // Squaring skews picks toward the head of the artist list.
            let skew = rng.next_f64().powi(2);
            let (artist, albums) = ARTISTS[(skew * ARTISTS.len() as f64) as usize % ARTISTS.len()];
            let album = albums[rng.below(albums.len())];
            let minutes = 2.0 + rng.next_f64() * 4.0;

            t.pids.push(pid);
            t.track_playlists.push(name.clone());
            t.tracks.push(format!("{artist} – Track {}", 1 + rng.below(30)));
            t.artists.push(artist.to_string());
            t.albums.push(album.to_string());
            t.track_durations.push(minutes);
            total_min += minutes;
        }

        t.names.push(name);
        t.followers.push((rng.next_f64().powi(3) * 50_000.0) as i64);
        t.num_tracks.push(n_tracks as i64);
        t.durations.push(total_min);
    }

    t
}

fn strings(values: &[String]) -> ArrayRef {
    Arc::new(StringArray::from(
        values.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    ))
}

fn ints(values: &[i64]) -> ArrayRef {
    Arc::new(Int64Array::from(values.to_vec()))
}

fn floats(values: &[f64]) -> ArrayRef {
    Arc::new(Float64Array::from(values.to_vec()))
}

fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) -> Result<()> {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let t = generate(&mut rng, 200);

    write_parquet(
        &out_dir.join("playlist.parquet"),
        vec![
            ("playlist_name", strings(&t.names)),
            ("num_followers", ints(&t.followers)),
            ("num_tracks", ints(&t.num_tracks)),
            ("playlist_duration_min", floats(&t.durations)),
        ],
    )?;

    write_parquet(
        &out_dir.join("tracks.parquet"),
        vec![
            ("playlist_id", ints(&t.pids)),
            ("playlist_name", strings(&t.track_playlists)),
            ("track_name", strings(&t.tracks)),
            ("artist_name", strings(&t.artists)),
            ("album_name", strings(&t.albums)),
            ("track_duration_min", floats(&t.track_durations)),
        ],
    )?;

    println!(
        "Wrote {} playlists and {} track rows to {}",
        t.names.len(),
        t.pids.len(),
        out_dir.display()
    );
    Ok(())
}
