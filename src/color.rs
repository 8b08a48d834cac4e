use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

/// Blue → red ramp for heatmap cells; `t` is clamped to `0..=1`.
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    hsl_to_color32(240.0 * (1.0 - t), 0.7, 0.5)
}

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: artist name → Color32
// ---------------------------------------------------------------------------

/// Maps every artist of the dataset to a distinct colour, so an artist keeps
/// its colour across charts and parameter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl ColorMap {
    pub fn new(artists: &[String]) -> Self {
        let palette = generate_palette(artists.len());
        ColorMap {
            mapping: artists.iter().cloned().zip(palette).collect(),
            ..Default::default()
        }
    }

    pub fn color_for(&self, artist: &str) -> Color32 {
        self.mapping
            .get(artist)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn unknown_artist_gets_default_colour() {
        let map = ColorMap::new(&["A".to_string(), "B".to_string()]);
        assert_ne!(map.color_for("A"), map.color_for("B"));
        assert_eq!(map.color_for("Z"), Color32::GRAY);
    }

    #[test]
    fn heat_ramp_runs_from_blue_to_red() {
        let cold = heat_color(0.0);
        let hot = heat_color(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
    }
}
