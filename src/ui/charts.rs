use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, RichText, ScrollArea, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};
use playlist_insights::query::{
    ArtistFrequency, ArtistShare, DominantArtist, DrillDown, DurationBucket, Heatmap,
    PlaylistFollowers,
};
use playlist_insights::view::DominanceView;

use crate::color::{generate_palette, heat_color, ColorMap};
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 320.0;
const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every section of the dashboard from the last `ViewModel`.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data folder to explore playlists  (File → Open data folder…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Spotify Playlist Dashboard").size(26.0));

            section(ui, "Top Playlists by Number of Followers");
            followers_chart(ui, &view.top_playlists);

            section(ui, "Average Playlist Duration by Number of Tracks");
            duration_chart(ui, &view.duration_buckets);

            section(ui, "Top Artists");
            artists_chart(ui, &view.top_artists, &state.color_map);

            section(ui, "Top Artists per Playlist");
            match &view.dominance {
                DominanceView::Table(rows) => dominance_table(ui, rows),
                DominanceView::BarGraph(rows) => dominance_bars(ui, rows, &state.color_map),
                DominanceView::PieChart(shares) => pie_chart(ui, shares, &state.color_map),
                DominanceView::Heatmap(map) => heatmap(ui, map),
            }

            match (&view.drill_down, state.params.artist.as_deref()) {
                (Some(result), Some(artist)) => {
                    section(ui, &format!("Playlists and Tracks for {artist}"));
                    drill_down(ui, result);
                }
                _ => {
                    section(ui, "Playlists and Tracks");
                    ui.label("Select an artist in the side panel.");
                }
            }
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(16.0);
    ui.heading(title);
    ui.separator();
}

/// Axis formatter naming integer grid marks after `labels[index]`.
fn index_labels(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let index = mark.value.round();
        if (mark.value - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        labels.get(index as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Bar / line charts
// ---------------------------------------------------------------------------

fn followers_chart(ui: &mut Ui, rows: &[PlaylistFollowers]) {
    ui.label(format!("Top {} Playlists by Number of Followers", rows.len()));

    // Horizontal bars, most followed at the top.
    let last = rows.len().saturating_sub(1);
    let palette = generate_palette(rows.len());
    let mut labels = vec![String::new(); rows.len()];
    let bars: Vec<Bar> = rows
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (row, color))| {
            labels[last - i] = row.playlist_name.clone();
            Bar::new((last - i) as f64, row.max_followers as f64)
                .name(&row.playlist_name)
                .fill(color)
                .width(0.7)
        })
        .collect();

    Plot::new("followers_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("Number of Followers")
        .y_axis_label("Playlist Name")
        .y_axis_formatter(index_labels(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

fn duration_chart(ui: &mut Ui, buckets: &[DurationBucket]) {
    let labels: Vec<String> = buckets.iter().map(|b| b.label.clone()).collect();

    // Empty buckets are drawn at zero to keep the line continuous.
    let series: Vec<[f64; 2]> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| [i as f64, b.average_duration_min.unwrap_or(0.0)])
        .collect();

    Plot::new("duration_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("Number of Tracks")
        .y_axis_label("Average Duration (minutes)")
        .x_axis_formatter(index_labels(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .color(Color32::from_rgb(221, 132, 82))
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(series)
                    .radius(4.0)
                    .color(Color32::from_rgb(76, 114, 176)),
            );
        });

    let empty = buckets.iter().filter(|b| b.playlist_count == 0).count();
    if empty > 0 {
        ui.label(RichText::new(format!("{empty} bucket(s) without playlists shown as 0")).weak());
    }
}

fn artists_chart(ui: &mut Ui, rows: &[ArtistFrequency], colors: &ColorMap) {
    ui.label(format!("Top {} Most Common Artists", rows.len()));

    let labels: Vec<String> = rows.iter().map(|r| r.artist_name.clone()).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::new(i as f64, row.count as f64)
                .name(&row.artist_name)
                .fill(colors.color_for(&row.artist_name))
                .width(0.7)
        })
        .collect();

    Plot::new("artists_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label("Artist Name")
        .y_axis_label("Count")
        .x_axis_formatter(index_labels(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Top artist per playlist: four presentations
// ---------------------------------------------------------------------------

fn dominance_table(ui: &mut Ui, rows: &[DominantArtist]) {
    ui.push_id("dominance_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(200.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("playlist_id");
                });
                header.col(|ui| {
                    ui.strong("artist_name");
                });
                header.col(|ui| {
                    ui.strong("track_count");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(r.playlist_id.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&r.artist_name);
                    });
                    row.col(|ui| {
                        ui.label(r.track_count.to_string());
                    });
                });
            });
    });
}

/// One bar per playlist, one series (colour, legend entry) per artist.
fn dominance_bars(ui: &mut Ui, rows: &[DominantArtist], colors: &ColorMap) {
    ui.label(format!("Top {} Playlists by Track Count", rows.len()));

    let labels: Vec<String> = rows.iter().map(|r| r.playlist_id.to_string()).collect();

    let mut artists: Vec<&str> = rows.iter().map(|r| r.artist_name.as_str()).collect();
    artists.sort_unstable();
    artists.dedup();

    let charts: Vec<BarChart> = artists
        .into_iter()
        .map(|artist| {
            let color = colors.color_for(artist);
            let bars: Vec<Bar> = rows
                .iter()
                .enumerate()
                .filter(|(_, r)| r.artist_name == artist)
                .map(|(i, r)| {
                    Bar::new(i as f64, r.track_count as f64)
                        .name(format!("playlist {}", r.playlist_id))
                        .fill(color)
                        .width(0.7)
                })
                .collect();
            BarChart::new(bars).name(artist).color(color)
        })
        .collect();

    Plot::new("dominance_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Playlist ID")
        .y_axis_label("Number of Tracks")
        .x_axis_formatter(index_labels(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

fn pie_chart(ui: &mut Ui, shares: &[ArtistShare], colors: &ColorMap) {
    let total: usize = shares.iter().map(|s| s.track_count).sum();
    if total == 0 {
        ui.label("No rows to chart.");
        return;
    }
    ui.label("Top Artists Contribution Across Playlists");

    ui.horizontal(|ui: &mut Ui| {
        let size = 340.0;
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        let mut start = -140f32.to_radians();
        for share in shares {
            let sweep = TAU * share.track_count as f32 / total as f32;
            let color = colors.color_for(&share.artist_name);

            // Fan of thin triangles: each stays convex whatever the sweep.
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, point_on(center, radius, a0), point_on(center, radius, a1)],
                    color,
                    Stroke::NONE,
                ));
            }

            painter.text(
                point_on(center, radius * 0.65, start + sweep / 2.0),
                Align2::CENTER_CENTER,
                format!("{:.1}%", share.percent),
                FontId::proportional(12.0),
                Color32::BLACK,
            );
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for share in shares {
                ui.label(
                    RichText::new(format!("■ {} ({})", share.artist_name, share.track_count))
                        .color(colors.color_for(&share.artist_name)),
                );
            }
        });
    });
}

fn point_on(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}

/// Annotated `artist × playlist_id` grid.
fn heatmap(ui: &mut Ui, map: &Heatmap) {
    if map.is_empty() {
        ui.label("No rows to chart.");
        return;
    }
    ui.label("Heatmap of Top Artists per Playlist  (rows: artist, columns: playlist ID)");

    let cell = Vec2::new(56.0, 26.0);
    let label_width = 180.0;
    let header_height = 22.0;
    let size = Vec2::new(
        label_width + cell.x * map.playlist_ids.len() as f32,
        header_height + cell.y * map.artists.len() as f32,
    );
    let max = map.max_value().max(1) as f32;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(12.0);

    ScrollArea::horizontal()
        .id_salt("heatmap_scroll")
        .show(ui, |ui: &mut Ui| {
            let (response, painter) = ui.allocate_painter(size, Sense::hover());
            let origin = response.rect.min;

            for (p, playlist_id) in map.playlist_ids.iter().enumerate() {
                painter.text(
                    origin + Vec2::new(label_width + cell.x * (p as f32 + 0.5), header_height * 0.5),
                    Align2::CENTER_CENTER,
                    playlist_id,
                    font.clone(),
                    text_color,
                );
            }

            for (a, artist) in map.artists.iter().enumerate() {
                let top = header_height + cell.y * a as f32;
                painter.text(
                    origin + Vec2::new(label_width - 6.0, top + cell.y * 0.5),
                    Align2::RIGHT_CENTER,
                    artist,
                    font.clone(),
                    text_color,
                );

                for (p, &value) in map.cells[a].iter().enumerate() {
                    let min = origin + Vec2::new(label_width + cell.x * p as f32, top);
                    let rect = Rect::from_min_size(min, cell).shrink(0.5);
                    painter.rect_filled(rect, 0.0, heat_color(value as f32 / max));
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        value,
                        font.clone(),
                        Color32::WHITE,
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Artist drill-down
// ---------------------------------------------------------------------------

fn drill_down(ui: &mut Ui, result: &DrillDown) {
    let rows = match result {
        DrillDown::Tracks(rows) => rows,
        DrillDown::NoMatches { .. } => {
            if let Some(msg) = result.empty_message() {
                ui.label(msg);
            }
            return;
        }
    };

    ui.push_id("drill_down_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(360.0)
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(180.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in ["playlist_name", "track_name", "album_name", "track_duration_min"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let r = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(&r.playlist_name);
                    });
                    row.col(|ui| {
                        ui.label(&r.track_name);
                    });
                    row.col(|ui| {
                        ui.label(&r.album_name);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", r.track_duration_min));
                    });
                });
            });
    });
}
