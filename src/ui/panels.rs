use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use playlist_insights::config::SliderRange;
use playlist_insights::view::DominanceMode;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – user input
// ---------------------------------------------------------------------------

/// Render the left panel with every dashboard control.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("User Input");
    ui.separator();

    let max_tracks = match &state.dataset {
        Some(ds) => ds.max_tracks(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Edit a copy; the state re-renders only when something changed.
    let mut params = state.params.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Top playlists");
            count_slider(ui, &mut params.top_playlists, state.config.top_playlists, "playlists");
            ui.separator();

            ui.strong("Duration by track count");
            ui.label(format!("Maximum number of tracks in any playlist: {max_tracks}"));
            count_slider(ui, &mut params.bins, state.config.bins_range(max_tracks), "bins");
            ui.separator();

            ui.strong("Top artists");
            count_slider(ui, &mut params.top_artists, state.config.top_artists, "artists");
            ui.separator();

            ui.strong("Top artist per playlist");
            count_slider(ui, &mut params.dominance_rows, state.config.dominance_rows, "playlists");
            egui::ComboBox::from_id_salt("dominance_mode")
                .selected_text(params.dominance_mode.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in DominanceMode::ALL {
                        ui.selectable_value(&mut params.dominance_mode, mode, mode.label());
                    }
                });
            ui.separator();

            ui.strong("Select an artist");
            let selected = params.artist.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("artist")
                .selected_text(&selected)
                .height(320.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for name in &state.artist_names {
                        ui.selectable_value(&mut params.artist, Some(name.clone()), name);
                    }
                });
        });

    state.update_params(params);
}

fn count_slider(ui: &mut Ui, value: &mut usize, range: SliderRange, suffix: &str) {
    ui.add(egui::Slider::new(value, range.min..=range.max).text(suffix));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} playlists, {} track rows loaded",
                ds.playlists.len(),
                ds.tracks.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open folder with playlist and tracks tables")
        .pick_folder();

    if let Some(dir) = folder {
        state.load_dir(&dir);
    }
}
