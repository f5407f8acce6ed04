//! Main egui/eframe application state and UI orchestration.

use crate::config::AppConfig;
use crate::image::{AdjustmentParameters, PreviewTexture, SliderValues};
use crate::session::{FolderSelection, Session, SessionSettings, SessionState};
use egui::{Context, Key};
use egui_file_dialog::DialogState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod export_job;
mod ui;
mod ui_state;

use export_job::ExportJob;
use ui_state::UiState;

const APP_KEY: &str = "tintbatch_state";

/// What survives between runs in eframe storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedState {
    last_folder: Option<PathBuf>,
    sliders: SliderValues,
}

/// Top-level application state for the Tintbatch UI.
pub struct TintbatchApp {
    config: AppConfig,
    session: Session,
    sliders: SliderValues,
    preview_texture: Option<PreviewTexture>,
    export_job: Option<ExportJob>,
    ui: UiState,
}

impl TintbatchApp {
    /// Create the app, restore persisted state, and open `initial_folder` when given.
    pub fn new_with_initial_folder(
        cc: &eframe::CreationContext<'_>,
        initial_folder: Option<&Path>,
    ) -> Self {
        let config = AppConfig::load();
        let persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, APP_KEY))
            .unwrap_or_default();
        let sliders = persisted.sliders.sanitized();
        let mut session = Session::new(SessionSettings::from_config(&config));
        session.set_params(AdjustmentParameters::from_sliders(sliders));

        let mut app = Self {
            config,
            session,
            sliders,
            preview_texture: None,
            export_job: None,
            ui: UiState {
                last_status: None,
                last_folder: persisted.last_folder,
                folder_dialog: None,
            },
        };
        if let Some(folder) = initial_folder {
            app.select_folder(folder);
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.ui.last_status = Some(msg.into());
    }

    fn select_folder(&mut self, folder: &Path) {
        match self.session.select_folder(folder) {
            Ok(FolderSelection::Loaded { count }) => {
                self.set_status(format!("Loaded {count} image(s) from {}", folder.display()));
            }
            Ok(FolderSelection::NoImages) => {
                self.set_status(format!("No PNG/JPEG images in {}", folder.display()));
            }
            Err(err) => self.set_status(format!("Failed to open folder: {err:#}")),
        }
        if let Some(folder) = self.session.folder() {
            self.ui.last_folder = Some(folder.to_path_buf());
        }
    }

    fn step_image(&mut self, forward: bool) {
        if self.session.state() == SessionState::Empty {
            return;
        }
        let result = if forward {
            self.session.next_image()
        } else {
            self.session.previous_image()
        };
        if let Err(err) = result {
            self.set_status(format!("Failed to load image: {err:#}"));
        }
    }

    fn apply_sliders(&mut self) {
        self.sliders = self.sliders.sanitized();
        self.session
            .set_params(AdjustmentParameters::from_sliders(self.sliders));
    }

    fn reset_sliders(&mut self) {
        self.sliders = SliderValues::default();
        self.apply_sliders();
        self.set_status("Sliders reset.");
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() || self.ui.folder_dialog.is_some() {
            return;
        }
        // Ctrl/Cmd + O: select folder
        if ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command) {
            self.open_folder_dialog();
        }
        // Ctrl/Cmd + S: save all
        if ctx.input(|i| i.key_pressed(Key::S) && i.modifiers.command) {
            self.start_export();
        }
        // Arrows move a focused slider, so only navigate when nothing has focus.
        if ctx.memory(|m| m.focused().is_none()) {
            if ctx.input(|i| i.key_pressed(Key::ArrowLeft)) {
                self.step_image(false);
            }
            if ctx.input(|i| i.key_pressed(Key::ArrowRight)) {
                self.step_image(true);
            }
        }
    }

    fn update_folder_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = self.ui.folder_dialog.as_mut() else {
            return;
        };
        dialog.update(ctx);
        let mut close_dialog = false;
        let mut cancelled = false;
        let picked = dialog.take_picked();
        if picked.is_some() {
            close_dialog = true;
        } else {
            match dialog.state() {
                DialogState::Cancelled => {
                    cancelled = true;
                    close_dialog = true;
                }
                DialogState::Closed => close_dialog = true,
                _ => {}
            }
        }

        if close_dialog {
            self.ui.folder_dialog = None;
        }
        if let Some(folder) = picked {
            self.select_folder(&folder);
        } else if cancelled {
            self.set_status("Folder selection canceled.");
        }
    }
}

impl eframe::App for TintbatchApp {
    // Required by eframe 0.34; all drawing happens in `update`, which eframe still calls.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_export_job(ctx);
        self.handle_shortcuts(ctx);
        self.sync_preview_texture(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central(ui));

        self.update_folder_dialog(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            last_folder: self.ui.last_folder.clone(),
            sliders: self.sliders,
        };
        eframe::set_value(storage, APP_KEY, &state);
    }
}
