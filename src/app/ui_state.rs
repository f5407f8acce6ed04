use egui_file_dialog::FileDialog;
use std::path::PathBuf;

pub struct UiState {
    pub(super) last_status: Option<String>,
    /// Initial directory for the folder picker.
    pub(super) last_folder: Option<PathBuf>,
    pub(super) folder_dialog: Option<FileDialog>,
}
