use super::super::TintbatchApp;
use egui_file_dialog::FileDialog;
use std::path::Path;

impl TintbatchApp {
    pub(crate) fn open_folder_dialog(&mut self) {
        let mut dialog = Self::make_folder_dialog(self.ui.last_folder.as_deref());
        dialog.pick_directory();
        self.ui.folder_dialog = Some(dialog);
    }

    fn make_folder_dialog(initial_dir: Option<&Path>) -> FileDialog {
        let mut dialog = FileDialog::new().title("Select image folder");
        if let Some(dir) = initial_dir.filter(|dir| dir.is_dir()) {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }
}
