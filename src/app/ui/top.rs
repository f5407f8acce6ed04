use super::super::TintbatchApp;
use super::icons;
use egui::RichText;

impl TintbatchApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            if ui
                .add(
                    egui::Button::new(format!("{} Select folder…", icons::ICON_FOLDER))
                        .shortcut_text("Ctrl+O"),
                )
                .on_hover_text("Choose a folder of PNG/JPEG images (Ctrl+O)")
                .clicked()
            {
                self.open_folder_dialog();
            }
            ui.separator();

            match self.session.folder() {
                Some(folder) => {
                    ui.label(folder.display().to_string())
                        .on_hover_text("Selected folder");
                }
                None => {
                    ui.label(RichText::new("No folder selected").weak());
                }
            }
        });
    }
}
