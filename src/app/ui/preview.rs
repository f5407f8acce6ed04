use super::super::TintbatchApp;
use super::icons;
use crate::image::PreviewTexture;
use crate::session::SessionState;
use crate::util::u32_to_f32;
use egui::{Align2, Color32, CornerRadius, FontId, Rect, RichText, Sense, pos2};

const CANVAS_BG: Color32 = Color32::from_gray(24);

impl TintbatchApp {
    /// Re-upload the preview texture only when the session rendered a new preview.
    pub(crate) fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        let revision = self.session.preview_revision();
        let Some(preview) = self.session.preview() else {
            self.preview_texture = None;
            return;
        };
        match self.preview_texture.as_mut() {
            Some(texture) if texture.revision() == revision => {}
            Some(texture) => texture.update(preview, revision),
            None => self.preview_texture = Some(PreviewTexture::new(ctx, preview, revision)),
        }
    }

    pub(crate) fn ui_central(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                self.ui_preview_canvas(ui);
                ui.add_space(6.0);
                self.ui_navigation(ui);
                self.ui_current_file_info(ui);
                ui.add_space(8.0);
                ui.separator();
                self.ui_sliders(ui);
            });
        });
    }

    fn ui_preview_canvas(&self, ui: &mut egui::Ui) {
        let [w, h] = self.config.preview.size();
        let size = egui::vec2(u32_to_f32(w), u32_to_f32(h));
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter();
        painter.rect_filled(rect, CornerRadius::ZERO, CANVAS_BG);
        if let Some(texture) = &self.preview_texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.texture.id(), rect, uv, Color32::WHITE);
        } else {
            let hint = match self.session.state() {
                SessionState::Empty => "No image",
                SessionState::Loaded => "Cannot preview",
            };
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                hint,
                FontId::proportional(12.0),
                Color32::from_gray(140),
            );
        }
    }

    fn ui_navigation(&mut self, ui: &mut egui::Ui) {
        let loaded = self.session.state() == SessionState::Loaded;
        let position = self
            .session
            .image_set()
            .map(|set| format!("{} / {}", set.index() + 1, set.len()));

        ui.horizontal(|ui| {
            // Center the row under the canvas.
            let row_width = 180.0;
            ui.add_space(((ui.available_width() - row_width) * 0.5).max(0.0));
            if ui
                .add_enabled(loaded, egui::Button::new(icons::ICON_PREV))
                .on_hover_text("Previous image (Left)")
                .clicked()
            {
                self.step_image(false);
            }
            ui.label(position.as_deref().unwrap_or("0 / 0"));
            if ui
                .add_enabled(loaded, egui::Button::new(icons::ICON_NEXT))
                .on_hover_text("Next image (Right)")
                .clicked()
            {
                self.step_image(true);
            }
        });
    }

    fn ui_current_file_info(&self, ui: &mut egui::Ui) {
        if let Some(meta) = self.session.current_meta() {
            ui.label(RichText::new(meta.display_name()).strong())
                .on_hover_text(meta.path().display().to_string());
            ui.label(RichText::new(meta.summary()).small().weak());
        } else if let Some(name) = self
            .session
            .image_set()
            .and_then(|set| set.current_name())
        {
            ui.label(RichText::new(name).strong());
        }
    }
}
