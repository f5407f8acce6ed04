use super::super::TintbatchApp;
use super::icons;
use crate::image::{AdjustmentParameters, FACTOR_SLIDER_MAX, HUE_SLIDER_MAX, RoundingMode};
use egui::RichText;

impl TintbatchApp {
    pub(crate) fn ui_sliders(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().slider_width = 220.0;
        let mut changed = false;

        egui::Grid::new("adjust_sliders")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Hue");
                changed |= ui
                    .add(
                        egui::Slider::new(&mut self.sliders.hue, 0..=HUE_SLIDER_MAX)
                            .suffix("°")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .on_hover_text("Rotate hue; 360° is a full turn")
                    .changed();
                ui.end_row();

                ui.label("Brightness");
                changed |= ui
                    .add(
                        egui::Slider::new(&mut self.sliders.brightness, 0..=FACTOR_SLIDER_MAX)
                            .suffix("%")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .changed();
                ui.end_row();

                ui.label("Contrast");
                changed |= ui
                    .add(
                        egui::Slider::new(&mut self.sliders.contrast, 0..=FACTOR_SLIDER_MAX)
                            .suffix("%")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .changed();
                ui.end_row();

                ui.label("Saturation");
                changed |= ui
                    .add(
                        egui::Slider::new(&mut self.sliders.saturation, 0..=FACTOR_SLIDER_MAX)
                            .suffix("%")
                            .clamping(egui::SliderClamping::Always),
                    )
                    .changed();
                ui.end_row();
            });

        if changed {
            self.apply_sliders();
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Reset sliders", icons::ICON_RESET))
                .on_hover_text("Back to no change")
                .clicked()
            {
                self.reset_sliders();
            }

            let busy = self.export_job.is_some();
            if ui
                .add_enabled(
                    !busy,
                    egui::Button::new(format!("{} Save all", icons::ICON_SAVE_ALL))
                        .shortcut_text("Ctrl+S"),
                )
                .on_hover_text(format!(
                    "Write every image with these settings into the \"{}\" subfolder (Ctrl+S)",
                    self.config.export.output_dir_name_sanitized()
                ))
                .clicked()
            {
                self.start_export();
            }
        });

        if let Some(hint) = identity_hint(self.session.params(), self.config.adjust.rounding) {
            ui.label(RichText::new(hint).small().weak());
        }
    }
}

/// Note shown under the sliders when they sit at their neutral positions.
fn identity_hint(params: &AdjustmentParameters, rounding: RoundingMode) -> Option<&'static str> {
    if !params.is_identity() {
        return None;
    }
    Some(match rounding {
        RoundingMode::Nearest => "Current settings leave images unchanged.",
        RoundingMode::Truncate => "Neutral settings; truncation may still darken channels by one level.",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_hint_only_with_nearest_rounding() {
        let neutral = AdjustmentParameters::IDENTITY;
        assert_eq!(
            identity_hint(&neutral, RoundingMode::Nearest),
            Some("Current settings leave images unchanged.")
        );
        let truncated = identity_hint(&neutral, RoundingMode::Truncate).unwrap_or_default();
        assert!(truncated.contains("one level"), "{truncated}");
        assert!(!truncated.contains("unchanged"));
    }

    #[test]
    fn no_hint_once_a_slider_moves() {
        let params = AdjustmentParameters {
            contrast: 1.2,
            ..AdjustmentParameters::IDENTITY
        };
        assert_eq!(identity_hint(&params, RoundingMode::Nearest), None);
        assert_eq!(identity_hint(&params, RoundingMode::Truncate), None);
    }
}
