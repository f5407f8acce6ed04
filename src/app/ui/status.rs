use super::super::TintbatchApp;
use super::icons;
use crate::util::progress_fraction;
use egui::{Color32, RichText};

impl TintbatchApp {
    pub(crate) fn ui_status_bar(&mut self, ui: &mut egui::Ui) {
        let mut cancel_clicked = false;
        if let Some(job) = &self.export_job {
            ui.horizontal(|ui| {
                let done = job.done();
                let fraction = progress_fraction(done, job.total);
                let current = job.progress.as_ref().map_or("", |p| p.current.as_str());
                ui.add(
                    egui::ProgressBar::new(fraction)
                        .desired_width(220.0)
                        .text(format!("{done} / {} {current}", job.total)),
                );
                cancel_clicked = ui
                    .add_enabled(
                        !job.cancel_requested(),
                        egui::Button::new(format!("{} Cancel", icons::ICON_CANCEL)),
                    )
                    .on_hover_text("Stop after the current file")
                    .clicked();
            });
        }
        if cancel_clicked {
            self.cancel_export();
        }

        let image_count = self.session.image_set().map_or(0, |set| set.len());
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Images: {image_count}"))
                    .small()
                    .color(Color32::from_gray(180)),
            );
            if let Some(msg) = &self.ui.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }
}
