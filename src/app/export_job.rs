use super::TintbatchApp;
use crate::export::{ExportOptions, ExportProgress, ExportReport, run_export};
use egui::Context;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

pub enum ExportMessage {
    Progress(ExportProgress),
    Finished(Result<ExportReport, String>),
}

/// Background batch export polled from the UI thread.
pub struct ExportJob {
    rx: Receiver<ExportMessage>,
    cancel: Arc<AtomicBool>,
    pub(super) total: usize,
    pub(super) progress: Option<ExportProgress>,
}

impl ExportJob {
    pub(super) fn cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub(super) fn done(&self) -> usize {
        self.progress.as_ref().map_or(0, |p| p.done)
    }
}

impl TintbatchApp {
    pub(crate) fn start_export(&mut self) {
        if self.export_job.is_some() {
            self.set_status("Export already in progress.");
            return;
        }
        let request = match self.session.export_request() {
            Ok(request) => request,
            Err(msg) => {
                self.set_status(msg);
                return;
            }
        };
        let opts = ExportOptions::from_config(&self.config);
        let total = request.files.len();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = run_export(&request, &opts, &worker_cancel, |progress| {
                let _ = tx.send(ExportMessage::Progress(progress));
            })
            .map_err(|err| format!("{err:#}"));
            let _ = tx.send(ExportMessage::Finished(result));
        });
        self.export_job = Some(ExportJob {
            rx,
            cancel,
            total,
            progress: None,
        });
        self.set_status(format!("Saving {total} image(s)…"));
    }

    pub(crate) fn cancel_export(&mut self) {
        if let Some(job) = self.export_job.as_ref() {
            job.cancel.store(true, Ordering::Relaxed);
            self.set_status("Cancelling export…");
        }
    }

    pub(crate) fn poll_export_job(&mut self, ctx: &Context) {
        let Some(mut job) = self.export_job.take() else {
            return;
        };
        loop {
            match job.rx.try_recv() {
                Ok(ExportMessage::Progress(progress)) => job.progress = Some(progress),
                Ok(ExportMessage::Finished(Ok(report))) => {
                    self.set_status(report.summary());
                    return;
                }
                Ok(ExportMessage::Finished(Err(err))) => {
                    self.set_status(format!("Export failed: {err}"));
                    return;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.set_status("Export failed: worker disconnected.");
                    return;
                }
            }
        }
        self.export_job = Some(job);
        ctx.request_repaint_after(Duration::from_millis(50));
    }
}
