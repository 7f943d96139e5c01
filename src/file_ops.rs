//! Replay snapshot file picking.
//!
//! The rfd dialog is async, so it runs on a worker (a thread natively, the
//! browser task queue on WASM) and reports back over a channel that the
//! frame loop drains.

use crate::model::{ReplaySnapshot, SnapshotError};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Raw contents of a picked snapshot file.
#[derive(Clone)]
pub struct FilePickResult {
    pub file_name: String,
    pub file_data: Vec<u8>,
}

impl FilePickResult {
    /// Parses the picked file as a replay snapshot.
    pub fn parse_snapshot(&self) -> Result<ReplaySnapshot, SnapshotError> {
        ReplaySnapshot::from_bytes(&self.file_data)
    }
}

/// How a snapshot dialog ended.
pub enum PickOutcome {
    Picked(FilePickResult),
    Cancelled,
}

/// Worker-to-UI channel for the "Open snapshot" dialog.
pub struct FilePickerChannel {
    sender: Sender<PickOutcome>,
    receiver: Receiver<PickOutcome>,
}

impl Default for FilePickerChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Opens the snapshot dialog off the UI thread. A repaint is requested
    /// once the outcome is queued.
    pub fn pick_file(&self, ctx: egui::Context) {
        let sender = self.sender.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let outcome = pollster::block_on(pick_snapshot_file());
                let _ = sender.send(outcome);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = pick_snapshot_file().await;
                let _ = sender.send(outcome);
                ctx.request_repaint();
            });
        }
    }

    /// Outcome of the last dialog, if it has finished.
    pub fn try_recv(&self) -> Option<PickOutcome> {
        self.receiver.try_recv().ok()
    }
}

async fn pick_snapshot_file() -> PickOutcome {
    let Some(file) = rfd::AsyncFileDialog::new()
        .set_title("Open Replay Snapshot")
        .add_filter("Replay snapshot", &["json"])
        .pick_file()
        .await
    else {
        log::debug!("Snapshot dialog cancelled");
        return PickOutcome::Cancelled;
    };

    let file_name = file.file_name();
    let file_data = file.read().await;
    log::info!("Picked {} ({} bytes)", file_name, file_data.len());

    PickOutcome::Picked(FilePickResult {
        file_name,
        file_data,
    })
}
