use std::sync::mpsc;
use std::sync::Arc;

use glance_core::io::decode::Decoder;

use crate::messages::{WorkerCommand, WorkerResult};

use super::io;

/// Spawn the decode worker. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    decoder: Arc<dyn Decoder>,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("glance-decode".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, decoder);
        })?;

    Ok(cmd_tx)
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    decoder: Arc<dyn Decoder>,
) {
    while let Ok(mut cmd) = cmd_rx.recv() {
        // Only the newest queued request can still be applied.
        while let Ok(newer) = cmd_rx.try_recv() {
            cmd = newer;
        }
        match cmd {
            WorkerCommand::Decode { ticket } => {
                io::handle_decode(ticket, decoder.as_ref(), &tx, &ctx);
            }
        }
    }
}
