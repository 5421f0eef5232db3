use std::sync::mpsc;
use std::time::Instant;

use glance_core::io::decode::Decoder;
use glance_core::session::LoadTicket;
use tracing::debug;

use crate::messages::WorkerResult;

use super::send;

pub(super) fn handle_decode(
    ticket: LoadTicket,
    decoder: &dyn Decoder,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = decoder.decode(&ticket.path);
    debug!(
        seq = ticket.seq,
        path = %ticket.path.display(),
        ok = result.is_ok(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Decode finished"
    );
    send(tx, ctx, WorkerResult::Decoded { ticket, result });
}
