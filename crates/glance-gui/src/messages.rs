use std::path::PathBuf;

use glance_core::error::DecodeError;
use glance_core::raster::Raster;
use glance_core::session::LoadTicket;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode the file named by the ticket.
    Decode { ticket: LoadTicket },
}

/// Results sent back to the UI thread.
pub enum WorkerResult {
    Decoded {
        ticket: LoadTicket,
        result: Result<Raster, DecodeError>,
    },
    /// A path picked in the open dialog.
    FileChosen { path: PathBuf },
}
