use std::path::Path;

use glance_core::error::DecodeError;
use glance_core::raster::RasterStats;

/// Log lines kept for the status panel.
const MAX_LOG_LINES: usize = 200;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Log messages.
    pub log_messages: Vec<String>,

    /// Readout under the pointer, `-` when off the image.
    pub probe_text: String,

    /// A decode is in flight.
    pub loading: bool,

    pub show_about: bool,
    pub show_info: bool,
    pub show_contrast: bool,

    /// Statistics of the current image, computed when the info dialog opens.
    pub stats: Option<RasterStats>,

    /// Message of the last failed load, shown in a dialog until dismissed.
    pub load_error: Option<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }

    /// Record a failed load in the log and raise the error dialog.
    pub fn report_load_error(&mut self, path: &Path, err: &DecodeError) {
        let msg = format!("Could not open {}: {err}", path.display());
        self.loading = false;
        self.add_log(format!("ERROR: {msg}"));
        self.load_error = Some(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_raises_dialog_and_logs() {
        let mut ui = UIState {
            loading: true,
            ..Default::default()
        };
        let err = DecodeError::CorruptFile("truncated".into());
        ui.report_load_error(Path::new("shots/m31.tif"), &err);

        let msg = ui.load_error.as_deref().unwrap();
        assert!(msg.contains("m31.tif"));
        assert!(msg.contains("truncated"));
        assert!(!ui.loading);
        assert_eq!(ui.log_messages.last().unwrap(), &format!("ERROR: {msg}"));
    }

    #[test]
    fn test_log_is_capped() {
        let mut ui = UIState::default();
        for i in 0..MAX_LOG_LINES + 5 {
            ui.add_log(format!("line {i}"));
        }
        assert_eq!(ui.log_messages.len(), MAX_LOG_LINES);
        assert_eq!(ui.log_messages[0], "line 5");
    }
}
