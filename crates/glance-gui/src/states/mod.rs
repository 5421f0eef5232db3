mod contrast;
mod ui;
mod viewport;

pub use contrast::{ChannelChoice, ContrastState};
pub use ui::UIState;
pub use viewport::ViewportState;
