/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Viewport size in physical pixels, as last handed to the session.
    pub size: (usize, usize),
    /// The texture no longer matches the session and must be re-rendered.
    pub dirty: bool,
}
