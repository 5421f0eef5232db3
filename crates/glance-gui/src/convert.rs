use glance_core::compositor::DisplayBitmap;

/// Wrap a composited bitmap as an egui ColorImage.
pub fn bitmap_to_color_image(bitmap: &DisplayBitmap) -> egui::ColorImage {
    let pixels = bitmap
        .pixels
        .iter()
        .map(|&[r, g, b, a]| egui::Color32::from_rgba_unmultiplied(r, g, b, a))
        .collect();

    egui::ColorImage {
        size: [bitmap.width, bitmap.height],
        pixels,
        source_size: Default::default(),
    }
}
