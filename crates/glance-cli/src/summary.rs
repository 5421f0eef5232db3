use std::path::Path;

use console::Style;
use glance_core::raster::{RasterStats, SampleDepth};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_image_summary(path: &Path, stats: &RasterStats) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Image Information"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(path.display()));
    println!("  {:<14}{}", s.label.apply_to("Format"), s.value.apply_to(stats.depth));
    println!("  {:<14}{}", s.label.apply_to("Layout"), s.value.apply_to(stats.layout));
    println!("  {:<14}{}", s.label.apply_to("Width"), s.value.apply_to(stats.width));
    println!("  {:<14}{}", s.label.apply_to("Height"), s.value.apply_to(stats.height));
    println!();

    println!("  {}", s.header.apply_to("Channels"));
    for (c, ch) in stats.channels.iter().enumerate() {
        println!(
            "    {:<12}{}  {}  {}",
            s.label.apply_to(format!("Channel {c}")),
            s.value.apply_to(format!("min {}", format_value(ch.min, stats.depth))),
            s.value.apply_to(format!("max {}", format_value(ch.max, stats.depth))),
            s.value.apply_to(format!("distinct {}", ch.distinct)),
        );
    }
    println!();
}

fn format_value(v: f64, depth: SampleDepth) -> String {
    if depth.is_integer() {
        format!("{}", v as i64)
    } else {
        format!("{v:.6}")
    }
}
