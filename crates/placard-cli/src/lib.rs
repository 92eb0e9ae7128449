//! CLI logic for the Placard chart tool.
//!
//! Reads a scene, lays out its labels and writes the chart as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use placard::{ChartBuilder, PlacardError};

/// Run the Placard CLI application
///
/// This function processes the input scene through the Placard pipeline
/// and writes the resulting SVG to the output file. With `--lookup`, the
/// label drawn at the given position is reported on standard output.
///
/// # Errors
///
/// Returns `PlacardError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing and validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PlacardError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = ChartBuilder::new(app_config);
    let scene = builder.parse(&source)?;
    let mut layout = builder
        .layout(&scene)?
        .with_hit_boxes(args.show_hit_boxes);

    if let Some(point) = args.lookup {
        let hit = layout.lookup(point);
        info!(x = point.x(), y = point.y(), hit = hit.map(|l| l.text()); "Lookup");
        match hit {
            Some(label) => println!(
                "{},{}: \"{}\" ({} / {})",
                point.x(),
                point.y(),
                label.text(),
                label.dataset(),
                label.category()
            ),
            None => println!("{},{}: no label", point.x(), point.y()),
        }
    }

    let svg = layout.render_svg()?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
