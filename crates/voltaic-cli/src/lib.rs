//! CLI logic for the Voltaic schematic tool.
//!
//! This module contains the core CLI logic for the Voltaic schematic tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Emit};

use std::fs;

use log::info;

use voltaic::{SchematicBuilder, VoltaicError};

/// Run the Voltaic CLI application
///
/// This function reads the input netlist, lays it out, and writes either
/// the rendered SVG or the layout JSON to the output file.
///
/// # Errors
///
/// Returns `VoltaicError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Netlist decoding errors
/// - Layout export errors
pub fn run(args: &Args) -> Result<(), VoltaicError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        emit:? = args.emit;
        "Processing netlist"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SchematicBuilder::new(app_config);
    let circuit = builder.parse(&source)?;
    let output = match args.emit {
        Emit::Svg => builder.render_svg(&circuit)?,
        Emit::Layout => builder.layout_json(&circuit)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Output written successfully");

    Ok(())
}
