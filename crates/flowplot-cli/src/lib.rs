//! CLI logic for the flowplot tool.
//!
//! This module reads a network file, lays it out and writes the SVG.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod input;

pub use args::Args;
pub use error::CliError;

use log::info;

use flowplot::FlowPlotBuilder;

/// Run the flowplot CLI application
///
/// This function processes the input file through the flowplot pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Unreadable or malformed network files
/// - Invalid matrices and out-of-range source or sink
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing network"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let network = input::load_network(&args.input)?;

    // Lay out and render
    let builder = FlowPlotBuilder::new(app_config);
    let diagram = network.into_diagram(&builder)?;
    for edge in diagram.omitted_edges() {
        info!(from = edge.from(), to = edge.to(); "Edge left out of the diagram");
    }
    builder.write_svg(&diagram, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
