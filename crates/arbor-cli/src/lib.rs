//! Arbor CLI library
//!
//! This module contains the core CLI logic for the Arbor layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Direction, Format};

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use arbor::{ArborError, TreeLayoutBuilder};

/// Run the Arbor CLI application
///
/// This function lays out the input tree document and writes the export in
/// the requested format to the output file, or to stdout when no output file
/// is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ArborError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Tree document errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), ArborError> {
    info!(
        input_path = args.input,
        output_path:? = args.output,
        format:? = args.format;
        "Processing tree document"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let mut builder = TreeLayoutBuilder::new(app_config);
    if let Some(direction) = args.direction {
        builder = builder.with_direction(direction.into());
    }
    let document = builder.parse(&source)?;
    let rendered = builder.render(&document, args.format.into())?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path.as_str(); "Layout exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
