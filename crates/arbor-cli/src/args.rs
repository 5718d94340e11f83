//! Command-line argument definitions for the Arbor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the export format,
//! the layout direction, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use arbor::{LayoutDirection, export::ExportFormat};

/// Command-line arguments for the Arbor layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input tree document (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; the layout is printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Layout direction, overriding the configured one
    #[arg(short, long, value_enum)]
    pub direction: Option<Direction>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Output formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned table of node positions
    Text,
    /// TOML report of nodes and edges
    Toml,
    /// SVG preview
    Svg,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ExportFormat::Text,
            Format::Toml => ExportFormat::Toml,
            Format::Svg => ExportFormat::Svg,
        }
    }
}

/// Layout directions accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    TopToBottom,
    LeftToRight,
}

impl From<Direction> for LayoutDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::TopToBottom => LayoutDirection::TopToBottom,
            Direction::LeftToRight => LayoutDirection::LeftToRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["arbor", "tree.toml"]).unwrap();
        assert_eq!(args.input, "tree.toml");
        assert_eq!(args.output, None);
        assert_eq!(args.format, Format::Text);
        assert_eq!(args.direction, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_format_and_direction_values() {
        let args = Args::try_parse_from([
            "arbor",
            "tree.toml",
            "--format",
            "svg",
            "--direction",
            "left-to-right",
            "-o",
            "out.svg",
        ])
        .unwrap();
        assert_eq!(ExportFormat::from(args.format), ExportFormat::Svg);
        assert_eq!(
            args.direction.map(LayoutDirection::from),
            Some(LayoutDirection::LeftToRight)
        );
        assert_eq!(args.output.as_deref(), Some("out.svg"));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["arbor", "tree.toml", "--format", "png"]).is_err());
    }
}
