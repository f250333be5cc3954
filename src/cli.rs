//! Command-line arguments.

use std::path::PathBuf;

use bitdraw_render::{RenderConfig, unicode::DEFAULT_BLOCKS};
use clap::{ArgAction, Parser, Subcommand};

/// Environment variable holding a `tracing` filter; overrides `-v`.
pub const LOG_ENV: &str = "BITDRAW_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "bitdraw",
    about = "Draw bit-field, UTF-8 and list-indexing diagrams for teaching",
    version
)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Pixels per centimetre of the SVG output
    #[arg(long, default_value_t = 40.0, global = true)]
    pub scale: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw built-in figures as SVG (all of them when no name is given)
    Figure {
        names: Vec<String>,

        /// Directory the `<name>.svg` files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Draw a diagram described in a JSON file
    Render {
        diagram: PathBuf,

        /// Output file; defaults to the input with an `.svg` extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Draw the sign, exponent and mantissa bits of a floating point number
    Float {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Use binary32 instead of binary64
        #[arg(long)]
        single: bool,

        #[arg(short, long, default_value = "float.svg")]
        output: PathBuf,
    },

    /// Write the Unicode/UTF-8 code chart as a XeLaTeX document
    Unicode {
        /// Number of 128-code-point blocks
        #[arg(long, default_value_t = DEFAULT_BLOCKS, value_parser = clap::value_parser!(u32).range(1..=0x200))]
        blocks: u32,

        #[arg(short, long, default_value = "unicode.tex")]
        output: PathBuf,
    },

    /// Plot a data file of x/y pairs
    Curve {
        data: PathBuf,

        /// Output file; defaults to the input with an `.svg` extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Graph width in centimetres
        #[arg(long, default_value_t = 8.0)]
        width: f64,

        /// Dashed blue line, point markers and axis titles
        #[arg(long)]
        styled: bool,
    },

    /// List the built-in figures
    List,
}

impl Cli {
    /// Default filter directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// SVG settings for every command that draws.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            px_per_unit: self.scale,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_figure_defaults() {
        let cli = Cli::try_parse_from(["bitdraw", "figure", "binary", "utf8-2"]).unwrap();
        match cli.command {
            Command::Figure { names, out_dir } => {
                assert_eq!(names, ["binary", "utf8-2"]);
                assert_eq!(out_dir, PathBuf::from("."));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.scale, 40.0);
    }

    #[test]
    fn test_scale_is_global() {
        for args in [
            ["bitdraw", "render", "row.json", "--scale", "80"],
            ["bitdraw", "float", "1.5", "--scale", "80"],
            ["bitdraw", "curve", "data.txt", "--scale", "80"],
            ["bitdraw", "--scale", "80", "figure", "binary"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.scale, 80.0, "{args:?}");
            assert_eq!(cli.render_config().px_per_unit, 80.0);
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["bitdraw", "list", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_unicode_blocks_range() {
        let cli = Cli::try_parse_from(["bitdraw", "unicode"]).unwrap();
        assert!(matches!(cli.command, Command::Unicode { blocks: 0x5A, .. }));
        assert!(Cli::try_parse_from(["bitdraw", "unicode", "--blocks", "0"]).is_err());
    }

    #[test]
    fn test_float_accepts_negative_values() {
        let cli = Cli::try_parse_from(["bitdraw", "float", "-6.25", "--single"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Float { value, single: true, .. } if value == -6.25
        ));
    }
}
