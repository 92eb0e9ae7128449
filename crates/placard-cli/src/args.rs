//! Command-line argument definitions for the Placard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, debugging aids and logging verbosity.

use clap::Parser;

use placard::geometry::Point;

/// Command-line arguments for the Placard chart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene
    #[arg(help = "Path to the input scene (TOML)")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Outline the hit-box of every visible label
    #[arg(long)]
    pub show_hit_boxes: bool,

    /// Report the label drawn at a canvas position, given as `X,Y`
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    pub lookup: Option<Point>,
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got `{value}`"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate `{}`", s.trim()))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["placard", "chart.toml"]).unwrap();
        assert_eq!(args.input, "chart.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        assert!(!args.show_hit_boxes);
        assert!(args.lookup.is_none());
    }

    #[test]
    fn test_lookup_point() {
        let args =
            Args::try_parse_from(["placard", "chart.toml", "--lookup", "12.5, 40"]).unwrap();
        assert_eq!(args.lookup, Some(Point::new(12.5, 40.0)));
    }

    #[test]
    fn test_lookup_rejects_malformed_points() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("1,inf").is_err());
    }
}
