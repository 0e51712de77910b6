use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reading-focus")]
#[command(about = "Find the paragraph being read and the keywords describing it")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (scorer, tracker and ranker settings)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank keywords for every paragraph of a text or HTML file
    Keywords {
        /// Input file (.html/.htm is parsed as HTML, anything else as plain text)
        file: PathBuf,

        /// Number of graph-ranked terms to keep
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Pick the focused region from a JSON array of regions
    Focus {
        /// JSON file holding the region array
        regions: PathBuf,

        /// Viewport width
        #[arg(long)]
        width: f64,

        /// Viewport height
        #[arg(long)]
        height: f64,

        #[arg(long, default_value_t = 0.0)]
        scroll_top: f64,

        #[arg(long, default_value_t = 0.0)]
        scroll_left: f64,

        /// Pointer position as X,Y
        #[arg(long, value_parser = parse_point)]
        pointer: Option<(f64, f64)>,

        /// Use distance to the top-left corner only
        #[arg(long)]
        simple: bool,
    },

    /// Build query profiles for every paragraph of a file
    Query {
        file: PathBuf,

        /// Entity-recognition response, matched to the input paragraphs by position
        #[arg(long)]
        entities: Option<PathBuf>,
    },
}

/// Parse `X,Y` into a pair of coordinates
pub fn parse_point(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {value:?}"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("invalid X: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("invalid Y: {e}"))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,20.5"), Ok((10.0, 20.5)));
        assert_eq!(parse_point(" 3 , 4 "), Ok((3.0, 4.0)));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn test_focus_args() {
        let args = Args::try_parse_from([
            "reading-focus",
            "focus",
            "regions.json",
            "--width",
            "1280",
            "--height",
            "800",
            "--pointer",
            "100,200",
            "--simple",
        ])
        .unwrap();
        match args.command {
            Command::Focus {
                width,
                pointer,
                simple,
                scroll_top,
                ..
            } => {
                assert_eq!(width, 1280.0);
                assert_eq!(pointer, Some((100.0, 200.0)));
                assert!(simple);
                assert_eq!(scroll_top, 0.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_keywords_args_with_global_config() {
        let args = Args::try_parse_from(["reading-focus", "keywords", "a.txt", "-k", "5", "--config", "c.json"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.json")));
        assert!(matches!(args.command, Command::Keywords { k: Some(5), .. }));
    }
}
