//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Linden static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root; every other path is relative to it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: linden.toml)
    #[arg(short = 'C', long, default_value = "linden.toml")]
    pub config: PathBuf,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Template directory path (relative to project root)
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["linden"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("linden.toml"));
        assert!(cli.root.is_none());
        assert!(cli.minify.is_none());
        assert!(!cli.clean);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "linden", "--root", "site", "-o", "dist", "--minify", "--clean",
        ])
        .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.output, Some(PathBuf::from("dist")));
        assert_eq!(cli.minify, Some(true));
        assert!(cli.clean);
    }

    #[test]
    fn test_cli_minify_explicit_false() {
        let cli = Cli::try_parse_from(["linden", "--minify", "false"]).unwrap();
        assert_eq!(cli.minify, Some(false));
    }
}
