//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vitrine marketing site CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: vitrine.toml)
    #[arg(short = 'C', long, default_value = "vitrine.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the Build command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful when the production URL differs from the one in vitrine.toml:
    ///   vitrine build --base-url "https://staging.acme.example"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every published translation to static HTML
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Validate every stored translation without writing output
    Check,

    /// List pages and whether they have a guided editor
    Pages,

    /// Print the guided editor sections of a translation as JSON
    Sections {
        /// Page slug, e.g. `about`
        slug: String,

        /// Locale code (default: [base.default_locale])
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Apply edited sections JSON back to a translation
    Apply {
        /// Page slug, e.g. `about`
        slug: String,

        /// JSON file holding the edited sections
        sections: PathBuf,

        /// Locale code (default: [base.default_locale])
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Print the default JSON of a block type
    NewBlock {
        /// Block type, e.g. `hero`
        block_type: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from([
            "vitrine",
            "-r",
            "site",
            "build",
            "--clean",
            "--sitemap=false",
            "--base-url",
            "https://acme.example",
        ]);

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("vitrine.toml"));
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert!(build_args.clean);
        assert_eq!(build_args.sitemap, Some(false));
        assert_eq!(build_args.base_url.as_deref(), Some("https://acme.example"));
    }

    #[test]
    fn test_parse_sitemap_flag_without_value() {
        let cli = Cli::parse_from(["vitrine", "build", "--sitemap"]);
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(build_args.sitemap, Some(true));
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::parse_from(["vitrine", "apply", "about", "edit.json", "-l", "fr"]);
        match cli.command {
            Commands::Apply { slug, sections, locale } => {
                assert_eq!(slug, "about");
                assert_eq!(sections, PathBuf::from("edit.json"));
                assert_eq!(locale.as_deref(), Some("fr"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["vitrine", "check"]);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_parse_new_block() {
        let cli = Cli::parse_from(["vitrine", "new-block", "hero"]);
        assert!(matches!(cli.command, Commands::NewBlock { ref block_type } if block_type == "hero"));
    }
}
