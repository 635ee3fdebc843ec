//! Command-line argument definitions using clap.

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Titanium SDK manager
///
/// Install, list and remove Titanium mobile SDK builds, and run the helper
/// scripts of an installed build. QUERY is a version range (`2.1`,
/// `>=2.0 <2.2`, `2.1.x || 3.0.x`) or a git hash prefix (`79e9c73`).
#[derive(Parser, Debug)]
#[command(name = "tsm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Titanium SDK root directory
    #[arg(short, long, env = "TSM_SDK_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Platform builds are selected for: osx, linux or win32
    #[arg(long, env = "TSM_OS", global = true)]
    pub os: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List published and installed builds
    #[command(alias = "ls")]
    List(ListArgs),

    /// Download and install the newest build matching QUERY
    Install(InstallArgs),

    /// Remove every installed build matching QUERY
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Run TARGET/builder.py of the newest installed build matching QUERY
    Builder(BuilderArgs),

    /// Run titanium.py of the newest installed build matching QUERY
    Titanium(TitaniumArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show installed builds
    #[arg(short, long)]
    pub installed: bool,

    /// Only show builds published on the build server
    #[arg(short, long)]
    pub available: bool,

    /// Version range or git hash prefix
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Version range or git hash prefix; the newest build if omitted
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Version range or git hash prefix
    pub query: String,
}

#[derive(Args, Debug)]
pub struct BuilderArgs {
    /// Build target, e.g. iphone or android
    pub target: String,

    /// Version range or git hash prefix
    pub query: String,

    /// Arguments passed through to builder.py
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TitaniumArgs {
    /// Version range or git hash prefix
    pub query: String,

    /// Arguments passed through to titanium.py
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (sdk_dir, os, python, output_format, catalog_url)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_builder_passthrough_args() {
        let cli = Cli::parse_from(["tsm", "builder", "iphone", "2.1", "--", "run", "--debug"]);
        match cli.command {
            Commands::Builder(args) => {
                assert_eq!(args.target, "iphone");
                assert_eq!(args.query, "2.1");
                assert_eq!(args.args, ["run", "--debug"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tsm", "list", "--installed", "--os", "linux", "-o", "json"]);
        assert_eq!(cli.os.as_deref(), Some("linux"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::List(ListArgs { installed: true, .. })));
    }
}
