use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "favthings")]
#[command(about = "Report the highest rated favorite things and categories")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.favthings)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse favorite things and report the highest rated thing and category
    Report {
        /// Input file ('-' for stdin, default: bundled sample)
        input: Option<PathBuf>,

        /// Categories file overriding the configured whitelist
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the accepted category names
    Categories {
        /// Categories file overriding the configured whitelist
        #[arg(short, long)]
        categories: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., categories.extra)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., categories.extra)
        key: String,

        /// Value to set (e.g., "Countries,Mammals" or "[Countries, Mammals]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
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
    fn test_parse_report() {
        let cli = Cli::parse_from(["favthings", "report", "things.txt", "--json"]);
        match cli.command {
            Some(Commands::Report {
                input,
                categories,
                json,
            }) => {
                assert_eq!(input, Some(PathBuf::from("things.txt")));
                assert!(categories.is_none());
                assert!(json);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["favthings", "report", "-v", "--base-dir", "/tmp/fav"]);
        assert!(cli.verbose);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/fav")));
    }
}
