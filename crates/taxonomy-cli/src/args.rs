use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "taxonomy")]
#[command(about = "Build and inspect the equipment category taxonomy")]
#[command(version)]
pub struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.taxonomy)
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
    /// Print the category tree (builtin, or refreshed from a remote export)
    Tree {
        /// Remote collection export (overrides source.remote)
        #[arg(short, long)]
        remote: Option<PathBuf>,

        /// Ignore any configured remote source
        #[arg(long, conflicts_with = "remote")]
        local: bool,

        /// Print JSON instead of the tree view
        #[arg(long)]
        json: bool,
    },

    /// Run the pipeline over a raw JSON file
    Build {
        /// Raw category records (array or {"documents": [...]})
        input: PathBuf,

        /// Additional records merged on top of the input
        #[arg(short, long)]
        extras: Option<PathBuf>,

        /// Print JSON instead of the tree view
        #[arg(long)]
        json: bool,
    },

    /// Print the identifier derived from each name
    Id {
        /// Display names (e.g., "Peças de Reposição")
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Find where an item appears in the tree
    Find {
        /// Item name (matched by identifier)
        name: String,
    },

    /// Show node counts of the builtin tree
    Stats,

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
        /// Config key (e.g., source.remote)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., output.format)
        key: String,

        /// Value to set (e.g., "json" or "/srv/exports/categorias.json")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with commented defaults
    Init,
}
