//! CLI argument parsing and command definitions.
//!
//! Provides the Docshelf command line: configuration, verbosity, the
//! documentation root override, and the commands (list, show, menu, build,
//! version, config).

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "DOCSHELF_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Documentation root, overriding `docs.root` from the config.
    #[arg(short, long, env = "DOCSHELF_ROOT")]
    pub root: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Docshelf commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the documentation files with their titles and capabilities.
    List,

    /// Render a documentation page as HTML.
    Show {
        /// File to render (defaults to the page behind the root menu entry).
        file: Option<String>,
    },

    /// Print the documentation menu.
    Menu {
        /// Only show entries visible to a viewer holding these capabilities.
        #[arg(short = 'C', long = "capability")]
        capabilities: Vec<String>,

        /// Print the menu as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the documentation as a static HTML site.
    Build {
        /// Output directory (defaults to `site.output` from the config).
        #[arg(short, long)]
        output: Option<String>,

        /// Only include pages visible to a viewer holding these capabilities.
        #[arg(short = 'C', long = "capability")]
        capabilities: Vec<String>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "docs.root").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "docs.root").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
