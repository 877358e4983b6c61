//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::parse_value;
use crate::config::RenderStyle;

/// Height-balanced binary search tree with an observer-driven terminal renderer
#[derive(Parser, Debug)]
#[command(name = "avltree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: ./.avltree.toml when present)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Rendering after each change (overrides config)
    #[arg(short, long, global = true, value_enum)]
    pub render: Option<RenderStyle>,

    /// Annotate nodes with height and balance factor
    #[arg(long, global = true)]
    pub heights: bool,

    /// Redraw after calls that left the tree unchanged
    #[arg(long, global = true)]
    pub redraw_noops: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert values (then delete some) and print the final tree
    Build {
        /// Values to insert, in order
        #[arg(required = true, allow_negative_numbers = true, value_parser = parse_value)]
        values: Vec<i64>,
        /// Values to delete afterwards, in order
        #[arg(short = 'x', long, num_args = 1.., allow_negative_numbers = true, value_parser = parse_value)]
        delete: Vec<i64>,
    },

    /// Execute a command script ('-' reads stdin)
    Run {
        /// Script file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Interactive session on stdin
    Repl,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}
