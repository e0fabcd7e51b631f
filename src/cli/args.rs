//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Album trivia quiz, questions served in alphabetical order from a binary search tree
#[derive(Parser, Debug)]
#[command(name = "quiztree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Question feed (TOML), overrides the configured one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub feed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List questions in quiz order
    List,

    /// Show the search tree built from the feed
    Tree,

    /// Play the quiz interactively
    Play,

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
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print config template
    Template,

    /// Write config template to the global config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
