pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "isimctl")]
#[command(about = "Interactive front-end for xcrun simctl")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, global = true, env = "ISIMCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse simulator devices by runtime
    List {
        /// Filter passed to simctl (e.g., "booted", "available", "iPhone")
        search_term: Option<String>,

        /// Show every matching device in a table instead of picking one
        #[arg(short, long)]
        all: bool,
    },

    /// Boot a shut-down simulator device
    Boot {
        /// Ask before booting
        #[arg(short, long)]
        confirm: bool,
    },

    /// Open a shut-down simulator device in Simulator.app
    Open {
        /// Ask before opening
        #[arg(short, long)]
        confirm: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., xcrun.program, ui.color)
        key: String,
        /// Configuration value
        value: String,
    },
}
