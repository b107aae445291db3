use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rep Sentinel - count exercise repetitions from pose landmarks
#[derive(Parser, Debug)]
#[command(name = "rep-sentinel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count repetitions in recorded landmark frames (JSON lines)
    Replay {
        /// Input file, stdin when omitted or "-"
        input: Option<PathBuf>,

        /// Only track these movements
        #[arg(short, long)]
        only: Vec<String>,
    },

    /// List configured movements
    Movements,

    /// Write the default configuration
    Init {
        /// Destination, defaults to the user config path
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
