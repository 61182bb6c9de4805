//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gridpilot - solve letter-grid boards and trace the words on a paired host
#[derive(Parser, Debug)]
#[command(name = "gridpilot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a board and trace the found words as pointer gestures
    Solve {
        /// Board letters, row-major (prompts interactively when omitted)
        board: Option<String>,

        /// Compiled dictionary file
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Calibration profile for exact per-cell coordinates
        #[arg(long)]
        calibration: Option<PathBuf>,

        /// Top-left cell center as "x,y" (interpolation mode)
        #[arg(long, requires = "bottom_right")]
        top_left: Option<String>,

        /// Bottom-right cell center as "x,y" (interpolation mode)
        #[arg(long, requires = "top_left")]
        bottom_right: Option<String>,

        /// HID gadget device node to drive
        #[arg(long)]
        device: Option<PathBuf>,

        /// Maximum number of words to trace
        #[arg(short, long)]
        limit: Option<usize>,

        /// Solve and print the ranked words without sending any gestures
        #[arg(long)]
        dry_run: bool,
    },

    /// Compile a newline-delimited word list into a dictionary file
    CompileDict {
        /// Word list file, one word per line
        input: PathBuf,

        /// Output dictionary path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Record per-cell pointer coordinates interactively
    Calibrate {
        /// Output calibration profile path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grid rows (config value if omitted)
        #[arg(long)]
        rows: Option<usize>,

        /// Grid columns (config value if omitted)
        #[arg(long)]
        cols: Option<usize>,
    },

    /// Send a single absolute pointer state
    Probe {
        /// Button bitmask
        buttons: u8,

        /// Absolute x position (0-32767)
        x: u16,

        /// Absolute y position (0-32767)
        y: u16,

        /// Wheel delta
        #[arg(default_value = "0")]
        wheel: i8,

        /// HID gadget device node (logs the state when omitted)
        #[arg(long)]
        device: Option<PathBuf>,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the config file path
    Path,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Per-user data directory
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gridpilot"))
            .unwrap_or_else(|| PathBuf::from(".gridpilot"))
    }

    /// Default compiled dictionary path
    pub fn default_dictionary_path() -> PathBuf {
        Self::data_dir().join("dictionary.json")
    }

    /// Default calibration profile path
    pub fn default_calibration_path() -> PathBuf {
        Self::data_dir().join("calibration.json")
    }
}
