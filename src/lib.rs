//! # Gridpilot
//!
//! Solves 4×4 letter-grid word-search boards and replays each solution as a
//! sequence of absolute pointer gestures on a paired host, through a spoofed
//! absolute-coordinate pointing device.
//!
//! ## Overview
//!
//! A compiled dictionary trie and a board string go in; a ranked list of
//! words comes out, each carrying the cell path that spells it. The gesture
//! layer then walks every path as a hover→press→drag→release sequence,
//! moving the virtual pointer in small fixed-size steps so the host's motion
//! smoothing cannot distort the trajectory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gridpilot::board::grid::Board;
//! use gridpilot::board::{search, select};
//! use gridpilot::dict::trie::Trie;
//!
//! let trie = Trie::build(["the", "other", "her"].iter().copied());
//! let board = Board::parse("otherandeeatxyzq", 4, 4).expect("valid board");
//!
//! let finds = search::find_words(&board, &trie);
//! let ranked = select::rank_and_limit(finds, 500);
//! for find in &ranked {
//!     println!("{} via {:?}", find.word, find.path);
//! }
//! ```
//!
//! ## Architecture
//!
//! The pipeline is organized into the following modules:
//!
//! - [`dict`]: dictionary trie and word-list compiler
//! - [`board`]: board model, path enumeration, result ranking
//! - [`pointer`]: pointer state, transport seam, bounded-step motion
//! - [`gesture`]: calibration, cell→coordinate mapping, gesture sequencing
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐    ┌────────────┐    ┌───────────┐    ┌───────────┐
//! │ word list │───▶│ dict::Trie │───▶│  board::  │───▶│  board::  │
//! │  (file)   │    │ (compiled) │    │  search   │    │  select   │
//! └───────────┘    └────────────┘    └───────────┘    └───────────┘
//!                                                           │
//! ┌───────────┐    ┌────────────┐    ┌───────────┐          │
//! │  paired   │◀───│  pointer:: │◀───│ gesture:: │◀─────────┘
//! │   host    │    │   motion   │    │ sequencer │
//! └───────────┘    └────────────┘    └───────────┘
//! ```

pub mod app;
pub mod board;
pub mod dict;
pub mod gesture;
pub mod pointer;

// Re-export commonly used types
pub use board::grid::{Board, Cell};
pub use board::search::WordFind;
pub use dict::trie::Trie;
pub use gesture::mapper::CellMapper;
pub use gesture::sequencer::GestureSequencer;
pub use pointer::motion::MotionController;
pub use pointer::state::PointerState;
pub use pointer::transport::PointerTransport;

/// Result type alias for gridpilot
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the solver and gesture pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Board input error: {0}")]
    Board(String),

    #[error("Dictionary error: {0}")]
    Dictionary(String),

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// A button-release state failed to reach the host. The virtual device
    /// is presumed stuck "button down", which corrupts every subsequent
    /// gesture; callers must force a release before tracing anything else.
    #[error("Button release failed after tracing {word:?}; device may be stuck pressed")]
    StuckButton { word: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
