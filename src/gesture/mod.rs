//! Calibration, cell→coordinate mapping, and gesture sequencing
//!
//! Translates ranked word paths into timed pointer gestures: each word
//! becomes a hover→press→drag→release sequence over the mapped coordinates
//! of its cells.

pub mod calibration;
pub mod mapper;
pub mod sequencer;

pub use calibration::{CalibrationPoint, CalibrationProfile};
pub use mapper::CellMapper;
pub use sequencer::{GestureConfig, GestureSequencer, SequenceReport};
