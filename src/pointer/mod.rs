//! Pointer state, transport seam, and bounded-step motion
//!
//! Everything below the gesture layer: the absolute pointer state synthesized
//! per update, the transport trait that relays it to the paired host, and the
//! movement controller that advances the virtual pointer in small fixed-size
//! steps.

pub mod motion;
pub mod state;
pub mod transport;

pub use motion::{MotionConfig, MotionController, MotionStats};
pub use state::{PointerState, AXIS_MAX, BUTTON_NONE, BUTTON_PRIMARY};
pub use transport::{HidGadgetTransport, PointerTransport, RecordingTransport, TraceTransport};
