//! Pointer Transport Seam
//!
//! The transport relays each synthesized pointer state to the paired host.
//! The pairing/profile-registration side of the link is an external
//! collaborator; this module only speaks the per-state `send` contract.

use crate::pointer::state::PointerState;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accepts one absolute pointer state per call and relays it to the host.
///
/// Implementations must be invoked for every intermediate step of a
/// movement, not only endpoints; the movement controller depends on that to
/// keep the host's smoothing out of the trajectory.
pub trait PointerTransport {
    fn send(&mut self, state: PointerState) -> crate::Result<()>;
}

impl<T: PointerTransport + ?Sized> PointerTransport for Box<T> {
    fn send(&mut self, state: PointerState) -> crate::Result<()> {
        (**self).send(state)
    }
}

/// Transport that logs every state at debug level and always succeeds.
/// Used for dry runs against no device.
#[derive(Debug, Default)]
pub struct TraceTransport;

impl PointerTransport for TraceTransport {
    fn send(&mut self, state: PointerState) -> crate::Result<()> {
        debug!(
            buttons = state.buttons,
            x = state.x,
            y = state.y,
            wheel = state.wheel,
            "pointer state"
        );
        Ok(())
    }
}

/// Transport that captures every sent state in memory.
/// Backs the integration tests and gesture-plan inspection.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    states: Vec<PointerState>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All states sent so far, in order.
    pub fn states(&self) -> &[PointerState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl PointerTransport for RecordingTransport {
    fn send(&mut self, state: PointerState) -> crate::Result<()> {
        self.states.push(state);
        Ok(())
    }
}

/// Transport that writes 6-byte absolute HID reports to a gadget device
/// node (e.g. `/dev/hidg1`).
#[derive(Debug)]
pub struct HidGadgetTransport {
    device: File,
    path: PathBuf,
}

impl HidGadgetTransport {
    /// Open the device node for writing.
    pub fn open(path: &Path) -> crate::Result<Self> {
        let device = OpenOptions::new().write(true).open(path).map_err(|e| {
            crate::Error::Config(format!("cannot open HID device {}: {}", path.display(), e))
        })?;
        Ok(Self {
            device,
            path: path.to_path_buf(),
        })
    }
}

impl PointerTransport for HidGadgetTransport {
    fn send(&mut self, state: PointerState) -> crate::Result<()> {
        self.device.write_all(&state.report()).map_err(|e| {
            crate::Error::Transport(format!("{}: {}", self.path.display(), e))
        })
    }
}
