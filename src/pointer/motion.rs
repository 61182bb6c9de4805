//! Bounded-Step Movement Controller
//!
//! Advances the virtual pointer toward a target in fixed-size quantized
//! steps. Many hosts apply non-linear smoothing or acceleration to a single
//! large jump, so movement is issued as a train of small bounded steps with a
//! fixed delay between them; the delay paces the virtual device to stay
//! within the host's expected input cadence and is part of the contract.

use crate::pointer::state::{clamp_axis, PointerState, BUTTON_NONE};
use crate::pointer::transport::PointerTransport;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Movement controller tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Maximum per-axis magnitude of one movement step. Must be > 0.
    pub max_step: i32,
    /// Delay between emitted steps (ms).
    pub step_delay_ms: u64,
    /// Per-axis magnitude of one recalibration move toward the origin.
    pub recalibrate_step: i32,
    /// Recalibration moves issued per axis.
    pub recalibrate_bursts: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_step: 10,
            step_delay_ms: 2,
            recalibrate_step: 2048,
            recalibrate_bursts: 20,
        }
    }
}

impl MotionConfig {
    /// Validate tuning values. Returns `Err` describing the first invalid
    /// field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_step <= 0 {
            return Err(crate::Error::Config(format!(
                "pointer.max_step must be > 0, got {}",
                self.max_step
            )));
        }
        if self.recalibrate_step <= 0 {
            return Err(crate::Error::Config(format!(
                "pointer.recalibrate_step must be > 0, got {}",
                self.recalibrate_step
            )));
        }
        if self.recalibrate_bursts == 0 {
            return Err(crate::Error::Config(
                "pointer.recalibrate_bursts must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counters over one controller lifetime.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionStats {
    /// States handed to the transport.
    pub states_sent: u64,
    /// Sends the transport reported as failed (non-release; logged and
    /// skipped).
    pub sends_failed: u64,
    /// Completed recalibration passes.
    pub recalibrations: u64,
}

/// Drives the virtual pointer between absolute positions.
///
/// The only core component carrying mutable state across calls: the current
/// position and the held-button bitmask. Exclusively owned by one gesture
/// sequencer run; the tracked position may go transiently negative during
/// recalibration overshoot and is clamped at emission.
pub struct MotionController<T: PointerTransport> {
    transport: T,
    config: MotionConfig,
    x: i32,
    y: i32,
    buttons: u8,
    stats: MotionStats,
}

impl<T: PointerTransport> MotionController<T> {
    /// Create a controller at position (0, 0) with no buttons held.
    pub fn new(transport: T, config: MotionConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            config,
            x: 0,
            y: 0,
            buttons: BUTTON_NONE,
            stats: MotionStats::default(),
        })
    }

    /// The controller's tracked position.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// The held-button bitmask.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    pub fn stats(&self) -> MotionStats {
        self.stats
    }

    /// Consume the controller and hand back its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Move to an absolute target position in bounded steps.
    ///
    /// Each step advances every axis with a nonzero remaining delta by
    /// `sign(delta) * min(|delta|, max_step)` and emits one pointer state at
    /// the newly advanced position with the current held-button bitmask,
    /// then waits the configured step delay. Terminates with the tracked
    /// position exactly equal to the target.
    pub fn goto(&mut self, x: i32, y: i32) {
        while self.x != x || self.y != y {
            let dx = x - self.x;
            let dy = y - self.y;
            self.x += dx.signum() * dx.abs().min(self.config.max_step);
            self.y += dy.signum() * dy.abs().min(self.config.max_step);
            self.emit_lossy();
            self.pace();
        }
    }

    /// Add `button` to the held bitmask and emit a state at the current
    /// position.
    pub fn press(&mut self, button: u8) {
        self.buttons |= button;
        self.emit_lossy();
    }

    /// Clear the held bitmask and emit a state at the current position.
    ///
    /// Unlike every other emission, a delivery failure here surfaces to the
    /// caller: the host may now consider the button stuck down.
    pub fn release(&mut self) -> crate::Result<()> {
        self.buttons = BUTTON_NONE;
        self.emit()
    }

    /// Drive the pointer to a known origin and reset the tracked position
    /// to exactly (0, 0).
    ///
    /// Issues a fixed number of maximum-negative moves along x, then y
    /// (overshoot-and-clamp). Relies on the host clamping the pointer at the
    /// edge of the coordinate space; that is a property of the host, not of
    /// this controller. Used to bound the drift that accumulates over long
    /// gesture sequences.
    pub fn recalibrate(&mut self) {
        debug!("recalibrating pointer to origin");
        for _ in 0..self.config.recalibrate_bursts {
            self.x -= self.config.recalibrate_step;
            self.emit_lossy();
            self.pace();
        }
        for _ in 0..self.config.recalibrate_bursts {
            self.y -= self.config.recalibrate_step;
            self.emit_lossy();
            self.pace();
        }
        self.x = 0;
        self.y = 0;
        self.stats.recalibrations += 1;
    }

    fn emit(&mut self) -> crate::Result<()> {
        let state = PointerState::new(self.buttons, clamp_axis(self.x), clamp_axis(self.y), 0);
        self.stats.states_sent += 1;
        match self.transport.send(state) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.stats.sends_failed += 1;
                Err(e)
            }
        }
    }

    /// Emit, logging a failed delivery instead of propagating it. One missed
    /// intermediate frame costs less than aborting the gesture plan.
    fn emit_lossy(&mut self) {
        if let Err(e) = self.emit() {
            warn!("pointer state delivery failed: {e}");
        }
    }

    fn pace(&self) {
        if self.config.step_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.step_delay_ms));
        }
    }
}
