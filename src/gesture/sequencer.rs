//! Gesture Sequencing
//!
//! Replays each selected word as a hover→press→drag→release pointer
//! sequence. The sequencer exclusively owns the movement controller for the
//! duration of a run; no two sequences may interleave against the same
//! transport connection.

use crate::board::search::WordFind;
use crate::gesture::mapper::CellMapper;
use crate::pointer::motion::{MotionController, MotionStats};
use crate::pointer::state::BUTTON_PRIMARY;
use crate::pointer::transport::PointerTransport;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Gesture timing and cadence tuning.
///
/// The settle delays are part of the input contract with the host (they
/// match the cadence a real finger produces), not best-effort smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Settle delay after the press state (ms).
    pub press_settle_ms: u64,
    /// Settle delay after arriving at each drag cell (ms).
    pub drag_settle_ms: u64,
    /// Settle delay after the release state (ms).
    pub release_settle_ms: u64,
    /// Recalibrate the pointer after this many completed words. Must be > 0.
    pub recalibrate_every: u32,
    /// Settle delay after a recalibration pass (ms).
    pub recalibrate_settle_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            press_settle_ms: 50,
            drag_settle_ms: 70,
            release_settle_ms: 50,
            recalibrate_every: 3,
            recalibrate_settle_ms: 300,
        }
    }
}

impl GestureConfig {
    /// Validate tuning values. Returns `Err` describing the first invalid
    /// field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.recalibrate_every == 0 {
            return Err(crate::Error::Config(
                "gesture.recalibrate_every must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one sequencing run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceReport {
    /// Words fully traced (hover through release).
    pub words_traced: usize,
    /// The run stopped early because the interrupt flag was raised.
    pub interrupted: bool,
    /// Movement controller counters for the run.
    pub stats: MotionStats,
}

/// Replays ranked word paths as pointer gestures.
pub struct GestureSequencer<T: PointerTransport> {
    motion: MotionController<T>,
    mapper: CellMapper,
    config: GestureConfig,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<T: PointerTransport> GestureSequencer<T> {
    pub fn new(
        motion: MotionController<T>,
        mapper: CellMapper,
        config: GestureConfig,
    ) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            motion,
            mapper,
            config,
            interrupt: None,
        })
    }

    /// Attach a flag that stops the run between words. The flag is checked
    /// before each word, never mid-drag, so an interrupted run always leaves
    /// the button released and the transport session valid.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Trace every word in ranked order.
    ///
    /// A failed delivery of an intermediate state is logged and the sequence
    /// continues; a failed button release aborts the run with
    /// [`crate::Error::StuckButton`], since a stuck "button down" state
    /// corrupts all subsequent gestures.
    pub fn run(&mut self, finds: &[WordFind]) -> crate::Result<SequenceReport> {
        let mut report = SequenceReport::default();

        // Start from a known origin so the first hover is exact.
        self.motion.recalibrate();
        self.settle(self.config.recalibrate_settle_ms);

        for (index, find) in finds.iter().enumerate() {
            if self.interrupted() {
                info!(traced = report.words_traced, "gesture run interrupted");
                report.interrupted = true;
                break;
            }

            self.trace(find)?;
            report.words_traced += 1;
            info!(word = %find.word, cells = find.path.len(), "traced word");

            if (index + 1) % self.config.recalibrate_every as usize == 0 {
                self.motion.recalibrate();
                self.settle(self.config.recalibrate_settle_ms);
            }
        }

        report.stats = self.motion.stats();
        Ok(report)
    }

    /// Consume the sequencer and hand back the movement controller.
    pub fn into_motion(self) -> MotionController<T> {
        self.motion
    }

    fn trace(&mut self, find: &WordFind) -> crate::Result<()> {
        let (first, rest) = find.path.split_first().ok_or_else(|| {
            crate::Error::Board(format!("word {:?} has an empty cell path", find.word))
        })?;

        // Hover to the first cell with no button held.
        let (x, y) = self.mapper.target(*first)?;
        self.motion.goto(x as i32, y as i32);

        self.motion.press(BUTTON_PRIMARY);
        self.settle(self.config.press_settle_ms);

        for cell in rest {
            let (x, y) = self.mapper.target(*cell)?;
            self.motion.goto(x as i32, y as i32);
            self.settle(self.config.drag_settle_ms);
        }

        if let Err(e) = self.motion.release() {
            error!(word = %find.word, "release delivery failed: {e}");
            return Err(crate::Error::StuckButton {
                word: find.word.clone(),
            });
        }
        self.settle(self.config.release_settle_ms);
        Ok(())
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn settle(&self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}
