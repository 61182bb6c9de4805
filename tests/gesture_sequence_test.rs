//! Integration tests for gesture sequencing
//!
//! These tests drive the sequencer against in-memory transports and assert
//! on the exact pointer-state stream: hover/press/drag/release shape,
//! recalibration cadence, delivery-failure policy, and interruption.

use gridpilot::board::grid::Cell;
use gridpilot::board::search::WordFind;
use gridpilot::gesture::mapper::CellMapper;
use gridpilot::gesture::sequencer::{GestureConfig, GestureSequencer};
use gridpilot::pointer::motion::{MotionConfig, MotionController};
use gridpilot::pointer::state::PointerState;
use gridpilot::pointer::transport::{PointerTransport, RecordingTransport};
use gridpilot::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Transport that rejects selected sends while still recording everything.
struct FlakyTransport {
    inner: RecordingTransport,
    fail_indices: Vec<usize>,
    fail_releases: bool,
    saw_press: bool,
    sent: usize,
}

impl FlakyTransport {
    fn new() -> Self {
        Self {
            inner: RecordingTransport::new(),
            fail_indices: Vec::new(),
            fail_releases: false,
            saw_press: false,
            sent: 0,
        }
    }

    fn failing_at(mut self, indices: &[usize]) -> Self {
        self.fail_indices = indices.to_vec();
        self
    }

    fn failing_releases(mut self) -> Self {
        self.fail_releases = true;
        self
    }
}

impl PointerTransport for FlakyTransport {
    fn send(&mut self, state: PointerState) -> gridpilot::Result<()> {
        let index = self.sent;
        self.sent += 1;

        // The release is the first unpressed state after a press.
        let is_release = self.saw_press && !state.is_pressed();
        if state.is_pressed() {
            self.saw_press = true;
        }

        if self.fail_indices.contains(&index) || (self.fail_releases && is_release) {
            return Err(Error::Transport("injected delivery failure".to_string()));
        }
        self.inner.send(state)
    }
}

/// Transport that raises an interrupt flag as soon as anything is sent.
struct InterruptingTransport {
    inner: RecordingTransport,
    flag: Arc<AtomicBool>,
}

impl PointerTransport for InterruptingTransport {
    fn send(&mut self, state: PointerState) -> gridpilot::Result<()> {
        self.flag.store(true, Ordering::Relaxed);
        self.inner.send(state)
    }
}

fn fast_motion_config() -> MotionConfig {
    MotionConfig {
        max_step: 4096,
        step_delay_ms: 0,
        ..Default::default()
    }
}

fn fast_gesture_config() -> GestureConfig {
    GestureConfig {
        press_settle_ms: 0,
        drag_settle_ms: 0,
        release_settle_ms: 0,
        recalibrate_settle_ms: 0,
        ..Default::default()
    }
}

fn make_sequencer<T: PointerTransport>(transport: T) -> GestureSequencer<T> {
    let motion = MotionController::new(transport, fast_motion_config()).unwrap();
    let mapper = CellMapper::interpolated((0, 0), (3000, 3000), 4, 4).unwrap();
    GestureSequencer::new(motion, mapper, fast_gesture_config()).unwrap()
}

fn make_find(word: &str, cells: &[(usize, usize)]) -> WordFind {
    WordFind {
        word: word.to_string(),
        path: cells.iter().map(|&(r, c)| Cell::new(r, c)).collect(),
    }
}

fn the_word() -> WordFind {
    make_find("the", &[(0, 1), (0, 2), (0, 3)])
}

#[test]
fn test_gesture_shape_for_two_words() {
    let mut sequencer = make_sequencer(RecordingTransport::new());
    let report = sequencer
        .run(&[the_word(), make_find("eat", &[(2, 1), (2, 2), (2, 3)])])
        .unwrap();
    assert_eq!(report.words_traced, 2);

    let states = sequencer.into_motion().into_transport();
    let pressed: Vec<bool> = states.states().iter().map(|s| s.is_pressed()).collect();

    // Two contiguous held spans: press/release per word, nothing held
    // across word boundaries.
    let transitions = pressed.windows(2).filter(|w| w[0] != w[1]).count();
    assert_eq!(transitions, 4);
    assert!(!pressed.last().unwrap());
}

#[test]
fn test_every_intermediate_step_is_sent() {
    let mut sequencer = make_sequencer(RecordingTransport::new());
    sequencer.run(&[the_word()]).unwrap();

    let states = sequencer.into_motion().into_transport();
    // Strictly more states than the 3 path cells: recalibration bursts,
    // hover steps, press, and release all emit.
    assert!(states.len() > 3 + 2);
}

#[test]
fn test_single_dropped_state_does_not_abort() {
    // Index 5 lands inside the initial recalibration burst.
    let transport = FlakyTransport::new().failing_at(&[5]);
    let mut sequencer = make_sequencer(transport);
    let report = sequencer.run(&[the_word()]).unwrap();

    assert_eq!(report.words_traced, 1);
    assert_eq!(report.stats.sends_failed, 1);
    assert!(report.stats.states_sent > report.stats.sends_failed);
}

#[test]
fn test_failed_release_escalates_to_stuck_button() {
    let transport = FlakyTransport::new().failing_releases();
    let mut sequencer = make_sequencer(transport);
    let err = sequencer.run(&[the_word()]).unwrap_err();

    match err {
        Error::StuckButton { word } => assert_eq!(word, "the"),
        other => panic!("expected StuckButton, got {other:?}"),
    }
}

#[test]
fn test_stuck_button_stops_remaining_words() {
    let transport = FlakyTransport::new().failing_releases();
    let mut sequencer = make_sequencer(transport);
    let err = sequencer
        .run(&[the_word(), make_find("eat", &[(2, 1), (2, 2), (2, 3)])])
        .unwrap_err();

    // The first word's release already fails; the second is never traced.
    assert!(matches!(err, Error::StuckButton { word } if word == "the"));
}

#[test]
fn test_recalibration_cadence() {
    let motion = MotionController::new(RecordingTransport::new(), fast_motion_config()).unwrap();
    let mapper = CellMapper::interpolated((0, 0), (3000, 3000), 4, 4).unwrap();
    let config = GestureConfig {
        recalibrate_every: 2,
        ..fast_gesture_config()
    };
    let mut sequencer = GestureSequencer::new(motion, mapper, config).unwrap();

    let words: Vec<WordFind> = (0..4).map(|_| the_word()).collect();
    let report = sequencer.run(&words).unwrap();

    // One initial pass plus one after the 2nd and 4th words.
    assert_eq!(report.stats.recalibrations, 3);
}

#[test]
fn test_interrupt_honored_between_words_only() {
    let flag = Arc::new(AtomicBool::new(false));
    let transport = InterruptingTransport {
        inner: RecordingTransport::new(),
        flag: Arc::clone(&flag),
    };
    let mut sequencer = make_sequencer(transport).with_interrupt(flag);

    let words: Vec<WordFind> = (0..3).map(|_| the_word()).collect();
    let report = sequencer.run(&words).unwrap();

    // The flag raises during the initial recalibration, so the very first
    // word never starts; the run still ends cleanly with no held button.
    assert!(report.interrupted);
    assert_eq!(report.words_traced, 0);
}

#[test]
fn test_interrupt_finishes_current_word() {
    // Raise the flag only once a press has gone out: the word in flight
    // must complete, including its release.
    struct PressTriggered {
        inner: RecordingTransport,
        flag: Arc<AtomicBool>,
    }
    impl PointerTransport for PressTriggered {
        fn send(&mut self, state: PointerState) -> gridpilot::Result<()> {
            if state.is_pressed() {
                self.flag.store(true, Ordering::Relaxed);
            }
            self.inner.send(state)
        }
    }

    let flag = Arc::new(AtomicBool::new(false));
    let transport = PressTriggered {
        inner: RecordingTransport::new(),
        flag: Arc::clone(&flag),
    };
    let mut sequencer = make_sequencer(transport).with_interrupt(flag);

    let words: Vec<WordFind> = (0..3).map(|_| the_word()).collect();
    let report = sequencer.run(&words).unwrap();

    assert!(report.interrupted);
    assert_eq!(report.words_traced, 1);
}
