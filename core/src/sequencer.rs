//! Stateful dispenser of scripted outcomes.
//!
//! # Design
//! The script and its cursor live behind one `Mutex`, so reading the current
//! entry and advancing the cursor happen as a single step. Concurrent callers
//! therefore draw distinct entries in script order; once the script is used up
//! every caller gets the last entry again.
//!
//! The lock is held only for an index bump and never across an `.await`.

use std::sync::{Mutex, PoisonError};

use crate::outcome::{Outcome, Script, Status};

/// Outcome handed out when the script has no entries at all.
pub const EMPTY_SCRIPT_OUTCOME: Outcome = Outcome::Status(Status::OK);

#[derive(Debug)]
struct SequencerState {
    script: Script,
    cursor: usize,
}

/// One draw from the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub outcome: Outcome,
    /// Script index the outcome came from, `None` for an empty script.
    pub index: Option<usize>,
    /// `true` once the draw repeats the final entry instead of consuming one.
    pub exhausted: bool,
}

/// Hands out the entries of a [`Script`] one call at a time.
#[derive(Debug)]
pub struct Sequencer {
    state: Mutex<SequencerState>,
}

impl Sequencer {
    pub fn new(script: Script) -> Self {
        Self {
            state: Mutex::new(SequencerState { script, cursor: 0 }),
        }
    }

    /// Next scripted outcome.
    pub fn next(&self) -> Outcome {
        self.draw().outcome
    }

    /// Like [`Sequencer::next`], but also reports where the outcome came from.
    pub fn draw(&self) -> Draw {
        // The state is an index into an immutable script, so a panic in
        // another holder cannot leave it half-updated.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let len = state.script.len();

        if state.cursor < len {
            let index = state.cursor;
            state.cursor += 1;
            return Draw {
                outcome: state.script.outcomes()[index],
                index: Some(index),
                exhausted: false,
            };
        }

        match state.script.outcomes().last() {
            Some(last) => Draw {
                outcome: *last,
                index: Some(len - 1),
                exhausted: true,
            },
            None => Draw {
                outcome: EMPTY_SCRIPT_OUTCOME,
                index: None,
                exhausted: true,
            },
        }
    }

    /// Number of entries consumed so far. Never exceeds the script length.
    pub fn position(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).cursor
    }

    pub fn script_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .script
            .len()
    }
}
