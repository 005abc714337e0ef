// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Event generation shared by blocking and cooperative playback.
//!
//! A [`Schedule`] resolves tokens lazily, threading the parser state from one
//! token to the next, and converts each event into wall-clock [`Phase`]s at the
//! tempo captured when the schedule was created. Playback only has to apply
//! each phase to the device and wait.

use std::time::Duration;

use crate::error::Result;
use crate::music::{resolve, ParserState, PitchEvent};
use crate::timing::Tempo;

/// Split a note slot into the time the tone sounds and the silent gap after
/// it. A slot shorter than the gap sounds for the gap length.
pub fn articulate(duration: Duration, articulation: Duration) -> (Duration, Duration) {
    let sound = duration.checked_sub(articulation).unwrap_or(articulation);
    (sound, articulation)
}

/// One device state held for a fixed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    /// Frequency to sound, `None` for silence
    pub tone: Option<f64>,
    /// How long to hold it
    pub wait: Duration,
}

/// A resolved event scaled to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub event: PitchEvent,
    /// Full length of the note slot
    pub duration: Duration,
    /// Silent gap at the end of a sounding note
    pub articulation: Duration,
}

impl Step {
    pub fn new(event: PitchEvent, tempo: &Tempo, articulation: Duration) -> Self {
        Self {
            event,
            duration: tempo.ticks_to_duration(event.duration_ticks),
            articulation,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    /// Device states to apply, in order
    pub fn phases(&self) -> Vec<Phase> {
        match self.event.frequency() {
            None => vec![Phase {
                tone: None,
                wait: self.duration,
            }],
            Some(frequency) => {
                let (sound, gap) = articulate(self.duration, self.articulation);
                // The trailing phase always runs so the tone is stopped even
                // without an articulation gap.
                vec![
                    Phase {
                        tone: Some(frequency),
                        wait: sound,
                    },
                    Phase {
                        tone: None,
                        wait: gap,
                    },
                ]
            }
        }
    }
}

/// Lazily resolved steps of a token sequence.
///
/// Resolution starts from the default parser state. The schedule yields the
/// first token error and then ends.
pub struct Schedule<I> {
    tokens: I,
    state: ParserState,
    tempo: Tempo,
    articulation: Duration,
    failed: bool,
}

impl<I> Schedule<I> {
    pub fn new<T>(tokens: T, tempo: Tempo, articulation: Duration) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            tokens: tokens.into_iter(),
            state: ParserState::default(),
            tempo,
            articulation,
            failed: false,
        }
    }

    /// Parser state that the next token will be resolved against
    pub fn state(&self) -> ParserState {
        self.state
    }
}

impl<I, S> Iterator for Schedule<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.tokens.next()?;
        match resolve(token.as_ref(), self.state) {
            Ok((event, next)) => {
                self.state = next;
                Some(Ok(Step::new(event, &self.tempo, self.articulation)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
