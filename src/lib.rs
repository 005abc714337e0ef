// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! CHIME - note-DSL melody player for a single square-wave tone output.
//!
//! Melodies are written as lists of note tokens such as `"c4:4"`, `"eb"` or
//! `"r:2"`. The [`Music`] player resolves them to frequencies, scales their
//! tick durations by the current tempo, and drives a [`ToneOutput`] either
//! blocking or as a cancellable async task.

pub mod audio;
pub mod config;
pub mod error;
pub mod music;
pub mod sequencer;
pub mod timing;

pub use audio::{SilentOutput, SquareWaveOutput, ToneError, ToneOutput};
pub use config::PlayerConfig;
pub use error::{MusicError, Result};
pub use music::melodies::{
    BADDY, BA_DING, BIRTHDAY, BLUES, CHASE, DADADADUM, ENTERTAINER, FUNERAL, FUNK, JUMP_DOWN,
    JUMP_UP, NYAN, ODE, POWER_DOWN, POWER_UP, PRELUDE, PUNCHLINE, PYTHON, RINGTONE, WAWAWAWAA,
    WEDDING,
};
pub use music::{resolve, tokenize, Melody, ParserState, Pitch, PitchEvent};
pub use sequencer::{Music, PlayOutcome, StopHandle};
pub use timing::Tempo;
