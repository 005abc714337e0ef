// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note DSL for the tone sequencer.
//!
//! This module provides the token resolver that turns note strings into
//! pitch events, and the table of built-in melodies.

pub mod melodies;
pub mod note;

pub use melodies::Melody;
pub use note::{
    frequency, resolve, resolve_all, tokenize, Accidental, NoteLetter, ParserState, Pitch,
    PitchEvent,
};
