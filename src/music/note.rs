// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note token resolution.
//!
//! A token has the form `<note>[<accidental>][<octave>][:<duration>]`, for
//! example `c#5:2`, `eb`, `g3` or `r:8`. Octave and duration are optional and
//! carry over from the previous token through [`ParserState`]. Frequencies use
//! equal temperament with A4 = 440 Hz and octaves starting at C.

use std::fmt;

use crate::error::{MusicError, Result};

/// Reference pitch for A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Octave used when a sequence starts
pub const DEFAULT_OCTAVE: i32 = 4;

/// Duration in ticks used when a sequence starts
pub const DEFAULT_DURATION: u32 = 4;

/// Lowest octave a token may name (C-1 is about 8 Hz)
pub const MIN_OCTAVE: i32 = -1;

/// Highest octave a token may name (B10 is about 31.6 kHz)
pub const MAX_OCTAVE: i32 = 10;

/// Note letters (natural pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    /// Semitones above C within the same octave
    pub fn semitones(self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    /// Parse a note letter, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'c' => Some(NoteLetter::C),
            'd' => Some(NoteLetter::D),
            'e' => Some(NoteLetter::E),
            'f' => Some(NoteLetter::F),
            'g' => Some(NoteLetter::G),
            'a' => Some(NoteLetter::A),
            'b' => Some(NoteLetter::B),
            _ => None,
        }
    }
}

impl fmt::Display for NoteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        };
        write!(f, "{}", c)
    }
}

/// Semitone modifier applied to a note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Flat,
    Sharp,
}

impl Accidental {
    /// Semitone offset of this accidental
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
        }
    }
}

/// Frequency in Hz of a note, A4 = 440 Hz
pub fn frequency(letter: NoteLetter, accidental: Accidental, octave: i32) -> f64 {
    let index = (f64::from(octave) - 4.0) * 12.0
        + f64::from(letter.semitones() + accidental.offset() - 9);
    A4_FREQUENCY * 2f64.powf(index / 12.0)
}

/// What a resolved token sounds like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    /// Silence for the event's duration
    Rest,
    /// A tone at the given note
    Note {
        letter: NoteLetter,
        accidental: Accidental,
        octave: i32,
    },
}

impl Pitch {
    /// Frequency in Hz, `None` for a rest
    pub fn frequency(&self) -> Option<f64> {
        match *self {
            Pitch::Rest => None,
            Pitch::Note {
                letter,
                accidental,
                octave,
            } => Some(frequency(letter, accidental, octave)),
        }
    }

    /// Octave of a note, `None` for a rest
    pub fn octave(&self) -> Option<i32> {
        match *self {
            Pitch::Rest => None,
            Pitch::Note { octave, .. } => Some(octave),
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Pitch::Rest)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pitch::Rest => write!(f, "rest"),
            Pitch::Note {
                letter,
                accidental,
                octave,
            } => {
                let symbol = match accidental {
                    Accidental::Natural => "",
                    Accidental::Flat => "b",
                    Accidental::Sharp => "#",
                };
                write!(f, "{}{}{}", letter, symbol, octave)
            }
        }
    }
}

/// A token resolved against the carried parser state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchEvent {
    pub pitch: Pitch,
    pub duration_ticks: u32,
}

impl PitchEvent {
    pub fn frequency(&self) -> Option<f64> {
        self.pitch.frequency()
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_rest()
    }
}

/// Octave and duration carried from one token to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserState {
    pub octave: i32,
    pub duration: u32,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            octave: DEFAULT_OCTAVE,
            duration: DEFAULT_DURATION,
        }
    }
}

/// Resolve one token against `state`, returning the event and the state to
/// use for the next token.
pub fn resolve(token: &str, state: ParserState) -> Result<(PitchEvent, ParserState)> {
    let lower = token.trim().to_ascii_lowercase();
    let (note_part, duration_part) = match lower.split_once(':') {
        Some((note, duration)) => (note, Some(duration)),
        None => (lower.as_str(), None),
    };

    let mut chars = note_part.chars();
    let letter = chars
        .next()
        .ok_or_else(|| MusicError::invalid_token(token, "missing note letter"))?;
    let is_rest = letter == 'r';
    let note_letter = if is_rest {
        None
    } else {
        let parsed = NoteLetter::from_char(letter).ok_or_else(|| {
            MusicError::invalid_token(token, format!("unknown note letter '{}'", letter))
        })?;
        Some(parsed)
    };

    let remainder = chars.as_str();
    let (accidental, octave_part) = match remainder.chars().next() {
        Some('#') => (Accidental::Sharp, &remainder[1..]),
        Some('b') => (Accidental::Flat, &remainder[1..]),
        _ => (Accidental::Natural, remainder),
    };
    if is_rest && accidental != Accidental::Natural {
        return Err(MusicError::invalid_token(token, "a rest cannot have an accidental"));
    }

    let octave = if octave_part.is_empty() {
        None
    } else {
        let parsed = parse_integer(octave_part).ok_or_else(|| {
            MusicError::invalid_token(token, format!("octave '{}' is not a number", octave_part))
        })?;
        if !(i64::from(MIN_OCTAVE)..=i64::from(MAX_OCTAVE)).contains(&parsed) {
            return Err(MusicError::invalid_token(
                token,
                format!("octave {} is outside {}..={}", parsed, MIN_OCTAVE, MAX_OCTAVE),
            ));
        }
        Some(parsed as i32)
    };

    let duration = match duration_part {
        Some(text) => Some(parse_duration(token, text)?),
        None => None,
    };

    let mut next = state;
    if let Some(duration) = duration {
        next.duration = duration;
    }

    let pitch = match note_letter {
        None => Pitch::Rest,
        Some(letter) => {
            if let Some(octave) = octave {
                next.octave = octave;
            }
            Pitch::Note {
                letter,
                accidental,
                octave: next.octave,
            }
        }
    };

    Ok((
        PitchEvent {
            pitch,
            duration_ticks: next.duration,
        },
        next,
    ))
}

fn parse_duration(token: &str, text: &str) -> Result<u32> {
    let value = parse_integer(text).ok_or_else(|| {
        MusicError::invalid_token(token, format!("duration '{}' is not a number", text))
    })?;
    if value <= 0 {
        return Err(MusicError::invalid_token(token, "duration must be positive"));
    }
    u32::try_from(value)
        .map_err(|_| MusicError::invalid_token(token, format!("duration {} is too long", value)))
}

/// Digits with an optional leading minus. No `+` and no whitespace.
fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Resolve a whole sequence starting from the default state
pub fn resolve_all<I, S>(tokens: I) -> Result<Vec<PitchEvent>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ParserState::default();
    let mut events = Vec::new();
    for token in tokens {
        let (event, next) = resolve(token.as_ref(), state)?;
        events.push(event);
        state = next;
    }
    Ok(events)
}

/// Split a melody written as one string into tokens.
///
/// Tokens may be separated by whitespace, commas, or both.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}
