// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Built-in melodies.
//!
//! Each melody is a list of note tokens played exactly like a user-supplied
//! sequence.

use std::fmt;

pub const DADADADUM: &[&str] = &["r4:2", "g", "g", "g", "eb:8", "r:2", "f", "f", "f", "d:8"];

pub const ENTERTAINER: &[&str] = &[
    "d4:1", "d#", "e", "c5:2", "e4:1", "c5:2", "e4:1", "c5:3", "c:1", "d", "d#", "e", "c", "d",
    "e:2", "b4:1", "d5:2", "c:4",
];

pub const PRELUDE: &[&str] = &[
    "c4:1", "e", "g", "c5", "e", "g4", "c5", "e", "c4", "e", "g", "c5", "e", "g4", "c5", "e",
    "c4", "d", "g", "d5", "f", "g4", "d5", "f", "c4", "d", "g", "d5", "f", "g4", "d5", "f", "b3",
    "d4", "g", "d5", "f", "g4", "d5", "f", "b3", "d4", "g", "d5", "f", "g4", "d5", "f", "c4",
    "e", "g", "c5", "e", "g4", "c5", "e", "c4", "e", "g", "c5", "e", "g4", "c5", "e",
];

pub const ODE: &[&str] = &[
    "e4", "e", "f", "g", "g", "f", "e", "d", "c", "c", "d", "e", "e:6", "d:2", "d:8", "e:4", "e",
    "f", "g", "g", "f", "e", "d", "c", "c", "d", "e", "d:6", "c:2", "c:8",
];

pub const NYAN: &[&str] = &[
    "f#5:2", "g#", "c#:1", "d#:2", "b4:1", "d5:1", "c#", "b4:2", "b", "c#5", "d", "d:1", "c#",
    "b4:1", "c#5:1", "d#", "f#", "g#", "d#", "f#", "c#", "d", "b4", "c#5", "b4", "d#5:2", "f#",
    "g#:1", "d#", "f#", "c#", "d#", "b4", "d5", "d#", "d", "c#", "b4", "c#5", "d:2", "b4:1",
    "c#5", "d#", "f#", "c#", "d", "c#", "b4", "c#5:2", "b4", "c#5", "b4", "f#:1", "g#", "b:2",
    "f#:1", "g#", "b", "c#5", "d#", "b4", "e5", "d#", "e", "f#", "b4:2", "b", "f#:1", "g#", "b",
    "f#", "e5", "d#", "c#", "b4", "f#", "d#", "e", "f#", "b:2", "f#:1", "g#", "b:2", "f#:1",
    "g#", "b", "b", "c#5", "d#", "b4", "f#", "g#", "f#", "b:2", "b:1", "a#", "b", "f#", "g#",
    "b", "e5", "d#", "e", "f#", "b4:2", "c#5",
];

pub const RINGTONE: &[&str] = &[
    "c4:1", "d", "e:2", "g", "d:1", "e", "f:2", "a", "e:1", "f", "g:2", "b", "c5:4",
];

pub const FUNK: &[&str] = &[
    "c2:2", "c", "d#", "c:1", "f:2", "c:1", "f:2", "f#", "g", "c", "c", "g", "c:1", "f#:2", "c:1",
    "f#:2", "f", "d#",
];

pub const BLUES: &[&str] = &[
    "c2:2", "e", "g", "a", "a#", "a", "g", "e", "c2:2", "e", "g", "a", "a#", "a", "g", "e", "f",
    "a", "c3", "d", "d#", "d", "c", "a2", "c2:2", "e", "g", "a", "a#", "a", "g", "e", "g", "b",
    "d3", "f", "f2", "a", "c3", "d#", "c2:2", "e", "g", "e", "g", "f", "e", "d",
];

pub const BIRTHDAY: &[&str] = &[
    "c4:3", "c:1", "d:4", "c:4", "f", "e:8", "c:3", "c:1", "d:4", "c:4", "g", "f:8", "c:3",
    "c:1", "c5:4", "a4", "f", "e", "d", "a#:3", "a#:1", "a:4", "f", "g", "f:8",
];

pub const WEDDING: &[&str] = &[
    "c4:4", "f:3", "f:1", "f:8", "c:4", "g:3", "e:1", "f:8", "c:4", "f:3", "a:1", "c5:4",
    "a4:3", "f:1", "f:4", "e:3", "f:1", "g:8",
];

pub const FUNERAL: &[&str] = &[
    "c3:4", "c:3", "c:1", "c:4", "d#:3", "d:1", "d:3", "c:1", "c:3", "b2:1", "c3:4",
];

pub const PUNCHLINE: &[&str] = &["c4:3", "g3:1", "f#", "g", "g#:3", "g", "r", "b", "c4"];

pub const PYTHON: &[&str] = &[
    "d5:1", "b4", "r", "b", "b", "a#", "b", "g5", "r", "d", "d", "r", "b4", "c5", "r", "c", "c",
    "r", "d", "e:5", "c:1", "a4", "r", "a", "a", "g#", "a", "f#5", "r", "e", "e", "r", "c", "b4",
    "r", "b", "b", "r", "c5", "d:5", "d:1", "b4", "r", "b", "b", "a#", "b", "b5", "r", "g", "g",
    "r", "d", "c#", "r", "a", "a", "r", "a", "a:5", "g:1", "f#:2", "a:1", "a", "g#", "a", "e:2",
    "a:1", "a", "g#", "a", "d", "r", "c#", "d", "r", "c#", "d:2", "r:3",
];

pub const BADDY: &[&str] = &["c3:3", "r", "d:2", "d#", "r", "c", "r", "f#:8"];

pub const CHASE: &[&str] = &[
    "a4:1", "b", "c5", "b4", "a:2", "r", "a:1", "b", "c5", "b4", "a:2", "r", "a:2", "e5", "d#",
    "e", "f", "e", "d#", "e", "b4:1", "c5", "d", "c", "b4:2", "r", "b:1", "c5", "d", "c", "b4:2",
    "r", "b:2", "e5", "d#", "e", "f", "e", "d#", "e",
];

pub const BA_DING: &[&str] = &["b5:1", "e6:3"];

pub const WAWAWAWAA: &[&str] = &["e3:3", "r:1", "d#:3", "r:1", "d:4", "r:1", "c#:8"];

pub const JUMP_UP: &[&str] = &["c5:1", "d", "e", "f", "g"];

pub const JUMP_DOWN: &[&str] = &["g5:1", "f", "e", "d", "c"];

pub const POWER_UP: &[&str] = &["g4:1", "c5", "e", "g:2", "e:1", "g:3"];

pub const POWER_DOWN: &[&str] = &["g5:1", "d#", "c", "g4:2", "b:1", "c5:3"];

/// Names for the built-in melodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Melody {
    Dadadadum,
    Entertainer,
    Prelude,
    Ode,
    Nyan,
    Ringtone,
    Funk,
    Blues,
    Birthday,
    Wedding,
    Funeral,
    Punchline,
    Python,
    Baddy,
    Chase,
    BaDing,
    Wawawawaa,
    JumpUp,
    JumpDown,
    PowerUp,
    PowerDown,
}

impl Melody {
    /// All built-in melodies
    pub const ALL: [Melody; 21] = [
        Melody::Dadadadum,
        Melody::Entertainer,
        Melody::Prelude,
        Melody::Ode,
        Melody::Nyan,
        Melody::Ringtone,
        Melody::Funk,
        Melody::Blues,
        Melody::Birthday,
        Melody::Wedding,
        Melody::Funeral,
        Melody::Punchline,
        Melody::Python,
        Melody::Baddy,
        Melody::Chase,
        Melody::BaDing,
        Melody::Wawawawaa,
        Melody::JumpUp,
        Melody::JumpDown,
        Melody::PowerUp,
        Melody::PowerDown,
    ];

    /// Constant name of the melody, e.g. `"JUMP_UP"`
    pub fn name(self) -> &'static str {
        match self {
            Melody::Dadadadum => "DADADADUM",
            Melody::Entertainer => "ENTERTAINER",
            Melody::Prelude => "PRELUDE",
            Melody::Ode => "ODE",
            Melody::Nyan => "NYAN",
            Melody::Ringtone => "RINGTONE",
            Melody::Funk => "FUNK",
            Melody::Blues => "BLUES",
            Melody::Birthday => "BIRTHDAY",
            Melody::Wedding => "WEDDING",
            Melody::Funeral => "FUNERAL",
            Melody::Punchline => "PUNCHLINE",
            Melody::Python => "PYTHON",
            Melody::Baddy => "BADDY",
            Melody::Chase => "CHASE",
            Melody::BaDing => "BA_DING",
            Melody::Wawawawaa => "WAWAWAWAA",
            Melody::JumpUp => "JUMP_UP",
            Melody::JumpDown => "JUMP_DOWN",
            Melody::PowerUp => "POWER_UP",
            Melody::PowerDown => "POWER_DOWN",
        }
    }

    /// Note tokens of the melody
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            Melody::Dadadadum => DADADADUM,
            Melody::Entertainer => ENTERTAINER,
            Melody::Prelude => PRELUDE,
            Melody::Ode => ODE,
            Melody::Nyan => NYAN,
            Melody::Ringtone => RINGTONE,
            Melody::Funk => FUNK,
            Melody::Blues => BLUES,
            Melody::Birthday => BIRTHDAY,
            Melody::Wedding => WEDDING,
            Melody::Funeral => FUNERAL,
            Melody::Punchline => PUNCHLINE,
            Melody::Python => PYTHON,
            Melody::Baddy => BADDY,
            Melody::Chase => CHASE,
            Melody::BaDing => BA_DING,
            Melody::Wawawawaa => WAWAWAWAA,
            Melody::JumpUp => JUMP_UP,
            Melody::JumpDown => JUMP_DOWN,
            Melody::PowerUp => POWER_UP,
            Melody::PowerDown => POWER_DOWN,
        }
    }

    /// Look a melody up by name, ignoring case and `-`/`_`/space separators
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Melody::ALL
            .into_iter()
            .find(|melody| normalize(melody.name()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '_'], "")
}

impl fmt::Display for Melody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::note::resolve_all;

    #[test]
    fn test_every_builtin_resolves() {
        for melody in Melody::ALL {
            let events = resolve_all(melody.tokens())
                .unwrap_or_else(|e| panic!("{} failed to resolve: {}", melody, e));
            assert_eq!(events.len(), melody.tokens().len());
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Melody::from_name("NYAN"), Some(Melody::Nyan));
        assert_eq!(Melody::from_name("jump-up"), Some(Melody::JumpUp));
        assert_eq!(Melody::from_name("ba ding"), Some(Melody::BaDing));
        assert_eq!(Melody::from_name("nope"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for melody in Melody::ALL {
            assert_eq!(Melody::from_name(melody.name()), Some(melody));
        }
    }

    #[test]
    fn test_dadadadum_starts_with_rest() {
        let events = resolve_all(DADADADUM).unwrap();
        assert!(events[0].is_rest());
        assert_eq!(events[0].duration_ticks, 2);
        assert_eq!(events[4].duration_ticks, 8);
    }
}
