// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo mapping from ticks to wall-clock time.
//!
//! A beat is divided into `ticks_per_beat` ticks and the tempo is expressed in
//! beats per minute, so one tick lasts `60000 / (bpm * ticks_per_beat)` ms.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MusicError, Result};

/// Default number of ticks in a beat
pub const DEFAULT_TICKS: u32 = 4;

/// Default beats per minute
pub const DEFAULT_BPM: u32 = 120;

/// Ticks-per-beat and beats-per-minute pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tempo {
    /// Number of ticks that make up one beat
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    /// Beats per minute
    #[serde(default = "default_bpm")]
    pub bpm: u32,
}

fn default_ticks() -> u32 {
    DEFAULT_TICKS
}
fn default_bpm() -> u32 {
    DEFAULT_BPM
}

impl Tempo {
    /// Create a validated tempo. Both values must be at least 1.
    pub fn new(ticks: u32, bpm: u32) -> Result<Self> {
        let tempo = Self { ticks, bpm };
        tempo.validate()?;
        Ok(tempo)
    }

    /// Check that both fields are at least 1
    pub fn validate(&self) -> Result<()> {
        if self.ticks == 0 || self.bpm == 0 {
            return Err(MusicError::InvalidTempo {
                ticks: self.ticks,
                bpm: self.bpm,
            });
        }
        Ok(())
    }

    /// Tempo as a `(ticks, bpm)` tuple
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.ticks, self.bpm)
    }

    /// Milliseconds in one tick
    pub fn ms_per_tick(&self) -> f64 {
        60_000.0 / (self.bpm as f64 * self.ticks as f64)
    }

    /// Convert a tick count to milliseconds
    pub fn ticks_to_ms(&self, ticks: u32) -> f64 {
        ticks as f64 * self.ms_per_tick()
    }

    /// Convert a tick count to a `Duration`
    pub fn ticks_to_duration(&self, ticks: u32) -> Duration {
        Duration::from_secs_f64(self.ticks_to_ms(ticks) / 1000.0)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            bpm: DEFAULT_BPM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_defaults() {
        let tempo = Tempo::default();
        assert_eq!(tempo.as_tuple(), (4, 120));
        assert_eq!(tempo.ms_per_tick(), 125.0);
    }

    #[test]
    fn test_quarter_note_at_default_tempo() {
        let tempo = Tempo::default();
        assert_eq!(tempo.ticks_to_ms(4), 500.0);
        assert_eq!(tempo.ticks_to_duration(4), Duration::from_millis(500));
    }

    #[test]
    fn test_tempo_validation() {
        assert!(Tempo::new(0, 120).unwrap_err().is_invalid_tempo());
        assert!(Tempo::new(4, 0).unwrap_err().is_invalid_tempo());
        assert_eq!(Tempo::new(1, 1).unwrap().as_tuple(), (1, 1));
    }

    #[test]
    fn test_fractional_tick_length() {
        // 60000 / (90 * 4) = 166.666... ms
        let tempo = Tempo::new(4, 90).unwrap();
        assert!((tempo.ms_per_tick() - 166.6667).abs() < 0.001);
    }

    #[test]
    fn test_tempo_deserialize_defaults() {
        let tempo: Tempo = serde_yaml::from_str("bpm: 200").unwrap();
        assert_eq!(tempo.as_tuple(), (4, 200));
    }
}
