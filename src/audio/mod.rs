// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tone output devices.
//!
//! This module provides:
//! - The `ToneOutput` trait driven by the sequencer
//! - A square-wave output rendered through cpal
//! - A silent output that only logs what it would play

pub mod output;

pub use output::{default_device_name, list_devices, AudioConfig, AudioOutput};

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

/// Peak level of the generated square wave
const AMPLITUDE: f32 = 0.25;

/// Tone output error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToneError {
    /// Failed to build or start the audio stream
    #[error("Audio stream failed: {0}")]
    StreamFailed(String),
    /// No audio device available
    #[error("No audio device available")]
    NoDevice,
    /// Invalid configuration
    #[error("Invalid audio configuration: {0}")]
    InvalidConfig(String),
}

/// A device that can sound one square-wave tone at a time.
///
/// `stop` must succeed when the device is already silent.
pub trait ToneOutput {
    /// Start (or retune) the tone at `frequency_hz`
    fn start(&mut self, frequency_hz: f64) -> Result<(), ToneError>;

    /// Silence the output
    fn stop(&mut self) -> Result<(), ToneError>;
}

impl<T: ToneOutput + ?Sized> ToneOutput for Box<T> {
    fn start(&mut self, frequency_hz: f64) -> Result<(), ToneError> {
        (**self).start(frequency_hz)
    }

    fn stop(&mut self) -> Result<(), ToneError> {
        (**self).stop()
    }
}

/// Frequency and gate shared with the audio callback
#[derive(Debug, Default)]
struct SquareWaveState {
    frequency_bits: AtomicU64,
    gate: AtomicBool,
}

impl SquareWaveState {
    fn frequency(&self) -> f64 {
        f64::from_bits(self.frequency_bits.load(Ordering::Relaxed))
    }
}

/// Square-wave tone output on the default audio device
pub struct SquareWaveOutput {
    state: Arc<SquareWaveState>,
    _output: AudioOutput,
}

impl SquareWaveOutput {
    /// Open the default output device
    pub fn new(config: AudioConfig) -> Result<Self, ToneError> {
        let state = Arc::new(SquareWaveState::default());
        let sample_rate = config.sample_rate as f64;

        let shared = Arc::clone(&state);
        let mut phase = 0.0f64;
        let output = AudioOutput::new(config, move |buffer, channels| {
            if !shared.gate.load(Ordering::Relaxed) {
                return;
            }
            let step = shared.frequency() / sample_rate;
            for frame in buffer.chunks_mut(channels) {
                let sample = if phase < 0.5 { AMPLITUDE } else { -AMPLITUDE };
                frame.fill(sample);
                phase = (phase + step).fract();
            }
        })?;

        info!(
            "Opened square-wave output on {}",
            default_device_name().unwrap_or_else(|| "default device".to_string())
        );

        Ok(Self {
            state,
            _output: output,
        })
    }

    /// Whether a tone is currently sounding
    pub fn is_sounding(&self) -> bool {
        self.state.gate.load(Ordering::Relaxed)
    }
}

impl ToneOutput for SquareWaveOutput {
    fn start(&mut self, frequency_hz: f64) -> Result<(), ToneError> {
        self.state
            .frequency_bits
            .store(frequency_hz.to_bits(), Ordering::Relaxed);
        self.state.gate.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ToneError> {
        self.state.gate.store(false, Ordering::Relaxed);
        Ok(())
    }
}

/// Output that plays nothing and logs each change at info level instead
#[derive(Debug, Default)]
pub struct SilentOutput {
    frequency: Option<f64>,
}

impl SilentOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency that would currently be sounding
    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }
}

impl ToneOutput for SilentOutput {
    fn start(&mut self, frequency_hz: f64) -> Result<(), ToneError> {
        info!("tone on: {:.2} Hz", frequency_hz);
        self.frequency = Some(frequency_hz);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ToneError> {
        if self.frequency.take().is_some() {
            info!("tone off");
        }
        Ok(())
    }
}
