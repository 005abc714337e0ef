// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio output via cpal.
//!
//! Opens the default output device and drives it from a render callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::ToneError;

/// Audio output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Buffer size in frames
    pub buffer_size: u32,
    /// Number of output channels
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            buffer_size: 512,
            channels: 1,
        }
    }
}

impl AudioConfig {
    /// Check the configuration before opening a stream
    pub fn validate(&self) -> Result<(), ToneError> {
        if self.sample_rate == 0 {
            return Err(ToneError::InvalidConfig("sample_rate must be positive".into()));
        }
        if self.channels == 0 {
            return Err(ToneError::InvalidConfig("channels must be positive".into()));
        }
        if !(64..=4096).contains(&self.buffer_size) {
            return Err(ToneError::InvalidConfig(format!(
                "buffer_size {} is outside 64..=4096",
                self.buffer_size
            )));
        }
        Ok(())
    }

    /// Buffer latency in milliseconds
    pub fn latency_ms(&self) -> f64 {
        (self.buffer_size as f64 / self.sample_rate as f64) * 1000.0
    }
}

/// Audio output stream
pub struct AudioOutput {
    /// cpal stream
    _stream: Stream,
    /// Output device
    _device: Device,
    /// Current configuration
    config: AudioConfig,
}

impl AudioOutput {
    /// Create a new audio output with callback.
    ///
    /// The callback receives an interleaved buffer and the channel count.
    pub fn new<F>(config: AudioConfig, mut callback: F) -> Result<Self, ToneError>
    where
        F: FnMut(&mut [f32], usize) + Send + 'static,
    {
        config.validate()?;

        let host = cpal::default_host();

        let device = host.default_output_device().ok_or(ToneError::NoDevice)?;

        let stream_config = StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
        };

        let channels = config.channels as usize;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    data.fill(0.0);
                    callback(data, channels);
                },
                move |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| ToneError::StreamFailed(format!("Failed to build stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| ToneError::StreamFailed(format!("Failed to start stream: {}", e)))?;

        Ok(Self {
            _stream: stream,
            _device: device,
            config,
        })
    }

    /// Get current configuration
    pub fn config(&self) -> &AudioConfig {
        &self.config
    }
}

/// List available audio output devices
pub fn list_devices() -> Vec<String> {
    let host = cpal::default_host();
    host.output_devices()
        .map(|devices| devices.filter_map(|d| d.name().ok()).collect())
        .unwrap_or_default()
}

/// Get default device name
pub fn default_device_name() -> Option<String> {
    let host = cpal::default_host();
    host.default_output_device().and_then(|d| d.name().ok())
}
