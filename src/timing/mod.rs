// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides the tempo mapping used to turn note durations
//! in ticks into wall-clock time.

pub mod tempo;

pub use tempo::{Tempo, DEFAULT_BPM, DEFAULT_TICKS};
