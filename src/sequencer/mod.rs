// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequencer core for playing note sequences on a tone output.
//!
//! This module provides:
//! - Lazy conversion of tokens into timed device phases
//! - The `Music` player with blocking and cooperative playback
//! - A shareable stop handle for cancelling cooperative playback

pub mod player;
pub mod scheduler;

pub use player::{Music, PlayOutcome, DEFAULT_ARTICULATION, DEFAULT_STOP_POLL};
pub use scheduler::{articulate, Phase, Schedule, Step};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stop request flag shared between a player and other tasks
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the running cooperative playback to stop
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Check whether a stop is pending
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    pub(crate) fn clear(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_handle_shared_between_clones() {
        let handle = StopHandle::new();
        let other = handle.clone();
        assert!(!handle.is_requested());

        other.request();
        assert!(handle.is_requested());

        handle.clear();
        assert!(!other.is_requested());
    }
}
