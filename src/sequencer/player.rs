// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tone sequencer driving a single [`ToneOutput`].
//!
//! `play` blocks the calling thread and cannot be interrupted. `play_async`
//! runs the same steps but suspends cooperatively at every wait, checking the
//! stop flag before and after each suspension.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::scheduler::{articulate, Phase, Schedule, Step};
use super::StopHandle;
use crate::audio::ToneOutput;
use crate::config::PlayerConfig;
use crate::error::{MusicError, Result};
use crate::timing::Tempo;

/// Silent gap at the end of each sounding note
pub const DEFAULT_ARTICULATION: Duration = Duration::from_millis(10);

/// How often a long note checks for a stop request
pub const DEFAULT_STOP_POLL: Duration = Duration::from_millis(10);

/// How a cooperative playback run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every token was played
    Completed,
    /// A stop request ended playback early
    Cancelled,
}

/// Melody player for one tone output device
pub struct Music<T: ToneOutput> {
    output: T,
    tempo: Tempo,
    default_tempo: Tempo,
    articulation: Duration,
    stop_poll: Duration,
    stop: StopHandle,
}

impl<T: ToneOutput> Music<T> {
    /// Create a player at 4 ticks per beat and 120 bpm
    pub fn new(output: T) -> Self {
        Self {
            output,
            tempo: Tempo::default(),
            default_tempo: Tempo::default(),
            articulation: DEFAULT_ARTICULATION,
            stop_poll: DEFAULT_STOP_POLL,
            stop: StopHandle::new(),
        }
    }

    /// Create a player with an explicit starting tempo
    pub fn with_tempo(output: T, ticks: u32, bpm: u32) -> Result<Self> {
        let mut music = Self::new(output);
        music.tempo = Tempo::new(ticks, bpm)?;
        Ok(music)
    }

    /// Create a player from a loaded configuration.
    ///
    /// The configured tempo also becomes the tempo restored by [`Music::reset`].
    pub fn from_config(output: T, config: &PlayerConfig) -> Result<Self> {
        config.tempo.validate()?;
        let mut music = Self::new(output)
            .with_articulation(config.articulation())
            .with_stop_poll(config.stop_poll());
        music.tempo = config.tempo;
        music.default_tempo = config.tempo;
        Ok(music)
    }

    /// Set the silent gap at the end of each sounding note
    pub fn with_articulation(mut self, articulation: Duration) -> Self {
        self.articulation = articulation;
        self
    }

    /// Set how often long notes check for a stop request in `play_async`
    pub fn with_stop_poll(mut self, interval: Duration) -> Self {
        self.stop_poll = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the tempo used by subsequent playback
    pub fn set_tempo(&mut self, ticks: u32, bpm: u32) -> Result<()> {
        self.tempo = Tempo::new(ticks, bpm)?;
        info!("Tempo set to {} ticks/beat at {} bpm", ticks, bpm);
        Ok(())
    }

    /// Current tempo as `(ticks, bpm)`
    pub fn get_tempo(&self) -> (u32, u32) {
        self.tempo.as_tuple()
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn articulation(&self) -> Duration {
        self.articulation
    }

    /// Play a token sequence, blocking until it finishes.
    ///
    /// Octave and duration start from their defaults. Stop requests are not
    /// observed. On error the device is silenced and the remaining tokens are
    /// skipped.
    pub fn play<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.silence()?;
        info!("Playing at {} ticks/beat, {} bpm", self.tempo.ticks, self.tempo.bpm);

        for step in Schedule::new(tokens, self.tempo, self.articulation) {
            let step = match step {
                Ok(step) => step,
                Err(e) => return Err(self.abort(e)),
            };
            log_step(&step);
            for phase in step.phases() {
                if let Err(e) = self.apply(phase) {
                    return Err(self.abort(e));
                }
                std::thread::sleep(phase.wait);
            }
        }

        info!("Playback finished");
        Ok(())
    }

    /// Play a token sequence, suspending at each wait.
    ///
    /// A pending stop request, including one made before this call, ends the
    /// run at the next check. Both completion and cancellation leave the
    /// device silent and the stop flag cleared.
    pub async fn play_async<I, S>(&mut self, tokens: I) -> Result<PlayOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let result = self.run_cancellable(tokens).await;
        self.stop.clear();
        result
    }

    async fn run_cancellable<I, S>(&mut self, tokens: I) -> Result<PlayOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.silence()?;
        info!(
            "Playing cooperatively at {} ticks/beat, {} bpm",
            self.tempo.ticks, self.tempo.bpm
        );

        let mut schedule = Schedule::new(tokens, self.tempo, self.articulation);
        loop {
            if self.stop.is_requested() {
                return self.cancel();
            }
            let step = match schedule.next() {
                None => break,
                Some(Ok(step)) => step,
                Some(Err(e)) => return Err(self.abort(e)),
            };
            log_step(&step);
            for phase in step.phases() {
                if let Err(e) = self.apply(phase) {
                    return Err(self.abort(e));
                }
                if !self.wait_unless_stopped(phase.wait).await {
                    return self.cancel();
                }
            }
        }

        info!("Playback finished");
        Ok(PlayOutcome::Completed)
    }

    /// Sound `frequency` directly, bypassing the note DSL.
    ///
    /// With `Some(duration)` the tone is held for the duration (minus the
    /// articulation gap) and then stopped. With `None` the tone is started and
    /// left sounding. A frequency of zero or less silences the device.
    pub fn pitch(&mut self, frequency: f64, duration: Option<Duration>) -> Result<()> {
        self.tone(frequency)?;
        if let Some(duration) = duration {
            let (sound, gap) = articulate(duration, self.articulation);
            std::thread::sleep(sound);
            self.output.stop()?;
            std::thread::sleep(gap);
        }
        Ok(())
    }

    /// Cooperative form of [`Music::pitch`]. The waits suspend but are not
    /// cut short by stop requests.
    pub async fn pitch_async(&mut self, frequency: f64, duration: Option<Duration>) -> Result<()> {
        self.tone(frequency)?;
        if let Some(duration) = duration {
            let (sound, gap) = articulate(duration, self.articulation);
            tokio::time::sleep(sound).await;
            self.output.stop()?;
            tokio::time::sleep(gap).await;
        }
        Ok(())
    }

    /// Request that a running `play_async` stop.
    ///
    /// Safe to call at any time. Has no effect on `play`.
    pub fn stop(&self) {
        self.stop.request();
    }

    /// Handle for requesting a stop from another task
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Silence the output device now
    pub fn silence(&mut self) -> Result<()> {
        self.output.stop()?;
        Ok(())
    }

    /// Restore the default tempo and clear any pending stop request
    pub fn reset(&mut self) {
        self.tempo = self.default_tempo;
        self.stop.clear();
        debug!("Player reset");
    }

    pub fn output(&self) -> &T {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut T {
        &mut self.output
    }

    pub fn into_output(self) -> T {
        self.output
    }

    fn tone(&mut self, frequency: f64) -> Result<()> {
        if frequency <= 0.0 {
            self.output.stop()?;
        } else {
            self.output.start(frequency)?;
        }
        Ok(())
    }

    fn apply(&mut self, phase: Phase) -> Result<()> {
        match phase.tone {
            Some(frequency) => self.output.start(frequency)?,
            None => self.output.stop()?,
        }
        Ok(())
    }

    /// Wait for `duration`, polling the stop flag. Returns false if a stop
    /// was requested.
    async fn wait_unless_stopped(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.stop.is_requested() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            tokio::time::sleep((deadline - now).min(self.stop_poll)).await;
        }
    }

    fn cancel(&mut self) -> Result<PlayOutcome> {
        self.output.stop()?;
        info!("Playback cancelled");
        Ok(PlayOutcome::Cancelled)
    }

    /// Silence the device after a failure and hand the error back
    fn abort(&mut self, error: MusicError) -> MusicError {
        warn!("Playback aborted: {}", error);
        if let Err(e) = self.output.stop() {
            warn!("Failed to silence output after error: {}", e);
        }
        error
    }
}

fn log_step(step: &Step) {
    match step.event.frequency() {
        Some(frequency) => debug!(
            "{} ({:.2} Hz) for {:.1} ms",
            step.event.pitch,
            frequency,
            step.duration_ms()
        ),
        None => debug!("rest for {:.1} ms", step.duration_ms()),
    }
}
