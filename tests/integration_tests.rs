// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for CHIME
//!
//! These tests drive the public API end to end: tokens are resolved,
//! scaled by tempo and played on a recording tone output.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chime::music::resolve_all;
use chime::{
    resolve, tokenize, Melody, Music, MusicError, ParserState, PlayOutcome, PlayerConfig,
    ToneError, ToneOutput, DADADADUM, JUMP_UP, NYAN, POWER_UP,
};
use tokio::time::Instant;

/// Mock tone output that records starts, stops and the time of each call
#[derive(Clone, Default)]
struct RecordingOutput {
    log: Arc<Mutex<Vec<(Instant, Option<f64>)>>>,
}

impl RecordingOutput {
    fn log(&self) -> Vec<(Instant, Option<f64>)> {
        self.log.lock().unwrap().clone()
    }

    fn frequencies(&self) -> Vec<f64> {
        self.log().into_iter().filter_map(|(_, f)| f).collect()
    }

    fn is_silent(&self) -> bool {
        !matches!(self.log().last(), Some((_, Some(_))))
    }
}

impl ToneOutput for RecordingOutput {
    fn start(&mut self, frequency_hz: f64) -> Result<(), ToneError> {
        self.log
            .lock()
            .unwrap()
            .push((Instant::now(), Some(frequency_hz)));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ToneError> {
        self.log.lock().unwrap().push((Instant::now(), None));
        Ok(())
    }
}

fn frequency_of(token: &str) -> f64 {
    let (event, _) = resolve(token, ParserState::default()).unwrap();
    event.frequency().unwrap()
}

#[test]
fn test_reference_pitch_and_octaves() {
    assert_eq!(frequency_of("a4"), 440.0);
    assert_eq!(frequency_of("a5"), 2.0 * frequency_of("a4"));
    assert!((frequency_of("c#4") - frequency_of("db4")).abs() < 1e-9);
}

#[test]
fn test_carry_over_across_sequence() {
    let events = resolve_all(["c1:4", "e", "g", "c2:4"]).unwrap();
    let durations: Vec<u32> = events.iter().map(|e| e.duration_ticks).collect();
    let octaves: Vec<Option<i32>> = events.iter().map(|e| e.pitch.octave()).collect();
    assert_eq!(durations, vec![4, 4, 4, 4]);
    assert_eq!(octaves, vec![Some(1), Some(1), Some(1), Some(2)]);

    let events = resolve_all(["c5", "r:2", "e"]).unwrap();
    assert_eq!(events[2].pitch.octave(), Some(5));
}

#[test]
fn test_tempo_validation_and_round_trip() {
    let mut music = Music::new(RecordingOutput::default());
    assert!(matches!(
        music.set_tempo(0, 120),
        Err(MusicError::InvalidTempo { ticks: 0, bpm: 120 })
    ));
    assert!(matches!(
        music.set_tempo(4, 0),
        Err(MusicError::InvalidTempo { .. })
    ));

    music.set_tempo(3, 75).unwrap();
    assert_eq!(music.get_tempo(), (3, 75));
    assert_eq!(music.tempo().ms_per_tick(), 60_000.0 / 225.0);
}

#[test]
fn test_invalid_token_leaves_device_silent() {
    let output = RecordingOutput::default();
    let mut music = Music::new(output.clone());

    let err = music.play(["h4"]).unwrap_err();
    assert!(matches!(err, MusicError::InvalidToken { ref token, .. } if token == "h4"));
    assert!(output.frequencies().is_empty());
    assert!(output.is_silent());
}

#[test]
fn test_blocking_playback_of_builtin() {
    let output = RecordingOutput::default();
    let mut music = Music::with_tempo(output.clone(), 1, 60_000)
        .unwrap()
        .with_articulation(Duration::ZERO);

    music.play(JUMP_UP).unwrap();

    let expected: Vec<f64> = resolve_all(JUMP_UP)
        .unwrap()
        .iter()
        .filter_map(|e| e.frequency())
        .collect();
    assert_eq!(output.frequencies(), expected);
    assert!(output.is_silent());
}

#[test]
fn test_pitch_indefinite_then_play_silences_first() {
    let output = RecordingOutput::default();
    let mut music = Music::with_tempo(output.clone(), 1, 60_000)
        .unwrap()
        .with_articulation(Duration::ZERO);

    music.pitch(440.0, None).unwrap();
    assert!(!output.is_silent());

    music.play(["c4:1"]).unwrap();
    let log = output.log();
    assert_eq!(log[0].1, Some(440.0));
    assert_eq!(log[1].1, None);
    assert!(output.is_silent());
}

#[test]
fn test_single_string_melody() {
    let tokens: Vec<&str> = tokenize("g4:1 c5, e g:2").collect();
    assert_eq!(tokens, POWER_UP[..4].to_vec());
}

#[test]
fn test_every_builtin_is_named_and_valid() {
    assert_eq!(Melody::ALL.len(), 21);
    for melody in Melody::ALL {
        assert!(resolve_all(melody.tokens()).is_ok(), "{}", melody);
    }
    assert_eq!(Melody::from_name("nyan").unwrap().tokens(), NYAN);
}

#[tokio::test(start_paused = true)]
async fn test_default_tempo_note_lengths() {
    let output = RecordingOutput::default();
    let mut music = Music::new(output.clone()).with_articulation(Duration::ZERO);

    let t0 = Instant::now();
    let outcome = music.play_async(["c4:4", "r:2", "e:1"]).await.unwrap();
    assert_eq!(outcome, PlayOutcome::Completed);

    // 500 ms + 250 ms + 125 ms
    let elapsed = t0.elapsed();
    assert!(elapsed >= Duration::from_millis(875));
    assert!(elapsed <= Duration::from_millis(877));

    let e_start = output
        .log()
        .into_iter()
        .find(|(_, f)| matches!(f, Some(f) if *f > 300.0))
        .unwrap();
    assert!(e_start.0 - t0 >= Duration::from_millis(750));
    assert!(e_start.0 - t0 <= Duration::from_millis(751));
}

#[tokio::test(start_paused = true)]
async fn test_stop_requested_before_run() {
    let output = RecordingOutput::default();
    let mut music = Music::new(output.clone());

    music.stop();
    let outcome = music.play_async(DADADADUM).await.unwrap();
    assert_eq!(outcome, PlayOutcome::Cancelled);
    assert!(output.frequencies().is_empty());

    // The cancelled run consumed the request
    let outcome = music.play_async(["c5:1"]).await.unwrap();
    assert_eq!(outcome, PlayOutcome::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_stop_from_another_task() {
    let output = RecordingOutput::default();
    let mut music = Music::new(output.clone());
    let handle = music.stop_handle();

    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        handle.request();
    });

    let t0 = Instant::now();
    let outcome = music.play_async(NYAN).await.unwrap();
    stopper.await.unwrap();

    assert_eq!(outcome, PlayOutcome::Cancelled);
    assert!(output.is_silent());
    assert!(output.frequencies().len() < NYAN.len());
    assert!(t0.elapsed() <= Duration::from_millis(1200) + Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn test_tempo_change_applies_to_next_run() {
    let output = RecordingOutput::default();
    let mut music = Music::new(output).with_articulation(Duration::ZERO);

    let t0 = Instant::now();
    music.play_async(["a4:4"]).await.unwrap();
    let first = t0.elapsed();

    music.set_tempo(4, 240).unwrap();
    let t1 = Instant::now();
    music.play_async(["a4:4"]).await.unwrap();
    let second = t1.elapsed();

    assert!(first >= Duration::from_millis(500));
    assert!(second >= Duration::from_millis(250));
    assert!(second < Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_config_driven_player() {
    let yaml = r#"
tempo: { ticks: 4, bpm: 60 }
articulation_ms: 0
melodies:
  knock: ["c4:2", "r", "c"]
"#;
    let config = PlayerConfig::from_yaml(yaml).unwrap();
    config.validate().unwrap();

    let output = RecordingOutput::default();
    let mut music = Music::from_config(output.clone(), &config).unwrap();

    let t0 = Instant::now();
    let tokens = config.melody("knock").unwrap();
    music.play_async(tokens).await.unwrap();

    // Three 2-tick slots at 250 ms per tick
    assert!(t0.elapsed() >= Duration::from_millis(1500));
    assert_eq!(output.frequencies().len(), 2);
}
