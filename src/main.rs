// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chime::audio::{SilentOutput, SquareWaveOutput, ToneOutput};
use chime::{tokenize, Music, PlayOutcome, PlayerConfig};
use tracing::{info, Level};

fn print_usage() {
    println!("CHIME - Note DSL melody player");
    println!();
    println!("Usage: chime [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list                  List built-in and configured melodies");
    println!("  --play <MELODY>         Play a named melody or a token string (\"c4:4 e g\")");
    println!("  --pitch <HZ> <MS>       Sound one pitch for MS milliseconds (-1 holds until Ctrl+C)");
    println!("  --tempo <TICKS> <BPM>   Override the tempo (default 4 ticks per beat, 120 BPM)");
    println!("  --config <FILE>         Load settings and melodies from a YAML or TOML file");
    println!("  --dry-run               Log notes instead of opening the audio device");
    println!("  --verbose               Log every note");
    println!("  --help                  Show this help message");
}

enum Command {
    List,
    Play(String),
    Pitch(f64, i64),
}

struct Options {
    command: Option<Command>,
    tempo: Option<(u32, u32)>,
    config: Option<String>,
    dry_run: bool,
    verbose: bool,
}

fn next_value<'a>(args: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a String> {
    args.next()
        .ok_or_else(|| anyhow!("{} requires a value (see --help)", flag))
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options {
        command: None,
        tempo: None,
        config: None,
        dry_run: false,
        verbose: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list" => options.command = Some(Command::List),
            "--play" => {
                let melody = next_value(&mut iter, "--play")?;
                options.command = Some(Command::Play(melody.clone()));
            }
            "--pitch" => {
                let hz = next_value(&mut iter, "--pitch")?;
                let ms = next_value(&mut iter, "--pitch")?;
                let hz: f64 = hz
                    .parse()
                    .with_context(|| format!("Invalid frequency: {}", hz))?;
                let ms: i64 = ms
                    .parse()
                    .with_context(|| format!("Invalid duration: {}", ms))?;
                options.command = Some(Command::Pitch(hz, ms));
            }
            "--tempo" => {
                let ticks = next_value(&mut iter, "--tempo")?;
                let bpm = next_value(&mut iter, "--tempo")?;
                let ticks: u32 = ticks
                    .parse()
                    .with_context(|| format!("Invalid ticks per beat: {}", ticks))?;
                let bpm: u32 = bpm
                    .parse()
                    .with_context(|| format!("Invalid BPM: {}", bpm))?;
                options.tempo = Some((ticks, bpm));
            }
            "--config" => {
                options.config = Some(next_value(&mut iter, "--config")?.clone());
            }
            "--dry-run" => options.dry_run = true,
            "--verbose" | "-v" => options.verbose = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
    }

    Ok(Some(options))
}

fn open_output(config: &PlayerConfig, dry_run: bool) -> Result<Box<dyn ToneOutput>> {
    if dry_run {
        return Ok(Box::new(SilentOutput::new()));
    }
    let output = SquareWaveOutput::new(config.audio.clone())
        .context("Failed to open audio output (try --dry-run)")?;
    Ok(Box::new(output))
}

fn list_melodies(config: &PlayerConfig) {
    println!("Melodies:");
    for name in config.melody_names() {
        if let Some(tokens) = config.melody(&name) {
            println!("  {:<12} {} notes", name, tokens.len());
        }
    }
}

async fn play(music: &mut Music<Box<dyn ToneOutput>>, config: &PlayerConfig, melody: &str) -> Result<()> {
    let tokens: Vec<&str> = match config.melody(melody) {
        Some(tokens) => tokens,
        None => tokenize(melody).collect(),
    };
    if tokens.is_empty() {
        bail!("Nothing to play");
    }

    let handle = music.stop_handle();
    let stopper = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.request();
        }
    });

    println!("Playing {} notes (press Ctrl+C to stop)...", tokens.len());
    let outcome = music.play_async(tokens).await;
    stopper.abort();

    match outcome? {
        PlayOutcome::Completed => println!("Done."),
        PlayOutcome::Cancelled => println!("Stopped."),
    }
    Ok(())
}

async fn pitch(music: &mut Music<Box<dyn ToneOutput>>, hz: f64, ms: i64) -> Result<()> {
    if ms < 0 {
        music.pitch_async(hz, None).await?;
        println!("Sounding {} Hz (press Ctrl+C to stop)...", hz);
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl+C")?;
        music.silence()?;
    } else {
        let duration = Duration::from_millis(ms as u64);
        music.pitch_async(hz, Some(duration)).await?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        println!("CHIME - Note DSL melody player");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let options = match parse_args(&args)? {
        Some(options) => options,
        None => return Ok(()),
    };

    tracing_subscriber::fmt()
        .with_max_level(if options.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let config = match &options.config {
        Some(path) => chime::config::validate_config(path)?,
        None => PlayerConfig::default(),
    };

    let command = match options.command {
        Some(command) => command,
        None => bail!("No command given (use --play, --pitch or --list)"),
    };

    if let Command::List = command {
        list_melodies(&config);
        return Ok(());
    }

    let output = open_output(&config, options.dry_run)?;
    if options.dry_run {
        info!("Dry run: notes are logged, not played");
    }

    let mut music = Music::from_config(output, &config)?;
    if let Some((ticks, bpm)) = options.tempo {
        music.set_tempo(ticks, bpm)?;
    }

    match command {
        Command::Play(melody) => play(&mut music, &config, &melody).await?,
        Command::Pitch(hz, ms) => pitch(&mut music, hz, ms).await?,
        Command::List => {}
    }

    Ok(())
}
