// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the player.
//!
//! A configuration file sets the starting tempo, note articulation, stop
//! polling, audio device settings and any user melodies. Files ending in
//! `.toml` are read as TOML, everything else as YAML.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::audio::AudioConfig;
use crate::music::{resolve_all, Melody};
use crate::sequencer::{DEFAULT_ARTICULATION, DEFAULT_STOP_POLL};
use crate::timing::Tempo;

/// Root player configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Starting tempo, also restored on reset
    #[serde(default)]
    pub tempo: Tempo,
    /// Silent gap at the end of each sounding note, in ms
    #[serde(default = "default_articulation_ms")]
    pub articulation_ms: u64,
    /// Stop polling interval during long notes, in ms
    #[serde(default = "default_stop_poll_ms")]
    pub stop_poll_ms: u64,
    /// Audio device settings
    #[serde(default)]
    pub audio: AudioConfig,
    /// User melodies by name
    #[serde(default)]
    pub melodies: BTreeMap<String, Vec<String>>,
}

fn default_articulation_ms() -> u64 {
    DEFAULT_ARTICULATION.as_millis() as u64
}
fn default_stop_poll_ms() -> u64 {
    DEFAULT_STOP_POLL.as_millis() as u64
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tempo: Tempo::default(),
            articulation_ms: default_articulation_ms(),
            stop_poll_ms: default_stop_poll_ms(),
            audio: AudioConfig::default(),
            melodies: BTreeMap::new(),
        }
    }
}

impl PlayerConfig {
    /// Load a configuration file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        if is_toml(path) {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save the configuration, choosing the format by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    pub fn articulation(&self) -> Duration {
        Duration::from_millis(self.articulation_ms)
    }

    pub fn stop_poll(&self) -> Duration {
        Duration::from_millis(self.stop_poll_ms)
    }

    /// Every problem in the configuration, empty when it is valid
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = self.tempo.validate() {
            problems.push(e.to_string());
        }
        if self.stop_poll_ms == 0 {
            problems.push("stop_poll_ms must be at least 1".to_string());
        }
        if let Err(e) = self.audio.validate() {
            problems.push(e.to_string());
        }
        for (name, tokens) in &self.melodies {
            if let Err(e) = resolve_all(tokens) {
                problems.push(format!("melody '{}': {}", name, e));
            }
        }
        problems
    }

    /// Fail with every problem found
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if !problems.is_empty() {
            bail!("Invalid configuration:\n  {}", problems.join("\n  "));
        }
        Ok(())
    }

    /// Find a melody by name, checking user melodies before the built-ins
    pub fn melody(&self, name: &str) -> Option<Vec<&str>> {
        let user = self
            .melodies
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()));
        match user {
            Some((_, tokens)) => Some(tokens.iter().map(String::as_str).collect()),
            None => Melody::from_name(name).map(|melody| melody.tokens().to_vec()),
        }
    }

    /// Names of all melodies available through [`PlayerConfig::melody`]
    pub fn melody_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Melody::ALL.iter().map(|m| m.name().to_string()).collect();
        names.extend(self.melodies.keys().cloned());
        names
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

/// Load a configuration file and check it
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<PlayerConfig> {
    let config = PlayerConfig::load(path)?;
    config.validate()?;
    Ok(config)
}
