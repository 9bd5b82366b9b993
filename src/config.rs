//! Driver configuration loaded from TOML
//!
//! ```toml
//! model = "full-size"
//!
//! [sequencer]
//! send_timeout_ms = 2000
//! queue_depth = 8
//! supersede_pending = true
//!
//! [debounce]
//! quiet_ms = 500
//! ```
//!
//! Every field is optional. A missing file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use klc_keyboard::{DebounceConfig, Model, SequencerConfig};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Model used when `--model` is not given
    #[serde(serialize_with = "serialize_model", deserialize_with = "deserialize_model")]
    pub model: Model,
    pub sequencer: SequencerSection,
    pub debounce: DebounceSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerSection {
    pub send_timeout_ms: u64,
    pub queue_depth: usize,
    pub supersede_pending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebounceSection {
    pub quiet_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Model::FullSize,
            sequencer: SequencerSection::default(),
            debounce: DebounceSection::default(),
        }
    }
}

impl Default for SequencerSection {
    fn default() -> Self {
        let defaults = SequencerConfig::default();
        Self {
            send_timeout_ms: defaults.send_timeout.as_millis() as u64,
            queue_depth: defaults.queue_depth,
            supersede_pending: defaults.supersede_pending,
        }
    }
}

impl Default for DebounceSection {
    fn default() -> Self {
        Self {
            quiet_ms: DebounceConfig::default().quiet.as_millis() as u64,
        }
    }
}

fn serialize_model<S: Serializer>(model: &Model, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(model.name())
}

fn deserialize_model<'de, D: Deserializer<'de>>(d: D) -> Result<Model, D::Error> {
    let name = String::deserialize(d)?;
    name.parse().map_err(serde::de::Error::custom)
}

impl Config {
    /// Load `path`, or the default location when `None`
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map_or_else(default_config_path, Path::to_path_buf);
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn sequencer(&self) -> SequencerConfig {
        SequencerConfig {
            send_timeout: Duration::from_millis(self.sequencer.send_timeout_ms),
            queue_depth: self.sequencer.queue_depth,
            supersede_pending: self.sequencer.supersede_pending,
        }
    }

    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig {
            quiet: Duration::from_millis(self.debounce.quiet_ms),
        }
    }
}

/// `$XDG_CONFIG_HOME/klc-driver/config.toml`, falling back to `~/.config`
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn config_dir() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join("klc-driver")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/klc-driver")
    } else {
        PathBuf::from("/etc/klc-driver")
    }
}
