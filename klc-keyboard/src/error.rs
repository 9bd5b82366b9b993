//! Error types for keymap validation, encoding and transmission

use klc_transport::TransportError;
use thiserror::Error;

use crate::layout::{Model, Region};
use crate::program::Stage;

/// A keymap does not match the model's physical layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("Key {region}/0x{keycode:02x} appears more than once")]
    Duplicate { region: Region, keycode: u8 },

    #[error("Key {region}/0x{keycode:02x} does not exist on the {model} layout")]
    Unknown {
        model: Model,
        region: Region,
        keycode: u8,
    },

    #[error("Key {name} ({region}/0x{keycode:02x}) is missing from the keymap")]
    Missing {
        region: Region,
        keycode: u8,
        name: &'static str,
    },
}

/// An animated effect cannot be encoded safely
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    #[error("effect has no transitions")]
    EmptyTransitions,

    #[error("two transitions share position {position}")]
    DuplicatePosition { position: f32 },

    #[error("{count} transitions exceed the firmware limit of {max}")]
    TooManyTransitions { count: usize, max: usize },

    #[error("{kind} effects are sent inline with their key, not as effect packets")]
    NotAnimated { kind: &'static str },
}

/// Errors raised while building packets, before any I/O
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("Invalid keymap: {0}")]
    KeyMap(#[from] KeyMapError),

    #[error("Effect {id} (first used by {key}) is invalid: {source}")]
    Effect {
        id: u8,
        key: String,
        #[source]
        source: EffectError,
    },

    #[error("Key {key} uses an animated effect missing from the effect table")]
    UnregisteredEffect { key: String },

    #[error("Too many distinct animated effects: {count} (max 255)")]
    TooManyEffects { count: usize },

    #[error("Region {region} needs {needed} bytes but packets hold {capacity}")]
    RegionOverflow {
        region: Region,
        needed: usize,
        capacity: usize,
    },
}

/// Errors from a lighting update
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Rejected before anything was sent
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The device rejected or dropped a packet; the program may be partially applied
    #[error("Transmission failed at {stage}: {source}")]
    Transmit {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// A newer update was queued before this one started
    #[error("Update superseded by a newer request")]
    Superseded,

    /// The device session was detached
    #[error("Device session closed")]
    SessionClosed,
}

impl UpdateError {
    /// Stage that failed, for transmission errors
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Transmit { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
