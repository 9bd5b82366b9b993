//! Per-key lighting programs for keyboard lighting controllers
//!
//! This crate turns a per-key effect map into the packets the controller
//! expects and transmits them over any [`klc_transport::Transport`].
//!
//! ```text
//! KeyMap ──> EffectTable ──> effect packets ─┐
//!    └──────────────────────> region packets ─┼─> LightingProgram ──> LightingSession
//!                             commit packet ──┘
//! ```

pub mod color;
pub mod debounce;
pub mod dedup;
pub mod effect;
pub mod error;
pub mod keymap;
pub mod layout;
pub mod program;
pub mod protocol;
pub mod sequencer;

pub use color::Color;
pub use debounce::{DebounceConfig, DebounceOutcome, UpdateDebouncer};
pub use dedup::{EffectEntry, EffectTable};
pub use effect::{Effect, Transition, Wave, WaveControl, WaveDirection};
pub use error::{EffectError, EncodeError, KeyMapError, UpdateError};
pub use keymap::{Key, KeyMap};
pub use layout::{Layout, Model, PhysicalKey, Region};
pub use program::{LightingProgram, LightingUpdate, Packet, Stage};
pub use protocol::PacketGeometry;
pub use sequencer::{LightingSession, SequencerConfig, SequencerState, UpdateReport};

// Re-export for consumers that only depend on this crate
pub use klc_transport::{ReportKind, Transport, TransportError};
