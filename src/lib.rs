//! Library half of the `klc_driver` binary: configuration and effect presets
//!
//! Kept separate from `main.rs` so integration tests can reach it.

pub mod config;
pub mod preset;
