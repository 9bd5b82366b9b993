//! Wire format of the keyboard lighting controller
//!
//! Three packet types make up a lighting program:
//!
//! ```text
//! effect packet  (feature report)  one per distinct animated effect
//! region packet  (feature report)  one per touched region
//! commit packet  (write)           applies everything staged so far
//! ```
//!
//! All magic bytes and fillers below are protocol constants. The firmware
//! performs little validation of its own, and zeroed fields where it expects
//! these values can leave keys in an undefined lighting state.

pub mod commit;
pub mod effect;
pub mod region;

/// Size of effect packets on every known model
pub const EFFECT_PACKET_SIZE: usize = 524;

/// Size of region packets on every known model
pub const REGION_PACKET_SIZE: usize = 524;

/// Size of the commit packet
pub const COMMIT_PACKET_SIZE: usize = 64;

/// Packet sizes of one model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketGeometry {
    pub effect_packet_size: usize,
    pub region_packet_size: usize,
    pub commit_packet_size: usize,
}

impl PacketGeometry {
    /// Geometry shared by the full-size and compact models
    pub const STANDARD: Self = Self {
        effect_packet_size: EFFECT_PACKET_SIZE,
        region_packet_size: REGION_PACKET_SIZE,
        commit_packet_size: COMMIT_PACKET_SIZE,
    };
}

impl Default for PacketGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}
