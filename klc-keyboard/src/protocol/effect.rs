//! Effect packets: one animated transition ring per packet
//!
//! ```text
//! 0x00  transition records, 8 bytes each, zero-padded up to 0x84
//! 0x84  start color, nibble packed, then 0xff 0x00
//! 0x8c  wave block (10 bytes, zero when the wave is inactive)
//! 0x96  trailer: count, 0x00, total duration (LE), control
//! ...   zero padding up to the packet size
//! ```

use zerocopy::{Immutable, IntoBytes, KnownLayout};

use crate::color::{self, Color, MIN_DELTA_DURATION};
use crate::effect::{Effect, Transition, Wave, WaveControl, WaveDirection};
use crate::error::EffectError;

pub const TRANSITION_RECORD_LEN: usize = 8;

/// Offset where the start color block begins
pub const TRANSITION_BLOCK_END: usize = 0x84;

/// Records that fit before [`TRANSITION_BLOCK_END`]
pub const MAX_TRANSITIONS: usize = TRANSITION_BLOCK_END / TRANSITION_RECORD_LEN;

/// Closes the start color block
const START_COLOR_MARKER: [u8; 2] = [0xff, 0x00];

/// Firmware fixed-point scale of the wave origin axes
const WAVE_ORIGIN_X_SCALE: f32 = 0x105c as f32;
const WAVE_ORIGIN_Y_SCALE: f32 = 0x40d as f32;

const CONTROL_INWARD: u8 = 0x00;
const CONTROL_OUTWARD: u8 = 0x01;

/// Per-transition durations are sent in tenths of the ring's duration unit
const LOCAL_DURATION_DIVISOR: f32 = 10.0;

#[derive(Debug, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct TransitionRecord {
    /// Effect ID on the first record, transition index afterwards
    lead: u8,
    _pad0: u8,
    delta: [u8; 3],
    _pad1: u8,
    duration: [u8; 2],
}

#[derive(Debug, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct StartColor {
    nibbles: [u8; 6],
    marker: [u8; 2],
}

#[derive(Debug, Default, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct WaveBlock {
    origin_x: [u8; 2],
    origin_y: [u8; 2],
    along_x: u8,
    _pad0: u8,
    along_y: u8,
    _pad1: u8,
    pulse: [u8; 2],
}

#[derive(Debug, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct Trailer {
    count: u8,
    _pad: u8,
    duration: [u8; 2],
    control: u8,
}

impl StartColor {
    fn new(color: Color) -> Self {
        let mut nibbles = [0u8; 6];
        for (i, channel) in color.rgb8().into_iter().enumerate() {
            nibbles[i * 2] = channel & 0x0f;
            nibbles[i * 2 + 1] = channel >> 4;
        }
        Self {
            nibbles,
            marker: START_COLOR_MARKER,
        }
    }
}

impl WaveBlock {
    fn new(wave: &Wave) -> Self {
        if !wave.active {
            return Self::default();
        }
        let (x, y) = wave.origin();
        Self {
            origin_x: ((x * WAVE_ORIGIN_X_SCALE) as u16).to_le_bytes(),
            origin_y: ((y * WAVE_ORIGIN_Y_SCALE) as u16).to_le_bytes(),
            along_x: u8::from(wave.direction != WaveDirection::Y),
            _pad0: 0,
            along_y: u8::from(wave.direction != WaveDirection::X),
            _pad1: 0,
            pulse: wave.pulse.to_le_bytes(),
        }
    }
}

/// Sort a ring by position, rejecting empty rings and shared positions
pub fn sorted_ring(transitions: &[Transition]) -> Result<Vec<Transition>, EffectError> {
    if transitions.is_empty() {
        return Err(EffectError::EmptyTransitions);
    }
    if transitions.len() > MAX_TRANSITIONS {
        return Err(EffectError::TooManyTransitions {
            count: transitions.len(),
            max: MAX_TRANSITIONS,
        });
    }

    let mut ring = transitions.to_vec();
    ring.sort_by(|a, b| a.position().total_cmp(&b.position()));
    if let Some(pair) = ring
        .windows(2)
        .find(|pair| pair[0].position() == pair[1].position())
    {
        return Err(EffectError::DuplicatePosition {
            position: pair[0].position(),
        });
    }
    Ok(ring)
}

/// Per-transition `(delta color, local duration)` around the ring
///
/// Each stop blends toward the next one; the last blends back to the first.
/// Local durations never drop below [`MIN_DELTA_DURATION`].
pub fn ring_deltas(ring: &[Transition], total_duration: u16) -> Vec<(Color, u16)> {
    ring.iter()
        .enumerate()
        .map(|(i, this)| {
            let next = &ring[(i + 1) % ring.len()];
            let mut span = next.position() - this.position();
            // A lone stop spans the whole ring
            if span <= 0.0 {
                span += 1.0;
            }
            let local = ((span * total_duration as f32) / LOCAL_DURATION_DIVISOR) as u16;
            let local = local.max(MIN_DELTA_DURATION);
            (color::delta(this.color, next.color, local), local)
        })
        .collect()
}

/// Encode an animated effect with its assigned ID
pub fn encode(effect: &Effect, id: u8, packet_size: usize) -> Result<Vec<u8>, EffectError> {
    let (transitions, duration, wave) = match effect {
        Effect::ColorShift {
            transitions,
            duration,
            wave,
        } => (transitions, *duration, *wave),
        Effect::Breathing {
            transitions,
            duration,
        } => (transitions, *duration, Wave::inactive()),
        other => {
            return Err(EffectError::NotAnimated {
                kind: other.kind_name(),
            })
        }
    };

    let ring = sorted_ring(transitions)?;
    let mut packet = Vec::with_capacity(packet_size);

    for (index, (delta, local)) in ring_deltas(&ring, duration).into_iter().enumerate() {
        let record = TransitionRecord {
            lead: if index == 0 { id } else { index as u8 },
            _pad0: 0,
            delta: delta.rgb8(),
            _pad1: 0,
            duration: local.to_le_bytes(),
        };
        packet.extend_from_slice(record.as_bytes());
    }
    packet.resize(TRANSITION_BLOCK_END, 0);

    packet.extend_from_slice(StartColor::new(ring[0].color).as_bytes());
    packet.extend_from_slice(WaveBlock::new(&wave).as_bytes());
    let trailer = Trailer {
        count: ring.len() as u8,
        _pad: 0,
        duration: duration.to_le_bytes(),
        control: match wave.control {
            WaveControl::Inward => CONTROL_INWARD,
            WaveControl::Outward => CONTROL_OUTWARD,
        },
    };
    packet.extend_from_slice(trailer.as_bytes());
    packet.resize(packet_size, 0);

    Ok(packet)
}
