//! Lighting effects as understood by the controller firmware

use std::hash::{Hash, Hasher};

use crate::color::Color;

/// One color stop of a color-shift or breathing ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub color: Color,
    /// Normalized ring position, clamped to `[0, 1]`
    position: f32,
}

impl Transition {
    pub fn new(color: Color, position: f32) -> Self {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        // -0.0 and 0.0 must hash identically
        let position = if position == 0.0 { 0.0 } else { position };
        Self { color, position }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.color.hash_channels(state);
        self.position.to_bits().hash(state);
    }
}

/// Axes a wave travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveDirection {
    #[default]
    XY,
    X,
    Y,
}

/// Whether a wave converges on or radiates from its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveControl {
    Inward,
    #[default]
    Outward,
}

/// Wave parameters of a color-shift effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub active: bool,
    pub direction: WaveDirection,
    pub control: WaveControl,
    origin_x: f32,
    origin_y: f32,
    pub pulse: u16,
}

impl Wave {
    /// A wave centred at `(x, y)`, both clamped to `[0, 1]`
    pub fn new(
        direction: WaveDirection,
        control: WaveControl,
        origin: (f32, f32),
        pulse: u16,
    ) -> Self {
        let clamp = |v: f32| {
            if v.is_nan() || v <= 0.0 {
                0.0
            } else {
                v.min(1.0)
            }
        };
        Self {
            active: true,
            direction,
            control,
            origin_x: clamp(origin.0),
            origin_y: clamp(origin.1),
            pulse,
        }
    }

    /// No wave: every key of the effect shifts in lockstep
    pub fn inactive() -> Self {
        Self {
            active: false,
            direction: WaveDirection::XY,
            control: WaveControl::Outward,
            origin_x: 0.0,
            origin_y: 0.0,
            pulse: 0,
        }
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    fn hash_into<H: Hasher>(&self, state: &mut H) {
        self.active.hash(state);
        self.direction.hash(state);
        self.control.hash(state);
        self.origin_x.to_bits().hash(state);
        self.origin_y.to_bits().hash(state);
        self.pulse.hash(state);
    }
}

impl Default for Wave {
    fn default() -> Self {
        Self::inactive()
    }
}

/// The lighting behaviour of a single key
///
/// Equality is structural over every field; two keys with equal
/// `ColorShift`/`Breathing` effects share one effect packet.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Steady {
        color: Color,
    },
    ColorShift {
        transitions: Vec<Transition>,
        /// Total ring duration
        duration: u16,
        wave: Wave,
    },
    Breathing {
        transitions: Vec<Transition>,
        duration: u16,
    },
    Reactive {
        main: Color,
        /// Color shown on key press
        active: Color,
        duration: u16,
    },
    Disabled,
}

impl Effect {
    pub fn steady(color: Color) -> Self {
        Self::Steady { color }
    }

    /// Single-color pulse between `color` and black
    pub fn breathe(color: Color, duration: u16) -> Self {
        Self::Breathing {
            transitions: vec![
                Transition::new(color, 0.0),
                Transition::new(Color::BLACK, 0.5),
            ],
            duration,
        }
    }

    /// Whether this effect needs its own effect packet
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::ColorShift { .. } | Self::Breathing { .. })
    }

    /// Name used in logs and error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Steady { .. } => "steady",
            Self::ColorShift { .. } => "color shift",
            Self::Breathing { .. } => "breathing",
            Self::Reactive { .. } => "reactive",
            Self::Disabled => "disabled",
        }
    }

    /// Transition ring of an animated effect
    pub fn transitions(&self) -> Option<&[Transition]> {
        match self {
            Self::ColorShift { transitions, .. } | Self::Breathing { transitions, .. } => {
                Some(transitions)
            }
            _ => None,
        }
    }

    /// Start color of an animated effect: the stop with the lowest position
    pub fn start_color(&self) -> Option<Color> {
        self.transitions()?
            .iter()
            .min_by(|a, b| a.position().total_cmp(&b.position()))
            .map(|t| t.color)
    }
}

// Colors and positions are NaN-free and `-0.0`-normalized, so `==` is a
// total equivalence and agrees with the bit-level hash below.
impl Eq for Effect {}

impl Hash for Effect {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Steady { color } => color.hash_channels(state),
            Self::ColorShift {
                transitions,
                duration,
                wave,
            } => {
                transitions.len().hash(state);
                for t in transitions {
                    t.hash_into(state);
                }
                duration.hash(state);
                wave.hash_into(state);
            }
            Self::Breathing {
                transitions,
                duration,
            } => {
                transitions.len().hash(state);
                for t in transitions {
                    t.hash_into(state);
                }
                duration.hash(state);
            }
            Self::Reactive {
                main,
                active,
                duration,
            } => {
                main.hash_channels(state);
                active.hash_channels(state);
                duration.hash(state);
            }
            Self::Disabled => {}
        }
    }
}
