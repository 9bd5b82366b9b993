//! Uniform lighting presets built from command-line options

use std::fmt;
use std::str::FromStr;

use klc_keyboard::{Color, Effect, Transition, Wave, WaveControl, WaveDirection};

/// Effect family selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    Steady,
    Breathing,
    Shift,
    Reactive,
    Off,
}

impl FromStr for PresetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "steady" | "static" => Ok(Self::Steady),
            "breathing" | "breathe" => Ok(Self::Breathing),
            "shift" | "color-shift" | "colorshift" => Ok(Self::Shift),
            "reactive" => Ok(Self::Reactive),
            "off" | "disabled" => Ok(Self::Off),
            _ => Err(format!(
                "Unknown effect '{s}' (expected steady, breathing, shift, reactive or off)"
            )),
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Steady => "steady",
            Self::Breathing => "breathing",
            Self::Shift => "shift",
            Self::Reactive => "reactive",
            Self::Off => "off",
        };
        f.write_str(name)
    }
}

/// Effect options shared by `dump` and `apply`
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub kind: PresetKind,
    pub color: Color,
    /// Second stop for breathing/shift, press color for reactive
    pub color2: Option<Color>,
    pub duration: u16,
    /// Wave direction for color shifts; `None` shifts every key in lockstep
    pub wave: Option<WaveDirection>,
}

impl Preset {
    pub fn effect(&self) -> Effect {
        match self.kind {
            PresetKind::Steady => Effect::steady(self.color),
            PresetKind::Off => Effect::Disabled,
            PresetKind::Breathing => Effect::Breathing {
                transitions: self.two_stops(Color::BLACK),
                duration: self.duration,
            },
            PresetKind::Shift => Effect::ColorShift {
                transitions: self.two_stops(Color::WHITE),
                duration: self.duration,
                wave: self.wave.map_or_else(Wave::inactive, |direction| {
                    Wave::new(direction, WaveControl::Outward, (0.5, 0.5), self.duration / 4)
                }),
            },
            PresetKind::Reactive => Effect::Reactive {
                main: self.color,
                active: self.color2.unwrap_or(Color::WHITE),
                duration: self.duration,
            },
        }
    }

    fn two_stops(&self, fallback: Color) -> Vec<Transition> {
        vec![
            Transition::new(self.color, 0.0),
            Transition::new(self.color2.unwrap_or(fallback), 0.5),
        ]
    }
}

/// Parse a wave direction (`xy`, `x` or `y`)
pub fn parse_wave(s: &str) -> Result<WaveDirection, String> {
    match s.to_ascii_lowercase().as_str() {
        "xy" | "both" => Ok(WaveDirection::XY),
        "x" | "horizontal" => Ok(WaveDirection::X),
        "y" | "vertical" => Ok(WaveDirection::Y),
        _ => Err(format!("Unknown wave direction '{s}' (expected xy, x or y)")),
    }
}

/// Parse a color for clap
pub fn parse_color(s: &str) -> Result<Color, String> {
    Color::parse(s).ok_or_else(|| format!("Invalid color '{s}' (use #RRGGBB or a name)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(kind: PresetKind) -> Preset {
        Preset {
            kind,
            color: Color::RED,
            color2: None,
            duration: 800,
            wave: None,
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Breathe".parse::<PresetKind>(), Ok(PresetKind::Breathing));
        assert_eq!("off".parse::<PresetKind>(), Ok(PresetKind::Off));
        assert!("rainbow".parse::<PresetKind>().is_err());
        assert_eq!(PresetKind::Shift.to_string(), "shift");
    }

    #[test]
    fn test_inline_presets() {
        assert_eq!(preset(PresetKind::Steady).effect(), Effect::steady(Color::RED));
        assert_eq!(preset(PresetKind::Off).effect(), Effect::Disabled);
        assert_eq!(
            preset(PresetKind::Reactive).effect(),
            Effect::Reactive {
                main: Color::RED,
                active: Color::WHITE,
                duration: 800,
            }
        );
    }

    #[test]
    fn test_breathing_fades_to_black_by_default() {
        assert_eq!(
            preset(PresetKind::Breathing).effect(),
            Effect::breathe(Color::RED, 800)
        );
    }

    #[test]
    fn test_shift_wave() {
        let mut p = preset(PresetKind::Shift);
        p.color2 = Some(Color::BLUE);
        p.wave = Some(WaveDirection::X);
        match p.effect() {
            Effect::ColorShift {
                transitions, wave, ..
            } => {
                assert_eq!(transitions[1].color, Color::BLUE);
                assert!(wave.active);
                assert_eq!(wave.direction, WaveDirection::X);
                assert_eq!(wave.pulse, 200);
            }
            other => panic!("unexpected effect {other:?}"),
        }

        p.wave = None;
        assert!(matches!(p.effect(), Effect::ColorShift { wave, .. } if !wave.active));
    }

    #[test]
    fn test_parsers() {
        assert_eq!(parse_color("#00ff00"), Ok(Color::GREEN));
        assert!(parse_color("nope").is_err());
        assert_eq!(parse_wave("Y"), Ok(WaveDirection::Y));
        assert!(parse_wave("z").is_err());
    }
}
