//! Keyboard models, key regions and their static layout tables
//!
//! The controller groups keys into four regions. Each region has a fixed
//! firmware slot order that is the same on every supported model; a model's
//! physical layout decides which of those slots have a real key behind them.

mod tables;

use std::fmt;
use std::str::FromStr;

use crate::protocol::{self, PacketGeometry};

/// One of the four key groups the firmware stages independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Modifiers,
    Alphanumeric,
    Enter,
    Special,
}

impl Region {
    /// All regions in transmission order
    pub const ALL: [Region; 4] = [
        Region::Modifiers,
        Region::Alphanumeric,
        Region::Enter,
        Region::Special,
    ];

    /// Keycode whose record opens the region packet
    pub fn anchor(&self) -> u8 {
        tables::slots(*self).0
    }

    /// Firmware slot order after the anchor
    pub fn keycodes(&self) -> &'static [u8] {
        tables::slots(*self).1
    }

    /// Full slot order: anchor first, then [`Region::keycodes`]
    pub fn slot_order(&self) -> impl Iterator<Item = u8> {
        std::iter::once(self.anchor()).chain(self.keycodes().iter().copied())
    }

    /// Marker telling the commit packet which staged region to apply
    pub fn commit_marker(&self) -> u8 {
        match self {
            Self::Modifiers => protocol::commit::MARKER_MODIFIERS,
            Self::Alphanumeric => protocol::commit::MARKER_ALPHANUMERIC,
            Self::Enter => protocol::commit::MARKER_ENTER,
            Self::Special => protocol::commit::MARKER_SPECIAL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Modifiers => "modifiers",
            Self::Alphanumeric => "alphanumeric",
            Self::Enter => "enter",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "modifiers" | "mod" | "m" => Ok(Self::Modifiers),
            "alphanumeric" | "alphanum" | "alpha" | "a" => Ok(Self::Alphanumeric),
            "enter" | "e" => Ok(Self::Enter),
            "special" | "s" => Ok(Self::Special),
            _ => Err(format!(
                "Unknown region '{s}' (expected modifiers, alphanumeric, enter or special)"
            )),
        }
    }
}

/// A physical key and the firmware slot it lights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalKey {
    pub name: &'static str,
    pub region: Region,
    pub keycode: u8,
}

/// Supported keyboard models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    /// Full-size keyboard with numpad
    FullSize,
    /// Tenkeyless layout: no numpad, Scroll Lock, Pause or Menu key
    Compact,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::FullSize, Model::Compact];

    pub fn layout(&self) -> &'static Layout {
        match self {
            Self::FullSize => &tables::FULL_SIZE,
            Self::Compact => &tables::COMPACT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FullSize => "full-size",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full-size" | "fullsize" | "full" => Ok(Self::FullSize),
            "compact" | "tkl" => Ok(Self::Compact),
            _ => Err(format!("Unknown model '{s}' (expected full-size or compact)")),
        }
    }
}

/// Static physical layout of one model
#[derive(Debug)]
pub struct Layout {
    pub model: Model,
    /// Physical rows, top to bottom, left to right
    pub rows: &'static [&'static [PhysicalKey]],
    pub geometry: PacketGeometry,
}

impl Layout {
    /// All physical keys in row order
    pub fn keys(&self) -> impl Iterator<Item = &'static PhysicalKey> {
        self.rows.iter().flat_map(|row| row.iter())
    }

    /// Number of physical keys
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Number of physical keys in one region
    pub fn region_key_count(&self, region: Region) -> usize {
        self.keys().filter(|k| k.region == region).count()
    }

    /// Whether any physical key of the model lives in `region`
    pub fn has_region(&self, region: Region) -> bool {
        self.keys().any(|k| k.region == region)
    }

    pub fn find(&self, region: Region, keycode: u8) -> Option<&'static PhysicalKey> {
        self.keys()
            .find(|k| k.region == region && k.keycode == keycode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_physical_key_has_a_slot() {
        for model in Model::ALL {
            for key in model.layout().keys() {
                assert!(
                    key.region.slot_order().any(|code| code == key.keycode),
                    "{model}: {} (0x{:02x}) has no slot in {}",
                    key.name,
                    key.keycode,
                    key.region
                );
            }
        }
    }

    #[test]
    fn test_physical_keys_are_unique() {
        for model in Model::ALL {
            let mut seen = HashSet::new();
            for key in model.layout().keys() {
                assert!(
                    seen.insert((key.region, key.keycode)),
                    "{model}: duplicate {} 0x{:02x}",
                    key.region,
                    key.keycode
                );
            }
            let names: HashSet<_> = model
                .layout()
                .keys()
                .map(|k| k.name.to_ascii_lowercase())
                .collect();
            assert_eq!(names.len(), model.layout().key_count());
        }
    }

    #[test]
    fn test_anchors_are_physical_on_every_model() {
        for model in Model::ALL {
            for region in Region::ALL {
                assert!(
                    model.layout().find(region, region.anchor()).is_some(),
                    "{model}: anchor of {region} is not a physical key"
                );
            }
        }
    }

    #[test]
    fn test_slot_orders_have_no_duplicates_and_fit_a_packet() {
        for region in Region::ALL {
            let slots: Vec<u8> = region.slot_order().collect();
            let unique: HashSet<_> = slots.iter().collect();
            assert_eq!(unique.len(), slots.len(), "{region} repeats a slot");

            for model in Model::ALL {
                let geometry = model.layout().geometry;
                let needed = protocol::region::encoded_len(slots.len());
                assert!(needed <= geometry.region_packet_size);
            }
        }
    }

    #[test]
    fn test_compact_lacks_numpad() {
        let compact = Model::Compact.layout();
        let full = Model::FullSize.layout();
        assert!(compact.find(Region::Special, 0x53).is_none());
        assert!(full.find(Region::Special, 0x53).is_some());
        assert!(compact.key_count() < full.key_count());
        assert_eq!(
            compact.find(Region::Modifiers, 0x29).map(|k| k.name),
            Some("Esc")
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Full-Size".parse::<Model>(), Ok(Model::FullSize));
        assert_eq!("tkl".parse::<Model>(), Ok(Model::Compact));
        assert!("three-region".parse::<Model>().is_err());
        assert_eq!("alpha".parse::<Region>(), Ok(Region::Alphanumeric));
        assert_eq!(Region::Enter.to_string(), "enter");
    }
}
