//! Region packets: the lighting state of every key slot in one region
//!
//! ```text
//! anchor record    0e 00 kc 00 | payload (10)
//! other records          00 kc | payload (10)
//! payload          main rgb | active rgb | duration LE | effect id | mode
//! ```

use zerocopy::{Immutable, IntoBytes, KnownLayout};

use crate::color::Color;
use crate::dedup::EffectTable;
use crate::effect::Effect;
use crate::error::{EncodeError, KeyMapError};
use crate::keymap::{Key, KeyMap};
use crate::layout::{Layout, Region};

/// Region packet magic, carried by the anchor record only
pub const REGION_HEADER: u8 = 0x0e;

/// Duration carried by steady, disabled and filler records
pub const DEFAULT_KEY_DURATION: u16 = 0x012c;

pub const MODE_ANIMATED: u8 = 0x00;
pub const MODE_STEADY: u8 = 0x01;
pub const MODE_DISABLED: u8 = 0x03;
pub const MODE_REACTIVE: u8 = 0x08;

const ANCHOR_HEADER_LEN: usize = 4;
const KEY_HEADER_LEN: usize = 2;
const PAYLOAD_LEN: usize = 10;

/// Payload of a firmware slot with no physical key behind it
///
/// Must be sent verbatim; a zeroed record leaves the slot undefined.
pub const FILLER_PAYLOAD: [u8; PAYLOAD_LEN] = [0, 0, 0, 0, 0, 0, 0x2c, 0x01, 0x00, 0x00];

/// Bytes needed for a region with `slots` records, anchor included
pub fn encoded_len(slots: usize) -> usize {
    match slots {
        0 => 0,
        n => ANCHOR_HEADER_LEN + PAYLOAD_LEN + (n - 1) * (KEY_HEADER_LEN + PAYLOAD_LEN),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct KeyPayload {
    main: [u8; 3],
    active: [u8; 3],
    duration: [u8; 2],
    effect_id: u8,
    mode: u8,
}

impl KeyPayload {
    fn new(main: Color, active: Color, duration: u16, effect_id: u8, mode: u8) -> Self {
        Self {
            main: main.rgb8(),
            active: active.rgb8(),
            duration: duration.to_le_bytes(),
            effect_id,
            mode,
        }
    }

    fn for_key(key: &Key, effects: &EffectTable) -> Result<Self, EncodeError> {
        let payload = match &key.effect {
            Effect::Steady { color } => Self::new(
                *color,
                Color::BLACK,
                DEFAULT_KEY_DURATION,
                0,
                MODE_STEADY,
            ),
            Effect::Reactive {
                main,
                active,
                duration,
            } => Self::new(*main, *active, *duration, 0, MODE_REACTIVE),
            Effect::Disabled => Self::new(
                Color::BLACK,
                Color::BLACK,
                DEFAULT_KEY_DURATION,
                0,
                MODE_DISABLED,
            ),
            Effect::ColorShift { duration, .. } | Effect::Breathing { duration, .. } => {
                let id = effects
                    .id_of(&key.effect)
                    .ok_or_else(|| EncodeError::UnregisteredEffect {
                        key: key.display_name.clone(),
                    })?;
                Self::new(
                    key.effect.start_color().unwrap_or(Color::BLACK),
                    Color::BLACK,
                    *duration,
                    id,
                    MODE_ANIMATED,
                )
            }
        };
        Ok(payload)
    }
}

/// Encode one region of `keymap` against the model's `layout`
///
/// Walks the region's firmware slot order. Slots without a physical key on
/// the model get the filler record; physical keys missing from the keymap are
/// an error.
pub fn encode(
    keymap: &KeyMap,
    layout: &Layout,
    region: Region,
    effects: &EffectTable,
    packet_size: usize,
) -> Result<Vec<u8>, EncodeError> {
    let needed = encoded_len(region.slot_order().count());
    if needed > packet_size {
        return Err(EncodeError::RegionOverflow {
            region,
            needed,
            capacity: packet_size,
        });
    }

    let mut packet = Vec::with_capacity(packet_size);
    for (slot, keycode) in region.slot_order().enumerate() {
        if slot == 0 {
            packet.extend_from_slice(&[REGION_HEADER, 0x00, keycode, 0x00]);
        } else {
            packet.extend_from_slice(&[0x00, keycode]);
        }

        match layout.find(region, keycode) {
            Some(physical) => {
                let key = keymap
                    .get(region, keycode)
                    .ok_or(KeyMapError::Missing {
                        region,
                        keycode,
                        name: physical.name,
                    })?;
                packet.extend_from_slice(KeyPayload::for_key(key, effects)?.as_bytes());
            }
            None => packet.extend_from_slice(&FILLER_PAYLOAD),
        }
    }
    packet.resize(packet_size, 0);

    Ok(packet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Transition;
    use crate::layout::Model;
    use crate::protocol::REGION_PACKET_SIZE;

    /// Offset of the record for slot `index`
    fn record(index: usize) -> usize {
        if index == 0 {
            0
        } else {
            encoded_len(index)
        }
    }

    fn encode_uniform(model: Model, effect: Effect, region: Region) -> Vec<u8> {
        let map = KeyMap::uniform(model, effect);
        let table = EffectTable::build(&map).unwrap();
        encode(&map, model.layout(), region, &table, REGION_PACKET_SIZE).unwrap()
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len(1), 14);
        assert_eq!(encoded_len(2), 26);
        assert_eq!(encoded_len(36), 14 + 35 * 12);
    }

    #[test]
    fn test_steady_records() {
        let packet = encode_uniform(Model::FullSize, Effect::steady(Color::RED), Region::Alphanumeric);
        assert_eq!(packet.len(), REGION_PACKET_SIZE);

        assert_eq!(
            &packet[0..14],
            &[0x0e, 0x00, 0x04, 0x00, 255, 0, 0, 0, 0, 0, 0x2c, 0x01, 0x00, MODE_STEADY]
        );
        // B follows A
        assert_eq!(
            &packet[14..26],
            &[0x00, 0x05, 255, 0, 0, 0, 0, 0, 0x2c, 0x01, 0x00, MODE_STEADY]
        );

        let end = encoded_len(Region::Alphanumeric.slot_order().count());
        assert!(packet[end..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_filler_for_slots_without_keys() {
        let packet = encode_uniform(Model::FullSize, Effect::steady(Color::RED), Region::Modifiers);
        let rgui = Region::Modifiers
            .slot_order()
            .position(|kc| kc == 0xe7)
            .unwrap();
        let at = record(rgui);
        assert_eq!(
            &packet[at..at + 12],
            &[0x00, 0xe7, 0, 0, 0, 0, 0, 0, 0x2c, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_compact_numpad_slots_are_filled() {
        let packet = encode_uniform(Model::Compact, Effect::steady(Color::BLUE), Region::Special);
        let kp1 = Region::Special.slot_order().position(|kc| kc == 0x59).unwrap();
        let at = record(kp1);
        assert_eq!(&packet[at..at + 2], &[0x00, 0x59]);
        assert_eq!(&packet[at + 2..at + 12], &FILLER_PAYLOAD);

        // F2 is physical
        let at = record(1);
        assert_eq!(
            &packet[at..at + 12],
            &[0x00, 0x3b, 0, 0, 255, 0, 0, 0, 0x2c, 0x01, 0x00, MODE_STEADY]
        );
    }

    #[test]
    fn test_payload_by_effect_kind() {
        let reactive = Effect::Reactive {
            main: Color::GREEN,
            active: Color::WHITE,
            duration: 0x0250,
        };
        let packet = encode_uniform(Model::Compact, reactive, Region::Enter);
        assert_eq!(
            &packet[4..14],
            &[0, 255, 0, 255, 255, 255, 0x50, 0x02, 0x00, MODE_REACTIVE]
        );

        let packet = encode_uniform(Model::Compact, Effect::Disabled, Region::Enter);
        assert_eq!(
            &packet[4..14],
            &[0, 0, 0, 0, 0, 0, 0x2c, 0x01, 0x00, MODE_DISABLED]
        );

        let breathing = Effect::Breathing {
            transitions: vec![
                Transition::new(Color::BLACK, 0.6),
                Transition::new(Color::BLUE, 0.1),
            ],
            duration: 0x0400,
        };
        let packet = encode_uniform(Model::Compact, breathing, Region::Enter);
        assert_eq!(
            &packet[4..14],
            &[0, 0, 255, 0, 0, 0, 0x00, 0x04, 1, MODE_ANIMATED]
        );
    }

    #[test]
    fn test_missing_key_and_unregistered_effect() {
        let layout = Model::FullSize.layout();
        let mut map = KeyMap::uniform(Model::FullSize, Effect::Disabled);
        let table = EffectTable::build(&map).unwrap();

        map.set_effect(Region::Enter, 0x28, Effect::breathe(Color::RED, 500));
        assert!(matches!(
            encode(&map, layout, Region::Enter, &table, REGION_PACKET_SIZE),
            Err(EncodeError::UnregisteredEffect { .. })
        ));

        map.remove(Region::Enter, 0x2d);
        assert!(matches!(
            encode(&map, layout, Region::Enter, &EffectTable::build(&map).unwrap(), REGION_PACKET_SIZE),
            Err(EncodeError::KeyMap(KeyMapError::Missing { keycode: 0x2d, .. }))
        ));
    }

    #[test]
    fn test_overflow() {
        let map = KeyMap::uniform(Model::FullSize, Effect::Disabled);
        let table = EffectTable::build(&map).unwrap();
        assert!(matches!(
            encode(&map, Model::FullSize.layout(), Region::Alphanumeric, &table, 64),
            Err(EncodeError::RegionOverflow { capacity: 64, .. })
        ));
    }

    #[test]
    fn test_one_record_per_slot() {
        for model in Model::ALL {
            for region in Region::ALL {
                let packet = encode_uniform(model, Effect::steady(Color::WHITE), region);
                let slots: Vec<u8> = region.slot_order().collect();
                for (index, keycode) in slots.iter().enumerate() {
                    let at = record(index);
                    let kc_at = if index == 0 { at + 2 } else { at + 1 };
                    assert_eq!(packet[kc_at], *keycode, "{model} {region} slot {index}");
                }
            }
        }
    }
}
