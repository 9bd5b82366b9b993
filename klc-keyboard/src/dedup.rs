//! Distinct animated effects of one update and their packet IDs

use std::collections::HashMap;

use crate::effect::Effect;
use crate::error::EncodeError;
use crate::keymap::KeyMap;

/// IDs are one byte and 0 is reserved for "no effect"
pub const MAX_EFFECTS: usize = u8::MAX as usize;

/// One distinct animated effect
#[derive(Debug, Clone, PartialEq)]
pub struct EffectEntry {
    pub id: u8,
    pub effect: Effect,
    /// Display name of the first key using this effect
    pub first_key: String,
}

/// Distinct `ColorShift`/`Breathing` effects, numbered 1.. in first-seen order
#[derive(Debug, Clone, Default)]
pub struct EffectTable {
    ids: HashMap<Effect, u8>,
    entries: Vec<EffectEntry>,
}

impl EffectTable {
    /// Assign IDs to every distinct animated effect of `keymap`
    pub fn build(keymap: &KeyMap) -> Result<Self, EncodeError> {
        let mut distinct: HashMap<&Effect, usize> = HashMap::new();
        let mut order = Vec::new();
        for key in keymap.iter().filter(|k| k.effect.is_animated()) {
            if !distinct.contains_key(&key.effect) {
                distinct.insert(&key.effect, order.len());
                order.push(key);
            }
        }

        if order.len() > MAX_EFFECTS {
            return Err(EncodeError::TooManyEffects { count: order.len() });
        }

        let mut table = Self::default();
        for (index, key) in order.into_iter().enumerate() {
            let id = (index + 1) as u8;
            table.ids.insert(key.effect.clone(), id);
            table.entries.push(EffectEntry {
                id,
                effect: key.effect.clone(),
                first_key: key.display_name.clone(),
            });
        }
        Ok(table)
    }

    /// Packet ID for an effect
    ///
    /// Inline effects resolve to 0; `None` means an animated effect that was
    /// not part of the keymap the table was built from.
    pub fn id_of(&self, effect: &Effect) -> Option<u8> {
        if effect.is_animated() {
            self.ids.get(effect).copied()
        } else {
            Some(0)
        }
    }

    pub fn get(&self, id: u8) -> Option<&EffectEntry> {
        let index = usize::from(id).checked_sub(1)?;
        self.entries.get(index)
    }

    /// Entries in ID order
    pub fn iter(&self) -> impl Iterator<Item = &EffectEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::effect::{Transition, Wave};
    use crate::keymap::Key;
    use crate::layout::{Model, Region};

    fn shift(color: Color) -> Effect {
        Effect::ColorShift {
            transitions: vec![
                Transition::new(color, 0.0),
                Transition::new(Color::BLACK, 0.5),
            ],
            duration: 800,
            wave: Wave::inactive(),
        }
    }

    fn map_of(effects: &[Effect]) -> KeyMap {
        effects
            .iter()
            .enumerate()
            .map(|(i, e)| Key::new(Region::Alphanumeric, 0x04 + i as u8, format!("k{i}"), e.clone()))
            .collect()
    }

    #[test]
    fn test_first_seen_order() {
        let map = map_of(&[
            Effect::steady(Color::RED),
            shift(Color::BLUE),
            shift(Color::GREEN),
            shift(Color::BLUE),
            Effect::breathe(Color::RED, 300),
        ]);
        let table = EffectTable::build(&map).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.id_of(&shift(Color::BLUE)), Some(1));
        assert_eq!(table.id_of(&shift(Color::GREEN)), Some(2));
        assert_eq!(table.id_of(&Effect::breathe(Color::RED, 300)), Some(3));
        assert_eq!(table.get(1).map(|e| e.first_key.as_str()), Some("k1"));
        assert_eq!(table.get(0), None);
    }

    #[test]
    fn test_inline_effects_resolve_to_zero() {
        let table = EffectTable::build(&map_of(&[shift(Color::RED)])).unwrap();
        assert_eq!(table.id_of(&Effect::steady(Color::RED)), Some(0));
        assert_eq!(table.id_of(&Effect::Disabled), Some(0));
        assert_eq!(table.id_of(&shift(Color::WHITE)), None);
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut map = KeyMap::uniform(Model::FullSize, Effect::Disabled);
        map.set_region(Region::Enter, &shift(Color::GREEN));
        map.set_region(Region::Modifiers, &shift(Color::RED));

        let a = EffectTable::build(&map).unwrap();
        let b = EffectTable::build(&map).unwrap();
        let ids_a: Vec<_> = a.iter().map(|e| (e.id, e.effect.clone())).collect();
        let ids_b: Vec<_> = b.iter().map(|e| (e.id, e.effect.clone())).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_too_many_effects() {
        let effects: Vec<_> = (0..=MAX_EFFECTS)
            .map(|i| Effect::breathe(Color::RED, 100 + i as u16))
            .collect();
        let keys: KeyMap = effects
            .into_iter()
            .enumerate()
            .map(|(i, e)| Key::new(Region::Special, i as u8, format!("k{i}"), e))
            .collect();
        assert_eq!(
            EffectTable::build(&keys).unwrap_err(),
            EncodeError::TooManyEffects { count: 256 }
        );
    }
}
