//! Per-key effect assignments for one model

use std::collections::HashSet;

use crate::effect::Effect;
use crate::error::KeyMapError;
use crate::layout::{Layout, Model, PhysicalKey, Region};

/// One key and the effect it should show
///
/// Identity is `(region, keycode)`; the display name is informational.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub region: Region,
    pub keycode: u8,
    pub display_name: String,
    pub effect: Effect,
}

impl Key {
    pub fn new(region: Region, keycode: u8, display_name: impl Into<String>, effect: Effect) -> Self {
        Self {
            region,
            keycode,
            display_name: display_name.into(),
            effect,
        }
    }

    pub fn id(&self) -> (Region, u8) {
        (self.region, self.keycode)
    }
}

/// Ordered collection of keys
///
/// Order matters: effect IDs are assigned in first-seen keymap order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyMap {
    keys: Vec<Key>,
}

impl KeyMap {
    pub fn new(keys: Vec<Key>) -> Self {
        Self { keys }
    }

    /// One key per physical key of `layout`, in row order
    pub fn from_layout(layout: &Layout, mut effect_for: impl FnMut(&PhysicalKey) -> Effect) -> Self {
        Self {
            keys: layout
                .keys()
                .map(|k| Key::new(k.region, k.keycode, k.name, effect_for(k)))
                .collect(),
        }
    }

    /// Every key of `model` set to the same effect
    pub fn uniform(model: Model, effect: Effect) -> Self {
        Self::from_layout(model.layout(), |_| effect.clone())
    }

    pub fn get(&self, region: Region, keycode: u8) -> Option<&Key> {
        self.keys
            .iter()
            .find(|k| k.region == region && k.keycode == keycode)
    }

    /// Replace the effect of one key, returning false if it is not in the map
    pub fn set_effect(&mut self, region: Region, keycode: u8, effect: Effect) -> bool {
        match self
            .keys
            .iter_mut()
            .find(|k| k.region == region && k.keycode == keycode)
        {
            Some(key) => {
                key.effect = effect;
                true
            }
            None => false,
        }
    }

    /// Set every key of one region
    pub fn set_region(&mut self, region: Region, effect: &Effect) {
        for key in self.keys.iter_mut().filter(|k| k.region == region) {
            key.effect = effect.clone();
        }
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push(key);
    }

    /// Remove a key, returning it if present
    pub fn remove(&mut self, region: Region, keycode: u8) -> Option<Key> {
        let index = self
            .keys
            .iter()
            .position(|k| k.region == region && k.keycode == keycode)?;
        Some(self.keys.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check the map holds exactly the physical keys of `layout`
    ///
    /// Duplicates are reported first, then keys the model does not have,
    /// then physical keys the map leaves out.
    pub fn validate(&self, layout: &Layout) -> Result<(), KeyMapError> {
        let mut seen = HashSet::with_capacity(self.keys.len());
        for key in &self.keys {
            if !seen.insert(key.id()) {
                return Err(KeyMapError::Duplicate {
                    region: key.region,
                    keycode: key.keycode,
                });
            }
        }

        if let Some(key) = self
            .keys
            .iter()
            .find(|k| layout.find(k.region, k.keycode).is_none())
        {
            return Err(KeyMapError::Unknown {
                model: layout.model,
                region: key.region,
                keycode: key.keycode,
            });
        }

        if let Some(missing) = layout
            .keys()
            .find(|k| !seen.contains(&(k.region, k.keycode)))
        {
            return Err(KeyMapError::Missing {
                region: missing.region,
                keycode: missing.keycode,
                name: missing.name,
            });
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a KeyMap {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl FromIterator<Key> for KeyMap {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
