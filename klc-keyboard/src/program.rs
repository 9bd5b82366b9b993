//! Lighting programs: the ordered packets of one update

use std::collections::BTreeSet;
use std::fmt;

use klc_transport::ReportKind;

use crate::dedup::EffectTable;
use crate::error::EncodeError;
use crate::keymap::KeyMap;
use crate::layout::{Model, Region};
use crate::protocol::{commit, effect, region};

/// Position of a packet within a program, reported on transmission failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Effect { id: u8 },
    Region(Region),
    Commit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect { id } => write!(f, "effect {id}"),
            Self::Region(region) => write!(f, "region {region}"),
            Self::Commit => f.write_str("commit"),
        }
    }
}

/// One packet and the primitive that carries it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub stage: Stage,
    pub kind: ReportKind,
    pub bytes: Vec<u8>,
}

impl Packet {
    /// Space-separated hex of the whole packet
    pub fn hex(&self) -> String {
        hex_bytes(&self.bytes)
    }

    /// Hex of the packet up to its last non-zero byte
    pub fn hex_trimmed(&self) -> String {
        let end = self
            .bytes
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        hex_bytes(&self.bytes[..end])
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A complete keymap plus the regions to push
#[derive(Debug, Clone, PartialEq)]
pub struct LightingUpdate {
    pub keymap: KeyMap,
    regions: Vec<Region>,
}

impl LightingUpdate {
    /// Push every region
    pub fn full(keymap: KeyMap) -> Self {
        Self {
            keymap,
            regions: Region::ALL.to_vec(),
        }
    }

    /// Push only the given regions; the keymap is still validated in full
    pub fn partial(keymap: KeyMap, regions: impl IntoIterator<Item = Region>) -> Self {
        let regions: BTreeSet<Region> = regions.into_iter().collect();
        Self {
            keymap,
            regions: regions.into_iter().collect(),
        }
    }

    /// Selected regions in send order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Keep this keymap and also push every region `earlier` selected
    ///
    /// Used when `self` replaces an update that was never sent.
    pub fn merge_regions(self, earlier: &LightingUpdate) -> Self {
        let regions = self.regions.iter().chain(&earlier.regions).copied();
        Self::partial(self.keymap, regions)
    }
}

/// Encoded packets of one update, in transmission order
#[derive(Debug, Clone)]
pub struct LightingProgram {
    pub model: Model,
    packets: Vec<Packet>,
    touched: Vec<Region>,
    effects: EffectTable,
}

impl LightingProgram {
    /// Validate and encode an update without any I/O
    ///
    /// Every animated effect of the keymap is encoded, even if only untouched
    /// regions use it, so an invalid effect is always rejected. Effect packets
    /// are emitted once, ahead of the first touched region referencing them.
    pub fn build(model: Model, update: &LightingUpdate) -> Result<Self, EncodeError> {
        let layout = model.layout();
        let geometry = layout.geometry;
        let keymap = &update.keymap;

        keymap.validate(layout)?;
        let effects = EffectTable::build(keymap)?;

        let mut effect_packets = Vec::with_capacity(effects.len());
        for entry in effects.iter() {
            let bytes = effect::encode(&entry.effect, entry.id, geometry.effect_packet_size)
                .map_err(|source| EncodeError::Effect {
                    id: entry.id,
                    key: entry.first_key.clone(),
                    source,
                })?;
            effect_packets.push(Some(bytes));
        }

        let touched: Vec<Region> = update
            .regions()
            .iter()
            .copied()
            .filter(|r| layout.has_region(*r))
            .collect();

        let mut packets = Vec::new();
        for &region in &touched {
            let referenced: BTreeSet<u8> = keymap
                .iter()
                .filter(|k| k.region == region)
                .filter_map(|k| effects.id_of(&k.effect))
                .filter(|&id| id != 0)
                .collect();
            for id in referenced {
                if let Some(bytes) = effect_packets[usize::from(id) - 1].take() {
                    packets.push(Packet {
                        stage: Stage::Effect { id },
                        kind: ReportKind::FeatureReport,
                        bytes,
                    });
                }
            }

            packets.push(Packet {
                stage: Stage::Region(region),
                kind: ReportKind::FeatureReport,
                bytes: region::encode(keymap, layout, region, &effects, geometry.region_packet_size)?,
            });
        }

        packets.push(Packet {
            stage: Stage::Commit,
            kind: ReportKind::Write,
            bytes: commit::encode(&touched, geometry.commit_packet_size),
        });

        Ok(Self {
            model,
            packets,
            touched,
            effects,
        })
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn into_packets(self) -> Vec<Packet> {
        self.packets
    }

    /// Regions this program stages, in send order
    pub fn touched(&self) -> &[Region] {
        &self.touched
    }

    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    /// Number of effect packets in the program
    pub fn effect_packet_count(&self) -> usize {
        self.packets
            .iter()
            .filter(|p| matches!(p.stage, Stage::Effect { .. }))
            .count()
    }
}
