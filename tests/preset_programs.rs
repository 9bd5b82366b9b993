//! Integration tests for CLI presets: options → keymap → packets.

use klc_driver::config::Config;
use klc_driver::preset::{Preset, PresetKind};
use klc_keyboard::protocol::region::{MODE_DISABLED, MODE_REACTIVE};
use klc_keyboard::{
    Color, KeyMap, LightingProgram, LightingUpdate, Model, Region, Stage, WaveDirection,
};

fn preset(kind: PresetKind) -> Preset {
    Preset {
        kind,
        color: Color::from_rgb8(0x10, 0x20, 0x30),
        color2: Some(Color::RED),
        duration: 900,
        wave: Some(WaveDirection::Y),
    }
}

fn build(model: Model, preset: &Preset) -> LightingProgram {
    let update = LightingUpdate::full(KeyMap::uniform(model, preset.effect()));
    LightingProgram::build(model, &update).unwrap()
}

#[test]
fn animated_preset_sends_one_shared_effect() {
    for kind in [PresetKind::Breathing, PresetKind::Shift] {
        let program = build(Model::FullSize, &preset(kind));
        let stages: Vec<Stage> = program.packets().iter().map(|p| p.stage).collect();
        // Every key shares the effect, so it goes out ahead of the first region
        assert_eq!(stages[0], Stage::Effect { id: 1 });
        assert_eq!(program.effect_packet_count(), 1, "{kind}");
        assert_eq!(stages.len(), 6);
    }
}

#[test]
fn inline_presets_carry_their_mode() {
    let program = build(Model::Compact, &preset(PresetKind::Reactive));
    let modifiers = &program.packets()[0];
    assert_eq!(modifiers.stage, Stage::Region(Region::Modifiers));
    // Anchor payload: main, active, duration, id, mode
    assert_eq!(&modifiers.bytes[4..7], &[0x10, 0x20, 0x30]);
    assert_eq!(&modifiers.bytes[7..10], &[255, 0, 0]);
    assert_eq!(&modifiers.bytes[10..12], &900u16.to_le_bytes());
    assert_eq!(modifiers.bytes[13], MODE_REACTIVE);

    let program = build(Model::Compact, &preset(PresetKind::Off));
    assert_eq!(program.packets()[0].bytes[13], MODE_DISABLED);
}

#[test]
fn configured_model_drives_layout() {
    let config = Config::from_toml("model = \"compact\"").unwrap();
    let program = build(config.model, &preset(PresetKind::Steady));
    assert_eq!(program.model, Model::Compact);
    assert_eq!(program.touched(), &Region::ALL);
}
