//! Offline packet dumps.

use super::{uniform_update, CommandResult};
use crossterm::style::Stylize;
use klc_driver::preset::Preset;
use klc_keyboard::{LightingProgram, Model, Region, ReportKind};
use serde::Serialize;

#[derive(Serialize)]
struct PacketDump {
    stage: String,
    kind: ReportKind,
    len: usize,
    hex: String,
}

#[derive(Serialize)]
struct ProgramDump {
    model: &'static str,
    effects: usize,
    regions: Vec<&'static str>,
    packets: Vec<PacketDump>,
}

/// Build a uniform program and print its packets
pub fn dump(
    model: Model,
    preset: &Preset,
    regions: &[Region],
    json: bool,
    full: bool,
) -> CommandResult {
    let update = uniform_update(model, preset, regions);
    let program = LightingProgram::build(model, &update)?;

    let hex_of = |packet: &klc_keyboard::Packet| {
        if full {
            packet.hex()
        } else {
            packet.hex_trimmed()
        }
    };

    if json {
        let out = ProgramDump {
            model: model.name(),
            effects: program.effects().len(),
            regions: program.touched().iter().map(|r| r.name()).collect(),
            packets: program
                .packets()
                .iter()
                .map(|p| PacketDump {
                    stage: p.stage.to_string(),
                    kind: p.kind,
                    len: p.bytes.len(),
                    hex: hex_of(p),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} {} program: {} packets, {} effects",
        model,
        preset.kind,
        program.packets().len(),
        program.effects().len()
    );
    for packet in program.packets() {
        println!(
            "\n{} {} ({} bytes)",
            packet.kind.tag().cyan().bold(),
            packet.stage.to_string().bold(),
            packet.bytes.len()
        );
        println!("  {}", hex_of(packet));
    }
    Ok(())
}
