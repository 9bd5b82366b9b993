//! Model and layout listings.

use super::CommandResult;
use crossterm::style::Stylize;
use klc_keyboard::{Model, Region};

/// List supported models with per-region key counts
pub fn models() -> CommandResult {
    println!(
        "{:<10} {:>5} {:>10} {:>13} {:>6} {:>8}",
        "MODEL".bold(),
        "KEYS".bold(),
        "MODIFIERS".bold(),
        "ALPHANUMERIC".bold(),
        "ENTER".bold(),
        "SPECIAL".bold()
    );
    for model in Model::ALL {
        let layout = model.layout();
        let counts: Vec<usize> = Region::ALL
            .iter()
            .map(|r| layout.region_key_count(*r))
            .collect();
        println!(
            "{:<10} {:>5} {:>10} {:>13} {:>6} {:>8}",
            model.name(),
            layout.key_count(),
            counts[0],
            counts[1],
            counts[2],
            counts[3]
        );
    }
    Ok(())
}

/// Print the physical layout row by row
pub fn keys(model: Model) -> CommandResult {
    let layout = model.layout();
    println!("{} layout, {} keys\n", model, layout.key_count());

    for (row, keys) in layout.rows.iter().enumerate() {
        println!("{}", format!("Row {row}").bold());
        for key in keys.iter() {
            println!(
                "  {:<12} {:<13} 0x{:02x}",
                key.name,
                key.region.to_string(),
                key.keycode
            );
        }
    }

    println!("\nFirmware slots without a key on this model:");
    for region in Region::ALL {
        let empty: Vec<String> = region
            .slot_order()
            .filter(|kc| layout.find(region, *kc).is_none())
            .map(|kc| format!("0x{kc:02x}"))
            .collect();
        if !empty.is_empty() {
            println!("  {:<13} {}", region.to_string(), empty.join(" "));
        }
    }
    Ok(())
}
