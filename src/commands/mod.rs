//! Command handlers for the CLI application.
//!
//! - `layout`: read-only model and key listings (models, keys)
//! - `dump`: offline packet dumps
//! - `apply`: device commands (apply, off, live)

pub mod apply;
pub mod dump;
pub mod layout;

use std::sync::Arc;

use hidapi::HidApi;
use klc_driver::config::Config;
use klc_driver::preset::Preset;
use klc_keyboard::{KeyMap, LightingUpdate, Model, Region};
use klc_transport::{HidTransport, PacketFilter, PrinterConfig, PrinterTransport, Transport};
use tracing::debug;

/// Result type for command handlers
pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Create printer config from CLI flags
pub fn printer_config(
    monitor: bool,
    hex: bool,
    filter: Option<PacketFilter>,
) -> Option<PrinterConfig> {
    monitor.then(|| {
        PrinterConfig::default()
            .with_hex(hex)
            .with_filter(filter.unwrap_or_default())
    })
}

/// `--model`, else the configured model
pub fn resolve_model(model: Option<Model>, config: &Config) -> Model {
    model.unwrap_or(config.model)
}

/// Uniform keymap for `model`; an empty region list selects every region
pub fn uniform_update(model: Model, preset: &Preset, regions: &[Region]) -> LightingUpdate {
    let keymap = KeyMap::uniform(model, preset.effect());
    if regions.is_empty() {
        LightingUpdate::full(keymap)
    } else {
        LightingUpdate::partial(keymap, regions.iter().copied())
    }
}

/// Open a hidraw path, wrapping it with the printer when monitoring
pub fn open_transport(
    device: &str,
    printer: Option<PrinterConfig>,
) -> Result<Arc<dyn Transport>, Box<dyn std::error::Error>> {
    let api = HidApi::new()?;
    let transport: Arc<dyn Transport> = Arc::new(HidTransport::open(&api, device)?);
    debug!("Opened {}", transport.device_info());

    Ok(match printer {
        Some(config) => PrinterTransport::wrap(transport, config),
        None => transport,
    })
}
