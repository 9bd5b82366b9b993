//! Device commands: apply, off, live.

use std::sync::Arc;

use super::{open_transport, uniform_update, CommandResult};
use crate::cli::LiveLine;
use clap::Parser;
use klc_driver::config::Config;
use klc_driver::preset::{Preset, PresetKind};
use klc_keyboard::{
    Color, LightingSession, LightingUpdate, Model, Region, UpdateDebouncer, UpdateError,
    UpdateReport,
};
use klc_transport::{PrinterConfig, Transport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

fn print_report(report: &UpdateReport) {
    let regions: Vec<&str> = report.regions.iter().map(|r| r.name()).collect();
    println!(
        "Sent {} packets ({} effects) to {} in {:.1}ms",
        report.packets_sent,
        report.effect_packets,
        regions.join(", "),
        report.elapsed.as_secs_f64() * 1000.0
    );
}

/// Apply one update on a fresh session, then detach
///
/// A failed detach is only logged; the update's own outcome is returned.
async fn apply_once(
    transport: Arc<dyn Transport>,
    model: Model,
    update: &LightingUpdate,
    config: &Config,
) -> Result<UpdateReport, UpdateError> {
    let session = LightingSession::attach(transport, model, config.sequencer());
    let result = session.apply(update).await;
    if let Err(e) = session.detach().await {
        warn!("Failed to close device: {}", e);
    }
    result
}

async fn push(
    device: &str,
    model: Model,
    update: &LightingUpdate,
    config: &Config,
    printer: Option<PrinterConfig>,
) -> CommandResult {
    let transport = open_transport(device, printer)?;
    let report = apply_once(transport, model, update, config).await?;
    print_report(&report);
    Ok(())
}

/// Push a uniform preset to a device
pub async fn apply(
    device: &str,
    model: Model,
    preset: &Preset,
    regions: &[Region],
    config: &Config,
    printer: Option<PrinterConfig>,
) -> CommandResult {
    let update = uniform_update(model, preset, regions);
    push(device, model, &update, config, printer).await
}

/// Disable every key
pub async fn off(
    device: &str,
    model: Model,
    config: &Config,
    printer: Option<PrinterConfig>,
) -> CommandResult {
    let preset = Preset {
        kind: PresetKind::Off,
        color: Color::BLACK,
        color2: None,
        duration: 0,
        wave: None,
    };
    apply(device, model, &preset, &[], config, printer).await
}

/// Apply effect lines from stdin through the debouncer until EOF
pub async fn live(
    device: &str,
    model: Model,
    config: &Config,
    printer: Option<PrinterConfig>,
) -> CommandResult {
    let transport = open_transport(device, printer)?;
    let session = Arc::new(LightingSession::attach(
        transport,
        model,
        config.sequencer(),
    ));
    let debouncer = UpdateDebouncer::spawn(Arc::clone(&session), config.debounce());

    eprintln!("Reading effects from stdin (e.g. `-e breathing -c red`), Ctrl+D to finish");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match LiveLine::try_parse_from(line.split_whitespace()) {
            Ok(parsed) => {
                let update = uniform_update(model, &parsed.effect.preset(), &parsed.regions);
                debouncer.submit(update)?;
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    for outcome in debouncer.flush().await {
        match outcome {
            Ok(report) => print_report(&report),
            Err(e) => warn!("Update failed: {}", e),
        }
    }

    match Arc::try_unwrap(session) {
        Ok(session) => session.detach().await?,
        Err(_) => warn!("Session still shared at exit, skipping detach"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use klc_keyboard::{Effect, KeyMap, Stage};
    use klc_transport::{TransportDeviceInfo, TransportError};

    /// Accepts or rejects every packet, and always fails to close
    struct StubbornTransport {
        info: TransportDeviceInfo,
        reject_packets: bool,
    }

    impl StubbornTransport {
        fn new(reject_packets: bool) -> Arc<dyn Transport> {
            Arc::new(Self {
                info: TransportDeviceInfo::virtual_device("stubborn"),
                reject_packets,
            })
        }

        fn answer(&self) -> Result<(), TransportError> {
            if self.reject_packets {
                Err(TransportError::Disconnected)
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Transport for StubbornTransport {
        async fn send_feature_report(&self, _data: &[u8]) -> Result<(), TransportError> {
            self.answer()
        }

        async fn write(&self, _data: &[u8]) -> Result<(), TransportError> {
            self.answer()
        }

        fn device_info(&self) -> &TransportDeviceInfo {
            &self.info
        }

        async fn is_connected(&self) -> bool {
            true
        }

        async fn close(&self) -> Result<(), TransportError> {
            Err(TransportError::Disconnected)
        }
    }

    fn steady_update() -> LightingUpdate {
        LightingUpdate::full(KeyMap::uniform(Model::Compact, Effect::steady(Color::RED)))
    }

    #[tokio::test]
    async fn test_detach_failure_keeps_report() {
        let report = apply_once(
            StubbornTransport::new(false),
            Model::Compact,
            &steady_update(),
            &Config::default(),
        )
        .await
        .unwrap();
        assert_eq!(report.packets_sent, 5);
    }

    #[tokio::test]
    async fn test_detach_failure_keeps_update_error() {
        let err = apply_once(
            StubbornTransport::new(true),
            Model::Compact,
            &steady_update(),
            &Config::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Region(Region::Modifiers)));
    }
}
