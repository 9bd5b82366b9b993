//! PrinterTransport middleware for monitoring transport traffic
//!
//! Wraps any Transport implementation and prints every packet passing
//! through it, together with the device's verdict.
//!
//! # Example
//!
//! ```ignore
//! use klc_transport::{HidTransport, PrinterConfig, PrinterTransport};
//!
//! let transport = HidTransport::open(&api, "/dev/hidraw3")?;
//! let monitored = PrinterTransport::wrap(Arc::new(transport), PrinterConfig::default());
//! ```

use crate::{ReportKind, Transport, TransportDeviceInfo, TransportError};
use async_trait::async_trait;
use crossterm::style::Stylize;
use std::str::FromStr;
use std::sync::Arc;

/// Number of bytes shown in the one-line summary
const PREVIEW_BYTES: usize = 16;

/// Packet filter for selective display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacketFilter {
    #[default]
    All,
    FeatureReports,
    Writes,
    /// Only packets whose first byte (report ID) matches
    ReportId(u8),
}

impl FromStr for PacketFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "feature" | "features" | "feat" => Ok(Self::FeatureReports),
            "write" | "writes" => Ok(Self::Writes),
            s if s.starts_with("id=") || s.starts_with("0x") => {
                let hex_str = s.strip_prefix("id=").unwrap_or(s);
                let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
                u8::from_str_radix(hex_str, 16)
                    .map(Self::ReportId)
                    .map_err(|e| format!("Invalid report ID: {}", e))
            }
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

/// Configuration for the PrinterTransport
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show a full hex dump below each packet summary
    pub show_hex: bool,
    /// Filter for selective display
    pub filter: PacketFilter,
}

impl PrinterConfig {
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }

    pub fn with_filter(mut self, filter: PacketFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Transport middleware that prints all outgoing packets
pub struct PrinterTransport {
    inner: Arc<dyn Transport>,
    config: PrinterConfig,
}

impl PrinterTransport {
    /// Wrap a transport with printing middleware
    pub fn wrap(transport: Arc<dyn Transport>, config: PrinterConfig) -> Arc<dyn Transport> {
        Arc::new(Self {
            inner: transport,
            config,
        })
    }

    fn should_show(&self, kind: ReportKind, data: &[u8]) -> bool {
        match self.config.filter {
            PacketFilter::All => true,
            PacketFilter::FeatureReports => kind == ReportKind::FeatureReport,
            PacketFilter::Writes => kind == ReportKind::Write,
            PacketFilter::ReportId(id) => data.first() == Some(&id),
        }
    }

    fn print_packet(&self, kind: ReportKind, data: &[u8]) {
        if !self.should_show(kind, data) {
            return;
        }
        let preview = &data[..data.len().min(PREVIEW_BYTES)];
        eprintln!(
            "{} {:<5} len={:<4} {:02x?}",
            ">>>".cyan(),
            kind.tag().cyan().bold(),
            data.len(),
            preview
        );
        if self.config.show_hex {
            for (i, line) in data.chunks(16).enumerate() {
                eprintln!("    {}  {:04x}: {:02x?}", "HEX".dim(), i * 16, line);
            }
        }
    }

    fn print_result(&self, kind: ReportKind, data: &[u8], result: &Result<(), TransportError>) {
        if !self.should_show(kind, data) {
            return;
        }
        match result {
            Ok(()) => eprintln!("{} {}", "<<<".green(), "OK".green().bold()),
            Err(e) => eprintln!("{} {} {}", "<<<".red(), "ERR".red().bold(), e),
        }
    }

    async fn forward(&self, kind: ReportKind, data: &[u8]) -> Result<(), TransportError> {
        self.print_packet(kind, data);
        let result = match kind {
            ReportKind::FeatureReport => self.inner.send_feature_report(data).await,
            ReportKind::Write => self.inner.write(data).await,
        };
        self.print_result(kind, data, &result);
        result
    }
}

#[async_trait]
impl Transport for PrinterTransport {
    async fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError> {
        self.forward(ReportKind::FeatureReport, data).await
    }

    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        self.forward(ReportKind::Write, data).await
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }

    async fn is_connected(&self) -> bool {
        self.inner.is_connected().await
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.inner.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Sink {
        info: TransportDeviceInfo,
        sent: Mutex<Vec<(ReportKind, Vec<u8>)>>,
    }

    #[async_trait]
    impl Transport for Sink {
        async fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError> {
            self.sent
                .lock()
                .push((ReportKind::FeatureReport, data.to_vec()));
            Ok(())
        }

        async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
            self.sent.lock().push((ReportKind::Write, data.to_vec()));
            Err(TransportError::Timeout)
        }

        fn device_info(&self) -> &TransportDeviceInfo {
            &self.info
        }

        async fn is_connected(&self) -> bool {
            true
        }

        async fn close(&self) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[test]
    fn test_packet_filter_parse() {
        assert_eq!("all".parse::<PacketFilter>(), Ok(PacketFilter::All));
        assert_eq!(
            "feat".parse::<PacketFilter>(),
            Ok(PacketFilter::FeatureReports)
        );
        assert_eq!("writes".parse::<PacketFilter>(), Ok(PacketFilter::Writes));
        assert_eq!(
            "id=0e".parse::<PacketFilter>(),
            Ok(PacketFilter::ReportId(0x0e))
        );
        assert_eq!(
            "0x0D".parse::<PacketFilter>(),
            Ok(PacketFilter::ReportId(0x0d))
        );
        assert!("bogus".parse::<PacketFilter>().is_err());
    }

    #[tokio::test]
    async fn test_printer_forwards_packets_and_errors() {
        let sink = Arc::new(Sink {
            info: TransportDeviceInfo::virtual_device("sink"),
            sent: Mutex::new(Vec::new()),
        });
        let printer = PrinterTransport::wrap(sink.clone(), PrinterConfig::default());

        printer
            .send(ReportKind::FeatureReport, &[0x0e, 0x00, 0x04])
            .await
            .unwrap();
        let err = printer.send(ReportKind::Write, &[0x0d, 0x00]).await;
        assert!(matches!(err, Err(TransportError::Timeout)));

        let sent = sink.sent.lock();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], (ReportKind::FeatureReport, vec![0x0e, 0x00, 0x04]));
        assert_eq!(sent[1], (ReportKind::Write, vec![0x0d, 0x00]));
        assert_eq!(printer.device_info().device_path, "sink");
    }
}
