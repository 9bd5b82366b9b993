//! Transport abstraction layer for per-key keyboard lighting controllers
//!
//! The lighting controller accepts two kinds of HID traffic:
//!
//! - feature reports on the control endpoint (effect and region packets)
//! - plain output report writes (the commit packet)
//!
//! Every call is a blocking request/response from the caller's point of view:
//! it resolves once the device has accepted or rejected the packet.
//! Device discovery is left to the caller; transports are opened from an
//! explicit device path.

pub mod error;
pub mod printer;
pub mod types;

mod hid;

pub use error::TransportError;
pub use hid::HidTransport;
pub use printer::{PacketFilter, PrinterConfig, PrinterTransport};
pub use types::{ReportKind, TransportDeviceInfo};

use async_trait::async_trait;

/// The core transport trait - all backends implement this
///
/// Buffers are sent verbatim; the first byte is the HID report ID.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a feature report and wait until the device accepts it
    async fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Write an output report and wait until it is fully written
    async fn write(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Dispatch a packet with the given primitive
    async fn send(&self, kind: ReportKind, data: &[u8]) -> Result<(), TransportError> {
        match kind {
            ReportKind::FeatureReport => self.send_feature_report(data).await,
            ReportKind::Write => self.write(data).await,
        }
    }

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Check if transport is still connected
    async fn is_connected(&self) -> bool;

    /// Close the transport gracefully
    async fn close(&self) -> Result<(), TransportError>;
}
