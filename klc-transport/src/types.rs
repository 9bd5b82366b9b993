//! Common types for transport layer

use serde::Serialize;
use std::fmt;

/// Low-level HID primitive used to deliver a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// `SET_REPORT(Feature)` on the control endpoint (effect and region packets)
    FeatureReport,
    /// Interrupt OUT / output report write (commit packet)
    Write,
}

impl ReportKind {
    /// Short tag used in logs and monitor output
    pub fn tag(&self) -> &'static str {
        match self {
            Self::FeatureReport => "FEAT",
            Self::Write => "WRITE",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FeatureReport => write!(f, "feature report"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Device identification information
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// hidraw path or other transport-specific identifier
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// Info for a transport that is not backed by a USB device
    pub fn virtual_device(name: &str) -> Self {
        Self {
            device_path: name.to_string(),
            product_name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

impl fmt::Display for TransportDeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04x}:{:04x} {}",
            self.vid, self.pid, self.device_path
        )?;
        if let Some(name) = &self.product_name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}
