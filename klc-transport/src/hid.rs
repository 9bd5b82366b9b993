//! HID transport implementation over hidapi

use std::ffi::CString;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hidapi::{HidApi, HidDevice};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::TransportError;
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport for the keyboard lighting controller
///
/// hidapi calls block, so every packet is handed to the blocking pool while
/// the device handle stays behind a mutex. Callers can therefore put a
/// timeout around a send without stalling the async runtime.
pub struct HidTransport {
    device: Arc<Mutex<HidDevice>>,
    info: TransportDeviceInfo,
    closed: AtomicBool,
}

impl HidTransport {
    /// Open the controller at an explicit hidraw path (e.g. `/dev/hidraw3`)
    pub fn open(api: &HidApi, path: &str) -> Result<Self, TransportError> {
        let c_path = CString::new(path)
            .map_err(|_| TransportError::DeviceNotFound(format!("invalid path: {path}")))?;
        let device = api.open_path(&c_path)?;

        let info = match device.get_device_info() {
            Ok(dev) => TransportDeviceInfo {
                vid: dev.vendor_id(),
                pid: dev.product_id(),
                device_path: path.to_string(),
                serial: dev.serial_number().map(str::to_string),
                product_name: dev.product_string().map(str::to_string),
            },
            Err(e) => {
                debug!("Could not read device info for {}: {}", path, e);
                TransportDeviceInfo {
                    device_path: path.to_string(),
                    ..TransportDeviceInfo::default()
                }
            }
        };

        debug!("Opened HID transport {}", info);
        Ok(Self::from_device(device, info))
    }

    /// Wrap an already opened device
    pub fn from_device(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Arc::new(Mutex::new(device)),
            info,
            closed: AtomicBool::new(false),
        }
    }

    fn check_open(&self, data: &[u8]) -> Result<(), TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Disconnected);
        }
        if data.is_empty() {
            return Err(TransportError::EmptyPacket);
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for HidTransport {
    async fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError> {
        self.check_open(data)?;
        let device = Arc::clone(&self.device);
        let buf = data.to_vec();
        debug!(
            "Sending feature report 0x{:02X} ({} bytes)",
            buf[0],
            buf.len()
        );

        tokio::task::spawn_blocking(move || {
            let device = device.lock();
            device.send_feature_report(&buf)
        })
        .await??;
        Ok(())
    }

    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        self.check_open(data)?;
        let device = Arc::clone(&self.device);
        let buf = data.to_vec();
        let expected = buf.len();
        debug!("Writing report 0x{:02X} ({} bytes)", buf[0], expected);

        let written = tokio::task::spawn_blocking(move || {
            let device = device.lock();
            device.write(&buf)
        })
        .await??;

        if written < expected {
            return Err(TransportError::ShortWrite { written, expected });
        }
        Ok(())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    async fn is_connected(&self) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        let device = Arc::clone(&self.device);
        tokio::task::spawn_blocking(move || device.lock().get_product_string().is_ok())
            .await
            .unwrap_or(false)
    }

    async fn close(&self) -> Result<(), TransportError> {
        // HidDevice is released when the last handle drops
        self.closed.store(true, Ordering::SeqCst);
        debug!("HID transport {} closed", self.info.device_path);
        Ok(())
    }
}

impl Drop for HidTransport {
    fn drop(&mut self) {
        debug!("HidTransport dropped: {}", self.info.device_path);
    }
}
