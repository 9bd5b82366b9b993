//! Recording transport shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use klc_transport::{ReportKind, Transport, TransportDeviceInfo, TransportError};
use parking_lot::Mutex;

/// How the transport answers the n-th call (0-based)
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Fail(usize),
    Hang(usize),
}

/// Records every packet; optionally delays, fails or hangs
pub struct RecordingTransport {
    info: TransportDeviceInfo,
    sent: Mutex<Vec<(ReportKind, Vec<u8>)>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
    fault: Option<Fault>,
    closed: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            info: TransportDeviceInfo::virtual_device("recording"),
            sent: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay: None,
            fault: None,
            closed: AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    pub fn sent(&self) -> Vec<(ReportKind, Vec<u8>)> {
        self.sent.lock().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn record(&self, kind: ReportKind, data: &[u8]) -> Result<(), TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = match self.fault {
            Some(Fault::Fail(n)) if n == call => Err(TransportError::Disconnected),
            Some(Fault::Hang(n)) if n == call => {
                std::future::pending::<()>().await;
                Ok(())
            }
            _ => {
                self.sent.lock().push((kind, data.to_vec()));
                Ok(())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_feature_report(&self, data: &[u8]) -> Result<(), TransportError> {
        self.record(ReportKind::FeatureReport, data).await
    }

    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        self.record(ReportKind::Write, data).await
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    async fn is_connected(&self) -> bool {
        !self.is_closed()
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
