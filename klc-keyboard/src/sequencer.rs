//! Per-device lighting sessions
//!
//! Encoding runs on the caller's task. Transmission runs on one worker task
//! per device, fed by a bounded queue, so updates from concurrent callers
//! never interleave on the wire.
//!
//! ```text
//! apply() ──encode──> [queue] ──> worker ──send/timeout──> Transport
//!    ^                                │
//!    └──────────── oneshot reply ─────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use klc_transport::{Transport, TransportDeviceInfo, TransportError};
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::UpdateError;
use crate::layout::{Model, Region};
use crate::program::{LightingProgram, LightingUpdate, Packet};

/// Bytes of each packet shown in debug logs
const LOG_PREFIX_LEN: usize = 16;

/// Tuning for a [`LightingSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Upper bound on every transport call
    pub send_timeout: Duration,
    /// Updates that may wait behind the one being sent
    pub queue_depth: usize,
    /// Answer overtaken queued updates with `Superseded` instead of sending them
    pub supersede_pending: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_millis(2000),
            queue_depth: 8,
            supersede_pending: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Sending,
}

/// What a successful update put on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub packets_sent: usize,
    pub effect_packets: usize,
    pub regions: Vec<Region>,
    pub elapsed: Duration,
}

struct Job {
    program: LightingProgram,
    reply: oneshot::Sender<Result<UpdateReport, UpdateError>>,
}

/// A live lighting session with one device
///
/// Created by [`LightingSession::attach`] and ended by
/// [`LightingSession::detach`]. Share it behind an `Arc` to apply updates
/// from several tasks.
pub struct LightingSession {
    model: Model,
    transport: Arc<dyn Transport>,
    request_tx: mpsc::Sender<Job>,
    state: Arc<Mutex<SequencerState>>,
    worker: JoinHandle<()>,
}

impl LightingSession {
    /// Start the transmission worker for `transport`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn attach(transport: Arc<dyn Transport>, model: Model, config: SequencerConfig) -> Self {
        let (request_tx, request_rx) = mpsc::channel(config.queue_depth.max(1));
        let state = Arc::new(Mutex::new(SequencerState::Idle));

        info!(
            "Attached {} session to {}",
            model,
            transport.device_info()
        );

        let worker = tokio::spawn(session_worker(
            Arc::clone(&transport),
            request_rx,
            Arc::clone(&state),
            config,
        ));

        Self {
            model,
            transport,
            request_tx,
            state,
            worker,
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn state(&self) -> SequencerState {
        *self.state.lock()
    }

    pub fn device_info(&self) -> &TransportDeviceInfo {
        self.transport.device_info()
    }

    /// Encode and transmit one update
    ///
    /// Encoding errors are returned before anything is queued. On a transport
    /// failure the device may hold a partially applied program; resend the
    /// whole update.
    pub async fn apply(&self, update: &LightingUpdate) -> Result<UpdateReport, UpdateError> {
        let program = LightingProgram::build(self.model, update)?;
        debug!(
            "Queueing program: {} packets, {} effects",
            program.packets().len(),
            program.effects().len()
        );

        let (reply, response_rx) = oneshot::channel();
        self.request_tx
            .send(Job { program, reply })
            .await
            .map_err(|_| UpdateError::SessionClosed)?;

        response_rx.await.map_err(|_| UpdateError::SessionClosed)?
    }

    /// Stop the worker after queued updates finish, then close the transport
    pub async fn detach(self) -> Result<(), TransportError> {
        let Self {
            transport,
            request_tx,
            worker,
            ..
        } = self;

        drop(request_tx);
        worker.await?;
        transport.close().await?;
        info!("Detached from {}", transport.device_info());
        Ok(())
    }
}

async fn session_worker(
    transport: Arc<dyn Transport>,
    mut rx: mpsc::Receiver<Job>,
    state: Arc<Mutex<SequencerState>>,
    config: SequencerConfig,
) {
    debug!("Lighting session worker started");

    while let Some(mut job) = rx.recv().await {
        if config.supersede_pending {
            while let Ok(newer) = rx.try_recv() {
                if newer.reply.is_closed() {
                    debug!("Caller went away, skipping queued update");
                    continue;
                }
                let stale = std::mem::replace(&mut job, newer);
                warn!("Dropping superseded lighting update");
                let _ = stale.reply.send(Err(UpdateError::Superseded));
            }
        }

        if job.reply.is_closed() {
            debug!("Caller went away, skipping queued update");
            continue;
        }

        *state.lock() = SequencerState::Sending;
        let result = transmit(transport.as_ref(), &job.program, config.send_timeout).await;
        *state.lock() = SequencerState::Idle;

        let _ = job.reply.send(result);
    }

    debug!("Lighting session worker stopped");
}

async fn transmit(
    transport: &dyn Transport,
    program: &LightingProgram,
    send_timeout: Duration,
) -> Result<UpdateReport, UpdateError> {
    let start = Instant::now();

    for packet in program.packets() {
        if let Err(source) = send_packet(transport, packet, send_timeout).await {
            warn!(
                "Lighting update aborted at {}: {} (device may be partially updated)",
                packet.stage, source
            );
            return Err(UpdateError::Transmit {
                stage: packet.stage,
                source,
            });
        }
    }

    let report = UpdateReport {
        packets_sent: program.packets().len(),
        effect_packets: program.effect_packet_count(),
        regions: program.touched().to_vec(),
        elapsed: start.elapsed(),
    };
    info!(
        "Applied lighting update: {} packets ({} effects) in {:.1}ms",
        report.packets_sent,
        report.effect_packets,
        report.elapsed.as_secs_f64() * 1000.0
    );
    Ok(report)
}

async fn send_packet(
    transport: &dyn Transport,
    packet: &Packet,
    send_timeout: Duration,
) -> Result<(), TransportError> {
    let prefix = &packet.bytes[..packet.bytes.len().min(LOG_PREFIX_LEN)];
    debug!(
        "[{}] {} ({} bytes): {:02x?}",
        packet.kind.tag(),
        packet.stage,
        packet.bytes.len(),
        prefix
    );

    tokio::time::timeout(send_timeout, transport.send(packet.kind, &packet.bytes))
        .await
        .map_err(|_| TransportError::Timeout)?
}
