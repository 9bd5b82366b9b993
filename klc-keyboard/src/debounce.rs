//! Coalescing of rapid lighting edits
//!
//! Interactive editors emit an update per keystroke or slider tick. The
//! debouncer waits for a quiet period and forwards only the newest keymap,
//! pushing every region any coalesced update selected.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::UpdateError;
use crate::program::LightingUpdate;
use crate::sequencer::{LightingSession, UpdateReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period after the last submission before it is applied
    pub quiet: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            quiet: Duration::from_millis(500),
        }
    }
}

/// Result of one forwarded update
pub type DebounceOutcome = Result<UpdateReport, UpdateError>;

/// Forwards the latest of a burst of updates to a [`LightingSession`]
pub struct UpdateDebouncer {
    update_tx: mpsc::UnboundedSender<LightingUpdate>,
    outcome_rx: mpsc::UnboundedReceiver<DebounceOutcome>,
    worker: JoinHandle<()>,
}

impl UpdateDebouncer {
    /// Must be called from within a Tokio runtime.
    pub fn spawn(session: Arc<LightingSession>, config: DebounceConfig) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(debounce_worker(session, update_rx, outcome_tx, config.quiet));
        Self {
            update_tx,
            outcome_rx,
            worker,
        }
    }

    /// Queue an update, replacing the keymap of any not applied yet
    ///
    /// Region selections of replaced updates are still pushed.
    pub fn submit(&self, update: LightingUpdate) -> Result<(), UpdateError> {
        self.update_tx
            .send(update)
            .map_err(|_| UpdateError::SessionClosed)
    }

    /// Wait for the result of the next forwarded update
    pub async fn next_outcome(&mut self) -> Option<DebounceOutcome> {
        self.outcome_rx.recv().await
    }

    /// Apply any pending update immediately and stop
    ///
    /// Returns the outcomes not yet collected with [`Self::next_outcome`].
    pub async fn flush(self) -> Vec<DebounceOutcome> {
        let Self {
            update_tx,
            mut outcome_rx,
            worker,
        } = self;

        drop(update_tx);
        if let Err(e) = worker.await {
            warn!("Debounce worker failed: {}", e);
        }

        let mut outcomes = Vec::new();
        while let Ok(outcome) = outcome_rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}

async fn debounce_worker(
    session: Arc<LightingSession>,
    mut rx: mpsc::UnboundedReceiver<LightingUpdate>,
    outcome_tx: mpsc::UnboundedSender<DebounceOutcome>,
    quiet: Duration,
) {
    let mut pending: Option<LightingUpdate> = None;

    loop {
        let Some(update) = pending.take() else {
            match rx.recv().await {
                Some(update) => {
                    pending = Some(update);
                    continue;
                }
                None => break,
            }
        };

        tokio::select! {
            next = rx.recv() => match next {
                Some(newer) => {
                    debug!("Coalescing lighting update");
                    pending = Some(newer.merge_regions(&update));
                }
                None => {
                    forward(&session, &update, &outcome_tx).await;
                    break;
                }
            },
            _ = tokio::time::sleep(quiet) => {
                forward(&session, &update, &outcome_tx).await;
            }
        }
    }

    debug!("Debounce worker stopped");
}

async fn forward(
    session: &LightingSession,
    update: &LightingUpdate,
    outcome_tx: &mpsc::UnboundedSender<DebounceOutcome>,
) {
    let outcome = session.apply(update).await;
    if let Err(e) = &outcome {
        warn!("Debounced lighting update failed: {}", e);
    }
    let _ = outcome_tx.send(outcome);
}
