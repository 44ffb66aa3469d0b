//! Asynchronous classification service.
//!
//! Runs a [`WindowResolver`] on a dedicated task so a heavyweight model stays
//! off the frame loop. Full windows go in over one bounded channel, verdicts
//! come back in submission order over another.

use nalgebra::DMatrix;
use tokio::sync::mpsc;

use repcount_core::{Error, Result};

use crate::resolver::{WindowResolver, WindowVerdict};

/// Service channel sizing
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Windows waiting for the worker
    pub input_queue_size: usize,
    /// Verdicts waiting for the caller
    pub output_queue_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            input_queue_size: 16,
            output_queue_size: 16,
        }
    }
}

pub struct ClassifierService {
    input_tx: mpsc::Sender<DMatrix<f64>>,
    output_rx: mpsc::Receiver<Result<WindowVerdict>>,
}

impl ClassifierService {
    /// Spawn the worker on the current tokio runtime
    pub fn start(resolver: WindowResolver, config: ServiceConfig) -> Self {
        let (input_tx, mut input_rx) = mpsc::channel::<DMatrix<f64>>(config.input_queue_size);
        let (output_tx, output_rx) = mpsc::channel(config.output_queue_size);

        tokio::spawn(async move {
            while let Some(window) = input_rx.recv().await {
                let verdict = resolver.resolve(&window);
                if let Err(e) = &verdict {
                    tracing::warn!("Window of {} frames not resolved: {}", window.nrows(), e);
                }
                if output_tx.send(verdict).await.is_err() {
                    break;
                }
            }
            tracing::debug!("Classifier service worker stopped");
        });

        Self {
            input_tx,
            output_rx,
        }
    }

    /// Queue a full window for resolution
    pub async fn submit(&self, window: DMatrix<f64>) -> Result<()> {
        self.input_tx
            .send(window)
            .await
            .map_err(|_| Error::ServiceClosed)
    }

    /// Next verdict; `None` once the worker has stopped and the queue is drained
    pub async fn recv(&mut self) -> Option<Result<WindowVerdict>> {
        self.output_rx.recv().await
    }

    /// Next verdict if one is already waiting
    pub fn try_recv(&mut self) -> Option<Result<WindowVerdict>> {
        self.output_rx.try_recv().ok()
    }
}
