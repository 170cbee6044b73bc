//! In-process render queue.
//!
//! Accepts render requests and runs them strictly one at a time on a
//! dedicated worker task, keeping a latest-state snapshot per
//! submission for callers that poll instead of consuming the event
//! channel themselves.

use std::path::PathBuf;
use std::sync::Mutex;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use vshort_models::{RenderRequest, RenderStage, RenderState, StateEvent};

use crate::config::RenderConfig;
use crate::pipeline::RenderPipeline;

/// Observer slot for one submitted render.
struct RenderSlot {
    last: RenderState,
    rx: UnboundedReceiver<StateEvent>,
}

/// Render queue manager: admits one render at a time to the worker.
pub struct RenderManager {
    job_tx: UnboundedSender<(RenderRequest, UnboundedSender<StateEvent>)>,
    slots: Mutex<Vec<RenderSlot>>,
    worker: JoinHandle<()>,
}

impl RenderManager {
    /// Start a manager whose worker renders from `source` with `config`.
    pub fn new(source: impl Into<PathBuf>, config: RenderConfig) -> Self {
        let (job_tx, mut job_rx) =
            mpsc::unbounded_channel::<(RenderRequest, UnboundedSender<StateEvent>)>();
        let pipeline = RenderPipeline::new(source, config);

        let worker = tokio::spawn(async move {
            // Requests are processed in submission order, one at a
            // time; a failed render never blocks the next request.
            while let Some((request, sink)) = job_rx.recv().await {
                if let Err(e) = pipeline.render(&request, sink).await {
                    error!(
                        output = %request.output_path.display(),
                        "Render failed: {}", e
                    );
                }
            }
            info!("Render worker stopped");
        });

        Self {
            job_tx,
            slots: Mutex::new(Vec::new()),
            worker,
        }
    }

    /// Queue a render request.
    ///
    /// Returns false if the worker has already stopped.
    pub fn submit(&self, request: RenderRequest) -> bool {
        let (tx, rx) = mpsc::unbounded_channel();
        let last = RenderState {
            output_path: request.output_path.clone(),
            stage: RenderStage::Start,
            progress: 0.0,
        };

        // Register the observer slot only once the worker has actually
        // accepted the request; a rejected submission must not leave a
        // phantom state behind.
        if self.job_tx.send((request, tx)).is_err() {
            return false;
        }
        self.slots
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RenderSlot { last, rx });
        true
    }

    /// Latest observed state of every submitted render, in submission
    /// order, draining any pending events.
    pub fn states(&self) -> Vec<RenderState> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots
            .iter_mut()
            .map(|slot| {
                while let Ok(event) = slot.rx.try_recv() {
                    slot.last = RenderState {
                        output_path: event.output_path,
                        stage: event.stage,
                        progress: event.progress,
                    };
                }
                slot.last.clone()
            })
            .collect()
    }

    /// Stop accepting requests and wait for queued renders to finish.
    pub async fn shutdown(self) {
        drop(self.job_tx);
        if let Err(e) = self.worker.await {
            error!("Render worker task failed: {}", e);
        }
    }
}
