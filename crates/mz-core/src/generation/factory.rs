//! Background generation
//!
//! [`MazeFactory::order`] runs a generation request on a worker thread and
//! returns a [`GenerationHandle`]. The worker reports progress over a
//! bounded channel and polls a shared [`CancelToken`] between carving
//! steps. A cancelled run never delivers a maze, and a delivered one can no
//! longer be cancelled.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError, sync_channel};
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};

use super::{GenerationRequest, Progress, generate};
use crate::errors::GenerationError;
use crate::maze::MazeConfig;

/// Accepted reports strictly increase and stay within 0..=100, so at most
/// 100 values ever enter the channel
const PROGRESS_CAPACITY: usize = 100;

type Delivery = Box<dyn FnOnce(Arc<MazeConfig>) + Send + 'static>;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const DELIVERED: u8 = 2;

/// Shared cancellation flag
///
/// Cancellation and delivery exclude each other: once the worker claims
/// delivery a later [`cancel`](Self::cancel) has no effect, and once the
/// token is cancelled the worker can no longer deliver. Use one token per run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicU8>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag unless the maze was already delivered
    pub fn cancel(&self) {
        let _ = self
            .0
            .compare_exchange(RUNNING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst) == CANCELLED
    }

    pub fn is_delivered(&self) -> bool {
        self.0.load(Ordering::SeqCst) == DELIVERED
    }

    /// Switch to delivered; fails if the run was cancelled first
    fn claim_delivery(&self) -> bool {
        self.0
            .compare_exchange(RUNNING, DELIVERED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Filters progress so that only rising percentages up to 100 get through
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressGate {
    last: u8,
}

impl ProgressGate {
    /// Record `percentage` if it strictly exceeds the last accepted value
    pub fn accept(&mut self, percentage: u8) -> bool {
        if percentage > self.last && percentage <= 100 {
            self.last = percentage;
            true
        } else {
            false
        }
    }

    pub fn last(&self) -> u8 {
        self.last
    }
}

/// Progress sink for a worker thread
struct ChannelProgress {
    gate: ProgressGate,
    tx: SyncSender<u8>,
    cancel: CancelToken,
}

impl Progress for ChannelProgress {
    fn update(&mut self, percentage: u8) {
        if self.gate.accept(percentage) {
            // A full channel or a dropped handle only loses a report
            let _ = self.tx.try_send(percentage);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Starts generation runs on background threads
#[derive(Debug, Default, Clone, Copy)]
pub struct MazeFactory;

impl MazeFactory {
    pub fn new() -> Self {
        Self
    }

    /// Start a run; the result is collected with [`GenerationHandle::wait`]
    pub fn order(&self, request: GenerationRequest) -> GenerationHandle {
        self.spawn(request, CancelToken::new(), None)
    }

    /// Start a run that hands the finished maze to `on_delivery` from the
    /// worker thread, unless `cancel` is raised first
    pub fn order_with<F>(
        &self,
        request: GenerationRequest,
        cancel: CancelToken,
        on_delivery: F,
    ) -> GenerationHandle
    where
        F: FnOnce(Arc<MazeConfig>) + Send + 'static,
    {
        self.spawn(request, cancel, Some(Box::new(on_delivery)))
    }

    fn spawn(
        &self,
        request: GenerationRequest,
        cancel: CancelToken,
        on_delivery: Option<Delivery>,
    ) -> GenerationHandle {
        let (tx, rx) = sync_channel(PROGRESS_CAPACITY);
        let worker_cancel = cancel.clone();

        let worker = thread::spawn(move || {
            let mut progress = ChannelProgress {
                gate: ProgressGate::default(),
                tx,
                cancel: worker_cancel.clone(),
            };

            let result = match generate(&request, &mut progress) {
                Ok(maze) if worker_cancel.claim_delivery() => Ok(Arc::new(maze)),
                Ok(_) => Err(GenerationError::Cancelled),
                Err(e) => Err(e),
            };

            match &result {
                Ok(maze) => {
                    info!(
                        width = maze.width(),
                        height = maze.height(),
                        "maze delivered"
                    );
                    if let Some(deliver) = on_delivery {
                        deliver(Arc::clone(maze));
                    }
                }
                Err(GenerationError::Cancelled) => warn!("generation cancelled"),
                Err(e) => error!(error = %e, "generation failed"),
            }
            result
        });

        GenerationHandle {
            progress: rx,
            cancel,
            worker: Some(worker),
            latest: 0,
        }
    }
}

/// Handle to a running generation
///
/// Dropping the handle before [`wait`](Self::wait) cancels the run.
pub struct GenerationHandle {
    progress: Receiver<u8>,
    cancel: CancelToken,
    worker: Option<JoinHandle<Result<Arc<MazeConfig>, GenerationError>>>,
    latest: u8,
}

impl GenerationHandle {
    /// Ask the worker to stop at its next checkpoint
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Drain pending reports and return the most recent percentage
    pub fn try_progress(&mut self) -> u8 {
        loop {
            match self.progress.try_recv() {
                Ok(p) => self.latest = p,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return self.latest,
            }
        }
    }

    /// Raw progress stream, for callers that want to block on it
    pub fn progress(&self) -> &Receiver<u8> {
        &self.progress
    }

    /// Block until the worker finishes and return what it produced
    ///
    /// A maze that was delivered stays delivered even if
    /// [`cancel`](Self::cancel) is called afterwards.
    pub fn wait(mut self) -> Result<Arc<MazeConfig>, GenerationError> {
        let worker = self.worker.take().ok_or(GenerationError::WorkerPanicked)?;
        worker.join().map_err(|_| GenerationError::WorkerPanicked)?
    }
}

impl Drop for GenerationHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.cancel.cancel();
        }
    }
}

impl std::fmt::Debug for GenerationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationHandle")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("latest", &self.latest)
            .finish()
    }
}
