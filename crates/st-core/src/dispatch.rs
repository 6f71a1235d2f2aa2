// ABOUTME: Marshals work onto the UI execution context.
// ABOUTME: Jobs either run inline or queue on a channel drained by the UI loop.

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A unit of work to run on the UI context
pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, job: Job);
}

/// Runs every job immediately on the calling thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateDispatcher;

impl Dispatcher for ImmediateDispatcher {
    fn dispatch(&self, job: Job) {
        job();
    }
}

/// Queues jobs for a `DispatchQueue` owned by the UI loop
#[derive(Clone)]
pub struct QueueDispatcher {
    sender: UnboundedSender<Job>,
}

/// Receiving side of a `QueueDispatcher`
pub struct DispatchQueue {
    receiver: UnboundedReceiver<Job>,
}

impl QueueDispatcher {
    pub fn new() -> (Self, DispatchQueue) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, DispatchQueue { receiver })
    }
}

impl Dispatcher for QueueDispatcher {
    fn dispatch(&self, job: Job) {
        if self.sender.send(job).is_err() {
            tracing::warn!("Dispatch queue closed, dropping job");
        }
    }
}

impl DispatchQueue {
    /// Run every job queued so far, returns how many ran
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Run jobs as they arrive until every dispatcher is dropped
    pub async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            job();
        }
    }
}
