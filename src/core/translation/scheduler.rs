//! Fire-and-forget job scheduling
//!
//! The scheduler hands jobs to a background worker over a bounded channel.
//! Scheduling never blocks and never fails the triggering mutation: a full
//! queue or a stopped worker is logged and the job is dropped, leaving the
//! record at `pending` until an explicit re-trigger.

use crate::core::translation::pipeline::TranslationPipeline;
use crate::domain::TranslationJob;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default depth of the in-process job queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Handle used by the mutation service to enqueue jobs
#[derive(Clone)]
pub struct TranslationScheduler {
    tx: mpsc::Sender<TranslationJob>,
}

impl TranslationScheduler {
    /// Creates a scheduler and the receiving end for a worker
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<TranslationJob>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Enqueues a job, returning immediately
    ///
    /// Best-effort: a failure to enqueue is logged and swallowed, so the
    /// primary write can never be failed by translation scheduling.
    pub fn schedule(&self, job: TranslationJob) {
        tracing::debug!(
            entity = %job.entity,
            record_id = %job.record_id,
            column = %job.column,
            source_locale = %job.source_locale,
            "Scheduling translation job"
        );

        if let Err(e) = self.tx.try_send(job) {
            let job = match &e {
                mpsc::error::TrySendError::Full(job) => job,
                mpsc::error::TrySendError::Closed(job) => job,
            };
            tracing::warn!(
                entity = %job.entity,
                record_id = %job.record_id,
                column = %job.column,
                "Failed to enqueue translation job; record stays pending until re-triggered"
            );
        }
    }
}

/// Background worker draining the job queue
pub struct TranslationWorker;

impl TranslationWorker {
    /// Spawns the worker task
    ///
    /// The task runs until every scheduler handle is dropped and the queue
    /// is drained; the returned handle can be awaited on shutdown. Job
    /// failures are logged here and isolated per job.
    pub fn spawn(
        pipeline: Arc<TranslationPipeline>,
        mut rx: mpsc::Receiver<TranslationJob>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                if let Err(e) = pipeline.execute(&job).await {
                    tracing::warn!(
                        entity = %job.entity,
                        record_id = %job.record_id,
                        column = %job.column,
                        error = %e,
                        "Translation job failed"
                    );
                }
            }
            tracing::debug!("Translation worker stopped");
        })
    }
}
