//! Translation fan-out pipeline
//!
//! Executes one [`TranslationJob`]: read the source text, call the oracle
//! once, merge the usable subset of its answer over the stored map, persist.
//! Progress is tracked on the record's status surface; failures are terminal
//! per job and never retried here.

use crate::adapters::oracle::{TranslationOracle, TranslationRequest};
use crate::adapters::store::RecordStore;
use crate::domain::{Locale, Result, TranslationJob, TranslationMap, TranslationStatus};
use std::sync::Arc;

/// Upper bound on the persisted failure message
const MAX_ERROR_LEN: usize = 1000;

/// How a job concluded, for logging and the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Source text absent or no targets remained; nothing to do
    NothingToTranslate,

    /// The oracle answered, but with no usable entry for any requested
    /// target; the column was left untouched
    NoNewTranslations,

    /// The merged map was persisted; carries the locales this job filled
    Updated(Vec<Locale>),
}

/// The out-of-band worker logic of the translation fan-out
pub struct TranslationPipeline {
    store: Arc<dyn RecordStore>,
    oracle: Arc<dyn TranslationOracle>,
}

impl TranslationPipeline {
    /// Create a pipeline over a store and an oracle
    pub fn new(store: Arc<dyn RecordStore>, oracle: Arc<dyn TranslationOracle>) -> Self {
        Self { store, oracle }
    }

    /// Execute one translation job
    ///
    /// Marks the record `in_progress` before any network I/O so a crash
    /// mid-flight is observable rather than stuck at `pending`. On any
    /// failure after that point the record is marked `failed` with a
    /// truncated message, and the error is returned for the caller's log.
    pub async fn execute(&self, job: &TranslationJob) -> Result<JobOutcome> {
        self.store
            .set_translation_status(
                job.entity,
                job.record_id,
                TranslationStatus::InProgress,
                None,
            )
            .await?;

        match self.run(job).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                let message = truncate_error(&e.to_string());
                if let Err(status_err) = self
                    .store
                    .set_translation_status(
                        job.entity,
                        job.record_id,
                        TranslationStatus::Failed,
                        Some(&message),
                    )
                    .await
                {
                    tracing::error!(
                        entity = %job.entity,
                        record_id = %job.record_id,
                        error = %status_err,
                        "Failed to record translation failure"
                    );
                }
                Err(e)
            }
        }
    }

    async fn run(&self, job: &TranslationJob) -> Result<JobOutcome> {
        let existing = self
            .store
            .read_translations(job.entity, job.record_id, &job.column)
            .await?
            .unwrap_or_default();

        let source_text = match existing.get(&job.source_locale) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                // Nothing to translate is completion, not failure
                self.complete(job).await?;
                return Ok(JobOutcome::NothingToTranslate);
            }
        };

        let targets = job.effective_targets();
        if targets.is_empty() {
            self.complete(job).await?;
            return Ok(JobOutcome::NothingToTranslate);
        }

        let request = TranslationRequest {
            text: source_text,
            source_locale: job.source_locale.as_str().to_string(),
            target_locales: targets.iter().map(|l| l.as_str().to_string()).collect(),
            context: job.context.clone(),
        };

        let response = self.oracle.translate(&request).await?;

        // Keep only requested targets with non-empty answers; extraneous
        // keys and missing requested keys are both fine
        let mut filtered = TranslationMap::new();
        for target in &targets {
            if let Some(text) = response.translations.get(target.as_str()) {
                filtered.insert(target.clone(), text.clone());
            }
        }

        if filtered.is_empty() {
            self.complete(job).await?;
            return Ok(JobOutcome::NoNewTranslations);
        }

        let updated: Vec<Locale> = filtered.locales().cloned().collect();
        let merged = existing.merged_with(&filtered);

        self.store
            .write_translations(job.entity, job.record_id, &job.column, &merged)
            .await?;

        tracing::info!(
            entity = %job.entity,
            record_id = %job.record_id,
            column = %job.column,
            updated_locales = ?updated.iter().map(Locale::as_str).collect::<Vec<_>>(),
            "Translation job completed"
        );

        Ok(JobOutcome::Updated(updated))
    }

    async fn complete(&self, job: &TranslationJob) -> Result<()> {
        self.store
            .set_translation_status(
                job.entity,
                job.record_id,
                TranslationStatus::Completed,
                None,
            )
            .await
    }
}

/// Truncates a failure message to the bounded length stored on the record
fn truncate_error(message: &str) -> String {
    if message.chars().count() <= MAX_ERROR_LEN {
        message.to_string()
    } else {
        message.chars().take(MAX_ERROR_LEN).collect()
    }
}
