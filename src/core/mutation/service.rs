//! Record mutation service
//!
//! Create and version-checked update of versioned records. The version
//! compare-and-swap is delegated to the store; this service owns draft
//! validation, the non-destructive pre-merge of translatable columns, and
//! source-locale change detection that triggers translation fan-out.

use crate::adapters::store::{NewRecord, RecordPatch, RecordStore};
use crate::core::mutation::validate::validate_draft;
use crate::core::translation::{LocaleSet, TranslationScheduler};
use crate::domain::{
    Caller, EntityKind, KartotekaError, RecordDraft, RecordId, Result, TranslationJob,
    TranslationStatus, VersionedRecord,
};
use std::sync::Arc;

/// Service applying caller-submitted mutations to versioned records
pub struct MutationService {
    store: Arc<dyn RecordStore>,
    scheduler: TranslationScheduler,
    locales: LocaleSet,
}

impl MutationService {
    /// Create a mutation service
    pub fn new(
        store: Arc<dyn RecordStore>,
        scheduler: TranslationScheduler,
        locales: LocaleSet,
    ) -> Self {
        Self {
            store,
            scheduler,
            locales,
        }
    }

    /// Create a new record at version 1
    ///
    /// Validates the draft against the entity's registry rules, inserts it
    /// attributed to the caller, and schedules translation fan-out for every
    /// translatable column populated with a source-locale entry.
    ///
    /// # Errors
    ///
    /// `ValidationError` on bad input, `StoreError` on persistence failure.
    /// Scheduling failures never surface here.
    pub async fn create(
        &self,
        entity: EntityKind,
        draft: RecordDraft,
        caller: &Caller,
    ) -> Result<VersionedRecord> {
        let draft = draft.normalized();
        validate_draft(entity, &draft, &caller.locale)?;

        let columns = self.columns_to_translate(entity, &draft, caller)?;

        let record = self
            .store
            .insert(
                entity,
                NewRecord {
                    fields: draft.into_fields(),
                    created_by: Some(caller.user_id),
                    translation_status: (!columns.is_empty())
                        .then_some(TranslationStatus::Pending),
                },
            )
            .await?;

        tracing::info!(
            entity = %entity,
            record_id = %record.id,
            user_id = %caller.user_id,
            "Record created"
        );

        for column in columns {
            self.scheduler.schedule(self.job(entity, record.id, column, caller));
        }

        Ok(record)
    }

    /// Apply a version-checked update
    ///
    /// The caller presents the version it last read; the write succeeds only
    /// if that version is still current, bumping it by exactly one. Zero
    /// rows affected without a store error means a concurrent modification
    /// and fails with the conflict error; store errors take precedence.
    ///
    /// Translatable columns are pre-merged over the stored maps so locale
    /// keys absent from the draft survive the wholesale field replacement.
    /// If the source-locale value of such a column changed, the same write
    /// resets the status surface to `pending` and a fan-out job is scheduled
    /// after the write succeeds.
    pub async fn update(
        &self,
        entity: EntityKind,
        id: RecordId,
        expected_version: i32,
        draft: RecordDraft,
        caller: &Caller,
    ) -> Result<VersionedRecord> {
        let mut draft = draft.normalized();
        validate_draft(entity, &draft, &caller.locale)?;

        let prior = self.store.fetch(entity, id).await?;
        let jobs = match &prior {
            Some(prior) => self.merge_and_detect(entity, id, &mut draft, prior, caller)?,
            // Missing record: fall through to the conditional write, which
            // reports the conflict uniformly
            None => Vec::new(),
        };

        let updated = self
            .store
            .update_checked(
                entity,
                id,
                expected_version,
                RecordPatch {
                    fields: draft.into_fields(),
                    updated_by: Some(caller.user_id),
                    translation_status: (!jobs.is_empty()).then_some(TranslationStatus::Pending),
                },
            )
            .await?;

        let record = updated.ok_or(KartotekaError::Conflict {
            entity: entity.table(),
            id: id.value(),
            expected_version,
        })?;

        tracing::info!(
            entity = %entity,
            record_id = %record.id,
            version = record.version,
            user_id = %caller.user_id,
            "Record updated"
        );

        for job in jobs {
            self.scheduler.schedule(job);
        }

        Ok(record)
    }

    /// Translatable columns of a create draft that carry a source-locale
    /// entry, so fan-out can start as soon as the record id is known
    fn columns_to_translate(
        &self,
        entity: EntityKind,
        draft: &RecordDraft,
        caller: &Caller,
    ) -> Result<Vec<&'static str>> {
        let mut columns = Vec::new();
        for column in entity.translatable_columns() {
            let map = draft.translations(column)?;
            if map.as_ref().and_then(|m| m.get(&caller.locale)).is_some() {
                columns.push(*column);
            }
        }
        Ok(columns)
    }

    /// Pre-merges translatable columns and collects fan-out jobs
    ///
    /// Change detection compares the caller-locale value only: unrelated
    /// locale keys are merged back in and never treated as a change.
    fn merge_and_detect(
        &self,
        entity: EntityKind,
        id: RecordId,
        draft: &mut RecordDraft,
        prior: &VersionedRecord,
        caller: &Caller,
    ) -> Result<Vec<TranslationJob>> {
        let mut jobs = Vec::new();
        for column in entity.translatable_columns() {
            let submitted = match draft.translations(column)? {
                Some(map) => map,
                None => continue,
            };

            let stored = prior.translations(column)?.unwrap_or_default();
            let merged = stored.merged_with(&submitted);
            draft.set_translations(column, &merged);

            let old_source = stored.get(&caller.locale);
            let new_source = merged.get(&caller.locale);
            if new_source.is_some() && old_source != new_source {
                jobs.push(self.job(entity, id, column, caller));
            }
        }
        Ok(jobs)
    }

    fn job(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
        caller: &Caller,
    ) -> TranslationJob {
        TranslationJob {
            entity,
            record_id: id,
            column: column.to_string(),
            source_locale: caller.locale.clone(),
            target_locales: self.locales.targets_excluding(&caller.locale),
            context: entity.context().to_string(),
        }
    }
}
