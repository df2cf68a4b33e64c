//! Record store abstraction
//!
//! This module defines the trait that storage adapters must implement for
//! versioned record persistence and the translation status surface.

use crate::domain::entity::EntityKind;
use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VersionedRecord;
use crate::domain::translation::{TranslationMap, TranslationStatus};
use crate::domain::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Fields of a record about to be inserted
#[derive(Debug, Clone)]
pub struct NewRecord {
    /// Domain fields, already validated and normalised
    pub fields: Map<String, Value>,

    /// Creating identity
    pub created_by: Option<UserId>,

    /// Initial translation status (set when a job will be scheduled)
    pub translation_status: Option<TranslationStatus>,
}

/// Changes applied by a version-checked update
#[derive(Debug, Clone)]
pub struct RecordPatch {
    /// Replacement domain fields (translatable columns pre-merged by the
    /// mutation service so unrelated locale keys survive)
    pub fields: Map<String, Value>,

    /// Updating identity
    pub updated_by: Option<UserId>,

    /// New translation status, if a job is being (re)scheduled; when set,
    /// the stored translation error is cleared in the same write
    pub translation_status: Option<TranslationStatus>,
}

/// Storage contract for versioned records
///
/// The store provides single-row conditional updates returning the fresh
/// row, single-row reads, and whole-value JSON column writes. The version
/// compare-and-swap in [`update_checked`](RecordStore::update_checked) is
/// the sole synchronization primitive; no explicit locks are taken.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a new record with `version = 1`
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` on persistence failure.
    async fn insert(&self, entity: EntityKind, record: NewRecord) -> Result<VersionedRecord>;

    /// Atomic conditional update: `WHERE id = $id AND version = $expected`,
    /// setting `version = $expected + 1`
    ///
    /// Returns the freshly updated record when exactly one row was affected,
    /// or `Ok(None)` when zero rows matched — the signal for a concurrent
    /// modification. Store-level failures take precedence and are returned
    /// as errors, distinguished from the conflict case.
    async fn update_checked(
        &self,
        entity: EntityKind,
        id: RecordId,
        expected_version: i32,
        patch: RecordPatch,
    ) -> Result<Option<VersionedRecord>>;

    /// Reads a single record
    async fn fetch(&self, entity: EntityKind, id: RecordId) -> Result<Option<VersionedRecord>>;

    /// Reads the current value of a translatable column
    ///
    /// Returns `Ok(None)` when the record exists but the column is absent
    /// or null, and `RecordNotFound` when the record itself is missing.
    async fn read_translations(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
    ) -> Result<Option<TranslationMap>>;

    /// Writes the translation status surface of a record
    ///
    /// `error` must be `Some` only for [`TranslationStatus::Failed`].
    async fn set_translation_status(
        &self,
        entity: EntityKind,
        id: RecordId,
        status: TranslationStatus,
        error: Option<&str>,
    ) -> Result<()>;

    /// Persists a merged translation map together with
    /// `status = completed, error = null` in one atomic update
    async fn write_translations(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
        translations: &TranslationMap,
    ) -> Result<()>;
}
