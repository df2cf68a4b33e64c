//! In-memory record store
//!
//! A [`RecordStore`] implementation backed by a `HashMap`, used by the test
//! suite and for local development without a database. Semantics mirror the
//! PostgreSQL adapter, including the version compare-and-swap. Write
//! failures can be injected to exercise failure paths.

use crate::adapters::store::traits::{NewRecord, RecordPatch, RecordStore};
use crate::domain::entity::EntityKind;
use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VersionedRecord;
use crate::domain::translation::{TranslationMap, TranslationStatus};
use crate::domain::{KartotekaError, Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredRow {
    version: i32,
    created_by: Option<UserId>,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    translation_status: Option<TranslationStatus>,
    translation_error: Option<String>,
    fields: Map<String, Value>,
}

/// In-memory store with injectable write failures
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<(EntityKind, i64), StoredRow>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes subsequent data writes fail with a query error
    ///
    /// Status-only writes keep working so failure recording stays
    /// observable, as with a store that rejects a malformed value but
    /// accepts plain column updates.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KartotekaError::Store(StoreError::QueryFailed(
                "injected write failure".to_string(),
            )));
        }
        Ok(())
    }

    fn to_record(id: RecordId, row: &StoredRow) -> VersionedRecord {
        VersionedRecord {
            id,
            version: row.version,
            created_by: row.created_by,
            updated_by: row.updated_by,
            created_at: Some(row.created_at),
            updated_at: row.updated_at,
            translation_status: row.translation_status,
            translation_error: row.translation_error.clone(),
            fields: row.fields.clone(),
        }
    }

    fn not_found(entity: EntityKind, id: RecordId) -> KartotekaError {
        KartotekaError::Store(StoreError::RecordNotFound {
            table: entity.table().to_string(),
            id: id.value(),
        })
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, entity: EntityKind, record: NewRecord) -> Result<VersionedRecord> {
        self.check_writable()?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = StoredRow {
            version: 1,
            created_by: record.created_by,
            updated_by: None,
            created_at: Utc::now(),
            updated_at: None,
            translation_status: record.translation_status,
            translation_error: None,
            fields: record.fields,
        };

        let record_id = RecordId::new(id).map_err(KartotekaError::Serialization)?;
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        rows.insert((entity, id), row.clone());
        Ok(Self::to_record(record_id, &row))
    }

    async fn update_checked(
        &self,
        entity: EntityKind,
        id: RecordId,
        expected_version: i32,
        patch: RecordPatch,
    ) -> Result<Option<VersionedRecord>> {
        self.check_writable()?;

        let mut rows = self.rows.lock().expect("store mutex poisoned");
        let row = match rows.get_mut(&(entity, id.value())) {
            Some(row) => row,
            // Matches the conditional-write contract: zero rows affected
            None => return Ok(None),
        };

        if row.version != expected_version {
            return Ok(None);
        }

        row.version = expected_version + 1;
        row.fields = patch.fields;
        row.updated_by = patch.updated_by;
        row.updated_at = Some(Utc::now());
        if let Some(status) = patch.translation_status {
            row.translation_status = Some(status);
            row.translation_error = None;
        }

        Ok(Some(Self::to_record(id, row)))
    }

    async fn fetch(&self, entity: EntityKind, id: RecordId) -> Result<Option<VersionedRecord>> {
        let rows = self.rows.lock().expect("store mutex poisoned");
        Ok(rows
            .get(&(entity, id.value()))
            .map(|row| Self::to_record(id, row)))
    }

    async fn read_translations(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
    ) -> Result<Option<TranslationMap>> {
        let rows = self.rows.lock().expect("store mutex poisoned");
        let row = rows
            .get(&(entity, id.value()))
            .ok_or_else(|| Self::not_found(entity, id))?;

        match row.fields.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => TranslationMap::from_json(value)
                .map(Some)
                .map_err(|e| KartotekaError::Store(StoreError::Deserialization(e))),
        }
    }

    async fn set_translation_status(
        &self,
        entity: EntityKind,
        id: RecordId,
        status: TranslationStatus,
        error: Option<&str>,
    ) -> Result<()> {
        let mut rows = self.rows.lock().expect("store mutex poisoned");
        let row = rows
            .get_mut(&(entity, id.value()))
            .ok_or_else(|| Self::not_found(entity, id))?;

        row.translation_status = Some(status);
        row.translation_error = error.map(String::from);
        Ok(())
    }

    async fn write_translations(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
        translations: &TranslationMap,
    ) -> Result<()> {
        self.check_writable()?;

        let mut rows = self.rows.lock().expect("store mutex poisoned");
        let row = rows
            .get_mut(&(entity, id.value()))
            .ok_or_else(|| Self::not_found(entity, id))?;

        row.fields
            .insert(column.to_string(), translations.to_json());
        row.translation_status = Some(TranslationStatus::Completed);
        row.translation_error = None;
        Ok(())
    }
}
