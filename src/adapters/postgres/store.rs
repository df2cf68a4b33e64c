//! PostgreSQL record store
//!
//! [`RecordStore`] implementation over [`PostgresClient`]. Table and column
//! names are interpolated from the entity registry, which is a fixed set of
//! compile-time constants; all values travel as bound parameters.

use crate::adapters::postgres::client::PostgresClient;
use crate::adapters::store::traits::{NewRecord, RecordPatch, RecordStore};
use crate::domain::entity::EntityKind;
use crate::domain::ids::{RecordId, UserId};
use crate::domain::record::VersionedRecord;
use crate::domain::translation::{TranslationMap, TranslationStatus};
use crate::domain::{KartotekaError, Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio_postgres::Row;
use uuid::Uuid;

/// Columns returned by every row-producing statement
const RETURNING: &str = "id, version, fields, created_by, updated_by, created_at, updated_at, \
     ai_translation_status, ai_translation_error";

/// Record store backed by PostgreSQL
pub struct PostgresStore {
    client: Arc<PostgresClient>,
}

impl PostgresStore {
    /// Create a new store over an existing client
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

fn insert_sql(entity: EntityKind) -> String {
    format!(
        "INSERT INTO {table} (fields, created_by, ai_translation_status) \
         VALUES ($1, $2, $3) RETURNING {RETURNING}",
        table = entity.table()
    )
}

fn update_sql(entity: EntityKind) -> String {
    // The version predicate is the compare-and-swap: zero rows affected
    // means the record was deleted or concurrently modified. A scheduled
    // translation status clears the previous error in the same write.
    format!(
        "UPDATE {table} SET \
             fields = $3, \
             updated_by = $4, \
             updated_at = now(), \
             version = version + 1, \
             ai_translation_status = COALESCE($5, ai_translation_status), \
             ai_translation_error = CASE WHEN $5 IS NULL THEN ai_translation_error ELSE NULL END \
         WHERE id = $1 AND version = $2 RETURNING {RETURNING}",
        table = entity.table()
    )
}

fn row_to_record(row: &Row) -> Result<VersionedRecord> {
    let id: i64 = get(row, "id")?;
    let id = RecordId::new(id).map_err(|e| KartotekaError::Store(StoreError::Deserialization(e)))?;

    let fields: Value = get(row, "fields")?;
    let fields = fields.as_object().cloned().ok_or_else(|| {
        KartotekaError::Store(StoreError::Deserialization(
            "fields column is not a JSON object".to_string(),
        ))
    })?;

    let translation_status: Option<String> = get(row, "ai_translation_status")?;
    let translation_status = translation_status
        .map(|s| {
            s.parse::<TranslationStatus>()
                .map_err(|e| KartotekaError::Store(StoreError::Deserialization(e)))
        })
        .transpose()?;

    let created_by: Option<Uuid> = get(row, "created_by")?;
    let updated_by: Option<Uuid> = get(row, "updated_by")?;
    let created_at: Option<DateTime<Utc>> = get(row, "created_at")?;
    let updated_at: Option<DateTime<Utc>> = get(row, "updated_at")?;

    Ok(VersionedRecord {
        id,
        version: get(row, "version")?,
        created_by: created_by.map(UserId::new),
        updated_by: updated_by.map(UserId::new),
        created_at,
        updated_at,
        translation_status,
        translation_error: get(row, "ai_translation_error")?,
        fields,
    })
}

fn get<'a, T: tokio_postgres::types::FromSql<'a>>(row: &'a Row, column: &str) -> Result<T> {
    row.try_get(column).map_err(|e| {
        KartotekaError::Store(StoreError::Deserialization(format!(
            "Failed to read column '{column}': {e}"
        )))
    })
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn insert(&self, entity: EntityKind, record: NewRecord) -> Result<VersionedRecord> {
        let fields = Value::Object(record.fields);
        let status = record.translation_status.map(|s| s.as_str());
        let created_by = record.created_by.map(|u| *u.as_uuid());

        let row = self
            .client
            .query_opt(&insert_sql(entity), &[&fields, &created_by, &status])
            .await?
            .ok_or_else(|| {
                KartotekaError::Store(StoreError::QueryFailed(
                    "INSERT returned no row".to_string(),
                ))
            })?;

        row_to_record(&row)
    }

    async fn update_checked(
        &self,
        entity: EntityKind,
        id: RecordId,
        expected_version: i32,
        patch: RecordPatch,
    ) -> Result<Option<VersionedRecord>> {
        let fields = Value::Object(patch.fields);
        let status = patch.translation_status.map(|s| s.as_str());
        let updated_by = patch.updated_by.map(|u| *u.as_uuid());

        let row = self
            .client
            .query_opt(
                &update_sql(entity),
                &[&id.value(), &expected_version, &fields, &updated_by, &status],
            )
            .await?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn fetch(&self, entity: EntityKind, id: RecordId) -> Result<Option<VersionedRecord>> {
        let sql = format!(
            "SELECT {RETURNING} FROM {table} WHERE id = $1",
            table = entity.table()
        );
        let row = self.client.query_opt(&sql, &[&id.value()]).await?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn read_translations(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
    ) -> Result<Option<TranslationMap>> {
        let sql = format!(
            "SELECT fields->$2 AS translations FROM {table} WHERE id = $1",
            table = entity.table()
        );
        let row = self
            .client
            .query_opt(&sql, &[&id.value(), &column])
            .await?
            .ok_or_else(|| {
                KartotekaError::Store(StoreError::RecordNotFound {
                    table: entity.table().to_string(),
                    id: id.value(),
                })
            })?;

        let value: Option<Value> = get(&row, "translations")?;
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => TranslationMap::from_json(&value)
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
        let sql = format!(
            "UPDATE {table} SET ai_translation_status = $2, ai_translation_error = $3 \
             WHERE id = $1",
            table = entity.table()
        );
        let affected = self
            .client
            .execute(&sql, &[&id.value(), &status.as_str(), &error])
            .await?;

        if affected == 0 {
            return Err(KartotekaError::Store(StoreError::RecordNotFound {
                table: entity.table().to_string(),
                id: id.value(),
            }));
        }
        Ok(())
    }

    async fn write_translations(
        &self,
        entity: EntityKind,
        id: RecordId,
        column: &str,
        translations: &TranslationMap,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE {table} SET \
                 fields = jsonb_set(fields, ARRAY[$2::text], $3), \
                 ai_translation_status = 'completed', \
                 ai_translation_error = NULL \
             WHERE id = $1",
            table = entity.table()
        );
        let affected = self
            .client
            .execute(&sql, &[&id.value(), &column, &translations.to_json()])
            .await?;

        if affected == 0 {
            return Err(KartotekaError::Store(StoreError::RecordNotFound {
                table: entity.table().to_string(),
                id: id.value(),
            }));
        }
        Ok(())
    }
}
