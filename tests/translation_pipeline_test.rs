//! Integration tests for the translation fan-out pipeline
//!
//! These tests run the pipeline (and the full mutation-to-worker path)
//! against the in-memory store with scripted oracles, so every outcome of a
//! fan-out job is observable without a network.

use async_trait::async_trait;
use kartoteka::adapters::oracle::{TranslationOracle, TranslationRequest, TranslationResponse};
use kartoteka::adapters::store::{MemoryStore, NewRecord, RecordStore};
use kartoteka::core::{
    JobOutcome, LocaleSet, MutationService, TranslationPipeline, TranslationScheduler,
    TranslationWorker,
};
use kartoteka::domain::{
    Caller, EntityKind, Locale, OracleError, RecordDraft, TranslationJob, TranslationStatus,
    UserId,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Oracle that answers every request with a fixed locale-to-text map
struct ScriptedOracle {
    answer: BTreeMap<String, String>,
    calls: AtomicUsize,
}

impl ScriptedOracle {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            answer: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationOracle for ScriptedOracle {
    async fn translate(
        &self,
        _request: &TranslationRequest,
    ) -> std::result::Result<TranslationResponse, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TranslationResponse {
            translations: self.answer.clone(),
        })
    }
}

/// Oracle that fails every request with a server error of the given message
struct FailingOracle {
    message: String,
    calls: AtomicUsize,
}

impl FailingOracle {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationOracle for FailingOracle {
    async fn translate(
        &self,
        _request: &TranslationRequest,
    ) -> std::result::Result<TranslationResponse, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(OracleError::ServerError {
            status: 503,
            message: self.message.clone(),
        })
    }
}

fn locale(code: &str) -> Locale {
    Locale::new(code).unwrap()
}

fn job(record_id: kartoteka::domain::RecordId, targets: &[&str]) -> TranslationJob {
    TranslationJob {
        entity: EntityKind::Profession,
        record_id,
        column: "name_translations".to_string(),
        source_locale: locale("en"),
        target_locales: targets.iter().map(|t| locale(t)).collect(),
        context: EntityKind::Profession.context().to_string(),
    }
}

async fn seed_profession(store: &MemoryStore, fields: serde_json::Value) -> kartoteka::domain::RecordId {
    let record = store
        .insert(
            EntityKind::Profession,
            NewRecord {
                fields: fields.as_object().cloned().unwrap(),
                created_by: Some(UserId::random()),
                translation_status: Some(TranslationStatus::Pending),
            },
        )
        .await
        .unwrap();
    record.id
}

#[tokio::test]
async fn test_partial_oracle_answer_merges_over_existing() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({"name_translations": {"en": "Cardiology"}})).await;

    // The oracle answers for sr-Latn only; ru stays untranslated
    let oracle = Arc::new(ScriptedOracle::new(&[("sr-Latn", "Kardiologija")]));
    let pipeline = TranslationPipeline::new(store.clone(), oracle);

    let outcome = pipeline
        .execute(&job(id, &["sr-Latn", "ru"]))
        .await
        .unwrap();
    assert_eq!(outcome, JobOutcome::Updated(vec![locale("sr-Latn")]));

    let record = store.fetch(EntityKind::Profession, id).await.unwrap().unwrap();
    assert_eq!(record.translation_status, Some(TranslationStatus::Completed));
    assert!(record.translation_error.is_none());

    let map = record.translations("name_translations").unwrap().unwrap();
    assert_eq!(map.get(&locale("en")), Some("Cardiology"));
    assert_eq!(map.get(&locale("sr-Latn")), Some("Kardiologija"));
    assert_eq!(map.get(&locale("ru")), None);
}

#[tokio::test]
async fn test_extraneous_oracle_keys_are_dropped() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({"name_translations": {"en": "Surgeon"}})).await;

    // "de" was never requested and must not be persisted
    let oracle = Arc::new(ScriptedOracle::new(&[
        ("ru", "Хирург"),
        ("de", "Chirurg"),
    ]));
    let pipeline = TranslationPipeline::new(store.clone(), oracle);

    let outcome = pipeline.execute(&job(id, &["ru"])).await.unwrap();
    assert_eq!(outcome, JobOutcome::Updated(vec![locale("ru")]));

    let record = store.fetch(EntityKind::Profession, id).await.unwrap().unwrap();
    let map = record.translations("name_translations").unwrap().unwrap();
    assert_eq!(map.get(&locale("ru")), Some("Хирург"));
    assert_eq!(map.get(&locale("de")), None);
}

#[tokio::test]
async fn test_failed_oracle_marks_failed_and_leaves_column_untouched() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({"name_translations": {"en": "Surgeon"}})).await;

    let oracle = Arc::new(FailingOracle::new("upstream unavailable"));
    let pipeline = TranslationPipeline::new(store.clone(), oracle.clone());

    let err = pipeline.execute(&job(id, &["ru"])).await.unwrap_err();
    assert!(err.to_string().contains("503"));
    // One call, no retry
    assert_eq!(oracle.call_count(), 1);

    let record = store.fetch(EntityKind::Profession, id).await.unwrap().unwrap();
    assert_eq!(record.translation_status, Some(TranslationStatus::Failed));
    let stored_error = record.translation_error.clone().expect("error must be recorded");
    assert!(stored_error.contains("upstream unavailable"));

    // Column unchanged
    let map = record.translations("name_translations").unwrap().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&locale("en")), Some("Surgeon"));
}

#[tokio::test]
async fn test_failure_message_is_bounded() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({"name_translations": {"en": "Surgeon"}})).await;

    let oracle = Arc::new(FailingOracle::new("x".repeat(8000)));
    let pipeline = TranslationPipeline::new(store.clone(), oracle);

    pipeline.execute(&job(id, &["ru"])).await.unwrap_err();

    let record = store.fetch(EntityKind::Profession, id).await.unwrap().unwrap();
    let stored_error = record.translation_error.expect("error must be recorded");
    assert!(stored_error.chars().count() <= 1000);
}

#[tokio::test]
async fn test_empty_source_completes_without_oracle_call() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({"name_translations": {}})).await;

    let oracle = Arc::new(ScriptedOracle::new(&[("ru", "never used")]));
    let pipeline = TranslationPipeline::new(store.clone(), oracle.clone());

    let outcome = pipeline.execute(&job(id, &["ru"])).await.unwrap();
    assert_eq!(outcome, JobOutcome::NothingToTranslate);
    assert_eq!(oracle.call_count(), 0);

    let record = store.fetch(EntityKind::Profession, id).await.unwrap().unwrap();
    assert_eq!(record.translation_status, Some(TranslationStatus::Completed));
    assert!(record.translation_error.is_none());
}

#[tokio::test]
async fn test_absent_column_completes_without_oracle_call() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({})).await;

    let oracle = Arc::new(ScriptedOracle::new(&[("ru", "never used")]));
    let pipeline = TranslationPipeline::new(store.clone(), oracle.clone());

    let outcome = pipeline.execute(&job(id, &["ru"])).await.unwrap();
    assert_eq!(outcome, JobOutcome::NothingToTranslate);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_answer_without_requested_targets_completes_untouched() {
    let store = Arc::new(MemoryStore::new());
    let id = seed_profession(&store, json!({"name_translations": {"en": "Surgeon"}})).await;

    // Only extraneous keys in the answer: completion with nothing written
    let oracle = Arc::new(ScriptedOracle::new(&[("de", "Chirurg")]));
    let pipeline = TranslationPipeline::new(store.clone(), oracle);

    let outcome = pipeline.execute(&job(id, &["ru"])).await.unwrap();
    assert_eq!(outcome, JobOutcome::NoNewTranslations);

    let record = store.fetch(EntityKind::Profession, id).await.unwrap().unwrap();
    assert_eq!(record.translation_status, Some(TranslationStatus::Completed));
    let map = record.translations("name_translations").unwrap().unwrap();
    assert_eq!(map.len(), 1);
}

#[tokio::test]
async fn test_create_to_worker_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    let oracle = Arc::new(ScriptedOracle::new(&[
        ("sr-Latn", "Hirurg"),
        ("ru", "Хирург"),
    ]));

    let (scheduler, rx) = TranslationScheduler::new(16);
    let pipeline = Arc::new(TranslationPipeline::new(store.clone(), oracle));
    let worker = TranslationWorker::spawn(pipeline, rx);

    let service = MutationService::new(store.clone(), scheduler, LocaleSet::default());
    let caller = Caller::new(UserId::random(), locale("en"));
    let draft = RecordDraft::from_value(json!({"name_translations": {"en": "Surgeon"}})).unwrap();
    let record = service
        .create(EntityKind::Profession, draft, &caller)
        .await
        .unwrap();
    assert_eq!(record.translation_status, Some(TranslationStatus::Pending));

    // Dropping the service closes the queue; the worker drains and exits
    drop(service);
    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker should drain the queue")
        .unwrap();

    let finished = store
        .fetch(EntityKind::Profession, record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(finished.translation_status, Some(TranslationStatus::Completed));
    let map = finished.translations("name_translations").unwrap().unwrap();
    assert_eq!(map.get(&locale("en")), Some("Surgeon"));
    assert_eq!(map.get(&locale("sr-Latn")), Some("Hirurg"));
    assert_eq!(map.get(&locale("ru")), Some("Хирург"));

    // The triggering mutation already returned; the fan-out never blocked it
    assert_eq!(record.version, 1);
}

#[tokio::test]
async fn test_worker_continues_after_job_failure() {
    let store = Arc::new(MemoryStore::new());
    let first = seed_profession(&store, json!({"name_translations": {"en": "Surgeon"}})).await;
    let second = seed_profession(&store, json!({"name_translations": {}})).await;

    let oracle = Arc::new(FailingOracle::new("boom"));
    let (scheduler, rx) = TranslationScheduler::new(16);
    let pipeline = Arc::new(TranslationPipeline::new(store.clone(), oracle));
    let worker = TranslationWorker::spawn(pipeline, rx);

    scheduler.schedule(job(first, &["ru"]));
    scheduler.schedule(job(second, &["ru"]));
    drop(scheduler);

    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker should drain the queue")
        .unwrap();

    // The failure of the first job did not stop the second
    let first_record = store.fetch(EntityKind::Profession, first).await.unwrap().unwrap();
    assert_eq!(first_record.translation_status, Some(TranslationStatus::Failed));
    let second_record = store.fetch(EntityKind::Profession, second).await.unwrap().unwrap();
    assert_eq!(
        second_record.translation_status,
        Some(TranslationStatus::Completed)
    );
}
