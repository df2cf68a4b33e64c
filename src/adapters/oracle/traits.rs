//! Translation oracle abstraction

use crate::adapters::oracle::models::{TranslationRequest, TranslationResponse};
use crate::domain::OracleError;
use async_trait::async_trait;

/// Contract for translation oracles
///
/// The pipeline makes exactly one call per job and never retries; any retry
/// or batching strategy belongs behind this trait. Implementations must be
/// safe to share across worker tasks.
#[async_trait]
pub trait TranslationOracle: Send + Sync {
    /// Translate one source text into the requested target locales
    ///
    /// Partial coverage of `target_locales` is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] when the oracle cannot be reached, times
    /// out, or responds with a non-success status or an unparseable body.
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> std::result::Result<TranslationResponse, OracleError>;
}
