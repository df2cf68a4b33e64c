//! Translation oracle adapter
//!
//! The oracle is an external AI translation service reached over HTTP. The
//! [`TranslationOracle`] trait is the seam the pipeline depends on; tests
//! substitute scripted implementations.

pub mod client;
pub mod models;
pub mod traits;

pub use client::HttpOracleClient;
pub use models::{TranslationRequest, TranslationResponse};
pub use traits::TranslationOracle;
