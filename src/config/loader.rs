//! Load the API document from a file or fall back to the embedded default.

use crate::config::ApiDocument;
use crate::error::ConfigError;
use std::path::Path;

/// Document shipped with the binary: full CRUD on `/api/people`.
pub const DEFAULT_API_DOCUMENT: &str = include_str!("../../api/people.json");

pub fn parse_document(raw: &str) -> Result<ApiDocument, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))
}

pub fn default_document() -> Result<ApiDocument, ConfigError> {
    parse_document(DEFAULT_API_DOCUMENT)
}

/// Read the document at `path`, or the embedded default when `path` is None.
pub async fn load_document(path: Option<&Path>) -> Result<ApiDocument, ConfigError> {
    match path {
        Some(p) => {
            let raw = tokio::fs::read_to_string(p)
                .await
                .map_err(|e| ConfigError::Load(format!("{}: {}", p.display(), e)))?;
            tracing::info!(path = %p.display(), "loaded api document");
            parse_document(&raw)
        }
        None => default_document(),
    }
}
