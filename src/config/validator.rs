//! API document validation: known resources, unique paths, sane rules.

use crate::config::ApiDocument;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;

pub const PEOPLE_RESOURCE: &str = "people";

/// Fields of the people resource that validation rules may target.
pub const PEOPLE_FIELDS: &[&str] = &["fname", "lname"];

/// Paths mounted by the common router; a collection may not take one of them.
pub const RESERVED_PATHS: &[&str] = &["/", "/health", "/ready", "/version", "/error"];

/// Route syntax characters: `:` starts a capture and `*` a wildcard.
fn has_route_syntax(s: &str) -> bool {
    s.contains(':') || s.contains('*')
}

pub fn validate(doc: &ApiDocument) -> Result<(), ConfigError> {
    if !doc.base_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "base_path must start with '/': {}",
            doc.base_path
        )));
    }
    if has_route_syntax(&doc.base_path) {
        return Err(ConfigError::Validation(format!(
            "base_path may not contain ':' or '*': {}",
            doc.base_path
        )));
    }
    let base = doc.base_path.trim_end_matches('/');
    let docs_path = format!("{}/openapi.json", base);

    let mut kinds = HashSet::new();
    let mut path_segments = HashSet::new();
    for res in &doc.resources {
        if res.resource != PEOPLE_RESOURCE {
            return Err(ConfigError::UnknownResource(res.resource.clone()));
        }
        if !kinds.insert(res.resource.as_str()) {
            return Err(ConfigError::DuplicateResource(res.resource.clone()));
        }
        if res.path_segment.is_empty()
            || res.path_segment.contains('/')
            || has_route_syntax(&res.path_segment)
        {
            return Err(ConfigError::Validation(format!(
                "invalid path segment '{}' for {}",
                res.path_segment, res.resource
            )));
        }
        let collection = format!("{}/{}", base, res.path_segment);
        if RESERVED_PATHS.contains(&collection.as_str()) || collection == docs_path {
            return Err(ConfigError::DuplicatePathSegment(collection));
        }
        if !path_segments.insert(res.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(res.path_segment.clone()));
        }
        if res.operations.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} must enable at least one operation",
                res.resource
            )));
        }
        let mut seen = HashSet::new();
        for op in &res.operations {
            if !seen.insert(op) {
                return Err(ConfigError::Validation(format!(
                    "operation {:?} listed twice for {}",
                    op, res.resource
                )));
            }
        }
        for (field, rule) in &res.validation {
            if !PEOPLE_FIELDS.contains(&field.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "validation rule for unknown field '{}'",
                    field
                )));
            }
            if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
                if min > max {
                    return Err(ConfigError::Validation(format!(
                        "{}: min_length {} exceeds max_length {}",
                        field, min, max
                    )));
                }
            }
            if let Some(ref pattern) = rule.pattern {
                Regex::new(pattern).map_err(|e| {
                    ConfigError::Validation(format!("invalid pattern for {}: {}", field, e))
                })?;
            }
        }
    }
    Ok(())
}
