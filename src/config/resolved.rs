//! Resolved API model: document validated and flattened for runtime use.

use crate::config::validator::{validate, PEOPLE_RESOURCE};
use crate::config::{ApiDocument, Operation, ValidationRule};
use crate::error::ConfigError;
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
pub struct ResolvedResource {
    pub path_segment: String,
    pub operations: HashSet<Operation>,
    pub validation: HashMap<String, ValidationRule>,
}

impl ResolvedResource {
    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    /// Collection path, e.g. "/api/people".
    pub fn collection_path(&self, base_path: &str) -> String {
        format!("{}/{}", base_path.trim_end_matches('/'), self.path_segment)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedApi {
    pub base_path: String,
    pub people: Option<ResolvedResource>,
}

impl ResolvedApi {
    pub fn people_path(&self) -> Option<String> {
        self.people.as_ref().map(|r| r.collection_path(&self.base_path))
    }
}

/// Build the resolved model from a raw document (validates first).
pub fn resolve(doc: &ApiDocument) -> Result<ResolvedApi, ConfigError> {
    validate(doc)?;
    let people = doc
        .resources
        .iter()
        .find(|r| r.resource == PEOPLE_RESOURCE)
        .map(|r| ResolvedResource {
            path_segment: r.path_segment.clone(),
            operations: r.operations.iter().copied().collect(),
            validation: r.validation.clone(),
        });
    if people.is_none() {
        tracing::warn!("api document declares no people resource; only operational routes will be served");
    }
    Ok(ResolvedApi {
        base_path: doc.base_path.trim_end_matches('/').to_string(),
        people,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResourceConfig;

    #[test]
    fn resolves_paths_and_operations() {
        let doc = ApiDocument {
            base_path: "/api/".into(),
            resources: vec![ResourceConfig {
                resource: "people".into(),
                path_segment: "folks".into(),
                operations: vec![Operation::ReadAll, Operation::Create],
                validation: HashMap::new(),
            }],
        };
        let api = resolve(&doc).unwrap();
        assert_eq!(api.base_path, "/api");
        assert_eq!(api.people_path().as_deref(), Some("/api/folks"));
        let people = api.people.unwrap();
        assert!(people.allows(Operation::Create));
        assert!(!people.allows(Operation::Delete));
    }

    #[test]
    fn root_base_path_resolves_to_empty_prefix() {
        let doc = ApiDocument {
            base_path: "/".into(),
            resources: vec![ResourceConfig {
                resource: "people".into(),
                path_segment: "people".into(),
                operations: vec![Operation::ReadAll],
                validation: HashMap::new(),
            }],
        };
        assert_eq!(resolve(&doc).unwrap().people_path().as_deref(), Some("/people"));
    }
}
