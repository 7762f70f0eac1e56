//! Raw API document types as read from JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Operations a resource may expose. Each maps to one generated route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ReadAll,
    ReadOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ReadAll,
        Operation::ReadOne,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub min_length: Option<u32>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource kind. Only `people` is backed by a store.
    pub resource: String,
    pub path_segment: String,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub validation: HashMap<String, ValidationRule>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default = "default_base_path")]
    pub base_path: String,
    pub resources: Vec<ResourceConfig>,
}

fn default_base_path() -> String {
    "/api".into()
}
