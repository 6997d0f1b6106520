// Load phase results

use super::TestCase;
use serde::{Deserialize, Serialize};

/// A test that could not be collected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadError {
    pub name: String,
    pub message: String,
}

/// Tests discovered during the load phase, plus the ones that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoadResult {
    #[serde(default)]
    pub tests: Vec<TestCase>,
    #[serde(default)]
    pub load_errors: Vec<LoadError>,
}

impl LoadResult {
    pub fn new(tests: Vec<TestCase>, load_errors: Vec<LoadError>) -> Self {
        Self { tests, load_errors }
    }
}

impl LoadError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}
