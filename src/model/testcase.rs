// Test case identity

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A test case with a name and a set of attributes.
///
/// `name` is the case identity: file-mode artifacts are addressed by its hash.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl TestCase {
    /// Create a test case without attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
