// Entry parameters handed to a test tool by its launcher

use crate::codec::ResultCodec;
use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntryParam {
    /// Unique identifier of the task
    #[serde(default)]
    pub task_id: String,

    /// Directory holding the code under test
    #[serde(default)]
    pub project_path: String,

    /// Test context information
    #[serde(default)]
    pub context: BTreeMap<String, String>,

    /// Selectors choosing the test cases to run
    #[serde(default)]
    pub test_selectors: Vec<String>,

    /// Collectors gathering reports
    #[serde(default)]
    pub collectors: Vec<String>,

    /// Destination for file-based reporting; empty selects the pipe
    #[serde(default)]
    pub file_report_path: String,
}

impl EntryParam {
    /// Load entry parameters from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)
            .map_err(|e| ReportError::io("read entry param", path.display().to_string(), e))?;
        ResultCodec::decode_from(&content, path.display().to_string())
    }

    /// File report destination, if file mode was requested
    pub fn file_report_path(&self) -> Option<PathBuf> {
        let trimmed = self.file_report_path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}
