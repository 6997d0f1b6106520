// File transport - one JSON file per report under a destination root

use super::Reporter;
use crate::codec::ResultCodec;
use crate::error::{ReportError, Result};
use crate::model::{LoadResult, TestResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Name of the load-result artifact when the destination is a directory.
pub const LOAD_RESULT_FILE_NAME: &str = "load_result.json";

/// Persists reports as standalone files.
///
/// Case results land in `<root>/<md5(test name)>.json`, so a later report of
/// the same case overwrites the earlier one. Every file is written to a
/// temporary sibling and renamed into place, so a reader sees either the old
/// or the new report. Writers to the same case race and the last rename wins.
#[derive(Debug, Clone)]
pub struct FileTransport {
    root: PathBuf,
    load_result_path: PathBuf,
}

impl FileTransport {
    /// Resolve `destination` and make sure its root directory exists.
    ///
    /// A destination with an extension names the load-result file and its
    /// parent is the root; anything else (or an existing directory) is the
    /// root itself.
    pub fn new(destination: impl AsRef<Path>) -> Result<Self> {
        let destination = destination.as_ref();

        let (root, load_result_path) =
            if destination.extension().is_some() && !destination.is_dir() {
                let root = destination
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."))
                    .to_path_buf();
                (root, destination.to_path_buf())
            } else {
                let root = destination.to_path_buf();
                let load_result_path = root.join(LOAD_RESULT_FILE_NAME);
                (root, load_result_path)
            };

        ensure_root(&root)?;
        debug!("Reporting to files under {}", root.display());

        Ok(Self {
            root,
            load_result_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_result_path(&self) -> &Path {
        &self.load_result_path
    }

    /// Path a case result is written to
    pub fn case_result_path(&self, case_result: &TestResult) -> PathBuf {
        self.root.join(format!("{}.json", case_result.name_hash()))
    }

    fn write(&self, operation: &'static str, path: &Path, bytes: &[u8]) -> Result<()> {
        let fail = |e: io::Error| ReportError::io(operation, path.display().to_string(), e);

        let mut staged = NamedTempFile::new_in(&self.root).map_err(fail)?;
        staged.write_all(bytes).map_err(fail)?;
        staged.flush().map_err(fail)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(fail)?;
        }

        staged.persist(path).map_err(|e| fail(e.error))?;
        debug!("{}: wrote {} bytes to {}", operation, bytes.len(), path.display());
        Ok(())
    }
}

impl Reporter for FileTransport {
    fn report_load_result(&self, load_result: &LoadResult) -> Result<()> {
        let payload = ResultCodec::encode(load_result)?;
        self.write("report load result", &self.load_result_path, &payload)
    }

    fn report_case_result(&self, case_result: &TestResult) -> Result<()> {
        let payload = ResultCodec::encode(case_result)?;
        self.write(
            "report case result",
            &self.case_result_path(case_result),
            &payload,
        )
    }
}

fn ensure_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ReportError::configuration(
            root,
            "exists and is not a directory",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => create_root(root),
        Err(e) => Err(ReportError::Configuration {
            path: root.to_path_buf(),
            message: "cannot stat destination".to_string(),
            source: Some(e),
        }),
    }
}

fn create_root(root: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(root).map_err(|e| ReportError::Configuration {
        path: root.to_path_buf(),
        message: "cannot create report directory".to_string(),
        source: Some(e),
    })
}
