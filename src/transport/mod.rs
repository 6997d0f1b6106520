// Transport module - delivery of results to the collector

pub mod file;
pub mod lock;
pub mod pipe;

pub use file::{FileTransport, LOAD_RESULT_FILE_NAME};
pub use lock::{LockGuard, LockMode, ReporterLock};
pub use pipe::{PIPE_WRITER_FD, PipeTransport};

use crate::config::Config;
use crate::error::Result;
use crate::junit;
use crate::model::{EntryParam, LoadResult, TestResult};
use std::path::Path;
use tracing::debug;

/// Reporter trait
///
/// Calls are synchronous and fire-and-forget: a call either delivers the
/// report or returns the error, nothing is retried.
pub trait Reporter: Send + Sync {
    /// Report the tests discovered during the load phase
    fn report_load_result(&self, load_result: &LoadResult) -> Result<()>;

    /// Report the outcome of one executed case
    fn report_case_result(&self, case_result: &TestResult) -> Result<()>;

    /// Convert a JUnit XML report and report every case in it
    fn report_junit_xml(&self, path: &Path) -> Result<()> {
        let results = junit::parse_file(path)?;
        debug!(
            "Reporting {} cases converted from {}",
            results.len(),
            path.display()
        );
        for result in &results {
            self.report_case_result(result)?;
        }
        Ok(())
    }

    /// Release the underlying resources; safe to call more than once
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// File mode when `file_report_path` is given, the inherited pipe otherwise.
pub fn create_reporter(
    file_report_path: Option<&Path>,
    config: &Config,
) -> Result<Box<dyn Reporter>> {
    if let Some(path) = file_report_path.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(Box::new(FileTransport::new(path)?));
    }

    let lock = ReporterLock::new(&config.pipe.lock_path, config.pipe.lock_mode);

    #[cfg(unix)]
    {
        Ok(Box::new(PipeTransport::from_inherited_fd(
            config.pipe.fd,
            lock,
        )?))
    }

    #[cfg(not(unix))]
    {
        let _ = lock;
        Err(crate::error::ReportError::configuration(
            format!("pipe fd {}", config.pipe.fd),
            "inherited pipe descriptors require a unix platform",
        ))
    }
}

/// Pick the transport from the launcher's entry parameters.
///
/// `FileReportPath` wins over the configured file destination.
pub fn create_reporter_from_entry(
    param: &EntryParam,
    config: &Config,
) -> Result<Box<dyn Reporter>> {
    let file_report_path = param
        .file_report_path()
        .or_else(|| config.file.report_path.clone());
    create_reporter(file_report_path.as_deref(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::model::TestCase;
    use tempfile::TempDir;

    #[test]
    fn test_entry_file_report_path_selects_file_mode() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let param = EntryParam {
            file_report_path: temp_dir
                .path()
                .join("result.json")
                .display()
                .to_string(),
            ..EntryParam::default()
        };

        let reporter = create_reporter_from_entry(&param, &Config::default()).expect("reporter");
        reporter
            .report_load_result(&LoadResult::new(vec![TestCase::new("a")], vec![]))
            .expect("report");

        assert!(temp_dir.path().join("result.json").exists());
    }

    #[test]
    fn test_config_file_path_is_fallback() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::default();
        config.file.report_path = Some(temp_dir.path().join("reports"));

        let reporter =
            create_reporter_from_entry(&EntryParam::default(), &config).expect("reporter");
        reporter
            .report_load_result(&LoadResult::default())
            .expect("report");

        assert!(
            temp_dir
                .path()
                .join("reports")
                .join(LOAD_RESULT_FILE_NAME)
                .exists()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_mode_requires_open_descriptor() {
        let mut config = Config::default();
        config.pipe.fd = 9_998;

        let err = create_reporter(None, &config).err();
        assert!(matches!(err, Some(ReportError::Configuration { .. })));
    }
}
