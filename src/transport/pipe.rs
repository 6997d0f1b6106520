// Pipe transport - framed JSON over an inherited descriptor

use super::Reporter;
use super::lock::ReporterLock;
use crate::codec::{ResultCodec, encode_frame};
use crate::error::{ReportError, Result};
use crate::model::{LoadResult, TestResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use tracing::debug;

/// Descriptor the launcher leaves open for the reporter to write to.
pub const PIPE_WRITER_FD: i32 = 3;

/// Writes one frame per report to a pipe shared with sibling reporters.
///
/// Each frame is written while holding the [`ReporterLock`], so frames from
/// cooperating processes never interleave. There is no acknowledgement: a slow
/// reader blocks the write, a vanished reader fails it.
pub struct PipeTransport {
    pipe: Option<File>,
    target: String,
    lock: ReporterLock,
}

impl PipeTransport {
    /// Report to an already opened writer
    pub fn new(pipe: File, lock: ReporterLock) -> Self {
        Self {
            pipe: Some(pipe),
            target: "pipe".to_string(),
            lock,
        }
    }

    /// Take ownership of a descriptor inherited from the parent process
    #[cfg(unix)]
    pub fn from_inherited_fd(fd: i32, lock: ReporterLock) -> Result<Self> {
        use nix::fcntl::{FcntlArg, fcntl};
        use std::os::fd::FromRawFd;

        let target = format!("pipe fd {}", fd);
        if let Err(errno) = fcntl(fd, FcntlArg::F_GETFD) {
            return Err(ReportError::Configuration {
                path: target.into(),
                message: "descriptor is not open".to_string(),
                source: Some(errno.into()),
            });
        }

        // SAFETY: the descriptor is open (checked above) and nothing else in
        // this process owns it; the transport closes it exactly once.
        let pipe = unsafe { File::from_raw_fd(fd) };
        debug!("Reporting through inherited {}", target);

        Ok(Self {
            pipe: Some(pipe),
            target,
            lock,
        })
    }

    pub fn lock(&self) -> &ReporterLock {
        &self.lock
    }

    pub fn is_closed(&self) -> bool {
        self.pipe.is_none()
    }

    fn send<T: Serialize>(&self, operation: &'static str, value: &T) -> Result<()> {
        let pipe = self.pipe.as_ref().ok_or(ReportError::Closed)?;

        let _guard = self.lock.acquire()?;

        let payload = ResultCodec::encode(value)?;
        let frame = encode_frame(&payload)?;

        let mut writer: &File = pipe;
        writer
            .write_all(&frame)
            .map_err(|e| ReportError::io(operation, self.target.as_str(), e))?;
        writer
            .flush()
            .map_err(|e| ReportError::io(operation, self.target.as_str(), e))?;

        debug!(
            "{}: wrote {} byte frame to {}",
            operation,
            frame.len(),
            self.target
        );
        Ok(())
    }
}

impl Reporter for PipeTransport {
    fn report_load_result(&self, load_result: &LoadResult) -> Result<()> {
        self.send("report load result", load_result)
    }

    fn report_case_result(&self, case_result: &TestResult) -> Result<()> {
        self.send("report case result", case_result)
    }

    fn close(&mut self) -> Result<()> {
        let Some(pipe) = self.pipe.take() else {
            return Ok(());
        };

        #[cfg(unix)]
        {
            use std::os::fd::IntoRawFd;

            nix::unistd::close(pipe.into_raw_fd())
                .map_err(|errno| ReportError::io("close", self.target.as_str(), errno.into()))?;
        }

        #[cfg(not(unix))]
        drop(pipe);

        debug!("Closed {}", self.target);
        Ok(())
    }
}
