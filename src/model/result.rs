// Case result structures

use super::TestCase;
use crate::codec::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a test case or step.
///
/// Always serialized as its string literal, never as an ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    #[default]
    Unknown,
    Succeed,
    Failed,
    LoadFailed,
    Ignored,
    Running,
    Waiting,
    Filtered,
}

impl ResultType {
    pub const ALL: [ResultType; 8] = [
        Self::Unknown,
        Self::Succeed,
        Self::Failed,
        Self::LoadFailed,
        Self::Ignored,
        Self::Running,
        Self::Waiting,
        Self::Filtered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Succeed => "SUCCEED",
            Self::Failed => "FAILED",
            Self::LoadFailed => "LOAD_FAILED",
            Self::Ignored => "IGNORED",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Filtered => "FILTERED",
        }
    }
}

/// Log severity of a case log entry.
///
/// `Warn` is spelled `WARNNING` on the wire; collectors depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogLevel {
    #[serde(rename = "VERBOSE")]
    Verbose,
    #[serde(rename = "DEBUG")]
    Debug,
    #[default]
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARNNING")]
    Warn,
    #[serde(rename = "ERROR")]
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        Self::Verbose,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbose => "VERBOSE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARNNING",
            Self::Error => "ERROR",
        }
    }
}

/// How an attachment's `url` should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttachmentType {
    #[default]
    File,
    Url,
    Iframe,
}

impl AttachmentType {
    pub const ALL: [AttachmentType; 3] = [Self::File, Self::Url, Self::Iframe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Url => "URL",
            Self::Iframe => "IFRAME",
        }
    }
}

macro_rules! impl_literal {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| format!("unknown {}: {}", $what, s))
            }
        }
    };
}

impl_literal!(ResultType, "result type");
impl_literal!(LogLevel, "log level");
impl_literal!(AttachmentType, "attachment type");

/// Assertion failure details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestCaseAssertError {
    pub expect: String,
    pub actual: String,
    pub message: String,
}

/// Runtime failure details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestCaseRuntimeError {
    pub summary: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub attachment_type: AttachmentType,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        attachment_type: AttachmentType,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            attachment_type,
        }
    }
}

/// One log entry inside a step.
///
/// Absent `assert_error`/`runtime_error` encode as `null`, not as missing keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestCaseLog {
    #[serde(with = "timestamp")]
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub content: String,
    #[serde(default)]
    pub assert_error: Option<TestCaseAssertError>,
    #[serde(default)]
    pub runtime_error: Option<TestCaseRuntimeError>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl TestCaseLog {
    pub fn new(time: DateTime<Utc>, level: LogLevel, content: impl Into<String>) -> Self {
        Self {
            time,
            level,
            content: content.into(),
            assert_error: None,
            runtime_error: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_assert_error(mut self, error: TestCaseAssertError) -> Self {
        self.assert_error = Some(error);
        self
    }

    pub fn with_runtime_error(mut self, error: TestCaseRuntimeError) -> Self {
        self.runtime_error = Some(error);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A titled step of a case. Its result type is independent of the parent's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestCaseStep {
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    pub title: String,
    pub result_type: ResultType,
    #[serde(with = "timestamp::option", default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs: Vec<TestCaseLog>,
}

impl TestCaseStep {
    /// Start a step; it stays `RUNNING` until finished
    pub fn new(title: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            title: title.into(),
            result_type: ResultType::Running,
            end_time: None,
            logs: Vec::new(),
        }
    }

    pub fn add_log(&mut self, log: TestCaseLog) {
        self.logs.push(log);
    }

    /// Finish the step. `end_time` is clamped to `start_time`.
    pub fn finish(&mut self, result_type: ResultType, end_time: DateTime<Utc>) {
        self.result_type = result_type;
        self.end_time = Some(end_time.max(self.start_time));
    }
}

/// Result of one executed test case.
///
/// Owns its test case, steps, and transitively every log and attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestResult {
    pub test: TestCase,
    #[serde(with = "timestamp")]
    pub start_time: DateTime<Utc>,
    pub result_type: ResultType,
    pub message: String,
    #[serde(with = "timestamp::option", default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub steps: Vec<TestCaseStep>,
}

impl TestResult {
    /// Start a result for `test`; it stays `RUNNING` until finished
    pub fn new(test: TestCase, start_time: DateTime<Utc>) -> Self {
        Self {
            test,
            start_time,
            result_type: ResultType::Running,
            message: String::new(),
            end_time: None,
            steps: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn add_step(&mut self, step: TestCaseStep) {
        self.steps.push(step);
    }

    /// Finish the case. `end_time` is clamped to `start_time`.
    pub fn finish(&mut self, result_type: ResultType, end_time: DateTime<Utc>) {
        self.result_type = result_type;
        self.end_time = Some(end_time.max(self.start_time));
    }

    /// MD5 of the case name as lowercase hex; the file-mode artifact stem.
    pub fn name_hash(&self) -> String {
        format!("{:x}", md5::compute(self.test.name.as_bytes()))
    }
}
