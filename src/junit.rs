// JUnit bridge - converts JUnit XML reports into case results

use crate::codec;
use crate::error::{ReportError, Result};
use crate::model::{ResultType, TestCase, TestResult};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Extension joined to the class path in synthesized case names.
const CASE_FILE_EXTENSION: &str = ".go";

/// `<testsuite>` or `<testsuites>`; both may nest suites and hold cases.
#[derive(Debug, Default, Deserialize)]
struct JUnitSuite {
    #[serde(rename = "testsuite", default)]
    suites: Vec<JUnitSuite>,
    #[serde(rename = "testcase", default)]
    test_cases: Vec<JUnitTestCase>,
}

#[derive(Debug, Deserialize)]
struct JUnitTestCase {
    #[serde(rename = "@classname", default)]
    class_name: String,
    #[serde(rename = "@name", default)]
    name: String,
    #[serde(rename = "@time", default)]
    time: Option<String>,
    #[serde(default)]
    failure: Option<JUnitFailure>,
}

#[derive(Debug, Deserialize)]
struct JUnitFailure {
    #[serde(rename = "@message", default)]
    message: String,
}

impl JUnitSuite {
    fn into_cases(self, out: &mut Vec<JUnitTestCase>) {
        out.extend(self.test_cases);
        for suite in self.suites {
            suite.into_cases(out);
        }
    }
}

/// `a.b.C` + `m` -> `a/b/C.go?m`
pub fn case_name(class_name: &str, method: &str) -> String {
    format!(
        "{}{}?{}",
        class_name.replace('.', "/"),
        CASE_FILE_EXTENSION,
        method
    )
}

/// Parse a JUnit XML report file
pub fn parse_file(path: &Path) -> Result<Vec<TestResult>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ReportError::io("read JUnit XML", path.display().to_string(), e))?;
    parse_str(&content, codec::now()).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JUnit XML document; every case starts at `start_time`.
pub fn parse_str(
    xml: &str,
    start_time: DateTime<Utc>,
) -> std::result::Result<Vec<TestResult>, quick_xml::DeError> {
    let root: JUnitSuite = quick_xml::de::from_str(xml)?;

    let mut cases = Vec::new();
    root.into_cases(&mut cases);
    debug!("Parsed {} JUnit test cases", cases.len());

    Ok(cases
        .into_iter()
        .map(|case| to_result(case, start_time))
        .collect())
}

fn to_result(case: JUnitTestCase, start_time: DateTime<Utc>) -> TestResult {
    let elapsed = case.time.as_deref().and_then(parse_seconds);
    let test = TestCase::new(case_name(&case.class_name, &case.name));

    let (result_type, message) = match case.failure {
        Some(failure) => (ResultType::Failed, failure.message),
        None => (ResultType::Succeed, String::new()),
    };

    let end_time = elapsed
        .and_then(|d| start_time.checked_add_signed(d))
        .unwrap_or(start_time);

    let mut result = TestResult::new(test, start_time).with_message(message);
    result.finish(result_type, end_time);
    result
}

fn parse_seconds(raw: &str) -> Option<Duration> {
    let seconds: f64 = raw.trim().replace(',', "").parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Duration::try_milliseconds((seconds * 1000.0).round() as i64)
}
