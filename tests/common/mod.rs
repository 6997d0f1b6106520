// Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use testtool_sdk::model::{
    Attachment, AttachmentType, LoadError, LoadResult, LogLevel, ResultType, TestCase,
    TestCaseAssertError, TestCaseLog, TestCaseRuntimeError, TestCaseStep, TestResult,
};

pub fn instant(offset_ms: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0)
        .single()
        .expect("valid date")
        + Duration::milliseconds(offset_ms)
}

pub fn load_result() -> LoadResult {
    LoadResult::new(
        vec![TestCase::new("test1").with_attribute("key", "value")],
        vec![LoadError::new("test2", "load failed")],
    )
}

pub fn case_result(name: &str) -> TestResult {
    let mut step = TestCaseStep::new("step1", instant(10));
    step.add_log(
        TestCaseLog::new(instant(20), LogLevel::Info, "step1 passed")
            .with_assert_error(TestCaseAssertError {
                expect: "expect".to_string(),
                actual: "actual".to_string(),
                message: "assert failed".to_string(),
            })
            .with_runtime_error(TestCaseRuntimeError {
                summary: "runtime error".to_string(),
                detail: "runtime error detail".to_string(),
            })
            .with_attachment(Attachment::new(
                "attachment1",
                "http://example.com/attachment1",
                AttachmentType::File,
            )),
    );
    step.finish(ResultType::Succeed, instant(30));

    let mut result = TestResult::new(TestCase::new(name), instant(0)).with_message("test passed");
    result.add_step(step);
    result.finish(ResultType::Succeed, instant(40));
    result
}
