// Tests for the canonical JSON encoding - public API only

mod common;

use common::{case_result, instant, load_result};
use regex::Regex;
use serde_json::Value;
use chrono::{TimeZone, Utc};
use testtool_sdk::{ReportError, ResultCodec};
use testtool_sdk::model::{
    LogLevel, ResultType, TestCase, TestCaseLog, TestCaseStep, TestResult,
};

fn timestamp_pattern() -> Regex {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$").expect("valid regex")
}

fn encode_value<T: serde::Serialize>(value: &T) -> Value {
    let bytes = ResultCodec::encode(value).expect("encode");
    serde_json::from_slice(&bytes).expect("valid JSON")
}

// Collect every value stored under a key ending in "Time".
fn collect_times<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key.ends_with("Time") {
                    out.push(child);
                }
                collect_times(child, out);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_times(item, out)),
        _ => {}
    }
}

#[test]
fn test_concrete_case_scenario() {
    // Arrange
    let mut step = TestCaseStep::new("setup", instant(1));
    step.add_log(TestCaseLog::new(instant(2), LogLevel::Info, "ok"));
    step.finish(ResultType::Succeed, instant(3));

    let mut result = TestResult::new(TestCase::new("pkg/mod.TestFoo"), instant(0));
    result.add_step(step);
    result.finish(ResultType::Succeed, instant(4));

    // Act
    let json = String::from_utf8(ResultCodec::encode(&result).expect("encode")).expect("utf8");

    // Assert
    assert!(json.contains(r#""ResultType":"SUCCEED""#));
    assert!(json.contains(r#""Level":"INFO""#));
    assert!(json.contains(r#""Content":"ok""#));
    assert!(json.contains(r#""StartTime":"2024-05-17T09:30:00.000Z""#));
    assert!(json.contains(r#""EndTime":"2024-05-17T09:30:00.004Z""#));
}

#[test]
fn test_case_result_keys_and_casing() {
    let value = encode_value(&case_result("test1"));

    let keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    let mut expected = vec![
        "Test",
        "StartTime",
        "ResultType",
        "Message",
        "EndTime",
        "Steps",
    ];
    expected.sort_unstable();
    let mut sorted = keys;
    sorted.sort_unstable();
    assert_eq!(sorted, expected);

    let log = &value["Steps"][0]["Logs"][0];
    assert_eq!(log["AssertError"]["Expect"], "expect");
    assert_eq!(log["RuntimeError"]["Summary"], "runtime error");
    assert_eq!(log["Attachments"][0]["AttachmentType"], "FILE");
    assert_eq!(log["Attachments"][0]["Url"], "http://example.com/attachment1");
}

#[test]
fn test_every_instant_matches_fixed_format() {
    let value = encode_value(&case_result("test1"));
    let pattern = timestamp_pattern();

    let mut times = Vec::new();
    collect_times(&value, &mut times);

    // StartTime, EndTime, step StartTime/EndTime, log Time
    assert_eq!(times.len(), 5);
    for time in times {
        let text = time.as_str().expect("instant encoded as string");
        assert!(pattern.is_match(text), "bad instant: {}", text);
    }
}

#[test]
fn test_absent_optional_structures_encode_as_null() {
    let mut step = TestCaseStep::new("s", instant(0));
    step.add_log(TestCaseLog::new(instant(0), LogLevel::Warn, "careful"));
    let mut result = TestResult::new(TestCase::new("t"), instant(0));
    result.add_step(step);

    let value = encode_value(&result);
    let log = value["Steps"][0]["Logs"][0]
        .as_object()
        .expect("log object");

    assert_eq!(log.get("AssertError"), Some(&Value::Null));
    assert_eq!(log.get("RuntimeError"), Some(&Value::Null));
    assert_eq!(log["Level"], "WARNNING");
    assert_eq!(value.get("EndTime"), Some(&Value::Null));
    assert_eq!(value["Steps"][0].get("EndTime"), Some(&Value::Null));
}

#[test]
fn test_enums_are_never_numeric() {
    let mut result = case_result("test1");
    result.result_type = ResultType::LoadFailed;
    result.steps[0].result_type = ResultType::Filtered;
    result.steps[0].logs[0].level = LogLevel::Verbose;

    let value = encode_value(&result);

    assert_eq!(value["ResultType"], "LOAD_FAILED");
    assert_eq!(value["Steps"][0]["ResultType"], "FILTERED");
    assert_eq!(value["Steps"][0]["Logs"][0]["Level"], "VERBOSE");
}

#[test]
fn test_case_result_round_trip() {
    let original = case_result("pkg/mod.TestFoo");

    let bytes = ResultCodec::encode(&original).expect("encode");
    let decoded: TestResult = ResultCodec::decode(&bytes).expect("decode");

    assert_eq!(decoded, original);
}

#[test]
fn test_running_case_round_trip_keeps_absent_end_time() {
    let original = TestResult::new(TestCase::new("streaming"), instant(7));

    let bytes = ResultCodec::encode(&original).expect("encode");
    let decoded: TestResult = ResultCodec::decode(&bytes).expect("decode");

    assert_eq!(decoded.end_time, None);
    assert_eq!(decoded, original);
}

#[test]
fn test_load_result_shape() {
    let value = encode_value(&load_result());

    assert_eq!(value["Tests"][0]["Name"], "test1");
    assert_eq!(value["Tests"][0]["Attributes"]["key"], "value");
    assert_eq!(value["LoadErrors"][0]["Name"], "test2");
    assert_eq!(value["LoadErrors"][0]["Message"], "load failed");
    assert!(value.get("ResultType").is_none());
}

#[test]
fn test_decode_rejects_default_instant_format() {
    let payload = br#"{"Test":{"Name":"t","Attributes":{}},"StartTime":"2024-05-17T09:30:00+00:00","ResultType":"SUCCEED","Message":"","EndTime":null,"Steps":[]}"#;

    assert!(ResultCodec::decode::<TestResult>(payload).is_err());
}

#[test]
fn test_decode_rejects_instant_without_fraction() {
    let payload = br#"{"Test":{"Name":"t","Attributes":{}},"StartTime":"2024-05-17T09:30:00Z","ResultType":"SUCCEED","Message":"","EndTime":null,"Steps":[]}"#;

    let err = ResultCodec::decode::<TestResult>(payload).unwrap_err();
    assert!(matches!(err, ReportError::Decoding { .. }));
}

#[test]
fn test_five_digit_year_fails_encoding() {
    let far = Utc
        .with_ymd_and_hms(10000, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date");

    let err = ResultCodec::encode(&TestResult::new(TestCase::new("t"), far)).unwrap_err();
    assert!(matches!(err, ReportError::Encoding { .. }));

    let mut running = TestResult::new(TestCase::new("t"), instant(0));
    running.end_time = Some(far);
    let err = ResultCodec::encode(&running).unwrap_err();
    assert!(matches!(err, ReportError::Encoding { .. }));
}
