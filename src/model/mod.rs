// Model module - Result data model shared by every transport

pub mod load;
pub mod param;
pub mod result;
pub mod testcase;

pub use load::{LoadError, LoadResult};
pub use param::EntryParam;
pub use result::{
    Attachment, AttachmentType, LogLevel, ResultType, TestCaseAssertError, TestCaseLog,
    TestCaseRuntimeError, TestCaseStep, TestResult,
};
pub use testcase::TestCase;
