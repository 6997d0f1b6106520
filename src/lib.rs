//! Result reporting SDK for test tools.
//!
//! A test tool builds [`model::LoadResult`] and [`model::TestResult`] values
//! and hands them to a [`transport::Reporter`]: either the framed
//! [`transport::PipeTransport`] over the descriptor inherited from the
//! launcher, or the [`transport::FileTransport`] writing one JSON file per
//! report.

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod junit;
pub mod logging;
pub mod model;
pub mod transport;

pub use codec::ResultCodec;
pub use error::{ReportError, Result};
pub use transport::{
    FileTransport, PipeTransport, Reporter, create_reporter, create_reporter_from_entry,
};
