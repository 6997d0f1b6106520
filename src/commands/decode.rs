// Decode command - verify and print a captured pipe stream

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::debug;

use crate::cli::DecodeArgs;
use crate::codec::{FrameReader, ResultCodec};
use crate::model::{LoadResult, TestResult};

/// A decoded payload, checked against the result model
#[derive(Debug)]
pub enum Payload {
    Load(LoadResult),
    Case(TestResult),
}

impl Payload {
    /// Case results carry `ResultType`; load results never do
    pub fn decode(bytes: &[u8], target: &str) -> crate::Result<Self> {
        let value: serde_json::Value = ResultCodec::decode_from(bytes, target)?;
        if value.get("ResultType").is_some() {
            ResultCodec::decode_from(bytes, target).map(Payload::Case)
        } else {
            ResultCodec::decode_from(bytes, target).map(Payload::Load)
        }
    }

    fn to_json(&self, compact: bool) -> serde_json::Result<String> {
        match (self, compact) {
            (Payload::Load(v), true) => serde_json::to_string(v),
            (Payload::Load(v), false) => serde_json::to_string_pretty(v),
            (Payload::Case(v), true) => serde_json::to_string(v),
            (Payload::Case(v), false) => serde_json::to_string_pretty(v),
        }
    }
}

pub fn handle_decode(args: &DecodeArgs) -> Result<()> {
    let file = File::open(&args.stream)
        .with_context(|| format!("Failed to open stream: {}", args.stream.display()))?;

    let stream = args.stream.display().to_string();
    let reader = FrameReader::with_target(BufReader::new(file), stream.as_str());

    let mut stdout = io::stdout().lock();
    for (index, frame) in reader.enumerate() {
        let payload = frame.with_context(|| format!("Failed to read frame {}", index))?;
        debug!("Frame {}: {} bytes", index, payload.len());

        let decoded = Payload::decode(&payload, &format!("frame {} of {}", index, stream))
            .with_context(|| format!("Frame {} is not a valid result payload", index))?;
        writeln!(stdout, "{}", decoded.to_json(args.compact)?)?;
    }
    stdout.flush()?;

    Ok(())
}
