//! Pipe framing: `[magic u32 LE][length u32 LE][payload]`.
//!
//! Frames are self-delimited by their length prefix; there is no separator
//! between consecutive frames.

use crate::error::{ReportError, Result};
use std::io::{self, Read};

pub const MAGIC_NUMBER: u32 = 0x1234_ABCD;
pub const HEADER_LEN: usize = 8;

/// Build one frame around `payload` in a single buffer.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|_| {
        ReportError::frame(
            "outgoing frame",
            format!(
                "payload of {} bytes exceeds the u32 length prefix",
                payload.len()
            ),
        )
    })?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&MAGIC_NUMBER.to_le_bytes());
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Reads consecutive frames from a captured pipe stream.
///
/// Yields each payload; a clean end of stream between frames ends iteration.
pub struct FrameReader<R> {
    inner: R,
    target: String,
    finished: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_target(inner, "stream")
    }

    /// `target` names the stream in errors, usually its path
    pub fn with_target(inner: R, target: impl Into<String>) -> Self {
        Self {
            inner,
            target: target.into(),
            finished: false,
        }
    }

    /// Read the next payload, `Ok(None)` at end of stream
    pub fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut header = [0u8; HEADER_LEN];
        let filled = read_full(&mut self.inner, &mut header)
            .map_err(|e| ReportError::io("read frame header", self.target.as_str(), e))?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < HEADER_LEN {
            return Err(ReportError::frame(
                self.target.as_str(),
                format!("truncated header: {} of {} bytes", filled, HEADER_LEN),
            ));
        }

        let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        if magic != MAGIC_NUMBER {
            return Err(ReportError::frame(
                self.target.as_str(),
                format!("bad magic number {:#010x}", magic),
            ));
        }

        // The buffer grows with the bytes actually read, not the claimed length.
        let length = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let mut payload = Vec::new();
        let filled = (&mut self.inner)
            .take(u64::from(length))
            .read_to_end(&mut payload)
            .map_err(|e| ReportError::io("read frame payload", self.target.as_str(), e))?;
        if filled < length as usize {
            return Err(ReportError::frame(
                self.target.as_str(),
                format!("truncated payload: {} of {} bytes", filled, length),
            ));
        }

        Ok(Some(payload))
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_frame() {
            Ok(Some(payload)) => Some(Ok(payload)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

// Like read_exact, but reports how much was read before EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
