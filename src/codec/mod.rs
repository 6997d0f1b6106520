// Codec module - canonical JSON for the result model and pipe framing

pub mod frame;
pub mod timestamp;

pub use frame::{FrameReader, HEADER_LEN, MAGIC_NUMBER, encode_frame};
pub use timestamp::{DATE_TIME_FORMAT, now};

use crate::error::{ReportError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Converts model values to and from their canonical JSON form.
///
/// Enums are written as their literals, instants as
/// `YYYY-MM-DDTHH:mm:ss.sssZ`, and absent optional structures as `null`.
pub struct ResultCodec;

impl ResultCodec {
    /// Encode a model value as compact JSON
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|source| ReportError::Encoding {
            operation: short_type_name::<T>(),
            source,
        })
    }

    /// Decode a payload produced by [`ResultCodec::encode`]
    pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Self::decode_from(bytes, "payload")
    }

    /// Like [`ResultCodec::decode`], naming where the bytes came from on error
    pub fn decode_from<T: DeserializeOwned>(bytes: &[u8], target: impl Into<String>) -> Result<T> {
        serde_json::from_slice(bytes)
            .map_err(|source| ReportError::decoding(short_type_name::<T>(), target, source))
    }
}

// `alloc::vec::Vec<u8>` -> `Vec`
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
