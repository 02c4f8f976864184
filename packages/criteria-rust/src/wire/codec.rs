//! Byte encodings of a [`WireFilter`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::WireFilter;
use crate::error::CodecError;

/// Byte encoding used for persisted and transmitted filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// UTF-8 JSON, for URLs and saved searches.
    #[default]
    Json,
    /// `MsgPack` with named fields.
    MsgPack,
}

impl WireFormat {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MsgPack => "msgpack",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "msgpack" => Some(Self::MsgPack),
            _ => None,
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encodes `filter` as bytes.
///
/// # Errors
///
/// Returns [`CodecError`] if the underlying serializer fails.
pub fn encode(filter: &WireFilter, format: WireFormat) -> Result<Vec<u8>, CodecError> {
    Ok(match format {
        WireFormat::Json => serde_json::to_vec(filter)?,
        WireFormat::MsgPack => rmp_serde::to_vec_named(filter)?,
    })
}

/// Decodes bytes into a [`WireFilter`].
///
/// Individual malformed entries do not fail decoding; see
/// [`WireFilter::malformed`].
///
/// # Errors
///
/// Returns [`CodecError`] if the bytes are not a map in the given format.
pub fn decode(bytes: &[u8], format: WireFormat) -> Result<WireFilter, CodecError> {
    Ok(match format {
        WireFormat::Json => serde_json::from_slice(bytes)?,
        WireFormat::MsgPack => rmp_serde::from_slice(bytes)?,
    })
}
