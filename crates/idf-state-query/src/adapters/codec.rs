//! Canonical bincode codec.

use crate::domain::{CodecError, StateQueryConfig};
use crate::ports::RecordCodec;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Fixed-int bincode with a size limit, rejecting trailing bytes.
///
/// Decoding re-encodes the value and rejects input that does not reproduce
/// the same bytes.
#[derive(Debug, Clone, Copy)]
pub struct CanonicalCodec {
    max_record_bytes: u64,
}

impl CanonicalCodec {
    pub fn new(config: &StateQueryConfig) -> Self {
        Self {
            max_record_bytes: config.max_record_bytes,
        }
    }

    fn options(&self) -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .reject_trailing_bytes()
            .with_limit(self.max_record_bytes)
    }
}

impl Default for CanonicalCodec {
    fn default() -> Self {
        Self::new(&StateQueryConfig::default())
    }
}

impl RecordCodec for CanonicalCodec {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, CodecError> {
        self.options()
            .serialize(record)
            .map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: Serialize + DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        let value: T = self
            .options()
            .deserialize(bytes)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        let reencoded = self
            .options()
            .serialize(&value)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        if reencoded != bytes {
            return Err(CodecError::Decode("non-canonical encoding".into()));
        }
        Ok(value)
    }
}

/// Raw UTF-8 values (reverse indexes, flags, signatures).
pub fn decode_text(bytes: &[u8]) -> Result<String, CodecError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Serde adapter persisting [`Validity`](crate::domain::Validity) as
/// `""`, `"true"` or `"false"`.
/// Any other flag is a decode error.
pub mod validity_text {
    use crate::domain::Validity;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Validity, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match value {
            Validity::Unknown => "",
            Validity::True => "true",
            Validity::False => "false",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Validity, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.as_str() {
            "" => Ok(Validity::Unknown),
            "true" => Ok(Validity::True),
            "false" => Ok(Validity::False),
            other => Err(D::Error::custom(format!("invalid validity flag: {other:?}"))),
        }
    }
}
