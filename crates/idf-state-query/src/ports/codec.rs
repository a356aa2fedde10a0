use crate::domain::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Canonical record encoding.
///
/// Identical logical values must encode to identical bytes on every replica.
pub trait RecordCodec: Send + Sync {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: Serialize + DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}
