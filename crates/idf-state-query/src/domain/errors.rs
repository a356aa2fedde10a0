//! # Domain Errors
//!
//! Error taxonomy for the state-query core.
//!
//! ## Design Principles
//!
//! - Absent keys are not errors. Lookups return `Option` and callers decide.
//! - `NotFound` exists for call sites that must abort a whole response.
//! - No panics in domain logic (use Result instead)

use thiserror::Error;

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store backend failure: {0}")]
    Backend(String),

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Failure while turning a record into canonical bytes or back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Encode(String),
}

/// Errors surfaced by repository, resolution, query and mutation layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Malformed request payload or corrupted stored record.
    #[error("{0}")]
    Decode(String),

    /// Record cannot be canonically serialized.
    #[error("{0}")]
    Encode(String),

    /// A referenced key is absent.
    #[error("not found")]
    NotFound { key: String },

    /// A reverse index points at a record that does not exist or does not
    /// contain the indexed item.
    #[error("Reference integrity violated: {index} -> {target}")]
    ReferenceIntegrity { index: String, target: String },

    /// Mutation target does not exist.
    #[error("Node ID not found")]
    NodeIdNotFound { node_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CodecError> for StateError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Decode(message) => StateError::Decode(message),
            CodecError::Encode(message) => StateError::Encode(message),
        }
    }
}

impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        StateError::Decode(err.to_string())
    }
}

impl StateError {
    /// True for outcomes that callers surface as a well-formed "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StateError::NotFound { .. } | StateError::ReferenceIntegrity { .. }
        )
    }
}

/// Numeric result code attached to every delivered transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ResultCode {
    Ok = 0,
    DecodeError = 1,
    EncodeError = 2,
    NodeIdNotFound = 3,
    UnknownOperation = 4,
    StoreFailure = 5,
}

impl ResultCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<&StateError> for ResultCode {
    fn from(err: &StateError) -> Self {
        match err {
            StateError::Decode(_) => ResultCode::DecodeError,
            StateError::Encode(_) => ResultCode::EncodeError,
            StateError::NodeIdNotFound { .. } => ResultCode::NodeIdNotFound,
            StateError::NotFound { .. } | StateError::ReferenceIntegrity { .. } => {
                ResultCode::NodeIdNotFound
            }
            StateError::Store(_) => ResultCode::StoreFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_maps_to_state_error() {
        let err: StateError = CodecError::Decode("unexpected end of file".into()).into();
        assert_eq!(err, StateError::Decode("unexpected end of file".into()));

        let err: StateError = CodecError::Encode("size limit".into()).into();
        assert!(matches!(err, StateError::Encode(_)));
    }

    #[test]
    fn test_not_found_classification() {
        assert!(StateError::NotFound { key: "NodeID|x".into() }.is_not_found());
        assert!(StateError::ReferenceIntegrity {
            index: "accessorToRefCodeKey|a".into(),
            target: "RefGroupCode|r".into(),
        }
        .is_not_found());
        assert!(!StateError::Decode("bad".into()).is_not_found());
    }

    #[test]
    fn test_result_codes() {
        assert_eq!(ResultCode::Ok.as_u32(), 0);
        let err = StateError::NodeIdNotFound { node_id: "rp1".into() };
        assert_eq!(ResultCode::from(&err), ResultCode::NodeIdNotFound);
        assert_eq!(err.to_string(), "Node ID not found");
        let err = StateError::Store(StoreError::LockPoisoned);
        assert_eq!(ResultCode::from(&err), ResultCode::StoreFailure);
    }
}
