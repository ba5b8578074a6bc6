//! # Domain Errors
//!
//! Error types for the Asset Store subsystem.
//!
//! ## Design Principles
//!
//! - Each variant carries enough structure (kind, field, reason, id) for the
//!   HTTP boundary to build an actionable client message
//! - Failures are terminal for the single request that raised them
//! - No panics in domain logic (use Result instead)

use thiserror::Error;

/// Errors raised while encoding, decoding, storing or loading an asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Payload is not a JSON object.
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    /// Payload has no string `type` field.
    #[error("missing 'type' field in request")]
    MissingDiscriminator,

    /// Discriminator names a kind the registry does not know.
    #[error("unknown asset type: {kind}")]
    UnknownVariant { kind: String },

    /// A field is missing, mistyped or not allowed for the declared kind.
    #[error("invalid field '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    /// Stored bytes do not describe a well-formed record.
    #[error("corrupt record: {reason}")]
    CorruptRecord { reason: String },

    /// No record is stored under this identifier.
    #[error("asset not found: {id}")]
    NotFound { id: String },

    /// The persistence collaborator failed.
    #[error("storage failure: {message}")]
    StorageFailure { message: String },
}

impl AssetError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AssetError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        AssetError::CorruptRecord {
            reason: reason.into(),
        }
    }
}

/// Errors from a persistence adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {message}")]
    IOError { message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::IOError {
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for AssetError {
    fn from(e: StoreError) -> Self {
        AssetError::StorageFailure {
            message: e.to_string(),
        }
    }
}

/// Errors raised while building the variant registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("asset kind '{kind}' is already registered")]
    DuplicateKind { kind: &'static str },

    #[error("field '{field}' is reserved and cannot be declared by a variant")]
    ReservedField { field: &'static str },

    #[error("field '{field}' declared twice in kind '{kind}'")]
    DuplicateField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("field '{field}' of kind '{kind}' does not match the typed asset: {reason}")]
    ShapeMismatch {
        kind: &'static str,
        field: &'static str,
        reason: &'static str,
    },
}
