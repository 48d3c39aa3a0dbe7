//! Unified error type for signed message handling

use thiserror::Error;

/// Main error type for the signed message library
#[derive(Debug, Error)]
pub enum SignedMessageError {
    #[error("Length {0} exceeds the 0xffff varint limit")]
    LengthTooLarge(usize),

    #[error("No usable private key supplied")]
    MissingKey,

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("No recovery id reproduced the signing address")]
    RecoveryExhausted,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<base64::DecodeError> for SignedMessageError {
    fn from(e: base64::DecodeError) -> Self {
        SignedMessageError::MalformedSignature(e.to_string())
    }
}

impl From<bs58::decode::Error> for SignedMessageError {
    fn from(e: bs58::decode::Error) -> Self {
        SignedMessageError::InvalidFormat(e.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SignedMessageError>;
