use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are reported by kind so callers can log them
/// distinctly, even when they all collapse to the same rejection.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
