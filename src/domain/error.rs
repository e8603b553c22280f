//! Error types for the Cipherdeck plugin.
//!
//! This module defines the centralized error type [`CipherdeckError`] and a type
//! alias [`Result`] used throughout the crate. The variants follow the failure
//! taxonomy of a submission: validation failures never reach the network,
//! service failures carry the message reported by the cipher service, and
//! transport failures describe a call that never produced a usable reply.
//!
//! An unparseable key is deliberately absent from this enum: it is recovered
//! silently by [`crate::domain::parse_key_or_default`].

use thiserror::Error;

/// The main error type for Cipherdeck operations.
///
/// # Examples
///
/// ```
/// use cipherdeck::CipherdeckError;
///
/// let err = CipherdeckError::Service("Invalid algorithm".to_string());
/// assert_eq!(err.to_string(), "Invalid algorithm");
/// ```
#[derive(Debug, Error)]
pub enum CipherdeckError {
    /// The submission was rejected locally before any call was made.
    ///
    /// The string is the user-facing explanation shown in the notification.
    #[error("{0}")]
    Validation(String),

    /// The cipher service answered with `success = false`.
    ///
    /// The string is the service-provided message, surfaced verbatim.
    #[error("{0}")]
    Service(String),

    /// The call did not complete or the reply could not be decoded.
    #[error("{0}")]
    Transport(String),

    /// A quiz answer referenced a question or option that does not exist.
    #[error("Quiz error: {0}")]
    Quiz(String),

    /// Configuration is invalid or missing (theme or quiz bank files).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Cipherdeck operations.
pub type Result<T> = std::result::Result<T, CipherdeckError>;
