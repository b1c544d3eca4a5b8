//! Error types returned by every fallible x509gen operation.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, X509GenError>;

/// Represents errors that can occur while encoding or generating a certificate.
///
/// Every failure is raised synchronously by the call that detected it and is
/// returned to the caller unchanged; nothing is retried and no partial output
/// is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum X509GenError {
    /// A caller-supplied value is malformed (unknown RDN attribute, bad OID).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No signing scheme maps to the requested algorithm, or the signer
    /// rejected the scheme.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signing primitive failed.
    #[error("Signing failed: {0}")]
    SigningFailure(String),

    /// A value falls outside the range its DER encoding can represent.
    #[error("Encoding overflow: {0}")]
    EncodingOverflow(String),

    /// Error during key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// Error while exporting key material.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),
}

impl From<der::Error> for X509GenError {
    fn from(err: der::Error) -> Self {
        X509GenError::EncodingError(err.to_string())
    }
}

impl From<pkcs8::spki::Error> for X509GenError {
    fn from(err: pkcs8::spki::Error) -> Self {
        X509GenError::EncodingError(err.to_string())
    }
}

impl From<rsa::Error> for X509GenError {
    fn from(err: rsa::Error) -> Self {
        X509GenError::SigningFailure(err.to_string())
    }
}

impl From<ecdsa::Error> for X509GenError {
    /// Signature primitives (DSA and ECDSA share the `signature` crate error).
    fn from(err: ecdsa::Error) -> Self {
        X509GenError::SigningFailure(err.to_string())
    }
}
