//! Error types for the exchange signing core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Hex decoding error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Decoded value too long: {actual} bytes exceeds maximum of {max}")]
    BufferTooSmall { actual: usize, max: usize },

    #[error("Invalid address: expected 20 bytes, got {0}")]
    InvalidAddress(usize),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Action serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Signing error: {0}")]
    Signing(String),

    /// No recovery id reproduces the signer's address. Internal invariant
    /// violation: cannot occur for a signature we just produced over the
    /// same digest.
    #[error("No matching recovery id for signature")]
    RecoveryIdNotFound,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
