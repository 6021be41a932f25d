//! Exchange Signing Core
//!
//! Deterministic serialization, hashing, and recoverable secp256k1 signing
//! for trading actions submitted to the exchange REST API. The crate is
//! synchronous, stateless, and performs no I/O; callers own nonces,
//! key lifecycle, and request transport.

pub mod codec;
pub mod config;
pub mod error;
pub mod keccak;
pub mod signing;

pub use config::{Config, Environment, EIP712_CHAIN_ID, EIP712_DOMAIN_NAME};
pub use error::{Error, Result};
