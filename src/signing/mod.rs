//! Signing pipeline for exchange actions.
//!
//! Every order or cancel request must carry a recoverable secp256k1
//! signature that the exchange validates against its own serialization of
//! the same action. The pipeline is deterministic end to end:
//!
//! ```text
//! Action (orders / cancels)
//!       │  canonical MessagePack encoding
//!       ▼
//! encoded bytes ∥ nonce (8 BE bytes) ∥ vault tail ── keccak256 ──► connection id
//!       │
//!       ▼
//! EIP-712 Agent struct hash + "Exchange" domain hash ──► signing hash
//!       │
//!       ▼
//! secp256k1 RFC 6979 signature + recovery id ──► (r, s, v)
//! ```
//!
//! Any divergence from the exchange's serialization — field order, nonce
//! endianness, vault padding — produces a signature the server silently
//! rejects, so the wire encoding and the hash layouts in this module are
//! byte-for-byte contracts, pinned by fixture tests.
//!
//! # Example
//!
//! ```ignore
//! use exchange_signing::signing::{current_nonce, ActionSigner, Order, OrderType, Tif};
//! use exchange_signing::Environment;
//!
//! let order = Order {
//!     asset: 4,
//!     is_buy: true,
//!     limit_px: "1670.1".to_string(),
//!     sz: "0.5".to_string(),
//!     reduce_only: false,
//!     order_type: OrderType::limit(Tif::Gtc),
//! };
//!
//! let signer = ActionSigner::new(Environment::Testnet);
//! let signature = signer.sign_orders(vec![order], "na", current_nonce(), &private_key)?;
//! ```

pub mod domain;
pub mod order_types;
pub mod signer;

pub use domain::{agent_struct_hash, domain_hash, signing_hash, AGENT_TYPE_HASH, EIP712_DOMAIN_TYPE_HASH};
pub use order_types::{Action, Cancel, CancelAction, Limit, Order, OrderAction, OrderType, Tif};
pub use signer::{
    address_from_private_key, sign_action, sign_agent_action, sign_cancel_action, sign_digest,
    sign_order_action, ActionSigner, Signature,
};

/// Current millisecond epoch, the conventional nonce for a signed payload.
/// Uniqueness and monotonicity across concurrent callers remain the
/// caller's responsibility.
pub fn current_nonce() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
