//! Recoverable secp256k1 signing for exchange actions.
//!
//! Produces Ethereum-convention `(r, s, v)` signatures over EIP-712 agent
//! digests. The recovery id reported by the curve library is not trusted
//! directly: the signer's address is derived independently from the private
//! key, and the recovery id is fixed by recovering candidate public keys
//! from the signature and comparing addresses. That check is portable
//! across curve-library implementations.

use alloy_primitives::{Address, B256};
use k256::ecdsa::{RecoveryId, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Serialize, Serializer};
use tracing::debug;
use zeroize::Zeroizing;

use super::domain::{agent_struct_hash, domain_hash, signing_hash};
use super::order_types::{Action, Cancel, CancelAction, Order, OrderAction};
use crate::codec;
use crate::config::{Environment, EIP712_CHAIN_ID, EIP712_DOMAIN_NAME};
use crate::keccak::keccak256;
use crate::{Error, Result};

/// An Ethereum-convention recoverable signature: `v = recovery id + 27`.
///
/// Serializes to the shape the exchange expects in request bodies:
/// `{"r": "0x..", "s": "0x..", "v": 27}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signature {
    #[serde(serialize_with = "hex_prefixed")]
    pub r: B256,
    #[serde(serialize_with = "hex_prefixed")]
    pub s: B256,
    pub v: u8,
}

fn hex_prefixed<S: Serializer>(value: &B256, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&codec::bytes_to_hex(value.as_slice(), true))
}

/// Parse a hex private key into a signing key. Key bytes are zeroed when
/// the scope ends; error messages never echo the input.
fn parse_signing_key(private_key_hex: &str) -> Result<SigningKey> {
    let key_bytes = Zeroizing::new(
        codec::hex_to_fixed::<32>(private_key_hex)
            .map_err(|_| Error::InvalidKey("expected 32 bytes of hex".to_string()))?,
    );
    SigningKey::from_slice(&key_bytes[..])
        .map_err(|_| Error::InvalidKey("not a valid secp256k1 scalar".to_string()))
}

/// Ethereum address of a public key: keccak256 of the uncompressed point's
/// 64 payload bytes, last 20 bytes.
fn derive_address(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&digest[12..])
}

/// Derive the account address controlled by a private key.
pub fn address_from_private_key(private_key_hex: &str) -> Result<Address> {
    let key = parse_signing_key(private_key_hex)?;
    Ok(derive_address(key.verifying_key()))
}

/// Sign a 32-byte digest, resolving the Ethereum recovery id.
///
/// The signature is deterministic (RFC 6979), so identical inputs always
/// produce identical output; a failure here is never worth retrying.
pub fn sign_digest(digest: B256, private_key_hex: &str) -> Result<Signature> {
    let key = parse_signing_key(private_key_hex)?;

    let (signature, native_id) = key
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|e| Error::Signing(e.to_string()))?;

    let expected = derive_address(key.verifying_key());

    // Try the library's candidate first, then the remaining ids. The
    // matching id is the one whose recovered key reproduces the signer's
    // address.
    let native = native_id.to_byte();
    let candidates = std::iter::once(native).chain((0..4).filter(|id| *id != native));
    for candidate in candidates {
        let Some(recovery_id) = RecoveryId::from_byte(candidate) else {
            continue;
        };
        let Ok(recovered) =
            VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recovery_id)
        else {
            continue;
        };
        if derive_address(&recovered) == expected {
            let bytes = signature.to_bytes();
            return Ok(Signature {
                r: B256::from_slice(&bytes[..32]),
                s: B256::from_slice(&bytes[32..]),
                v: candidate + 27,
            });
        }
    }

    Err(Error::RecoveryIdNotFound)
}

/// Sign a connection id under the EIP-712 Agent schema.
pub fn sign_agent_action(
    domain_name: &str,
    chain_id: u64,
    source: &str,
    connection_id: B256,
    private_key_hex: &str,
) -> Result<Signature> {
    let digest = signing_hash(
        domain_hash(domain_name, chain_id),
        agent_struct_hash(source, connection_id),
    );
    sign_digest(digest, private_key_hex)
}

/// Encode, hash, and sign an action in one call.
pub fn sign_action(
    action: &Action,
    nonce: u64,
    vault_address: Option<Address>,
    environment: Environment,
    private_key_hex: &str,
) -> Result<Signature> {
    let connection_id = action.connection_id(nonce, vault_address)?;
    debug!(
        nonce,
        vault = vault_address.is_some(),
        source = environment.agent_source(),
        %connection_id,
        "signing action"
    );
    sign_agent_action(
        EIP712_DOMAIN_NAME,
        EIP712_CHAIN_ID,
        environment.agent_source(),
        connection_id,
        private_key_hex,
    )
}

/// Sign a batch of orders.
pub fn sign_order_action(
    orders: Vec<Order>,
    grouping: impl Into<String>,
    nonce: u64,
    vault_address: Option<Address>,
    environment: Environment,
    private_key_hex: &str,
) -> Result<Signature> {
    let action = Action::Order(OrderAction {
        orders,
        grouping: grouping.into(),
    });
    sign_action(&action, nonce, vault_address, environment, private_key_hex)
}

/// Sign a batch of cancels.
pub fn sign_cancel_action(
    cancels: Vec<Cancel>,
    nonce: u64,
    vault_address: Option<Address>,
    environment: Environment,
    private_key_hex: &str,
) -> Result<Signature> {
    let action = Action::Cancel(CancelAction { cancels });
    sign_action(&action, nonce, vault_address, environment, private_key_hex)
}

/// Action signer bound to one deployment environment.
///
/// Holds no key material; the private key is supplied per call and dropped
/// as soon as the signature is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionSigner {
    environment: Environment,
    vault_address: Option<Address>,
}

impl ActionSigner {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            vault_address: None,
        }
    }

    /// Sign on behalf of a vault instead of the account itself.
    pub fn with_vault(mut self, vault_address: Address) -> Self {
        self.vault_address = Some(vault_address);
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn vault_address(&self) -> Option<Address> {
        self.vault_address
    }

    pub fn sign_action(
        &self,
        action: &Action,
        nonce: u64,
        private_key_hex: &str,
    ) -> Result<Signature> {
        sign_action(
            action,
            nonce,
            self.vault_address,
            self.environment,
            private_key_hex,
        )
    }

    pub fn sign_orders(
        &self,
        orders: Vec<Order>,
        grouping: impl Into<String>,
        nonce: u64,
        private_key_hex: &str,
    ) -> Result<Signature> {
        sign_order_action(
            orders,
            grouping,
            nonce,
            self.vault_address,
            self.environment,
            private_key_hex,
        )
    }

    pub fn sign_cancels(
        &self,
        cancels: Vec<Cancel>,
        nonce: u64,
        private_key_hex: &str,
    ) -> Result<Signature> {
        sign_cancel_action(
            cancels,
            nonce,
            self.vault_address,
            self.environment,
            private_key_hex,
        )
    }
}
