//! EIP-712 hashing for agent signatures.
//!
//! The exchange verifies agent signatures against a fixed domain
//! (`name = "Exchange"`, `version = "1"`, `chainId = 1337`,
//! `verifyingContract = 0x0`) and a fixed `Agent(string source,bytes32
//! connectionId)` struct. The two type hashes are precomputed from the
//! canonical type strings and embedded as constants; tests pin them against
//! a fresh `keccak256` of those strings.

use alloy_primitives::{b256, Address, B256, U256};

use crate::keccak::keccak256;

/// `keccak256("EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)")`
pub const EIP712_DOMAIN_TYPE_HASH: B256 =
    b256!("8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f");

/// `keccak256("Agent(string source,bytes32 connectionId)")`
pub const AGENT_TYPE_HASH: B256 =
    b256!("26f05c2f7239b6983075e58321292d77b3aa173d19b27257ac96ab362570f508");

/// Domain version. Fixed by the exchange.
const DOMAIN_VERSION: &str = "1";

/// Compute the EIP-712 domain separator hash.
///
/// Version and verifying contract are fixed (`"1"` and the zero address);
/// only the name and chain id vary.
pub fn domain_hash(name: &str, chain_id: u64) -> B256 {
    let mut data = Vec::with_capacity(32 * 5);
    data.extend_from_slice(EIP712_DOMAIN_TYPE_HASH.as_slice());
    data.extend_from_slice(keccak256(name.as_bytes()).as_slice());
    data.extend_from_slice(keccak256(DOMAIN_VERSION.as_bytes()).as_slice());
    data.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    data.extend_from_slice(B256::left_padding_from(Address::ZERO.as_slice()).as_slice());
    keccak256(&data)
}

/// Compute the EIP-712 struct hash for `Agent(source, connectionId)`.
///
/// `source` is the single-character environment discriminator (`"a"`
/// mainnet, `"b"` testnet).
pub fn agent_struct_hash(source: &str, connection_id: B256) -> B256 {
    let mut data = Vec::with_capacity(32 * 3);
    data.extend_from_slice(AGENT_TYPE_HASH.as_slice());
    data.extend_from_slice(keccak256(source.as_bytes()).as_slice());
    data.extend_from_slice(connection_id.as_slice());
    keccak256(&data)
}

/// Final digest per EIP-191/712: `keccak256(0x19 0x01 || domain || struct)`.
pub fn signing_hash(domain_hash: B256, struct_hash: B256) -> B256 {
    let mut data = Vec::with_capacity(2 + 32 * 2);
    data.extend_from_slice(&[0x19, 0x01]);
    data.extend_from_slice(domain_hash.as_slice());
    data.extend_from_slice(struct_hash.as_slice());
    keccak256(&data)
}
