//! Canonical wire types for signable exchange actions.
//!
//! Actions are serialized to MessagePack with `rmp_serde::to_vec_named`
//! before hashing, so the serialized key order is exactly the struct field
//! declaration order below. That order is part of the wire contract the
//! exchange verifies against: `Order` encodes `a,b,p,s,r,t` (size before
//! reduce-only, deliberately non-alphabetical) and the `type` tag is always
//! the first map key. Reordering fields here changes every connection id.

use alloy_primitives::{Address, B256};
use serde::Serialize;

use crate::keccak::keccak256;
use crate::Result;

/// Time in force for a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tif {
    /// Good till cancel.
    Gtc,
    /// Immediate or cancel.
    Ioc,
    /// Add liquidity only (post-only).
    Alo,
}

/// Order type wire shape: a single-entry map `{"limit": {"tif": ...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limit {
    pub tif: Tif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderType {
    pub limit: Limit,
}

impl OrderType {
    pub fn limit(tif: Tif) -> Self {
        Self { limit: Limit { tif } }
    }
}

/// A single order in wire form.
///
/// Price and size are carried as the caller's decimal strings and hashed
/// verbatim; `"10000"` and `"10000.0"` are different orders as far as the
/// signature is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "b")]
    pub is_buy: bool,
    #[serde(rename = "p")]
    pub limit_px: String,
    #[serde(rename = "s")]
    pub sz: String,
    #[serde(rename = "r")]
    pub reduce_only: bool,
    #[serde(rename = "t")]
    pub order_type: OrderType,
}

/// A single cancel in wire form: asset index and exchange order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cancel {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "o")]
    pub oid: u64,
}

/// Batch of orders with a grouping tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAction {
    pub orders: Vec<Order>,
    pub grouping: String,
}

impl OrderAction {
    /// Standard ungrouped batch (`grouping = "na"`).
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            grouping: "na".to_string(),
        }
    }
}

/// Batch of cancels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelAction {
    pub cancels: Vec<Cancel>,
}

/// A signable exchange action. The `type` tag serializes first, so an order
/// action and a cancel action can never hash alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Order(OrderAction),
    Cancel(CancelAction),
}

impl Action {
    /// Serialize to the canonical MessagePack encoding.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// Hash this action together with its nonce and optional vault address
    /// into the 32-byte connection id signed under the Agent schema.
    ///
    /// Layout: `encode(action) || nonce as 8 big-endian bytes || tail`,
    /// where the tail is a single `0x00` byte without a vault, or `0x01`
    /// followed by the 20 address bytes with one. The tail is fixed-width,
    /// never length-prefixed.
    pub fn connection_id(&self, nonce: u64, vault_address: Option<Address>) -> Result<B256> {
        let mut data = self.encode()?;
        data.extend_from_slice(&nonce.to_be_bytes());
        match vault_address {
            None => data.push(0x00),
            Some(addr) => {
                data.push(0x01);
                data.extend_from_slice(addr.as_slice());
            }
        }
        Ok(keccak256(&data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    const NONCE: u64 = 1681923833000;

    fn sample_order() -> Order {
        Order {
            asset: 4,
            is_buy: true,
            limit_px: "1670.1".to_string(),
            sz: "0.5".to_string(),
            reduce_only: false,
            order_type: OrderType::limit(Tif::Gtc),
        }
    }

    #[test]
    fn order_wire_bytes() {
        let encoded = rmp_serde::to_vec_named(&sample_order()).unwrap();
        assert_eq!(
            hex::encode(&encoded),
            "86a16104a162c3a170a6313637302e31a173a3302e35a172c2a17481a56c696d697481a3746966a3477463"
        );
    }

    #[test]
    fn order_key_order_is_abpsrt() {
        // The six keys must appear as a,b,p,s,r,t in the byte stream; in
        // particular s (size) precedes r (reduce-only).
        let encoded = rmp_serde::to_vec_named(&sample_order()).unwrap();
        let pos = |key: u8| {
            encoded
                .windows(2)
                .position(|w| w == [0xa1, key])
                .unwrap_or_else(|| panic!("key {} missing", key as char))
        };
        let keys = [pos(b'a'), pos(b'b'), pos(b'p'), pos(b's'), pos(b'r'), pos(b't')];
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys out of order: {keys:?}");
    }

    #[test]
    fn cancel_key_order_is_ao() {
        let encoded = rmp_serde::to_vec_named(&Cancel { asset: 4, oid: 123456789 }).unwrap();
        // fixmap(2), "a", 4, "o", uint32 123456789
        assert_eq!(hex::encode(&encoded), "82a16104a16fce075bcd15");
    }

    #[test]
    fn order_action_bytes_start_with_type_tag() {
        let action = Action::Order(OrderAction::new(vec![sample_order()]));
        let encoded = action.encode().unwrap();
        assert_eq!(
            hex::encode(&encoded),
            "83a474797065a56f72646572a66f72646572739186a16104a162c3a170a6313637302e31a173a3302e35a172c2a17481a56c696d697481a3746966a3477463a867726f7570696e67a26e61"
        );
        // fixmap(3) then "type" as the first key
        assert_eq!(&encoded[..6], &[0x83, 0xa4, b't', b'y', b'p', b'e']);
    }

    #[test]
    fn cancel_action_bytes() {
        let action = Action::Cancel(CancelAction {
            cancels: vec![Cancel { asset: 4, oid: 123456789 }],
        });
        assert_eq!(
            hex::encode(action.encode().unwrap()),
            "82a474797065a663616e63656ca763616e63656c739182a16104a16fce075bcd15"
        );
    }

    #[test]
    fn large_order_id_uses_uint64() {
        let action = Action::Cancel(CancelAction {
            cancels: vec![Cancel { asset: 4, oid: 77738308063 }],
        });
        assert_eq!(
            hex::encode(action.encode().unwrap()),
            "82a474797065a663616e63656ca763616e63656c739182a16104a16fcf00000012199071df"
        );
        assert_eq!(
            action.connection_id(NONCE, None).unwrap(),
            b256!("35cba009282a0eaa9ef6dab1e77413d2f5aa7d90384b51dbd066ac3d7e7cb84e")
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let action = Action::Order(OrderAction::new(vec![sample_order()]));
        assert_eq!(action.encode().unwrap(), action.encode().unwrap());
        assert_eq!(
            action.connection_id(NONCE, None).unwrap(),
            action.connection_id(NONCE, None).unwrap()
        );
    }

    #[test]
    fn connection_id_fixtures() {
        let action = Action::Order(OrderAction::new(vec![sample_order()]));
        assert_eq!(
            action.connection_id(NONCE, None).unwrap(),
            b256!("9b194f5eba993148069ea6a418eca804d75f6784c748ec29b6d29e1c4bd889ff")
        );

        let vault = address!("1234567890123456789012345678901234567890");
        assert_eq!(
            action.connection_id(NONCE, Some(vault)).unwrap(),
            b256!("99aa5551e5003fe9203695350e22198619e654e243edc347feb021a1cb6404b1")
        );

        let cancel = Action::Cancel(CancelAction {
            cancels: vec![Cancel { asset: 4, oid: 123456789 }],
        });
        assert_eq!(
            cancel.connection_id(NONCE, None).unwrap(),
            b256!("1420d666155164929fdfa641857b6d090313f83717b11af7c2f174a948e02952")
        );
    }

    #[test]
    fn multi_order_batch_fixture() {
        let second = Order {
            asset: 1,
            is_buy: false,
            limit_px: "29000".to_string(),
            sz: "0.0123".to_string(),
            reduce_only: true,
            order_type: OrderType::limit(Tif::Alo),
        };
        let action = Action::Order(OrderAction::new(vec![sample_order(), second]));
        assert_eq!(
            action.connection_id(NONCE, None).unwrap(),
            b256!("362d440274be7f03a6f5512d3914be3f50d6fbca8d047f08d1b2b8c5fb6c9cd4")
        );
    }

    #[test]
    fn price_strings_hash_verbatim() {
        // "1670.1" vs "1670.10" is the same number but a different wire
        // string, so the connection id must differ.
        let mut reformatted = sample_order();
        reformatted.limit_px = "1670.10".to_string();
        let a = Action::Order(OrderAction::new(vec![sample_order()]));
        let b = Action::Order(OrderAction::new(vec![reformatted]));
        assert_ne!(
            a.connection_id(NONCE, None).unwrap(),
            b.connection_id(NONCE, None).unwrap()
        );
        assert_eq!(
            b.connection_id(NONCE, None).unwrap(),
            b256!("1669318e4682473906735537ac1722bdf40f779538fad25aa5f6b24c02e8e2fe")
        );
    }

    #[test]
    fn every_order_field_feeds_the_hash() {
        let base = Action::Order(OrderAction::new(vec![sample_order()]));
        let base_id = base.connection_id(NONCE, None).unwrap();

        let variants = [
            Order { asset: 5, ..sample_order() },
            Order { is_buy: false, ..sample_order() },
            Order { limit_px: "1670.2".to_string(), ..sample_order() },
            Order { sz: "0.6".to_string(), ..sample_order() },
            Order { reduce_only: true, ..sample_order() },
            Order { order_type: OrderType::limit(Tif::Ioc), ..sample_order() },
        ];
        for order in variants {
            let action = Action::Order(OrderAction::new(vec![order.clone()]));
            assert_ne!(
                action.connection_id(NONCE, None).unwrap(),
                base_id,
                "field change not reflected: {order:?}"
            );
        }

        // The nonce feeds the hash too.
        assert_ne!(base.connection_id(NONCE + 1, None).unwrap(), base_id);
    }

    #[test]
    fn vault_tail_changes_the_hash() {
        let action = Action::Order(OrderAction::new(vec![sample_order()]));
        let without = action.connection_id(NONCE, None).unwrap();
        let with = action
            .connection_id(NONCE, Some(address!("1234567890123456789012345678901234567890")))
            .unwrap();
        let with_other = action
            .connection_id(NONCE, Some(address!("0000000000000000000000000000000000000001")))
            .unwrap();
        assert_ne!(without, with);
        assert_ne!(with, with_other);
        assert_ne!(without, with_other);
    }

    #[test]
    fn action_types_hash_apart() {
        // Same asset id on both sides; the leading type tag must still
        // separate them.
        let order = Action::Order(OrderAction::new(vec![sample_order()]));
        let cancel = Action::Cancel(CancelAction {
            cancels: vec![Cancel { asset: 4, oid: 1 }],
        });
        assert_ne!(
            order.connection_id(NONCE, None).unwrap(),
            cancel.connection_id(NONCE, None).unwrap()
        );
    }
}
