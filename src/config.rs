//! Environment configuration for the signing core.

use alloy_primitives::Address;
use std::env;

use crate::{codec, Error, Result};

/// EIP-712 domain name used by the exchange for agent signatures.
pub const EIP712_DOMAIN_NAME: &str = "Exchange";

/// Application-level chain id baked into the signing domain. Not a public
/// chain id; the exchange verifies against this fixed value.
pub const EIP712_CHAIN_ID: u64 = 1337;

/// Deployment environment. Selects the single-character `source`
/// discriminator that scopes agent signatures to one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Mainnet,
    Testnet,
}

impl Environment {
    /// The `source` field of the signed Agent struct.
    pub fn agent_source(&self) -> &'static str {
        match self {
            Environment::Mainnet => "a",
            Environment::Testnet => "b",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Environment::Mainnet)
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Environment::Mainnet),
            "testnet" => Ok(Environment::Testnet),
            other => Err(Error::Config {
                message: format!("unknown environment '{other}' (expected mainnet or testnet)"),
            }),
        }
    }
}

/// Signing configuration loaded from the process environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub environment: Environment,
    /// Vault to act on behalf of, if any. Changes the action-hash tail.
    pub vault_address: Option<Address>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `EXCHANGE_ENV` selects mainnet/testnet (defaults to mainnet);
    /// `EXCHANGE_VAULT_ADDRESS` is optional.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = match env::var("EXCHANGE_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let vault_address = match env::var("EXCHANGE_VAULT_ADDRESS") {
            Ok(value) => Some(codec::parse_address(&value)?),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            vault_address,
        })
    }
}
