//! Environment-driven server configuration.
//!
//! All state that outlives a single tool call lives here: base API URL,
//! optional signing key, optional wallet address. The struct is built once at
//! startup and handed to the client immutably.

use std::env;

use crate::consts::{MAINNET_API_URL, TESTNET_API_URL};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_url: String,
    pub private_key: Option<String>,
    pub wallet_address: Option<String>,
    pub is_testnet: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: MAINNET_API_URL.to_string(),
            private_key: None,
            wallet_address: None,
            is_testnet: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// `HYPERLIQUID_TESTNET=true` switches the base URL to testnet;
    /// `HYPERLIQUID_API_URL` overrides it entirely.
    pub fn from_env() -> Self {
        let is_testnet = env::var("HYPERLIQUID_TESTNET")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let default_url = if is_testnet {
            TESTNET_API_URL
        } else {
            MAINNET_API_URL
        };

        let api_url = env::var("HYPERLIQUID_API_URL").unwrap_or_else(|_| default_url.to_string());

        Self {
            api_url,
            private_key: env::var("HYPERLIQUID_PRIVATE_KEY").ok().filter(|v| !v.is_empty()),
            wallet_address: env::var("HYPERLIQUID_WALLET_ADDRESS")
                .ok()
                .filter(|v| !v.is_empty()),
            is_testnet,
        }
    }

    /// Validate the configuration, returning human-readable problems.
    ///
    /// A missing private key is not an error: the server then runs in
    /// read-only mode and write tools fail at the signing gate.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.api_url.is_empty() {
            errors.push("API URL is required".to_string());
        }

        if let Some(key) = &self.private_key {
            if !key.starts_with("0x") {
                errors.push("Private key must start with 0x".to_string());
            }
        }

        if let Some(address) = &self.wallet_address {
            if !address.starts_with("0x") {
                errors.push("Wallet address must start with 0x".to_string());
            }
        }

        errors
    }
}
