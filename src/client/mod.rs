//! Remote client for the Hyperliquid REST API.
//!
//! One struct owns everything that outlives a single call: the HTTP client,
//! the optional signing key, and the optional wallet address. Reads go to
//! `/info` unauthenticated; writes go to `/exchange` behind the signing gate.
//!
//! # Submodules
//! - `info` - Unauthenticated info queries
//! - `exchange` - Authenticated mutations (orders, cancels)
//! - `signing` - Canonical message construction and ECDSA signing

mod exchange;
mod info;
mod signing;

pub use exchange::{Action, BulkCancel, PlaceOrder};
pub use info::{CandleSnapshotRequest, InfoRequest};

use alloy::{primitives::Address, signers::local::PrivateKeySigner};

use crate::{config::ServerConfig, prelude::*, req::HttpClient, Error};

pub struct HyperliquidClient {
    pub(crate) http_client: HttpClient,
    pub(crate) wallet: Option<PrivateKeySigner>,
    pub(crate) wallet_address: Option<Address>,
}

// Security: Custom Debug implementation to prevent private key leakage
impl std::fmt::Debug for HyperliquidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperliquidClient")
            .field("http_client", &self.http_client)
            .field("wallet", &self.wallet.as_ref().map(|_| "<redacted>"))
            .field("wallet_address", &self.wallet_address)
            .finish()
    }
}

impl HyperliquidClient {
    /// Build a client from validated configuration.
    ///
    /// When no wallet address is configured but a private key is, the address
    /// is derived from the key.
    pub fn new(config: &ServerConfig) -> Result<HyperliquidClient> {
        let wallet = config
            .private_key
            .as_deref()
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(|e| Error::PrivateKeyParse(e.to_string()))
            })
            .transpose()?;

        let wallet_address = match config.wallet_address.as_deref() {
            Some(address) => Some(
                address
                    .parse::<Address>()
                    .map_err(|e| Error::AddressParse(e.to_string()))?,
            ),
            None => wallet.as_ref().map(|w| w.address()),
        };

        Ok(HyperliquidClient {
            http_client: HttpClient::new(config.api_url.clone())?,
            wallet,
            wallet_address,
        })
    }

    /// Whether a signing key is configured (trading mode vs read-only mode).
    pub fn can_trade(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn wallet_address(&self) -> Option<Address> {
        self.wallet_address
    }

    /// Resolve the user for an account query: explicit argument or the
    /// configured wallet.
    pub(crate) fn resolve_user(&self, user: Option<Address>) -> Result<Address> {
        user.or(self.wallet_address)
            .ok_or(Error::WalletAddressRequired)
    }
}
