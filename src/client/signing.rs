//! Request signing for the exchange endpoint.
//!
//! The signed message is the compact JSON serialization of
//! `{"action":…,"nonce":…,"vaultAddress":…}` with the fields in exactly that
//! order and `vaultAddress` explicitly null when unset. The keccak256 hash of
//! those bytes is signed with the wallet key and the signature travels as
//! `0x` + r (32 bytes) + s (32 bytes) + v (1 byte, 27 or 28).
//!
//! Byte-identical serialization is load-bearing: the venue recovers the
//! signer from the same serialization, so any drift in field order or
//! whitespace produces a signature that recovers to the wrong address.

use alloy::{
    primitives::{keccak256, Address},
    signers::{local::PrivateKeySigner, SignerSync},
};
use serde::Serialize;

use crate::{client::exchange::Action, prelude::*, Error};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedMessage<'a> {
    action: &'a Action,
    nonce: u64,
    vault_address: Option<Address>,
}

/// The exact byte string whose keccak256 hash gets signed.
pub(crate) fn canonical_message(
    action: &Action,
    nonce: u64,
    vault_address: Option<Address>,
) -> Result<String> {
    serde_json::to_string(&SignedMessage {
        action,
        nonce,
        vault_address,
    })
    .map_err(|e| Error::JsonParse(e.to_string()))
}

/// Sign an action, producing the 65-byte r||s||v signature as 0x-hex.
pub(crate) fn sign_action(
    wallet: &PrivateKeySigner,
    action: &Action,
    nonce: u64,
    vault_address: Option<Address>,
) -> Result<String> {
    let message = canonical_message(action, nonce, vault_address)?;
    let hash = keccak256(message.as_bytes());
    let signature = wallet
        .sign_hash_sync(&hash)
        .map_err(|e| Error::SignatureFailure(e.to_string()))?;

    let mut bytes = [0u8; 65];
    bytes[..32].copy_from_slice(&signature.r().to_be_bytes::<32>());
    bytes[32..64].copy_from_slice(&signature.s().to_be_bytes::<32>());
    bytes[64] = 27 + signature.v() as u8;
    Ok(alloy::primitives::hex::encode_prefixed(bytes))
}
