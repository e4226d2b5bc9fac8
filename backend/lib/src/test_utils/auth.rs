//! Test utilities for authentication
//!
//! Wallet generation, EIP-191 signing and sign-in message construction.

use alloy_core::primitives::{eip191_hash_message, Address};
use alloy_signer::{k256::ecdsa::SigningKey, utils::public_key_to_address};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::constants::test::siwe::{TEST_DOMAIN, TEST_STATEMENT, TEST_URI};

/// Generate a random ETH wallet
///
/// Returns the corresponding address and signing key
pub fn eth_wallet() -> (Address, SigningKey) {
    let signing_key = SigningKey::random(&mut rand::thread_rng());
    let verifying_key = signing_key.verifying_key();
    let address = public_key_to_address(verifying_key);

    (address, signing_key)
}

/// Sign a message using EIP-191 personal_sign format
pub fn sign_message(signing_key: &SigningKey, message: &str) -> String {
    let message_hash = eip191_hash_message(message.as_bytes());
    let (sig, recovery_id) = signing_key
        .sign_prehash_recoverable(&message_hash.0)
        .unwrap();

    let mut sig_bytes = [0u8; 65];
    sig_bytes[..64].copy_from_slice(&sig.to_bytes());
    sig_bytes[64] = recovery_id.to_byte();

    format!("0x{}", hex::encode(sig_bytes))
}

/// Build a sign-in message for the given wallet and challenge nonce
pub fn build_login_message(address: &Address, chain_id: u64, nonce: &str) -> String {
    format!(
        "{domain} wants you to sign in with your Ethereum account:\n\
         {address}\n\
         \n\
         {statement}\n\
         \n\
         URI: {uri}\n\
         Version: 1\n\
         Chain ID: {chain_id}\n\
         Nonce: {nonce}\n\
         Issued At: {issued_at}",
        domain = TEST_DOMAIN,
        statement = TEST_STATEMENT,
        uri = TEST_URI,
        issued_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Same as [`build_login_message`] but with an explicit expiration time
pub fn build_login_message_with_expiry(
    address: &Address,
    chain_id: u64,
    nonce: &str,
    expiration_time: DateTime<Utc>,
) -> String {
    format!(
        "{base}\nExpiration Time: {expiry}",
        base = build_login_message(address, chain_id, nonce),
        expiry = expiration_time.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}
