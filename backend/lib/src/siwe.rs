//! Sign-In with Ethereum (EIP-4361) challenge issuance, message parsing and
//! signature verification.
//!
//! Verification is deterministic and side-effect-free: given the same message,
//! signature and session nonce it always yields the same result, so callers can
//! retry without consequence. Session and database writes happen in the service
//! layer only after [`verify_message`] succeeds.

use alloy_core::primitives::{eip191_hash_message, Address};
use alloy_signer::{
    k256::ecdsa::{RecoveryId, Signature, VerifyingKey},
    utils::public_key_to_address,
};
use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;

use crate::constants::auth::NONCE_LENGTH;

/// Errors during sign-in message parsing or verification.
#[derive(Debug, Error)]
pub enum SiweError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("invalid message header")]
    InvalidHeader,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("unsupported version: expected 1, got {0}")]
    UnsupportedVersion(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signer mismatch: message address {expected}, recovered {recovered}")]
    SignatureMismatch {
        expected: Address,
        recovered: Address,
    },

    #[error("no challenge nonce in session")]
    NonceMissing,

    #[error("message nonce does not match session nonce")]
    NonceMismatch,

    #[error("challenge expired")]
    ExpiredChallenge,
}

impl SiweError {
    /// True for errors caused by an unparseable message rather than a failed
    /// verification check. Malformed messages map to 400, the rest to 401.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::EmptyMessage
                | Self::InvalidHeader
                | Self::MissingField(_)
                | Self::InvalidAddress(_)
                | Self::InvalidField { .. }
                | Self::UnsupportedVersion(_)
        )
    }
}

/// Generate a fresh sign-in challenge nonce.
///
/// 32 alphanumeric characters drawn from the thread-local CSPRNG.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Parsed EIP-4361 message fields used by the auth flow.
#[derive(Debug, Clone)]
pub struct SiweMessage {
    pub domain: String,
    pub address: Address,
    pub statement: Option<String>,
    pub uri: String,
    pub version: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub expiration_time: Option<DateTime<Utc>>,
}

impl SiweMessage {
    /// Parse a sign-in message from its plain-text EIP-4361 representation.
    pub fn parse(message: &str) -> Result<Self, SiweError> {
        let lines: Vec<&str> = message.lines().collect();
        if lines.is_empty() {
            return Err(SiweError::EmptyMessage);
        }

        let domain = lines[0]
            .strip_suffix(" wants you to sign in with your Ethereum account:")
            .ok_or(SiweError::InvalidHeader)?
            .to_string();

        let address_line = lines.get(1).ok_or(SiweError::MissingField("address"))?;
        let address = address_line
            .trim()
            .parse::<Address>()
            .map_err(|e| SiweError::InvalidAddress(e.to_string()))?;

        let mut statement = None;
        let mut uri = None;
        let mut version = None;
        let mut chain_id = None;
        let mut nonce = None;
        let mut issued_at = None;
        let mut expiration_time = None;

        for raw_line in lines.iter().skip(2) {
            let line = raw_line.trim_end();
            if line.is_empty() {
                continue;
            }

            if let Some(value) = line.strip_prefix("URI: ") {
                uri = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("Version: ") {
                version = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("Chain ID: ") {
                let parsed = value
                    .parse::<u64>()
                    .map_err(|_| SiweError::InvalidField {
                        field: "Chain ID",
                        reason: "not a valid u64".to_string(),
                    })?;
                chain_id = Some(parsed);
            } else if let Some(value) = line.strip_prefix("Nonce: ") {
                nonce = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("Issued At: ") {
                issued_at = Some(parse_datetime(value)?);
            } else if let Some(value) = line.strip_prefix("Expiration Time: ") {
                expiration_time = Some(parse_datetime(value)?);
            } else if statement.is_none() {
                statement = Some(line.to_string());
            }
        }

        let version = version.ok_or(SiweError::MissingField("Version"))?;
        if version != "1" {
            return Err(SiweError::UnsupportedVersion(version));
        }

        Ok(Self {
            domain,
            address,
            statement,
            uri: uri.ok_or(SiweError::MissingField("URI"))?,
            version,
            chain_id: chain_id.ok_or(SiweError::MissingField("Chain ID"))?,
            nonce: nonce.ok_or(SiweError::MissingField("Nonce"))?,
            issued_at: issued_at.ok_or(SiweError::MissingField("Issued At"))?,
            expiration_time,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.expiration_time.is_some_and(|exp| exp < Utc::now())
    }
}

/// Recover the signer address from an EIP-191 personal_sign signature over
/// `message`.
///
/// The signature is 65 bytes hex (optionally 0x-prefixed): r || s || v with
/// v accepted as 0/1 or 27/28.
pub fn recover_address(message: &str, signature: &str) -> Result<Address, SiweError> {
    let hex_sig = signature.strip_prefix("0x").unwrap_or(signature);
    let bytes = hex::decode(hex_sig).map_err(|e| SiweError::InvalidSignature(e.to_string()))?;
    if bytes.len() != 65 {
        return Err(SiweError::InvalidSignature(format!(
            "expected 65 bytes, got {}",
            bytes.len()
        )));
    }

    let v = match bytes[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        other => {
            return Err(SiweError::InvalidSignature(format!(
                "invalid recovery id: {other}"
            )))
        }
    };
    let recovery_id = RecoveryId::from_byte(v)
        .ok_or_else(|| SiweError::InvalidSignature("invalid recovery id".to_string()))?;

    let sig = Signature::from_slice(&bytes[..64])
        .map_err(|e| SiweError::InvalidSignature(e.to_string()))?;

    let message_hash = eip191_hash_message(message.as_bytes());
    let verifying_key = VerifyingKey::recover_from_prehash(&message_hash.0, &sig, recovery_id)
        .map_err(|e| SiweError::InvalidSignature(e.to_string()))?;

    Ok(public_key_to_address(&verifying_key))
}

/// Verify a sign-in message against its signature and the nonce stored in the
/// caller's session.
///
/// Checks run in a fixed order and short-circuit on the first failure:
/// 1. the message parses as EIP-4361 plaintext,
/// 2. the recovered signer matches the address asserted in the message,
/// 3. the embedded nonce matches the session nonce,
/// 4. the message has not expired.
pub fn verify_message(
    message: &str,
    signature: &str,
    session_nonce: Option<&str>,
) -> Result<SiweMessage, SiweError> {
    let parsed = SiweMessage::parse(message)?;

    let recovered = recover_address(message, signature)?;
    if recovered != parsed.address {
        return Err(SiweError::SignatureMismatch {
            expected: parsed.address,
            recovered,
        });
    }

    let nonce = session_nonce.ok_or(SiweError::NonceMissing)?;
    if parsed.nonce != nonce {
        return Err(SiweError::NonceMismatch);
    }

    if parsed.is_expired() {
        return Err(SiweError::ExpiredChallenge);
    }

    Ok(parsed)
}

fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, SiweError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SiweError::InvalidField {
            field: "datetime",
            reason: e.to_string(),
        })
}
