#![forbid(unsafe_code)]

use std::{ffi::OsStr, fmt};

use anchor_lang::prelude::Pubkey;
use sbt_minter::utils::profile::SbtProfile;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

pub const SECRET_KEY_ENV_VAR: &str = "SBT_SIGNER_SECRET_KEY";
pub const SECRET_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// Profile as submitted for signing. Field limits match the on-chain record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRequest {
    pub name: String,
    pub photo: String,
    pub twitter_id: String,
    pub discord_id: String,
    pub telegram_id: String,
    pub score: u64,
}

impl ProfileRequest {
    pub fn as_profile(&self) -> SbtProfile<'_> {
        SbtProfile {
            name: &self.name,
            photo: &self.photo,
            twitter_id: &self.twitter_id,
            discord_id: &self.discord_id,
            telegram_id: &self.telegram_id,
            score: self.score,
        }
    }
}

/// Arguments for `mint_sbt_token_*` and `update_sbt_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedProfile {
    pub message_hash: [u8; 32],
    pub signature: [u8; SIGNATURE_LEN],
    pub recovery_id: u8,
    pub signer: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    MissingSecretKey { variable: &'static str },
    InvalidSecretKeyHex(String),
    InvalidSecretKey(String),
    FieldTooLong { field: &'static str },
    InvalidRecoveryId(i32),
    SerializationFailed(String),
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecretKey { variable } => {
                write!(f, "{variable} is not set; export the signer secret key as hex")
            }
            Self::InvalidSecretKeyHex(message) => {
                write!(f, "secret key is not valid hex: {message}")
            }
            Self::InvalidSecretKey(message) => {
                write!(f, "invalid secret key: {message}")
            }
            Self::FieldTooLong { field } => {
                write!(f, "profile field {field} exceeds its maximum length")
            }
            Self::InvalidRecoveryId(id) => {
                write!(f, "unexpected recovery id: {id}")
            }
            Self::SerializationFailed(message) => {
                write!(f, "failed to serialize output: {message}")
            }
        }
    }
}

impl std::error::Error for SignerError {}

/// Parse a 32-byte secret key from hex, with or without a `0x` prefix.
pub fn parse_secret_key(input: &str) -> Result<SecretKey, SignerError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| SignerError::InvalidSecretKeyHex(e.to_string()))?;
    if bytes.len() != SECRET_KEY_LEN {
        return Err(SignerError::InvalidSecretKey(format!(
            "expected {SECRET_KEY_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    SecretKey::from_slice(&bytes).map_err(|e| SignerError::InvalidSecretKey(e.to_string()))
}

pub fn secret_key_from_env() -> Result<SecretKey, SignerError> {
    let value = std::env::var_os(SECRET_KEY_ENV_VAR);
    secret_key_from_value(value.as_deref())
}

fn secret_key_from_value(value: Option<&OsStr>) -> Result<SecretKey, SignerError> {
    let value = value.ok_or(SignerError::MissingSecretKey {
        variable: SECRET_KEY_ENV_VAR,
    })?;
    let text = value
        .to_str()
        .ok_or_else(|| SignerError::InvalidSecretKeyHex("not valid UTF-8".to_string()))?;
    parse_secret_key(text)
}

pub fn generate_secret_key() -> SecretKey {
    SecretKey::new(&mut secp256k1::rand::thread_rng())
}

/// keccak256 address of `key`, as stored in the minter's admin record.
pub fn signer_address(key: &SecretKey) -> Pubkey {
    let public = PublicKey::from_secret_key(&Secp256k1::signing_only(), key);
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&public.serialize_uncompressed()[1..]);
    sbt_minter::utils::signature::signer_address(&raw)
}

pub fn sign_profile(key: &SecretKey, request: &ProfileRequest) -> Result<SignedProfile, SignerError> {
    let profile = request.as_profile();
    if let Some(field) = profile.oversized_field() {
        return Err(SignerError::FieldTooLong { field });
    }

    let message_hash = profile.message_hash();
    let signature = Secp256k1::signing_only()
        .sign_ecdsa_recoverable(&Message::from_digest(message_hash), key);
    let (recovery_id, signature) = signature.serialize_compact();
    let recovery_id = recovery_id.to_i32();

    Ok(SignedProfile {
        message_hash,
        signature,
        recovery_id: u8::try_from(recovery_id)
            .map_err(|_| SignerError::InvalidRecoveryId(recovery_id))?,
        signer: signer_address(key),
    })
}

pub fn render_signed_profile(signed: &SignedProfile) -> Result<String, SignerError> {
    #[derive(serde::Serialize)]
    struct JsonSignResponse {
        message_hash: String,
        signature: String,
        signature_bytes: Vec<u8>,
        recovery_id: u8,
        signer: String,
        signer_hex: String,
    }

    let json = JsonSignResponse {
        message_hash: hex::encode(signed.message_hash),
        signature: hex::encode(signed.signature),
        signature_bytes: signed.signature.to_vec(),
        recovery_id: signed.recovery_id,
        signer: signed.signer.to_string(),
        signer_hex: hex::encode(signed.signer.to_bytes()),
    };
    serde_json::to_string(&json).map_err(|e| SignerError::SerializationFailed(e.to_string()))
}

/// JSON with the key's address. The secret is included only for new keys.
pub fn render_key(key: &SecretKey, include_secret: bool) -> Result<String, SignerError> {
    #[derive(serde::Serialize)]
    struct JsonKey {
        #[serde(skip_serializing_if = "Option::is_none")]
        secret_key: Option<String>,
        signer: String,
        signer_hex: String,
    }

    let signer = signer_address(key);
    let json = JsonKey {
        secret_key: include_secret.then(|| hex::encode(key.secret_bytes())),
        signer: signer.to_string(),
        signer_hex: hex::encode(signer.to_bytes()),
    };
    serde_json::to_string(&json).map_err(|e| SignerError::SerializationFailed(e.to_string()))
}
