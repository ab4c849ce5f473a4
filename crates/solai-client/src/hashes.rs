//! Caller input parsing: addresses and interaction hashes.

use std::str::FromStr;

use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::error::ValidationError;

/// Hex characters in a 32-byte hash.
pub const HASH_HEX_LEN: usize = 64;

/// Prompt/response hash pair for one logged interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionHashes {
    /// SHA-256 of the prompt
    pub prompt: [u8; 32],
    /// SHA-256 of the response
    pub response: [u8; 32],
}

impl InteractionHashes {
    /// Parse two 64-character hex strings (optional `0x`, any case).
    pub fn from_hex(prompt: &str, response: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            prompt: parse_hash("prompt_hash", prompt)?,
            response: parse_hash("response_hash", response)?,
        })
    }

    /// Hash raw prompt and response text with SHA-256.
    pub fn from_texts(prompt: &str, response: &str) -> Self {
        Self {
            prompt: Sha256::digest(prompt.as_bytes()).into(),
            response: Sha256::digest(response.as_bytes()).into(),
        }
    }

    /// Prompt hash as lowercase hex.
    pub fn prompt_hex(&self) -> String {
        hex::encode(self.prompt)
    }

    /// Response hash as lowercase hex.
    pub fn response_hex(&self) -> String {
        hex::encode(self.response)
    }
}

/// Parse one 32-byte hash from hex.
///
/// # Errors
///
/// [`ValidationError::InvalidHash`] unless the input is exactly 64 hex
/// characters after an optional `0x` prefix.
pub fn parse_hash(field: &'static str, input: &str) -> Result<[u8; 32], ValidationError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != HASH_HEX_LEN {
        return Err(ValidationError::InvalidHash {
            field,
            reason: format!("expected {HASH_HEX_LEN} hex characters, got {}", digits.len()),
        });
    }

    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| ValidationError::InvalidHash {
        field,
        reason: e.to_string(),
    })?;
    Ok(bytes)
}

/// Parse a base58 public key.
///
/// # Errors
///
/// [`ValidationError::InvalidAddress`] for anything that is not a key.
pub fn parse_address(input: &str) -> Result<Pubkey, ValidationError> {
    Pubkey::from_str(input.trim()).map_err(|_| ValidationError::InvalidAddress {
        input: input.to_string(),
    })
}

/// First 16 hex characters of a hash, for log fields.
pub(crate) fn short_hex(hash: &[u8; 32]) -> String {
    hex::encode(&hash[..8])
}
