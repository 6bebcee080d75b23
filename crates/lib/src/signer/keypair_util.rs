use crate::{error::ExtError, sanitize_error};
use solana_sdk::signature::Keypair;
use std::fs;

const KEYPAIR_LENGTH: usize = 64;

/// Parsing and encoding of private keys in the formats accepted for the identity
pub struct KeypairUtil;

impl KeypairUtil {
    /// Parse a private key given as one of:
    /// - a path to a JSON keypair file
    /// - a JSON byte array: "[12, 34, ...]"
    /// - a base58 string
    pub fn from_private_key_string(private_key: &str) -> Result<Keypair, ExtError> {
        let trimmed = private_key.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            return Self::from_json_bytes(trimmed);
        }

        if let Ok(file_content) = fs::read_to_string(trimmed) {
            return Self::from_json_bytes(file_content.trim());
        }

        Self::from_base58(trimmed)
    }

    pub fn from_base58(private_key: &str) -> Result<Keypair, ExtError> {
        let decoded = bs58::decode(private_key).into_vec().map_err(|e| {
            ExtError::SigningError(format!("Invalid base58 private key: {}", sanitize_error!(e)))
        })?;
        Self::from_bytes(&decoded)
    }

    pub fn from_json_bytes(json: &str) -> Result<Keypair, ExtError> {
        let bytes: Vec<u8> = serde_json::from_str(json).map_err(|e| {
            ExtError::SigningError(format!("Invalid keypair byte array: {}", sanitize_error!(e)))
        })?;
        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Keypair, ExtError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(ExtError::SigningError(format!(
                "Private key must be exactly {KEYPAIR_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }

        Keypair::try_from(bytes).map_err(|e| {
            ExtError::SigningError(format!("Invalid private key bytes: {}", sanitize_error!(e)))
        })
    }

    /// Encode a keypair as the JSON byte array written to env files
    pub fn to_json_bytes(keypair: &Keypair) -> Result<String, ExtError> {
        serde_json::to_string(&keypair.to_bytes().to_vec()).map_err(|e| {
            ExtError::InternalError(format!("Failed to encode keypair: {}", sanitize_error!(e)))
        })
    }
}
