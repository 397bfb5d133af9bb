//! Token encryption for the config file.
//!
//! API tokens are stored as base64 of `[nonce][ciphertext]` sealed with
//! AES-256-GCM, so `config.toml` never holds a bearer token in clear text.

use crate::error::{Error, Result};
use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Key compiled into the binary. Obscures tokens at rest; it is not a vault.
const MASTER_KEY: &[u8; 32] = b"CrmBrowserApiTokenKey2026Cyenx!!";

/// AES-GCM nonce length in bytes
const NONCE_LEN: usize = 12;

fn cipher() -> Aes256Gcm {
    Aes256Gcm::new(MASTER_KEY.into())
}

fn invalid(message: impl Into<String>) -> Error {
    Error::Invalid {
        message: message.into(),
    }
}

/// Seal a token for storage. A fresh random nonce is used on every call.
pub fn encrypt_token(token: &str) -> Result<String> {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher()
        .encrypt(&nonce, token.as_bytes())
        .map_err(|e| invalid(format!("Token encryption failed: {e}")))?;

    let mut stored = Vec::with_capacity(NONCE_LEN + sealed.len());
    stored.extend_from_slice(&nonce);
    stored.extend_from_slice(&sealed);
    Ok(BASE64.encode(stored))
}

/// Open a token produced by [`encrypt_token`]
pub fn decrypt_token(stored: &str) -> Result<String> {
    let data = BASE64
        .decode(stored.trim())
        .map_err(|e| invalid(format!("Token is not base64: {e}")))?;
    if data.len() <= NONCE_LEN {
        return Err(invalid("Encrypted token too short"));
    }

    let (nonce, sealed) = data.split_at(NONCE_LEN);
    let plain = cipher()
        .decrypt(Nonce::<Aes256Gcm>::from_slice(nonce), sealed)
        .map_err(|e| invalid(format!("Token decryption failed: {e}")))?;

    String::from_utf8(plain).map_err(|e| invalid(format!("Token is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let sealed = encrypt_token("sk-live-123").expect("encrypt");
        assert_ne!(sealed, "sk-live-123");
        assert_eq!(decrypt_token(&sealed).expect("decrypt"), "sk-live-123");
    }

    #[test]
    fn test_fresh_nonce_per_call() {
        let a = encrypt_token("same").expect("encrypt");
        let b = encrypt_token("same").expect("encrypt");
        assert_ne!(a, b);
    }

    #[test]
    fn test_plaintext_is_rejected() {
        assert!(decrypt_token("plain-token!!").is_err());
        assert!(decrypt_token("AQIDBA==").is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let sealed = encrypt_token("secret").expect("encrypt");
        let mut bytes = BASE64.decode(&sealed).expect("base64");
        if let Some(last) = bytes.last_mut() {
            *last ^= 0xff;
        }
        assert!(decrypt_token(&BASE64.encode(bytes)).is_err());
    }
}
