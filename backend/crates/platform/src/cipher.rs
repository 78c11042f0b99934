//! Reversible Password Cipher
//!
//! Passwords in the user directory are stored encrypted, not hashed: the
//! service must be able to recover the plaintext to compare it on login and
//! on password change. This module provides the [`PasswordCipher`] seam and
//! an AES-256-GCM implementation of it.
//!
//! ## Security Notes
//! - Reversible storage is weaker than one-way hashing. Whoever holds the
//!   key can read every password.
//! - Each encryption uses a fresh random 96-bit nonce, so encrypting the
//!   same password twice yields different ciphertexts.
//! - Ciphertext layout: `base64(nonce || sealed)`.

use std::fmt;

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

const NONCE_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("Cipher key must be {KEY_LEN} bytes (got {0})")]
    InvalidKeyLength(usize),

    #[error("Ciphertext is not valid base64")]
    InvalidEncoding,

    #[error("Ciphertext is too short")]
    Truncated,

    #[error("Encryption failed")]
    EncryptionFailed,

    /// Wrong key or tampered ciphertext
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Decrypted password is not valid UTF-8")]
    InvalidUtf8,
}

/// Reversible password transform
///
/// `decrypt(encrypt(p)) == p` must hold for every password `p`.
pub trait PasswordCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError>;

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError>;
}

/// AES-256-GCM password cipher
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AesGcmCipher {
    key: [u8; KEY_LEN],
}

impl AesGcmCipher {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    pub fn from_slice(key: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; KEY_LEN] = key
            .try_into()
            .map_err(|_| CipherError::InvalidKeyLength(key.len()))?;
        Ok(Self::new(key))
    }

    /// Load a key from its standard base64 form (e.g. an environment variable)
    pub fn from_base64(encoded: &str) -> Result<Self, CipherError> {
        let mut bytes = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| CipherError::InvalidEncoding)?;
        let cipher = Self::from_slice(&bytes);
        bytes.zeroize();
        cipher
    }

    /// Random key, for development and tests
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self::new(key)
    }

    fn aead(&self) -> Result<Aes256Gcm, CipherError> {
        Aes256Gcm::new_from_slice(&self.key).map_err(|_| CipherError::InvalidKeyLength(KEY_LEN))
    }
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmCipher").finish_non_exhaustive()
    }
}

impl PasswordCipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let sealed = self
            .aead()?
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut combined = Vec::with_capacity(NONCE_LEN + sealed.len());
        combined.extend_from_slice(&nonce_bytes);
        combined.extend_from_slice(&sealed);

        Ok(general_purpose::STANDARD.encode(combined))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        let combined = general_purpose::STANDARD
            .decode(ciphertext.trim())
            .map_err(|_| CipherError::InvalidEncoding)?;

        if combined.len() <= NONCE_LEN {
            return Err(CipherError::Truncated);
        }
        let (nonce_bytes, sealed) = combined.split_at(NONCE_LEN);

        let plain = self
            .aead()?
            .decrypt(Nonce::from_slice(nonce_bytes), sealed)
            .map_err(|_| CipherError::DecryptionFailed)?;

        String::from_utf8(plain).map_err(|_| CipherError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrypt_recovers_plaintext() {
        let cipher = AesGcmCipher::new([7u8; KEY_LEN]);
        let sealed = cipher.encrypt("Aa123456").unwrap();
        assert_ne!(sealed, "Aa123456");
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "Aa123456");
    }

    #[test]
    fn test_fresh_nonce_per_encryption() {
        let cipher = AesGcmCipher::generate();
        let a = cipher.encrypt("same").unwrap();
        let b = cipher.encrypt("same").unwrap();
        assert_ne!(a, b);
        assert_eq!(cipher.decrypt(&a).unwrap(), cipher.decrypt(&b).unwrap());
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = AesGcmCipher::new([1u8; KEY_LEN]).encrypt("secret").unwrap();
        let other = AesGcmCipher::new([2u8; KEY_LEN]);
        assert_eq!(other.decrypt(&sealed), Err(CipherError::DecryptionFailed));
    }

    #[test]
    fn test_malformed_ciphertext() {
        let cipher = AesGcmCipher::generate();
        assert_eq!(cipher.decrypt("not base64!!"), Err(CipherError::InvalidEncoding));
        assert_eq!(cipher.decrypt("AAAA"), Err(CipherError::Truncated));
    }

    #[test]
    fn test_key_loading() {
        assert_eq!(
            AesGcmCipher::from_slice(&[0u8; 16]).unwrap_err(),
            CipherError::InvalidKeyLength(16)
        );

        let encoded = general_purpose::STANDARD.encode([9u8; KEY_LEN]);
        let cipher = AesGcmCipher::from_base64(&encoded).unwrap();
        let sealed = AesGcmCipher::new([9u8; KEY_LEN]).encrypt("pw").unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "pw");
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", AesGcmCipher::new([42u8; KEY_LEN]));
        assert!(!rendered.contains("42"));
    }
}
