use crate::{Error, Result};
use aes::Aes128;
use cbc::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use sha1::Sha1;

type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Password Chromium falls back to when no keyring is available
pub const DEFAULT_SAFE_STORAGE_PASSWORD: &str = "peanuts";

const SALT: &[u8] = b"saltysalt";
const IV: [u8; 16] = [b' '; 16];
const KEY_LEN: usize = 16;
const DOMAIN_HASH_LEN: usize = 32;

#[cfg(target_os = "macos")]
const ITERATIONS: u32 = 1003;
#[cfg(not(target_os = "macos"))]
const ITERATIONS: u32 = 1;

/// Decrypts `v10`/`v11` cookie values written by Chromium on Linux and macOS
pub struct CookieDecryptor {
    /// Tried in order; the first that yields UTF-8 wins
    keys: Vec<[u8; KEY_LEN]>,
}

impl CookieDecryptor {
    /// Derive the AES key from the browser's "Safe Storage" password
    ///
    /// Off macOS, `v10` values are always written with the built-in password
    /// while `v11` ones use the keyring secret, so both keys are kept.
    pub fn new(password: &str) -> Self {
        let mut decryptor = Self::with_iterations(password, ITERATIONS);
        if cfg!(not(target_os = "macos")) && password != DEFAULT_SAFE_STORAGE_PASSWORD {
            decryptor
                .keys
                .push(derive_key(DEFAULT_SAFE_STORAGE_PASSWORD, ITERATIONS));
        }
        decryptor
    }

    pub fn with_iterations(password: &str, iterations: u32) -> Self {
        Self {
            keys: vec![derive_key(password, iterations)],
        }
    }

    /// Decrypt an `encrypted_value` column
    ///
    /// Databases at schema version 24 and above prefix the plaintext with a
    /// SHA-256 of the host key; `strip_domain_hash` removes it.
    pub fn decrypt(&self, encrypted: &[u8], strip_domain_hash: bool) -> Result<String> {
        if !(encrypted.starts_with(b"v10") || encrypted.starts_with(b"v11")) {
            return Err(Error::Decrypt(
                "unsupported cookie encryption scheme".to_string(),
            ));
        }

        let mut last_err = Error::Decrypt("no decryption key".to_string());
        for key in &self.keys {
            match decrypt_with(key, &encrypted[3..], strip_domain_hash) {
                Ok(value) => return Ok(value),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

fn derive_key(password: &str, iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha1>(password.as_bytes(), SALT, iterations, &mut key);
    key
}

fn decrypt_with(key: &[u8; KEY_LEN], ciphertext: &[u8], strip_domain_hash: bool) -> Result<String> {
    let mut buf = ciphertext.to_vec();
    let plain = Aes128CbcDec::new(&(*key).into(), &IV.into())
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .map_err(|_| Error::Decrypt("bad padding, wrong safe-storage password?".to_string()))?;

    let plain = if strip_domain_hash {
        plain.get(DOMAIN_HASH_LEN..).ok_or_else(|| {
            Error::Decrypt("value shorter than its domain hash prefix".to_string())
        })?
    } else {
        plain
    };

    String::from_utf8(plain.to_vec())
        .map_err(|e| Error::Decrypt(format!("value is not UTF-8: {}", e)))
}

impl Default for CookieDecryptor {
    fn default() -> Self {
        Self::new(DEFAULT_SAFE_STORAGE_PASSWORD)
    }
}

/// Encrypt the way Chromium does; used to build test fixtures
#[cfg(test)]
pub(crate) fn encrypt_for_tests(password: &str, plaintext: &[u8]) -> Vec<u8> {
    use cbc::cipher::BlockEncryptMut;

    let key = derive_key(password, ITERATIONS);

    let mut buf = vec![0u8; plaintext.len() + 16];
    buf[..plaintext.len()].copy_from_slice(plaintext);
    let ct = cbc::Encryptor::<Aes128>::new(&key.into(), &IV.into())
        .encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len())
        .unwrap();

    let mut out = b"v10".to_vec();
    out.extend_from_slice(ct);
    out
}
