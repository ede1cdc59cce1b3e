//! Token digest derivation.
//!
//! API token secrets are never stored. The store holds only a one-way digest
//! of each secret, and the only way to locate a token record is to present
//! the matching secret and re-derive the same digest. The derivation is
//! PBKDF2-HMAC-SHA256 with a fixed salt and a single iteration.
//!
//! The iteration count is intentionally minimized. Token secrets are
//! high-entropy, system-generated strings, so key stretching buys nothing;
//! the digest exists for collision-resistant indexing and storage hygiene,
//! not to slow down brute force of a weak password. Raising the count would
//! also invalidate every digest already in a store, so it must stay at 1.

use std::fmt;

use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Fixed salt for token digest derivation. Shared by every deployment so
/// that a digest derived in one process matches the digest stored by another.
const DIGEST_SALT: &[u8] = b"credstack-token-digest";

/// PBKDF2 iteration count. See the module docs before touching this.
const DIGEST_ITERATIONS: u32 = 1;

/// Number of raw digest bytes (SHA-256 output size).
const DIGEST_BYTES: usize = 32;

/// The one-way digest of a token secret, hex encoded.
///
/// This is the only representation of a secret that may be stored or used
/// as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Wrap a hex digest loaded from a store.
    ///
    /// Store implementations use this when rehydrating persisted records;
    /// everything else should go through [`hash_token`].
    #[must_use]
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The hex form of the digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the digest of a token secret.
///
/// Deterministic: the same secret always yields the same digest, across
/// calls and across processes. Hashing a well-formed string cannot fail.
///
/// # Examples
///
/// ```
/// use credstack_auth::digest::hash_token;
///
/// let a = hash_token("mWkP6DBvKiwfjDkn0ZFv7tDMBZLx");
/// let b = hash_token("mWkP6DBvKiwfjDkn0ZFv7tDMBZLx");
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn hash_token(secret: &str) -> TokenDigest {
    let raw = pbkdf2_sha256(secret.as_bytes(), DIGEST_SALT, DIGEST_ITERATIONS);
    TokenDigest(hex::encode(raw))
}

/// Compare two digests in constant time.
///
/// Map lookups by digest key are fine for locating records; use this
/// whenever two digests are compared directly.
#[must_use]
pub fn digests_match(a: &TokenDigest, b: &TokenDigest) -> bool {
    a.0.as_bytes().ct_eq(b.0.as_bytes()).into()
}

/// Single-block PBKDF2 per RFC 2898.
///
/// ```text
/// U1 = HMAC-SHA256(secret, salt || INT(1))
/// Ui = HMAC-SHA256(secret, U(i-1))
/// T  = U1 xor U2 xor ... xor Uc
/// ```
///
/// One output block suffices because the digest length equals the SHA-256
/// output size.
fn pbkdf2_sha256(secret: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut salted = Vec::with_capacity(salt.len() + 4);
    salted.extend_from_slice(salt);
    salted.extend_from_slice(&1_u32.to_be_bytes());

    let mut u = hmac_sha256(secret, &salted);
    let mut out = u.clone();

    for _ in 1..iterations {
        u = hmac_sha256(secret, &u);
        for (acc, byte) in out.iter_mut().zip(u.iter()) {
            *acc ^= byte;
        }
    }

    out
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
