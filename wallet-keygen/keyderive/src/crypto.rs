//! Deterministic Ed25519 wallet derivation.
//!
//! `seed = SHA-256(secret ":" subject)`, then the seed is expanded with the
//! standard Ed25519 keypair-from-seed construction. The same salt and
//! subject always give the same wallet, so nothing but the salt has to be
//! kept to recover it.

use ed25519_dalek::SigningKey;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{DeriveError, Result};
use crate::keypair::DerivedKeypair;

pub const SEED_LEN: usize = 32;
const DELIMITER: u8 = b':';

/// How `secret` and `subject` are joined before hashing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// `secret ":" subject`, unescaped. `("a", "b:c")` and `("a:b", "c")`
    /// hash the same bytes. Matches every wallet derived so far.
    #[default]
    Delimited,
    /// `u64_le(len) || secret || u64_le(len) || subject`. Unambiguous, but
    /// produces different wallets than `Delimited`.
    LengthPrefixed,
}

fn validate(secret: &str, subject: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(DeriveError::InvalidArgument("secret must not be empty"));
    }
    if subject.is_empty() {
        return Err(DeriveError::InvalidArgument("subject must not be empty"));
    }
    Ok(())
}

/// The exact bytes fed to the hash for `scheme`.
pub fn combined_input(scheme: Scheme, secret: &str, subject: &str) -> Zeroizing<Vec<u8>> {
    let mut buf = Zeroizing::new(Vec::with_capacity(secret.len() + subject.len() + 16));
    match scheme {
        Scheme::Delimited => {
            buf.extend_from_slice(secret.as_bytes());
            buf.push(DELIMITER);
            buf.extend_from_slice(subject.as_bytes());
        }
        Scheme::LengthPrefixed => {
            for field in [secret, subject] {
                buf.extend_from_slice(&(field.len() as u64).to_le_bytes());
                buf.extend_from_slice(field.as_bytes());
            }
        }
    }
    buf
}

fn seed_for(scheme: Scheme, secret: &str, subject: &str) -> Result<Zeroizing<[u8; SEED_LEN]>> {
    validate(secret, subject)?;

    let input = combined_input(scheme, secret, subject);
    let mut digest = Sha256::digest(input.as_slice());

    let seed: Option<[u8; SEED_LEN]> = digest
        .as_slice()
        .get(..SEED_LEN)
        .and_then(|bytes| bytes.try_into().ok());
    let digest_len = digest.len();
    digest.as_mut_slice().zeroize();

    let seed = seed.ok_or_else(|| {
        DeriveError::HashFailure(format!("digest is {digest_len} bytes, need {SEED_LEN}"))
    })?;
    Ok(Zeroizing::new(seed))
}

/// Derive the 32-byte seed for `(secret, subject)` without expanding it.
pub fn derive_seed(secret: &str, subject: &str) -> Result<Zeroizing<[u8; SEED_LEN]>> {
    seed_for(Scheme::Delimited, secret, subject)
}

/// Derive the wallet keypair for `(secret, subject)`.
///
/// Fails with [`DeriveError::InvalidArgument`] if either input is empty,
/// before any hashing happens.
pub fn derive(secret: &str, subject: &str) -> Result<DerivedKeypair> {
    derive_with(Scheme::Delimited, secret, subject)
}

/// Like [`derive`], with an explicit input encoding.
pub fn derive_with(scheme: Scheme, secret: &str, subject: &str) -> Result<DerivedKeypair> {
    let seed = seed_for(scheme, secret, subject)?;
    let signing_key = SigningKey::try_from(seed.as_slice())
        .map_err(|e| DeriveError::KeyExpansionFailure(e.to_string()))?;
    Ok(DerivedKeypair::new(signing_key))
}
