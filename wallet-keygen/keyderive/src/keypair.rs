use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const KEYPAIR_LEN: usize = 64;

/// An Ed25519 wallet keypair produced by [`crate::derive`].
///
/// The secret half is zeroized when the value is dropped. `Debug` only
/// shows the address.
#[derive(Clone)]
pub struct DerivedKeypair {
    signing_key: SigningKey,
}

impl DerivedKeypair {
    pub(crate) fn new(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Base58 wallet address.
    pub fn address(&self) -> String {
        bs58::encode(self.public_key()).into_string()
    }

    /// The 32-byte seed the keypair was expanded from.
    pub fn secret_seed(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// `seed || public`, the 64-byte layout wallets load keypair files in.
    pub fn to_keypair_bytes(&self) -> Zeroizing<[u8; KEYPAIR_LEN]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl fmt::Debug for DerivedKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeypair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

impl PartialEq for DerivedKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.signing_key == other.signing_key
    }
}

impl Eq for DerivedKeypair {}

/// Verify an Ed25519 signature against a raw public key.
pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(public_key) = <[u8; PUBLIC_KEY_LEN]>::try_from(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    verifying_key.verify(message, &signature).is_ok()
}

/// A wallet as handed to a caller: the full keypair when the caller needs
/// to sign, otherwise only the public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletKey {
    Keypair(DerivedKeypair),
    PublicKey([u8; PUBLIC_KEY_LEN]),
}

impl WalletKey {
    /// Wrap `keypair`, dropping its private half unless `require_private_key`.
    pub fn new(keypair: DerivedKeypair, require_private_key: bool) -> Self {
        if require_private_key {
            WalletKey::Keypair(keypair)
        } else {
            WalletKey::PublicKey(keypair.public_key())
        }
    }

    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LEN] {
        match self {
            WalletKey::Keypair(keypair) => keypair.public_key(),
            WalletKey::PublicKey(public_key) => *public_key,
        }
    }

    pub fn address(&self) -> String {
        bs58::encode(self.public_key()).into_string()
    }

    pub fn keypair(&self) -> Option<&DerivedKeypair> {
        match self {
            WalletKey::Keypair(keypair) => Some(keypair),
            WalletKey::PublicKey(_) => None,
        }
    }
}
