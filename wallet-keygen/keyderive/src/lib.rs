pub mod crypto;
pub mod error;
pub mod keypair;
pub mod salt;

pub use crypto::{Scheme, derive, derive_seed, derive_with};
pub use error::DeriveError;
pub use keypair::{DerivedKeypair, WalletKey};

use anyhow::Result;
use zeroize::Zeroizing;

/// Trait for sources of the wallet secret salt.
///
/// The salt is mixed with a subject (agent id, purpose) by
/// [`crypto::derive`] to produce a recoverable Ed25519 wallet. Providers
/// are only consulted by callers; derivation itself never reads ambient
/// state.
pub trait SaltProvider {
    /// Return the secret salt.
    fn salt(&self) -> Result<Zeroizing<String>>;
}

/// Detect the available salt provider and return it.
///
/// Detection order: `WALLET_SECRET_SALT` environment variable → error.
pub fn detect_provider() -> Result<Box<dyn SaltProvider>> {
    if salt::EnvSalt::default().is_present() {
        log::info!("detected salt in environment variable {}", salt::WALLET_SECRET_SALT_ENV);
        return Ok(Box::new(salt::EnvSalt::default()));
    }

    anyhow::bail!("no salt provider detected")
}
