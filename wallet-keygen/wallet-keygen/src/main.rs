mod config;
mod fifo;

use anyhow::{Context, Result};
use keyderive::WalletKey;

fn main() -> Result<()> {
    env_logger::init();

    let config = config::parse()?;
    log::info!(
        "deriving {} wallet(s) with {:?} scheme",
        config.subjects.len(),
        config.scheme
    );

    let provider = config.salt_source.provider()?;
    let salt = provider.salt()?;

    let mut keypairs = Vec::new();
    for subject in &config.subjects {
        let keypair = keyderive::derive_with(config.scheme, &salt, subject)
            .with_context(|| format!("failed to derive wallet for subject {subject:?}"))?;

        let wallet = WalletKey::new(keypair, config.require_private_key);
        log::info!("derived wallet for {subject}: {}", wallet.address());
        println!("{subject}: {}", wallet.address());

        if let WalletKey::Keypair(keypair) = wallet {
            keypairs.push((subject.clone(), keypair));
        }
    }

    if let Some(path) = config.fifo.as_deref() {
        if !config.require_private_key {
            log::warn!(
                "handoff.fifo is set but wallet.require_private_key is off, nothing to serve"
            );
            return Ok(());
        }
        fifo::serve(path, &keypairs)?;
    }

    Ok(())
}
