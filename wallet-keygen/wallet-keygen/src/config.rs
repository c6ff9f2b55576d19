use anyhow::{Context, Result, bail};
use keyderive::salt::{SignatureSalt, StaticSalt};
use keyderive::{SaltProvider, Scheme};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "/etc/agent-wallet/wallet.toml";
const CONFIG_PATH_ENV: &str = "WALLET_KEYGEN_CONFIG";
const DEFAULT_SUBJECT: &str = "wallet_address";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    wallet: WalletSection,
    #[serde(default)]
    handoff: HandoffSection,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WalletSection {
    secret_salt: Option<String>,
    signature: Option<String>,
    subjects: Option<Vec<String>>,
    #[serde(default)]
    scheme: Scheme,
    #[serde(default)]
    require_private_key: bool,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HandoffSection {
    fifo: Option<PathBuf>,
}

/// Where the secret salt comes from, in priority order: a literal in the
/// config, an owner signature prefix, the environment.
pub enum SaltSource {
    Static(String),
    Signature(String),
    Environment,
}

impl SaltSource {
    pub fn provider(&self) -> Result<Box<dyn SaltProvider>> {
        let provider: Box<dyn SaltProvider> = match self {
            SaltSource::Static(value) => Box::new(StaticSalt::new(value.as_str())),
            SaltSource::Signature(signature) => Box::new(SignatureSalt::new(signature.as_str())),
            SaltSource::Environment => keyderive::detect_provider()?,
        };
        Ok(provider)
    }
}

pub struct Config {
    pub salt_source: SaltSource,
    pub subjects: Vec<String>,
    pub scheme: Scheme,
    pub require_private_key: bool,
    pub fifo: Option<PathBuf>,
}

pub fn parse() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let path = Path::new(&path);

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;

    parse_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_str(raw: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(raw).context("failed to parse wallet config")?;
    let wallet = file.wallet;

    let salt_source = match (wallet.secret_salt, wallet.signature) {
        (Some(_), Some(_)) => {
            bail!("wallet.secret_salt and wallet.signature are mutually exclusive")
        }
        (Some(salt), None) => SaltSource::Static(salt),
        (None, Some(signature)) => SaltSource::Signature(signature),
        (None, None) => SaltSource::Environment,
    };

    let subjects = wallet
        .subjects
        .unwrap_or_else(|| vec![DEFAULT_SUBJECT.to_string()]);
    if subjects.is_empty() {
        bail!("wallet.subjects must list at least one subject");
    }
    if subjects.iter().any(String::is_empty) {
        bail!("wallet.subjects must not contain empty entries");
    }

    if wallet.require_private_key && file.handoff.fifo.is_none() {
        bail!("wallet.require_private_key needs handoff.fifo; private keys are never printed");
    }

    Ok(Config {
        salt_source,
        subjects,
        scheme: wallet.scheme,
        require_private_key: wallet.require_private_key,
        fifo: file.handoff.fifo,
    })
}
