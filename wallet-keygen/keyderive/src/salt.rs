use anyhow::{Context, Result, bail};
use zeroize::Zeroizing;

use crate::SaltProvider;

pub const WALLET_SECRET_SALT_ENV: &str = "WALLET_SECRET_SALT";

/// Number of leading signature characters used as the salt for agents
/// created from an owner signature.
pub const SIGNATURE_SALT_CHARS: usize = 5;

/// Salt read from an environment variable.
pub struct EnvSalt {
    var: String,
}

impl EnvSalt {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn is_present(&self) -> bool {
        std::env::var_os(&self.var).is_some_and(|v| !v.is_empty())
    }
}

impl Default for EnvSalt {
    fn default() -> Self {
        Self::new(WALLET_SECRET_SALT_ENV)
    }
}

impl SaltProvider for EnvSalt {
    fn salt(&self) -> Result<Zeroizing<String>> {
        let value = Zeroizing::new(
            std::env::var(&self.var)
                .with_context(|| format!("{} is not set or not valid UTF-8", self.var))?,
        );
        if value.is_empty() {
            bail!("{} is empty", self.var);
        }
        Ok(value)
    }
}

/// Salt given literally, e.g. from a config file.
pub struct StaticSalt {
    value: Zeroizing<String>,
}

impl StaticSalt {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Zeroizing::new(value.into()),
        }
    }
}

impl SaltProvider for StaticSalt {
    fn salt(&self) -> Result<Zeroizing<String>> {
        if self.value.is_empty() {
            bail!("configured secret salt is empty");
        }
        Ok(self.value.clone())
    }
}

/// Salt taken from the first [`SIGNATURE_SALT_CHARS`] characters of an
/// owner signature, the rule agents are created with.
///
/// Shorter signatures are used whole. Characters are Unicode scalar
/// values, so a signature containing characters outside the Basic
/// Multilingual Plane yields a different prefix than counting UTF-16 code
/// units would. Hex and base58 signatures are ASCII and unaffected.
pub struct SignatureSalt {
    signature: Zeroizing<String>,
}

impl SignatureSalt {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: Zeroizing::new(signature.into()),
        }
    }
}

impl SaltProvider for SignatureSalt {
    fn salt(&self) -> Result<Zeroizing<String>> {
        let prefix: String = self.signature.chars().take(SIGNATURE_SALT_CHARS).collect();
        let prefix = Zeroizing::new(prefix);
        if prefix.is_empty() {
            bail!("signature is empty");
        }
        Ok(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_salt_prefix() {
        let provider = SignatureSalt::new("0xdeadbeefcafe");
        assert_eq!(provider.salt().unwrap().as_str(), "0xdea");
    }

    #[test]
    fn test_signature_salt_counts_chars() {
        let provider = SignatureSalt::new("ключ-подпись");
        assert_eq!(provider.salt().unwrap().as_str(), "ключ-");
    }

    #[test]
    fn test_signature_salt_short_signature_used_whole() {
        assert_eq!(SignatureSalt::new("abcd").salt().unwrap().as_str(), "abcd");
        assert!(SignatureSalt::new("").salt().is_err());
    }

    #[test]
    fn test_static_salt() {
        assert_eq!(StaticSalt::new("saltABC").salt().unwrap().as_str(), "saltABC");
        assert!(StaticSalt::new("").salt().is_err());
    }

    #[test]
    fn test_env_salt_missing() {
        let provider = EnvSalt::new("KEYDERIVE_TEST_UNSET_SALT_VAR");
        assert!(!provider.is_present());
        assert!(provider.salt().is_err());
    }

    #[test]
    fn test_env_salt_present() {
        let var = "KEYDERIVE_TEST_PRESENT_SALT_VAR";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(var, "saltABC") };

        let provider = EnvSalt::new(var);
        assert!(provider.is_present());
        assert_eq!(provider.salt().unwrap().as_str(), "saltABC");
    }

    #[test]
    fn test_env_salt_empty() {
        let var = "KEYDERIVE_TEST_EMPTY_SALT_VAR";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(var, "") };

        let provider = EnvSalt::new(var);
        assert!(!provider.is_present());
        assert!(provider.salt().is_err());
    }

    #[test]
    fn test_detect_provider_from_env() {
        // SAFETY: no other test in this crate touches WALLET_SECRET_SALT.
        unsafe { std::env::set_var(WALLET_SECRET_SALT_ENV, "saltABC") };

        let provider = crate::detect_provider().unwrap();
        assert_eq!(provider.salt().unwrap().as_str(), "saltABC");
    }
}
