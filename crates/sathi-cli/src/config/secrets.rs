//! Required credentials, read from the environment only.

use anyhow::{Result, anyhow};

pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Credentials the bot refuses to start without
#[derive(Clone)]
pub struct Secrets {
    pub telegram_token: String,
    pub openrouter_api_key: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("telegram_token", &"***")
            .field("openrouter_api_key", &"***")
            .finish()
    }
}

impl Secrets {
    /// Read both secrets from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both secrets through `lookup`. Absent or blank values are errors
    /// naming the variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> Result<String> {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("{} is not set", name))
        };

        Ok(Self {
            telegram_token: require(TELEGRAM_TOKEN_ENV)?,
            openrouter_api_key: require(OPENROUTER_API_KEY_ENV)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_both_present() {
        let secrets = Secrets::from_lookup(lookup(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENROUTER_API_KEY", " sk-or-1 "),
        ]))
        .unwrap();
        assert_eq!(secrets.telegram_token, "123:abc");
        assert_eq!(secrets.openrouter_api_key, "sk-or-1");
    }

    #[test]
    fn test_missing_token_names_variable() {
        let err = Secrets::from_lookup(lookup(&[("OPENROUTER_API_KEY", "sk")])).unwrap_err();
        assert_eq!(err.to_string(), "TELEGRAM_TOKEN is not set");
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = Secrets::from_lookup(lookup(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENROUTER_API_KEY", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "OPENROUTER_API_KEY is not set");
    }

    #[test]
    fn test_debug_hides_values() {
        let secrets = Secrets::from_lookup(lookup(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENROUTER_API_KEY", "sk-secret"),
        ]))
        .unwrap();
        let debug = format!("{:?}", secrets);
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("123:abc"));
    }
}
