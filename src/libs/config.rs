use {
    anyhow::{Context, Result},
    dotenv::dotenv,
    helius::addresses::{EXAMPLE_OWNER, EXAMPLE_TOKEN_ACCOUNT, USDC_MINT},
    std::{fmt::Debug, str::FromStr, time::Duration},
    url::Url,
};

pub const DEFAULT_RPC: &str = "https://mainnet.helius-rpc.com/";

pub fn load_env() {
    dotenv().ok();
}

/// Identifiers handed to each probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTargets {
    pub token_mint: String,
    pub token_account: String,
    pub asset_id: String,
    pub owner: String,
}

impl ProbeTargets {
    pub fn from_env() -> Self {
        Self {
            token_mint: Config::get_var_t("TOKEN_MINT", USDC_MINT.to_string()),
            token_account: Config::get_var_t("TOKEN_ACCOUNT", EXAMPLE_TOKEN_ACCOUNT.to_string()),
            asset_id: Config::get_var_t("ASSET_ID", USDC_MINT.to_string()),
            owner: Config::get_var_t("OWNER", EXAMPLE_OWNER.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub api_key: String,
    pub health_timeout: Duration,
    /// `None` lets a probe block until the server answers.
    pub probe_timeout: Option<Duration>,
    pub targets: ProbeTargets,
    pub strict_exit: bool,
    pub color: bool,
}

impl Config {
    /// Build from the process environment. Call [`load_env`] first to
    /// pick up a local `.env`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("HELIUS_API_KEY")
            .context("HELIUS_API_KEY is not set (export it or add it to .env)")?;
        let probe_secs: u64 = Self::get_var_t("PROBE_TIMEOUT_SECS", 30);
        let cfg = Self {
            rpc_url: Self::get_var_t("HELIUS_RPC", DEFAULT_RPC.to_string()),
            api_key,
            health_timeout: Duration::from_secs(Self::get_var_t("HEALTH_TIMEOUT_SECS", 10)),
            probe_timeout: (probe_secs > 0).then(|| Duration::from_secs(probe_secs)),
            targets: ProbeTargets::from_env(),
            strict_exit: Self::get_var_t("STRICT_EXIT", false),
            color: std::env::var_os("NO_COLOR").is_none(),
        };
        cfg.endpoint()?;
        Ok(cfg)
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.trim().parse::<T>().ok())
            .unwrap_or(default)
    }

    /// Full endpoint with the key as `api-key` query parameter.
    pub fn endpoint(&self) -> Result<Url> {
        let mut url = Url::parse(&self.rpc_url)
            .with_context(|| format!("Failed to parse HELIUS_RPC: {}", self.rpc_url))?;
        if !self.api_key.is_empty() {
            url.query_pairs_mut().append_pair("api-key", &self.api_key);
        }
        Ok(url)
    }

    /// Endpoint as printed in diagnostics, key truncated.
    pub fn redacted_endpoint(&self) -> String {
        match Url::parse(&self.rpc_url) {
            Ok(mut url) => {
                if !self.api_key.is_empty() {
                    url.query_pairs_mut()
                        .append_pair("api-key", &redact_key(&self.api_key));
                }
                url.to_string()
            }
            Err(_) => self.rpc_url.clone(),
        }
    }
}

/// `first8...last4`; anything too short to truncate is fully masked.
pub fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(rpc: &str, key: &str) -> Config {
        Config {
            rpc_url: rpc.to_string(),
            api_key: key.to_string(),
            health_timeout: Duration::from_secs(10),
            probe_timeout: None,
            targets: ProbeTargets::from_env(),
            strict_exit: false,
            color: false,
        }
    }

    #[test]
    fn endpoint_carries_key_as_query() {
        let c = cfg(DEFAULT_RPC, "3951cd4d-4771-4ffa-ace4-b8ee5b2ad50b");
        let url = c.endpoint().unwrap();
        assert_eq!(url.host_str(), Some("mainnet.helius-rpc.com"));
        assert_eq!(
            url.query(),
            Some("api-key=3951cd4d-4771-4ffa-ace4-b8ee5b2ad50b")
        );
    }

    #[test]
    fn redacted_endpoint_hides_the_middle_of_the_key() {
        let c = cfg(DEFAULT_RPC, "3951cd4d-4771-4ffa-ace4-b8ee5b2ad50b");
        let shown = c.redacted_endpoint();
        assert!(shown.contains("3951cd4d...d50b"), "{shown}");
        assert!(!shown.contains("4771-4ffa"));
    }

    #[test]
    fn short_keys_are_fully_masked() {
        assert_eq!(redact_key("abc"), "***");
        assert_eq!(redact_key(""), "");
    }

    #[test]
    fn bad_url_is_an_error() {
        assert!(cfg("not a url", "k").endpoint().is_err());
    }

    #[test]
    fn get_var_t_falls_back_on_garbage() {
        std::env::set_var("SOLPROBE_TEST_GARBAGE", "ten");
        assert_eq!(Config::get_var_t::<u64>("SOLPROBE_TEST_GARBAGE", 7), 7);
        std::env::set_var("SOLPROBE_TEST_GARBAGE", " 12 ");
        assert_eq!(Config::get_var_t::<u64>("SOLPROBE_TEST_GARBAGE", 7), 12);
    }
}
