use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ERP_API_URL: &str = "http://localhost:8080";
const DEFAULT_MCP_API_URL: &str = "http://localhost:8000";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 25;

/// Runtime settings, read from the environment (and `.env` in development).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    /// ERP data service; every `/api/*` call except chat goes here.
    pub erp_api_url: String,
    /// AI chat (MCP) service behind `/api/chat`.
    pub mcp_api_url: String,
    pub static_dir: PathBuf,
    pub upstream_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            erp_api_url: DEFAULT_ERP_API_URL.to_string(),
            mcp_api_url: DEFAULT_MCP_API_URL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

fn base_url(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {key}={value:?}, using the default");
            default
        }),
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: parse_or("PORT", lookup("PORT"), defaults.port),
            erp_api_url: lookup("ERP_API_URL").map(base_url).unwrap_or(defaults.erp_api_url),
            mcp_api_url: lookup("MCP_API_URL").map(base_url).unwrap_or(defaults.mcp_api_url),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            upstream_timeout: Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                lookup("UPSTREAM_TIMEOUT_SECS"),
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> GatewayConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.erp_api_url, "http://localhost:8080");
        assert_eq!(config.mcp_api_url, "http://localhost:8000");
        assert_eq!(config.static_dir, PathBuf::from("frontend/dist"));
        assert_eq!(config.upstream_timeout, Duration::from_secs(25));
    }

    #[test]
    fn overrides_and_trailing_slashes() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("ERP_API_URL", "http://erp:8080/"),
            ("MCP_API_URL", " http://mcp:8000 "),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.port, 9000);
        assert_eq!(config.erp_api_url, "http://erp:8080");
        assert_eq!(config.mcp_api_url, "http://mcp:8000");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("UPSTREAM_TIMEOUT_SECS", "-1")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream_timeout, Duration::from_secs(25));
    }
}
