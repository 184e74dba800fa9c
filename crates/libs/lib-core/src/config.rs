//! # Application Configuration
//!
//! This module manages the chain-facing configuration loaded from environment
//! variables. All configuration is validated on startup to fail fast if
//! misconfigured. Chain-specific constants (unit scale, transfer call flavor,
//! explorer base URL) are configuration, never hard-coded at call sites.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let endpoint = &config.rpc_url;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].

use crate::dto::transfer::TransferCall;
use lib_utils::envs::{self, get_env_opt, get_env_parse};
use std::sync::OnceLock;
use tracing::info;

/// Default RPC endpoint (Paseo testnet).
const DEFAULT_RPC_URL: &str = "wss://pas-rpc.stakeworld.io";

/// Default display-unit scale: 1 token = 10^10 minimal units.
const DEFAULT_DECIMALS: u32 = 10;

const DEFAULT_EXPLORER_URL: &str = "https://paseo.subscan.io";

const DEFAULT_APP_NAME: &str = "SuperPage";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// WebSocket JSON-RPC endpoint of the chain node
    pub rpc_url: String,

    /// Number of decimals in the chain's display unit
    ///
    /// The minimal-unit amount is `display amount * 10^chain_decimals`.
    pub chain_decimals: u32,

    /// Which balance-transfer call to submit
    pub transfer_call: TransferCall,

    /// Block-explorer base URL for post-hoc verification links
    pub explorer_url: String,

    /// Application name presented to the wallet extension on `enable`
    pub app_name: String,

    /// Optional confirmation timeout in seconds
    ///
    /// When set, a submitted transaction that sees neither `finalized` nor an
    /// error within this bound is surfaced as a terminal error. Disabled when
    /// unset; the underlying transaction is never cancelled either way.
    pub confirmation_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables, with defaults for the
    /// reference chain (Paseo).
    pub fn from_env() -> Result<Self, String> {
        let rpc_url = get_env_opt("CHAIN_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let chain_decimals = match get_env_parse::<u32>("CHAIN_DECIMALS") {
            Ok(value) => value,
            Err(envs::Error::MissingEnv(_)) => DEFAULT_DECIMALS,
            Err(_) => return Err("CHAIN_DECIMALS must be a valid number".to_string()),
        };

        let transfer_call = match get_env_opt("TRANSFER_CALL").as_deref() {
            None | Some("keep-alive") => TransferCall::KeepAlive,
            Some("allow-death") => TransferCall::AllowDeath,
            Some(other) => {
                return Err(format!(
                    "TRANSFER_CALL must be 'keep-alive' or 'allow-death', got '{}'",
                    other
                ))
            }
        };

        let explorer_url =
            get_env_opt("EXPLORER_URL").unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string());

        let app_name = get_env_opt("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let confirmation_timeout_secs = match get_env_parse::<u64>("CONFIRMATION_TIMEOUT_SECS") {
            Ok(value) => Some(value),
            Err(envs::Error::MissingEnv(_)) => None,
            Err(_) => {
                return Err("CONFIRMATION_TIMEOUT_SECS must be a valid number".to_string())
            }
        };

        Ok(Self {
            rpc_url,
            chain_decimals,
            transfer_call,
            explorer_url,
            app_name,
            confirmation_timeout_secs,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.rpc_url.starts_with("ws://") && !self.rpc_url.starts_with("wss://") {
            return Err("CHAIN_RPC_URL must be a ws:// or wss:// endpoint".to_string());
        }

        // u128 holds 38 decimal digits; leave headroom for the integer part.
        if self.chain_decimals > 30 {
            return Err("CHAIN_DECIMALS must be at most 30".to_string());
        }

        if self.app_name.trim().is_empty() {
            return Err("APP_NAME cannot be empty".to_string());
        }

        if let Some(0) = self.confirmation_timeout_secs {
            return Err("CONFIRMATION_TIMEOUT_SECS must be greater than zero when set".to_string());
        }

        Ok(())
    }

    /// Block-explorer link for a submitted extrinsic hash.
    pub fn extrinsic_url(&self, hash: &str) -> String {
        format!("{}/extrinsic/{}", self.explorer_url.trim_end_matches('/'), hash)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_decimals: DEFAULT_DECIMALS,
            transfer_call: TransferCall::KeepAlive,
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            confirmation_timeout_secs: None,
        }
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// This should be called once at application startup, before any component
/// that needs configuration is used.
///
/// # Errors
///
/// Returns an error if environment variables are invalid, validation fails,
/// or the config has already been initialized.
pub fn init_config() -> Result<(), String> {
    let config = Config::from_env()?;
    config.validate()?;

    info!("Configuration loaded: chain endpoint {}", config.rpc_url);
    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "wss://pas-rpc.stakeworld.io");
        assert_eq!(config.chain_decimals, 10);
        assert_eq!(config.transfer_call, TransferCall::KeepAlive);
        assert!(config.confirmation_timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_http_endpoint() {
        let config = Config {
            rpc_url: "https://rpc.example.io".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            confirmation_timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extrinsic_url() {
        let config = Config::default();
        assert_eq!(
            config.extrinsic_url("0xabc123"),
            "https://paseo.subscan.io/extrinsic/0xabc123"
        );

        let trailing = Config {
            explorer_url: "https://paseo.subscan.io/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            trailing.extrinsic_url("0xabc123"),
            "https://paseo.subscan.io/extrinsic/0xabc123"
        );
    }
}
