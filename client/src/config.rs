//! Client configuration with TOML file support.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::address::{is_valid_strkey, AccountId, AddressRole};
use crate::error::ClientError;
use crate::logging::LogFormat;
use crate::wallet::AppDetails;

/// Which network the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Devnet,
    Testnet,
    Mainnet,
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            "mainnet" => Ok(Self::Mainnet),
            other => Err(format!("unknown network {other:?}")),
        }
    }
}

/// RPC endpoint and passphrase of one network.
///
/// In a config file either field may be omitted; the missing one keeps the
/// built-in value for that network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEndpoint {
    pub rpc_url: String,
    pub passphrase: String,
}

/// Endpoints for all three environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Networks {
    #[serde(default = "default_devnet", deserialize_with = "devnet_endpoint")]
    pub devnet: NetworkEndpoint,
    #[serde(default = "default_testnet", deserialize_with = "testnet_endpoint")]
    pub testnet: NetworkEndpoint,
    #[serde(default = "default_mainnet", deserialize_with = "mainnet_endpoint")]
    pub mainnet: NetworkEndpoint,
}

/// A `[networks.*]` table as written, before defaults are filled in.
#[derive(Deserialize)]
struct EndpointOverride {
    rpc_url: Option<String>,
    passphrase: Option<String>,
}

impl EndpointOverride {
    fn apply(self, base: NetworkEndpoint) -> NetworkEndpoint {
        NetworkEndpoint {
            rpc_url: self.rpc_url.unwrap_or(base.rpc_url),
            passphrase: self.passphrase.unwrap_or(base.passphrase),
        }
    }
}

fn devnet_endpoint<'de, D: Deserializer<'de>>(d: D) -> Result<NetworkEndpoint, D::Error> {
    EndpointOverride::deserialize(d).map(|o| o.apply(default_devnet()))
}

fn testnet_endpoint<'de, D: Deserializer<'de>>(d: D) -> Result<NetworkEndpoint, D::Error> {
    EndpointOverride::deserialize(d).map(|o| o.apply(default_testnet()))
}

fn mainnet_endpoint<'de, D: Deserializer<'de>>(d: D) -> Result<NetworkEndpoint, D::Error> {
    EndpointOverride::deserialize(d).map(|o| o.apply(default_mainnet()))
}

/// Configuration for the tips jar client.
///
/// Can be loaded from a TOML file via [`ClientConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name shown in wallet popups.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Icon URL shown in wallet popups.
    #[serde(default)]
    pub app_icon: Option<String>,

    /// Address (`C...`) of the deployed contract.
    #[serde(default)]
    pub contract_id: String,

    #[serde(default = "default_network")]
    pub network: Network,

    /// Upper bound on a wallet popup or query round-trip.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub networks: Networks,

    /// Named devnet accounts, name -> address.
    #[serde(default)]
    pub test_wallets: BTreeMap<String, String>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_app_name() -> String {
    "TipsJar".to_string()
}

fn default_network() -> Network {
    Network::Testnet
}

fn default_devnet() -> NetworkEndpoint {
    NetworkEndpoint {
        rpc_url: "http://localhost:8000/soroban/rpc".to_string(),
        passphrase: "Standalone Network ; February 2017".to_string(),
    }
}

fn default_testnet() -> NetworkEndpoint {
    NetworkEndpoint {
        rpc_url: "https://soroban-testnet.stellar.org".to_string(),
        passphrase: "Test SDF Network ; September 2015".to_string(),
    }
}

fn default_mainnet() -> NetworkEndpoint {
    NetworkEndpoint {
        rpc_url: "https://mainnet.sorobanrpc.com".to_string(),
        passphrase: "Public Global Stellar Network ; September 2015".to_string(),
    }
}

fn default_request_timeout_ms() -> u64 {
    120_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl Default for Networks {
    fn default() -> Self {
        Self {
            devnet: default_devnet(),
            testnet: default_testnet(),
            mainnet: default_mainnet(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ClientError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ClientError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ClientError> {
        toml::from_str(s).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ClientError> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Endpoint of the selected network.
    pub fn endpoint(&self) -> &NetworkEndpoint {
        match self.network {
            Network::Devnet => &self.networks.devnet,
            Network::Testnet => &self.networks.testnet,
            Network::Mainnet => &self.networks.mainnet,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn app_details(&self) -> AppDetails {
        AppDetails {
            name: self.app_name.clone(),
            icon: self.app_icon.clone(),
        }
    }

    /// Maps a test wallet name (e.g. `wallet_1`) to its address. Anything
    /// else is returned unchanged.
    pub fn resolve_wallet<'a>(&'a self, name_or_address: &'a str) -> &'a str {
        self.test_wallets
            .get(name_or_address)
            .map_or(name_or_address, String::as_str)
    }

    /// Checks the settings the app cannot run without.
    pub fn validate(&self) -> Result<(), ClientError> {
        let contract = AccountId::parse(AddressRole::Recipient, &self.contract_id);
        if !contract.is_ok_and(|id| id.is_contract()) {
            return Err(ClientError::Config(format!(
                "contract_id {:?} is not a contract address",
                self.contract_id
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ClientError::Config(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        for (name, address) in &self.test_wallets {
            if !is_valid_strkey(address) {
                return Err(ClientError::Config(format!(
                    "test wallet {name} has invalid address {address:?}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_icon: None,
            contract_id: String::new(),
            network: default_network(),
            request_timeout_ms: default_request_timeout_ms(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            networks: Networks::default(),
            test_wallets: BTreeMap::new(),
        }
    }
}
