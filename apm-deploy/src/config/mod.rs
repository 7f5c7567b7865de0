use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ApmDeployError, Result};

pub const LOCALHOST: &str = "localhost";
const LOCALHOST_RPC: &str = "http://127.0.0.1:8545";

const PRIVATE_KEY_ENV: &str = "APM_DEPLOY_PRIVATE_KEY";
const RPC_URL_ENV: &str = "APM_DEPLOY_RPC_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub private_key: Option<String>,
    pub default_network: Option<String>,
    pub networks: BTreeMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl NetworkConfig {
    fn localhost() -> Self {
        Self {
            rpc_url: LOCALHOST_RPC.to_string(),
            chain_id: None,
        }
    }
}

/// The endpoint and signer a command runs against.
#[derive(Debug, Clone)]
pub struct Target {
    pub network: String,
    pub rpc_url: String,
    pub chain_id: Option<u64>,
    pub private_key: Option<String>,
}

impl Target {
    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key
            .as_deref()
            .ok_or(ApmDeployError::MissingSigner)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;
        let merged = Self::merge(global, project);
        Ok(merged.with_env_overrides())
    }

    fn load_global() -> Result<Self> {
        let config_dir = directories::ProjectDirs::from("", "", "apm-deploy").map_or_else(
            || PathBuf::from("~/.config/apm-deploy"),
            |d| d.config_dir().to_path_buf(),
        );

        Self::load_file(&config_dir.join("config.toml"))
    }

    fn load_project() -> Result<Self> {
        Self::load_file(Path::new(".apm-deploy.toml"))
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| ApmDeployError::Config(format!("{}: {e}", path.display())))
        } else {
            Ok(Self::default())
        }
    }

    fn merge(global: Self, project: Self) -> Self {
        let mut networks = global.networks;
        networks.extend(project.networks);

        Self {
            private_key: project.private_key.or(global.private_key),
            default_network: project.default_network.or(global.default_network),
            networks,
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(PRIVATE_KEY_ENV) {
            self.private_key = Some(key);
        }
        self
    }

    /// Every configured network, with `localhost` always present.
    pub fn networks(&self) -> BTreeMap<String, NetworkConfig> {
        let mut networks = self.networks.clone();
        networks
            .entry(LOCALHOST.to_string())
            .or_insert_with(NetworkConfig::localhost);
        networks
    }

    /// Resolves the network to use. An explicit `rpc_url` (flag or
    /// `APM_DEPLOY_RPC_URL`) wins over the configured endpoint and makes an
    /// unknown network name acceptable. The configured chain id is only kept
    /// for an overridden endpoint when `network` names it explicitly.
    pub fn resolve(&self, network: Option<&str>, rpc_url: Option<&str>) -> Result<Target> {
        let explicit = network.is_some();
        let name = network
            .or(self.default_network.as_deref())
            .unwrap_or(LOCALHOST)
            .to_string();

        let env_rpc = std::env::var(RPC_URL_ENV).ok();
        let rpc_override = rpc_url.map(str::to_string).or(env_rpc);

        let configured = self.networks().remove(&name);
        let (rpc_url, chain_id) = match (rpc_override, configured) {
            (Some(url), configured) => {
                let chain_id = configured.and_then(|n| n.chain_id).filter(|_| explicit);
                (url, chain_id)
            }
            (None, Some(net)) => (net.rpc_url, net.chain_id),
            (None, None) => return Err(ApmDeployError::UnknownNetwork(name)),
        };

        Ok(Target {
            network: name,
            rpc_url,
            chain_id,
            private_key: self.private_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"
default_network = "mumbai"

[networks.mumbai]
rpc_url = "https://rpc-mumbai.example"
chain_id = 80001
"#;

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.default_network.as_deref(), Some("mumbai"));
        assert_eq!(
            config.networks.get("mumbai"),
            Some(&NetworkConfig {
                rpc_url: "https://rpc-mumbai.example".to_string(),
                chain_id: Some(80001),
            })
        );
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_file(&dir.path().join("absent.toml")).unwrap();
        assert!(config.networks.is_empty());
        assert!(config.private_key.is_none());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "networks = 3").unwrap();

        assert!(matches!(
            Config::load_file(&path),
            Err(ApmDeployError::Config(_))
        ));
    }

    #[test]
    fn test_merge_prefers_project() {
        let global: Config = toml::from_str(SAMPLE).unwrap();
        let project: Config = toml::from_str(
            r#"
private_key = "0x01"

[networks.mumbai]
rpc_url = "http://project-node"
"#,
        )
        .unwrap();

        let merged = Config::merge(global, project);
        assert_eq!(merged.private_key.as_deref(), Some("0x01"));
        assert_eq!(merged.default_network.as_deref(), Some("mumbai"));
        assert_eq!(merged.networks["mumbai"].rpc_url, "http://project-node");
    }

    #[test]
    fn test_localhost_always_available() {
        let networks = Config::default().networks();
        assert_eq!(networks[LOCALHOST].rpc_url, LOCALHOST_RPC);
    }

    #[test]
    fn test_resolve_explicit_rpc_url() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let target = config
            .resolve(Some("mumbai"), Some("http://override:8545"))
            .unwrap();
        assert_eq!(target.network, "mumbai");
        assert_eq!(target.rpc_url, "http://override:8545");
        assert_eq!(target.chain_id, Some(80001));

        let target = config.resolve(Some("custom"), Some("http://x")).unwrap();
        assert_eq!(target.chain_id, None);
    }

    #[test]
    fn test_resolve_override_without_network_skips_chain_id() {
        let target = Config::default()
            .resolve(None, Some("https://rpc-mumbai.maticvigil.com"))
            .unwrap();
        assert_eq!(target.network, LOCALHOST);
        assert_eq!(target.rpc_url, "https://rpc-mumbai.maticvigil.com");
        assert_eq!(target.chain_id, None);

        let config: Config = toml::from_str(SAMPLE).unwrap();
        let target = config.resolve(None, Some("http://other-node")).unwrap();
        assert_eq!(target.network, "mumbai");
        assert_eq!(target.chain_id, None);
    }

    #[test]
    fn test_localhost_has_no_chain_id() {
        let target = Config::default()
            .resolve(Some(LOCALHOST), Some(LOCALHOST_RPC))
            .unwrap();
        assert_eq!(target.chain_id, None);
    }

    #[test]
    fn test_missing_signer() {
        let target = Config::default()
            .resolve(Some(LOCALHOST), Some(LOCALHOST_RPC))
            .unwrap();
        assert!(matches!(
            target.require_private_key(),
            Err(ApmDeployError::MissingSigner)
        ));
    }
}
