use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Address;
use crate::error::{BevyError, Result};

pub const PROJECT_DIR: &str = ".bevy";
pub const PROJECT_FILE: &str = "bevy.toml";

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const BUILTIN_CHAINS: &[&str] = &["tester", "ropsten", "mainnet"];
const CHAIN_ALIASES: &[(&str, &str)] = &[("testnet", "ropsten")];

/// Effective settings after the global and project files are layered.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Configuration key values, lowest priority beneath the environment.
    pub values: BTreeMap<String, String>,
    pub chains: BTreeMap<String, ChainSettings>,
    pub client: ClientSettings,
    pub root: PathBuf,
}

/// One settings file as it sits on disk. `[client]` fields are optional so a
/// file only overrides the ones it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub values: BTreeMap<String, String>,
    pub chains: BTreeMap<String, ChainSettings>,
    #[serde(skip_serializing_if = "ClientFile::is_empty")]
    pub client: ClientFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainSettings {
    pub rpc_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub confirmations: u64,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            from: None,
            confirmations: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub registrar_path: PathBuf,
    pub artifacts_dir: PathBuf,
    pub receipt_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientFile::default().into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
}

impl ClientFile {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn overlay(self, over: Self) -> Self {
        Self {
            registrar_path: over.registrar_path.or(self.registrar_path),
            artifacts_dir: over.artifacts_dir.or(self.artifacts_dir),
            receipt_timeout_secs: over.receipt_timeout_secs.or(self.receipt_timeout_secs),
            poll_interval_ms: over.poll_interval_ms.or(self.poll_interval_ms),
        }
    }
}

impl From<ClientFile> for ClientSettings {
    fn from(file: ClientFile) -> Self {
        Self {
            registrar_path: file
                .registrar_path
                .unwrap_or_else(|| PathBuf::from(PROJECT_DIR).join("registrar.json")),
            artifacts_dir: file
                .artifacts_dir
                .unwrap_or_else(|| PathBuf::from("build/contracts")),
            receipt_timeout_secs: file.receipt_timeout_secs.unwrap_or(120),
            poll_interval_ms: file.poll_interval_ms.unwrap_or(500),
        }
    }
}

impl SettingsFile {
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| BevyError::Config(format!("{}: {e}", path.display())))
    }

    /// `over` wins key by key; a chain entry is replaced whole.
    #[must_use]
    pub fn overlay(mut self, over: Self) -> Self {
        self.values.extend(over.values);
        self.chains.extend(over.chains);
        self.client = self.client.overlay(over.client);
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BevyError::Config(e.to_string()))
    }
}

impl Settings {
    /// Loads global settings, then the project file (or `explicit`, which
    /// replaces it), rooted at `root`.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        Self::load_with_global(root, explicit, Self::global_path().as_deref())
    }

    pub fn load_with_global(
        root: &Path,
        explicit: Option<&Path>,
        global_path: Option<&Path>,
    ) -> Result<Self> {
        let global = match global_path {
            Some(path) => SettingsFile::load(path)?,
            None => None,
        };
        let project_path = explicit.map_or_else(|| Self::project_path(root), Path::to_path_buf);
        let project = SettingsFile::load(&project_path)?;

        if explicit.is_some() && project.is_none() {
            return Err(BevyError::Config(format!(
                "config file {} does not exist",
                project_path.display()
            )));
        }

        let merged = global.unwrap_or_default().overlay(project.unwrap_or_default());
        Ok(Self::from_file(merged, root))
    }

    pub fn from_file(file: SettingsFile, root: &Path) -> Self {
        Self {
            values: file.values,
            chains: file.chains,
            client: file.client.into(),
            root: root.to_path_buf(),
        }
    }

    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bevy").map(|d| d.config_dir().join("config.toml"))
    }

    pub fn project_path(root: &Path) -> PathBuf {
        root.join(PROJECT_DIR).join(PROJECT_FILE)
    }

    pub fn canonical_chain_name(name: &str) -> &str {
        CHAIN_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name, |(_, target)| target)
    }

    /// Connection settings for a chain: configured entries first, then the
    /// built-in chains with default settings.
    pub fn chain(&self, name: &str) -> Result<ChainSettings> {
        if let Some(chain) = self.chains.get(name) {
            return Ok(chain.clone());
        }
        let canonical = Self::canonical_chain_name(name);
        if let Some(chain) = self.chains.get(canonical) {
            return Ok(chain.clone());
        }
        if BUILTIN_CHAINS.contains(&canonical) {
            return Ok(ChainSettings::default());
        }
        Err(BevyError::UnknownChain(name.to_string()))
    }

    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn registrar_path(&self) -> PathBuf {
        self.resolve_path(&self.client.registrar_path)
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.resolve_path(&self.client.artifacts_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_builtin_chains_and_alias() {
        let settings = Settings::default();
        assert_eq!(settings.chain("tester").unwrap().rpc_url, DEFAULT_RPC_URL);
        assert!(settings.chain("testnet").is_ok());
        assert!(matches!(
            settings.chain("nowhere"),
            Err(BevyError::UnknownChain(_))
        ));
    }

    #[test]
    fn test_alias_uses_target_settings() {
        let toml = r#"
[chains.ropsten]
rpc_url = "http://ropsten.local:8545"
confirmations = 3
"#;
        let settings = Settings::from_file(toml::from_str(toml).unwrap(), Path::new("."));
        let chain = settings.chain("testnet").unwrap();
        assert_eq!(chain.rpc_url, "http://ropsten.local:8545");
        assert_eq!(chain.confirmations, 3);
    }

    #[test]
    fn test_project_values_override_global() {
        let mut global = SettingsFile::default();
        global.values.insert("active_chain".into(), "mainnet".into());
        global.values.insert("user_address".into(), "0xabc".into());
        let mut project = SettingsFile::default();
        project.values.insert("active_chain".into(), "tester".into());

        let merged = global.overlay(project);
        assert_eq!(merged.values["active_chain"], "tester");
        assert_eq!(merged.values["user_address"], "0xabc");
    }

    #[test]
    fn test_global_client_survives_project_without_client() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global/config.toml");
        write(
            &global,
            "[client]\nreceipt_timeout_secs = 30\nartifacts_dir = \"out\"\npoll_interval_ms = 50\n",
        );
        write(
            &Settings::project_path(dir.path()),
            "[values]\nactive_chain = \"tester\"\n\n[client]\npoll_interval_ms = 10\n",
        );

        let settings = Settings::load_with_global(dir.path(), None, Some(&global)).unwrap();
        assert_eq!(settings.values["active_chain"], "tester");
        assert_eq!(settings.client.receipt_timeout_secs, 30);
        assert_eq!(settings.client.poll_interval_ms, 10);
        assert_eq!(settings.artifacts_dir(), dir.path().join("out"));
        assert_eq!(
            settings.registrar_path(),
            dir.path().join(".bevy/registrar.json")
        );
    }

    #[test]
    fn test_load_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &Settings::project_path(dir.path()),
            "[values]\nmanager_contract = \"ProductManagerV1\"\n",
        );

        let settings = Settings::load_with_global(dir.path(), None, None).unwrap();
        assert_eq!(settings.values["manager_contract"], "ProductManagerV1");
        assert_eq!(settings.client, ClientSettings::default());
    }

    #[test]
    fn test_written_file_omits_unset_client_fields() {
        let mut file = SettingsFile::default();
        file.values.insert("active_chain".into(), "tester".into());
        let toml = file.to_toml().unwrap();
        assert!(!toml.contains("client"));
        assert_eq!(toml::from_str::<SettingsFile>(&toml).unwrap(), file);
    }

    #[test]
    fn test_load_rejects_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Settings::load_with_global(dir.path(), Some(&missing), None),
            Err(BevyError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "values = 3").unwrap();
        assert!(matches!(
            Settings::load_with_global(dir.path(), Some(&path), None),
            Err(BevyError::Config(_))
        ));
    }
}
