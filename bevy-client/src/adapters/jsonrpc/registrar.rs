use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::Address;
use crate::error::Result;

/// Record of deployed contract addresses, keyed by chain then contract name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registrar {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    deployments: BTreeMap<String, BTreeMap<String, Address>>,
}

impl Registrar {
    pub fn load(path: &Path) -> Result<Self> {
        let mut registrar = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };
        registrar.path = path.to_path_buf();
        Ok(registrar)
    }

    pub fn get(&self, chain: &str, contract: &str) -> Option<Address> {
        self.deployments.get(chain)?.get(contract).copied()
    }

    pub fn record(&mut self, chain: &str, contract: &str, address: Address) {
        self.deployments
            .entry(chain.to_string())
            .or_default()
            .insert(contract.to_string(), address);
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
