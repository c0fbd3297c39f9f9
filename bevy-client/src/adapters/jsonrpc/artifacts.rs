use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Bytes;
use crate::error::{BevyError, Result};

/// Combined build output, one entry per contract.
const COMBINED_FILE: &str = "contracts.json";

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(alias = "bin")]
    bytecode: Bytes,
}

/// Loads creation bytecode for `name` from `<dir>/<name>.json`, falling back
/// to the combined `<dir>/contracts.json`.
pub fn load_bytecode(dir: &Path, name: &str) -> Result<Bytes> {
    let single = dir.join(format!("{name}.json"));
    let artifact = if single.exists() {
        let content = std::fs::read_to_string(&single)?;
        serde_json::from_str::<Artifact>(&content)?
    } else {
        let combined = dir.join(COMBINED_FILE);
        if !combined.exists() {
            return Err(BevyError::ContractNotFound(format!(
                "{name} (no artifact in {})",
                dir.display()
            )));
        }
        let content = std::fs::read_to_string(&combined)?;
        let mut all: HashMap<String, Artifact> = serde_json::from_str(&content)?;
        all.remove(name).ok_or_else(|| {
            BevyError::ContractNotFound(format!("{name} (not in {})", combined.display()))
        })?
    };

    let bytecode = artifact.bytecode;
    if bytecode.is_empty() {
        return Err(BevyError::ContractNotFound(format!(
            "{name} has empty bytecode; is it abstract?"
        )));
    }
    Ok(bytecode)
}
