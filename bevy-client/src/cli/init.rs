use crate::App;
use crate::config::{ACTIVE_CHAIN, MANAGER_CONTRACT, Settings, SettingsFile};
use crate::domain::Deployment;
use crate::error::{BevyError, Result};

use super::print_json;

/// Deploys (or finds) the manager contract on the active chain and records
/// the chain and contract in the project config, so later commands in this
/// repo need no environment.
pub async fn run(app: &App, force: bool, json: bool) -> Result<()> {
    let path = Settings::project_path(&app.settings.root);
    if path.exists() && !force {
        return Err(BevyError::AlreadyInitialized(path.display().to_string()));
    }

    let deployment = app.manager().deploy_manager_contract(None, None).await?;

    let mut project = SettingsFile::load(&path)?.unwrap_or_default();
    project
        .values
        .insert(ACTIVE_CHAIN.to_string(), deployment.chain.clone());
    project
        .values
        .insert(MANAGER_CONTRACT.to_string(), deployment.contract.clone());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, project.to_toml()?)?;
    tracing::info!(path = %path.display(), "wrote project config");

    if json {
        print_json(&serde_json::json!({
            "config": path,
            "deployment": deployment,
        }))
    } else {
        print_deployment(&deployment);
        println!("Initialized {}", path.display());
        Ok(())
    }
}

pub async fn deploy(app: &App, name: Option<String>, json: bool) -> Result<()> {
    let deployment = app.manager().deploy_manager_contract(name, None).await?;
    if json {
        print_json(&deployment)
    } else {
        print_deployment(&deployment);
        Ok(())
    }
}

fn print_deployment(deployment: &Deployment) {
    let verb = if deployment.deployed {
        "Deployed"
    } else {
        "Found"
    };
    println!(
        "{verb} {} at {} on {}",
        deployment.contract, deployment.address, deployment.chain
    );
    if let Some(receipt) = &deployment.receipt {
        println!(
            "  Transaction: {} (block {})",
            receipt.transaction_hash, receipt.block_number
        );
    }
}
