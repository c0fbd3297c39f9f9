use std::path::Path;
use std::sync::Arc;

use crate::adapters::jsonrpc::RpcConnector;
use crate::config::{Environment, Resolver, Settings, standard_registry};
use crate::error::Result;
use crate::services::{ContributorService, ManagerService, SharesService};

/// Settings plus the resolver built from them, shared by every service.
pub struct App {
    pub settings: Arc<Settings>,
    pub resolver: Arc<Resolver>,
}

impl App {
    /// Loads settings under `root`, snapshots the environment with
    /// `overrides` on top, and wires the JSON-RPC chain connector.
    pub fn bootstrap<I>(root: &Path, config: Option<&Path>, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let settings = Arc::new(Settings::load(root, config)?);
        let env = Environment::capture(&settings, overrides);
        let connector = Arc::new(RpcConnector::new(Arc::clone(&settings)));
        let resolver = Resolver::new(env, standard_registry(connector));
        Ok(Self::from_parts(settings, resolver))
    }

    pub fn from_parts(settings: Arc<Settings>, resolver: Resolver) -> Self {
        Self {
            settings,
            resolver: Arc::new(resolver),
        }
    }

    pub fn shares(&self) -> SharesService {
        SharesService::new(Arc::clone(&self.resolver))
    }

    pub fn manager(&self) -> ManagerService {
        ManagerService::new(Arc::clone(&self.resolver))
    }

    pub fn contributor(&self) -> ContributorService {
        ContributorService::new(Arc::clone(&self.resolver))
    }
}
