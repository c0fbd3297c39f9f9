mod env;
mod inject;
pub mod keys;
mod resolver;
mod settings;

pub use env::Environment;
pub use inject::{ActiveChain, Configurable, ManagerContract, UserAddress};
pub use keys::{
    ACTIVE_CHAIN, DEFAULT_MANAGER_CONTRACT, MANAGER_CONTRACT, USER_ADDRESS, standard_registry,
};
pub use resolver::{Constructor, FnConstructor, Registry, Resolution, Resolver, Value};
pub use settings::{
    ChainSettings, ClientFile, ClientSettings, PROJECT_DIR, PROJECT_FILE, Settings, SettingsFile,
};
