//! # bevy-client
//!
//! Client for bevy product manager contracts: deploy a manager, propose and
//! accept iterations, check share value and balances, redeem shares.
//!
//! Services take their configurable parameters (chain, manager contract,
//! user address) as `Option`s; anything left `None` is resolved from
//! configuration by the [`config::Resolver`].
//!
//! ```no_run
//! use bevy_client::App;
//! use std::path::Path;
//!
//! # async fn demo() -> bevy_client::Result<()> {
//! let app = App::bootstrap(Path::new("."), None, [("active_chain", "tester".to_string())])?;
//! let supply = app.shares().check_total_supply(None).await?;
//! println!("total supply: {supply}");
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use app::App;
pub use error::{BevyError, Result};
