//! Typed configuration parameters.
//!
//! A service method takes each configurable parameter as `Option<T>` with
//! `T: Configurable`, after all of its plain parameters. `Some` is used as
//! given; `None` is filled from the key `T` names via
//! [`Resolver::inject`](super::Resolver::inject).

use std::ops::Deref;
use std::sync::Arc;

use super::Value;
use super::keys::{ACTIVE_CHAIN, MANAGER_CONTRACT, USER_ADDRESS};
use crate::domain::Address;
use crate::error::{BevyError, Result};
use crate::ports::{ChainProvider, Contract};

pub trait Configurable: Sized {
    const KEY: &'static str;

    fn from_value(value: Value) -> Result<Self>;
}

fn unexpected(key: &str, expected: &'static str) -> BevyError {
    BevyError::UnexpectedValue {
        key: key.to_string(),
        expected,
    }
}

#[derive(Clone)]
pub struct ActiveChain(pub Arc<dyn ChainProvider>);

impl Configurable for ActiveChain {
    const KEY: &'static str = ACTIVE_CHAIN;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Chain(chain) => Ok(Self(chain)),
            _ => Err(unexpected(Self::KEY, "a chain")),
        }
    }
}

impl Deref for ActiveChain {
    type Target = dyn ChainProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[derive(Clone)]
pub struct ManagerContract(pub Arc<dyn Contract>);

impl Configurable for ManagerContract {
    const KEY: &'static str = MANAGER_CONTRACT;

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Contract(contract) => Ok(Self(contract)),
            _ => Err(unexpected(Self::KEY, "a contract")),
        }
    }
}

impl Deref for ManagerContract {
    type Target = dyn Contract;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserAddress(pub Address);

impl Configurable for UserAddress {
    const KEY: &'static str = USER_ADDRESS;

    fn from_value(value: Value) -> Result<Self> {
        let raw = value
            .as_raw()
            .ok_or_else(|| unexpected(Self::KEY, "an address"))?;
        raw.parse()
            .map(Self)
            .map_err(|_| BevyError::InvalidAddress(raw.to_string()))
    }
}

impl From<Address> for UserAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}
