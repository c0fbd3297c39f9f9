//! Resolution of configuration keys into runtime values.
//!
//! Every key maps to a raw string in the [`Environment`]. A key may also have
//! a [`Constructor`] registered, which turns the raw string into a handle
//! (a chain connection, a contract). Constructors receive a [`Resolution`]
//! and may resolve the keys they depend on through it, so the registry forms
//! a small dependency graph that is walked on demand. Nothing is cached:
//! each resolution runs the constructors again.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::{Configurable, Environment};
use crate::error::{BevyError, Result};
use crate::ports::{ChainProvider, Contract};

#[derive(Clone)]
pub enum Value {
    Raw(String),
    Chain(Arc<dyn ChainProvider>),
    Contract(Arc<dyn Contract>),
}

impl Value {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Self::Chain(chain) => f.debug_tuple("Chain").field(&chain.name()).finish(),
            Self::Contract(contract) => f
                .debug_struct("Contract")
                .field("name", &contract.name())
                .field("address", &contract.address())
                .finish(),
        }
    }
}

/// Handles compare by identity on chain: same chain name, or same contract
/// name at the same address.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Raw(a), Self::Raw(b)) => a == b,
            (Self::Chain(a), Self::Chain(b)) => a.name() == b.name(),
            (Self::Contract(a), Self::Contract(b)) => {
                a.name() == b.name() && a.address() == b.address()
            }
            _ => false,
        }
    }
}

#[async_trait]
pub trait Constructor: Send + Sync {
    async fn construct(&self, cx: &Resolution<'_>, raw: String) -> Result<Value>;
}

/// Adapts a plain function of the raw value into a [`Constructor`].
pub struct FnConstructor<F>(pub F);

#[async_trait]
impl<F> Constructor for FnConstructor<F>
where
    F: Fn(String) -> Result<Value> + Send + Sync,
{
    async fn construct(&self, _cx: &Resolution<'_>, raw: String) -> Result<Value> {
        (self.0)(raw)
    }
}

#[derive(Default)]
pub struct Registry {
    constructors: HashMap<String, Arc<dyn Constructor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn register(mut self, key: impl Into<String>, constructor: impl Constructor + 'static) -> Self {
        self.constructors.insert(key.into(), Arc::new(constructor));
        self
    }

    #[must_use]
    pub fn register_fn<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(String) -> Result<Value> + Send + Sync + 'static,
    {
        self.register(key, FnConstructor(f))
    }

    fn get(&self, key: &str) -> Option<&Arc<dyn Constructor>> {
        self.constructors.get(key)
    }
}

pub struct Resolver {
    env: Environment,
    registry: Registry,
}

impl Resolver {
    pub const fn new(env: Environment, registry: Registry) -> Self {
        Self { env, registry }
    }

    /// The raw string for `key`, without running its constructor.
    pub fn raw(&self, key: &str, default: Option<&str>) -> Result<String> {
        self.env
            .get(key)
            .or(default)
            .map(str::to_string)
            .ok_or_else(|| BevyError::MissingConfig(key.to_string()))
    }

    pub async fn resolve(&self, key: &str, default: Option<&str>) -> Result<Value> {
        Resolution::root(self).resolve(key, default).await
    }

    /// Returns `explicit` untouched when given; otherwise resolves `T::KEY`.
    pub async fn inject<T: Configurable>(&self, explicit: Option<T>) -> Result<T> {
        match explicit {
            Some(value) => Ok(value),
            None => T::from_value(self.resolve(T::KEY, None).await?),
        }
    }
}

/// One walk through the dependency graph, remembering the keys currently
/// being constructed.
pub struct Resolution<'a> {
    resolver: &'a Resolver,
    path: Vec<String>,
}

impl<'a> Resolution<'a> {
    const fn root(resolver: &'a Resolver) -> Self {
        Self {
            resolver,
            path: Vec::new(),
        }
    }

    pub async fn resolve(&self, key: &str, default: Option<&str>) -> Result<Value> {
        if self.path.iter().any(|k| k == key) {
            let mut cycle = self.path.clone();
            cycle.push(key.to_string());
            return Err(BevyError::CyclicConfig(cycle.join(" -> ")));
        }

        let raw = self.resolver.raw(key, default)?;

        let Some(constructor) = self.resolver.registry.get(key) else {
            tracing::debug!(key, "resolved raw configuration value");
            return Ok(Value::Raw(raw));
        };

        tracing::debug!(key, raw = %raw, depth = self.path.len(), "constructing configuration value");
        let mut path = self.path.clone();
        path.push(key.to_string());
        let child = Resolution {
            resolver: self.resolver,
            path,
        };
        constructor.construct(&child, raw).await
    }

    pub async fn inject<T: Configurable>(&self) -> Result<T> {
        T::from_value(self.resolve(T::KEY, None).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn upper(raw: String) -> Result<Value> {
        Ok(Value::Raw(raw.to_uppercase()))
    }

    #[tokio::test]
    async fn test_constructor_applied_to_environment_value() {
        let resolver = Resolver::new(
            Environment::from_pairs([("spam", "eggs")]),
            Registry::new().register_fn("spam", upper),
        );
        assert_eq!(
            resolver.resolve("spam", None).await.unwrap(),
            Value::Raw("EGGS".into())
        );
    }

    #[tokio::test]
    async fn test_unregistered_key_passes_through() {
        let resolver = Resolver::new(Environment::from_pairs([("spam", "eggs")]), Registry::new());
        assert_eq!(
            resolver.resolve("spam", None).await.unwrap(),
            Value::Raw("eggs".into())
        );
    }

    #[tokio::test]
    async fn test_default_used_only_when_absent() {
        let resolver = Resolver::new(
            Environment::from_pairs([("present", "env")]),
            Registry::new().register_fn("absent", upper),
        );
        assert_eq!(
            resolver.resolve("absent", Some("fallback")).await.unwrap(),
            Value::Raw("FALLBACK".into())
        );
        assert_eq!(
            resolver.resolve("present", Some("fallback")).await.unwrap(),
            Value::Raw("env".into())
        );
        assert_eq!(
            resolver.resolve("other", Some("fallback")).await.unwrap(),
            Value::Raw("fallback".into())
        );
    }

    #[tokio::test]
    async fn test_missing_key_without_default_fails() {
        let resolver = Resolver::new(Environment::default(), Registry::new().register_fn("k", upper));
        let err = resolver.resolve("k", None).await.unwrap_err();
        assert!(matches!(err, BevyError::MissingConfig(key) if key == "k"));
    }

    #[tokio::test]
    async fn test_constructor_runs_on_every_resolution() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let resolver = Resolver::new(
            Environment::from_pairs([("k", "v")]),
            Registry::new().register_fn("k", |raw| {
                CALLS.fetch_add(1, Ordering::SeqCst);
                Ok(Value::Raw(raw))
            }),
        );

        let first = resolver.resolve("k", None).await.unwrap();
        let second = resolver.resolve("k", None).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    struct Prefixed {
        dependency: &'static str,
    }

    #[async_trait]
    impl Constructor for Prefixed {
        async fn construct(&self, cx: &Resolution<'_>, raw: String) -> Result<Value> {
            let dep = cx.resolve(self.dependency, None).await?;
            let prefix = dep.as_raw().unwrap_or_default().to_string();
            Ok(Value::Raw(format!("{prefix}/{raw}")))
        }
    }

    #[tokio::test]
    async fn test_composite_constructor_resolves_dependency() {
        let resolver = Resolver::new(
            Environment::from_pairs([("chain", "tester"), ("contract", "PM")]),
            Registry::new()
                .register_fn("chain", upper)
                .register("contract", Prefixed { dependency: "chain" }),
        );
        assert_eq!(
            resolver.resolve("contract", None).await.unwrap(),
            Value::Raw("TESTER/PM".into())
        );
    }

    #[tokio::test]
    async fn test_cycle_is_reported() {
        let resolver = Resolver::new(
            Environment::from_pairs([("a", "1"), ("b", "2")]),
            Registry::new()
                .register("a", Prefixed { dependency: "b" })
                .register("b", Prefixed { dependency: "a" }),
        );
        let err = resolver.resolve("a", None).await.unwrap_err();
        assert!(matches!(err, BevyError::CyclicConfig(path) if path == "a -> b -> a"));
    }
}
