//! Named local method backends.

use super::golden_section::GoldenSection;
use super::nelder_mead::NelderMead;
use super::types::LocalMethod;
use crate::error::{ConfigurationError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Shared, type-erased local method.
pub type SharedLocalMethod = Arc<dyn LocalMethod>;

type Factory = Box<dyn Fn() -> SharedLocalMethod + Send + Sync>;

struct Entry {
    factory: Factory,
    instance: OnceLock<SharedLocalMethod>,
}

/// Maps backend names to local method factories.
///
/// A backend is constructed the first time it is resolved and cached
/// afterwards; backends that are never requested are never built.
/// Resolving an unregistered name is a [`ConfigurationError`].
///
/// # Examples
///
/// ```
/// use u_multistart::local::LocalMethodRegistry;
///
/// let registry = LocalMethodRegistry::with_builtins();
/// assert!(!registry.is_loaded("nelder_mead"));
/// let method = registry.resolve("nelder_mead").unwrap();
/// assert_eq!(method.name(), "nelder_mead");
/// assert!(registry.is_loaded("nelder_mead"));
/// assert!(registry.resolve("bobyqa").is_err());
/// ```
#[derive(Default)]
pub struct LocalMethodRegistry {
    entries: BTreeMap<String, Entry>,
}

impl LocalMethodRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with `"nelder_mead"` and `"golden_section"` registered
    /// with their default options.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("nelder_mead", || -> SharedLocalMethod {
            Arc::new(NelderMead::default())
        });
        registry.register("golden_section", || -> SharedLocalMethod {
            Arc::new(GoldenSection::default())
        });
        registry
    }

    /// Registers (or replaces) a backend factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> SharedLocalMethod + Send + Sync + 'static,
    {
        self.entries.insert(
            name.into(),
            Entry {
                factory: Box::new(factory),
                instance: OnceLock::new(),
            },
        );
    }

    /// Returns the backend registered under `name`, building it on first use.
    pub fn resolve(&self, name: &str) -> Result<SharedLocalMethod> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownLocalMethod(name.to_string()))?;
        let method = entry.instance.get_or_init(|| {
            tracing::debug!(backend = name, "loading local method backend");
            (entry.factory)()
        });
        Ok(Arc::clone(method))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether the backend has already been constructed.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.instance.get().is_some())
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for LocalMethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalMethodRegistry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A local method given either by backend name or as a callable.
///
/// Both forms normalize to the same [`LocalMethod`] contract through
/// [`resolve`](Self::resolve).
#[derive(Clone)]
pub enum LocalMethodChoice {
    /// Looked up in a [`LocalMethodRegistry`].
    Backend(String),
    /// Used directly.
    Callable(SharedLocalMethod),
}

impl LocalMethodChoice {
    pub fn backend(name: impl Into<String>) -> Self {
        LocalMethodChoice::Backend(name.into())
    }

    pub fn callable<M: LocalMethod + 'static>(method: M) -> Self {
        LocalMethodChoice::Callable(Arc::new(method))
    }

    pub fn resolve(&self, registry: &LocalMethodRegistry) -> Result<SharedLocalMethod> {
        match self {
            LocalMethodChoice::Backend(name) => registry.resolve(name),
            LocalMethodChoice::Callable(method) => Ok(Arc::clone(method)),
        }
    }
}

impl fmt::Debug for LocalMethodChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalMethodChoice::Backend(name) => f.debug_tuple("Backend").field(name).finish(),
            LocalMethodChoice::Callable(method) => {
                f.debug_tuple("Callable").field(&method.name()).finish()
            }
        }
    }
}
