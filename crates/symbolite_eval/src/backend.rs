//! The backend interface.
//!
//! A backend maps dotted paths (`"scalar.cos"`, `"symbol.add"`,
//! `"scalar.Scalar"`) to native callables and constants. Any number of
//! backends can coexist; expressions never change when switching between
//! them.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use symbolite_ir::{Native, NativeFn, NativeResult};

/// What a backend answers for a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Function(NativeFn),
    Constant(Native),
    /// The path is known but this backend cannot implement it.
    Unsupported,
}

/// A source of native implementations, addressed by dotted path.
pub trait Backend: Send + Sync {
    /// Identity used in errors and as the key of user function
    /// implementations.
    fn name(&self) -> &str;

    /// `None` when the path is unknown to this backend.
    fn resolve(&self, path: &str) -> Option<Resolved>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, path: &str) -> Option<Resolved> {
        (**self).resolve(path)
    }
}

/// Table-driven backend.
#[derive(Clone)]
pub struct ModuleBackend {
    name: Arc<str>,
    members: FxHashMap<Arc<str>, Resolved>,
}

impl ModuleBackend {
    pub fn builder(name: impl Into<Arc<str>>) -> ModuleBackendBuilder {
        ModuleBackendBuilder {
            name: name.into(),
            members: FxHashMap::default(),
        }
    }

    /// Start a new backend from this one's members.
    pub fn to_builder(&self, name: impl Into<Arc<str>>) -> ModuleBackendBuilder {
        ModuleBackendBuilder {
            name: name.into(),
            members: self.members.clone(),
        }
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.members.keys().map(|path| &**path).collect();
        paths.sort_unstable();
        paths
    }
}

impl Backend for ModuleBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, path: &str) -> Option<Resolved> {
        self.members.get(path).cloned()
    }
}

impl fmt::Debug for ModuleBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleBackend")
            .field("name", &self.name)
            .field("members", &self.members.len())
            .finish()
    }
}

/// Builder for `ModuleBackend`. Later registrations replace earlier ones.
#[must_use]
pub struct ModuleBackendBuilder {
    name: Arc<str>,
    members: FxHashMap<Arc<str>, Resolved>,
}

impl ModuleBackendBuilder {
    pub fn function(mut self, path: &str, function: NativeFn) -> Self {
        self.members.insert(path.into(), Resolved::Function(function));
        self
    }

    /// Register a closure taking positional arguments only.
    pub fn positional(
        self,
        path: &str,
        function: impl Fn(&[Native]) -> NativeResult + Send + Sync + 'static,
    ) -> Self {
        let native = NativeFn::positional(path, function);
        self.function(path, native)
    }

    pub fn constant(mut self, path: &str, value: impl Into<Native>) -> Self {
        self.members.insert(path.into(), Resolved::Constant(value.into()));
        self
    }

    pub fn unsupported(mut self, path: &str) -> Self {
        self.members.insert(path.into(), Resolved::Unsupported);
        self
    }

    pub fn build(self) -> ModuleBackend {
        ModuleBackend {
            name: self.name,
            members: self.members,
        }
    }
}
