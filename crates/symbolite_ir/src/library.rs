//! The static function library.
//!
//! Built once per process. Every operator, scalar function, vector
//! function and constant is reachable under its dotted path, which is
//! also the path backends resolve it by.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::function::Function;
use crate::operator::Op;
use crate::symbol::Symbol;
use crate::{scalar, vector};

/// A library member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LibraryEntry {
    Function(Function),
    Constant(Symbol),
}

#[derive(Debug)]
pub struct Library {
    entries: FxHashMap<String, LibraryEntry>,
}

impl Library {
    fn build() -> Self {
        let mut entries = FxHashMap::default();
        let mut insert_function = |function: Function| {
            entries.insert(function.to_string(), LibraryEntry::Function(function));
        };

        for op in Op::ALL {
            insert_function(op.function().clone());
        }
        for &(name, arity) in scalar::FUNCTIONS {
            insert_function(scalar::function(name, arity));
        }
        for &name in vector::FUNCTIONS {
            insert_function(vector::function(name));
        }
        for &name in scalar::CONSTANTS {
            let constant = scalar::constant(name);
            entries.insert(constant.to_string(), LibraryEntry::Constant(constant));
        }

        tracing::trace!(entries = entries.len(), "built symbolic library");
        Library { entries }
    }

    /// Entry registered under `path` (`"scalar.cos"`, `"symbol.add"`, ...).
    pub fn get(&self, path: &str) -> Option<&LibraryEntry> {
        self.entries.get(path)
    }

    pub fn function(&self, path: &str) -> Option<&Function> {
        match self.get(path)? {
            LibraryEntry::Function(function) => Some(function),
            LibraryEntry::Constant(_) => None,
        }
    }

    pub fn constant(&self, path: &str) -> Option<&Symbol> {
        match self.get(path)? {
            LibraryEntry::Constant(symbol) => Some(symbol),
            LibraryEntry::Function(_) => None,
        }
    }

    /// Every dotted path, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Paths inside one namespace, sorted.
    pub fn namespace(&self, namespace: &str) -> Vec<&str> {
        self.paths()
            .into_iter()
            .filter(|path| path.split_once('.').is_some_and(|(ns, _)| ns == namespace))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static LIBRARY: LazyLock<Library> = LazyLock::new(Library::build);

/// The process-wide library table.
pub fn library() -> &'static Library {
    &LIBRARY
}
