//! Ordering interdependent definitions.
//!
//! Each definition depends on the other definitions its expression
//! mentions. `solve_dependencies` yields layers of items whose
//! dependencies all sit in earlier layers; `substitute_content` and
//! `eval_content` fold substitution or evaluation over those layers.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use rustc_hash::{FxHashMap, FxHashSet};
use symbolite_eval::{evaluate, Backend};
use symbolite_ir::{inspect, substitute, Native, Value};

use crate::errors::{CyclicDependency, GroupError};

/// Dependency sets of every item of `content`.
///
/// An item depends on the entities of its expression accepted by
/// `is_dependency`. An item whose expression is the item itself has no
/// dependencies.
pub fn compute_dependencies(
    content: &FxHashMap<Value, Value>,
    is_dependency: impl Fn(&Value) -> bool,
) -> FxHashMap<Value, FxHashSet<Value>> {
    content
        .iter()
        .map(|(key, value)| {
            let occurrences = inspect(value);
            let dependencies = if occurrences.len() == 1 && occurrences.get(key) == Some(&1) {
                FxHashSet::default()
            } else {
                occurrences
                    .into_keys()
                    .filter(|entity| is_dependency(entity))
                    .collect()
            };
            (key.clone(), dependencies)
        })
        .collect()
}

/// Lazy sequence of dependency layers.
///
/// Consumes its graph: once exhausted (or failed) it yields nothing more.
pub struct Layers<K> {
    /// Unresolved dependency count per pending item.
    pending: FxHashMap<K, usize>,
    /// Items waiting on each item.
    dependents: FxHashMap<K, Vec<K>>,
    frontier: FxHashSet<K>,
}

impl<K> Iterator for Layers<K>
where
    K: Hash + Eq + Clone + fmt::Display,
{
    type Item = Result<FxHashSet<K>, CyclicDependency>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.frontier.is_empty() {
            if self.pending.is_empty() {
                return None;
            }
            let mut items: Vec<String> = self.pending.keys().map(ToString::to_string).collect();
            items.sort();
            self.pending.clear();
            self.dependents.clear();
            return Some(Err(CyclicDependency { items }));
        }

        let layer = std::mem::take(&mut self.frontier);
        for item in &layer {
            let Some(waiting) = self.dependents.remove(item) else {
                continue;
            };
            for dependent in waiting {
                if let Some(count) = self.pending.get_mut(&dependent) {
                    *count -= 1;
                    if *count == 0 {
                        self.pending.remove(&dependent);
                        self.frontier.insert(dependent);
                    }
                }
            }
        }
        tracing::debug!(size = layer.len(), "resolved dependency layer");
        Some(Ok(layer))
    }
}

/// Split a dependency graph into layers.
///
/// Items mentioned only as dependencies land in the first layer. A cycle
/// is reported once every item outside it has been yielded.
pub fn solve_dependencies<K, S>(dependencies: &HashMap<K, FxHashSet<K>, S>) -> Layers<K>
where
    K: Hash + Eq + Clone + fmt::Display,
    S: BuildHasher,
{
    let mut pending: FxHashMap<K, usize> = FxHashMap::default();
    let mut dependents: FxHashMap<K, Vec<K>> = FxHashMap::default();
    let mut frontier: FxHashSet<K> = FxHashSet::default();

    for (item, requires) in dependencies {
        if requires.is_empty() {
            frontier.insert(item.clone());
        } else {
            pending.insert(item.clone(), requires.len());
        }
        for dependency in requires {
            dependents
                .entry(dependency.clone())
                .or_default()
                .push(item.clone());
        }
    }
    for dependency in dependents.keys() {
        if !dependencies.contains_key(dependency) {
            frontier.insert(dependency.clone());
        }
    }

    Layers {
        pending,
        dependents,
        frontier,
    }
}

/// The whole schedule, or the cycle that prevents one.
fn schedule(
    content: &FxHashMap<Value, Value>,
    is_dependency: impl Fn(&Value) -> bool,
) -> Result<Vec<FxHashSet<Value>>, CyclicDependency> {
    solve_dependencies(&compute_dependencies(content, is_dependency)).collect()
}

/// Substitute every definition into the ones that depend on it.
///
/// The schedule is computed up front, so a cycle is reported before any
/// substitution happens.
pub fn substitute_content(
    content: &FxHashMap<Value, Value>,
    is_dependency: impl Fn(&Value) -> bool,
) -> Result<FxHashMap<Value, Value>, GroupError> {
    let mut out = FxHashMap::default();
    for layer in schedule(content, is_dependency)? {
        for item in layer {
            let Some(definition) = content.get(&item) else {
                continue;
            };
            let resolved = substitute(definition, &out)?;
            out.insert(item, resolved);
        }
    }
    Ok(out)
}

/// Evaluate every definition, feeding earlier results into later ones.
pub fn eval_content(
    content: &FxHashMap<Value, Value>,
    backend: &dyn Backend,
    is_dependency: impl Fn(&Value) -> bool,
) -> Result<FxHashMap<Value, Native>, GroupError> {
    let mut resolved: FxHashMap<Value, Value> = FxHashMap::default();
    let mut out = FxHashMap::default();
    for layer in schedule(content, is_dependency)? {
        for item in layer {
            let Some(definition) = content.get(&item) else {
                continue;
            };
            let native = evaluate(&substitute(definition, &resolved)?, backend)?;
            resolved.insert(item.clone(), Value::Native(native.clone()));
            out.insert(item, native);
        }
    }
    Ok(out)
}
