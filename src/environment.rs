use indexmap::IndexMap;

use crate::value::Value;

/// Mutable mapping from symbol names to values.
///
/// `set!` and `define` bind in place through [`Environment::define`].
/// Closures take a [`Environment::snapshot`] copy of the defining
/// environment at creation time and extend another snapshot with parameter
/// bindings at each call; a snapshot never aliases the environment it was
/// taken from.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Binds `name` in place, creating the binding or overwriting it.
    pub fn define(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    /// Independent copy used at closure creation and closure invocation.
    pub fn snapshot(&self) -> Environment {
        self.clone()
    }

    /// Read-only view of the bindings in insertion order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
