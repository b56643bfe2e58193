use std::{cell::RefCell, collections::HashMap, fmt::Debug, rc::Rc};

use super::value::Value;

/// Shared handle to a scope. Closures and call frames hold these.
pub type Env = Rc<RefCell<Environment>>;

/// A single scope: its own bindings plus a link to the enclosing scope.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    /// A fresh root scope.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// A child scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Looks `name` up here, then in each enclosing scope outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.store.insert(name.into(), value);
    }
}

impl Debug for Environment {
    // Values may hold this very scope, so only names are printed
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.store.keys().collect::<Vec<_>>();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_outer", &self.outer.is_some())
            .finish()
    }
}
