use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use tracing::trace;

use super::object::Object;

/// Shared handle to a scope. Closures and call frames hold these.
///
/// A scope is freed once the last handle to it is dropped. The exception is
/// a `Function` stored in the very scope it captured (`let f = fn() {...}`
/// at the top level): the scope and the function then own each other, and
/// the pair lives until the process exits. There is no cycle collector.
pub type Env = Rc<RefCell<Environment>>;

/// Name bindings of one scope, with an optional link to the enclosing one.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    /// A fresh top-level scope.
    pub fn new_env() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// A fresh empty scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Looks `name` up here, then in each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => {
                    trace!(binding = name, "unbound name");
                    None
                }
            },
        }
    }

    /// Binds `name` in this scope only and returns the value.
    pub fn set(&mut self, name: &str, value: Object) -> Object {
        self.store.insert(name.to_string(), value.clone());
        value
    }

    pub fn outer(&self) -> Option<Env> {
        self.outer.clone()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.store.keys().collect();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &self.outer.is_some())
            .finish()
    }
}
