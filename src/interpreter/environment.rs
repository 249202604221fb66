use crate::interpreter::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One scope in the lexical chain: a name-to-value store plus an optional
/// link to the enclosing scope. Closures hold a strong reference to their
/// defining environment, so a scope lives as long as its longest-living
/// descendant.
#[derive(Default)]
pub struct Environment {
    store: RefCell<HashMap<String, Value>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// The global scope.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A function-call scope enclosed by the callee's captured environment.
    pub fn new_enclosed(outer: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            store: RefCell::new(HashMap::new()),
            outer: Some(outer),
        })
    }

    /// Look up a name here, then recursively outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.borrow().get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Bind a name in this scope only; never touches the outer chain.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.store.borrow_mut().insert(name.into(), value);
    }
}
