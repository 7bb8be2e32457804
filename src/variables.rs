use crate::value::{Lookup, Value};
use hashbrown::HashMap;

/// Named variables of an interpreter session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableStore {
    variables: HashMap<String, Value>,
}

impl VariableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, returning the previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.variables.insert(name.into(), value.into())
    }

    /// Get the value of `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Remove `name`, returning its value
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    /// Get a copy of all the variables, sorted by name
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        let mut variables: Vec<(String, Value)> = self
            .variables
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        variables.sort_by(|a, b| a.0.cmp(&b.0));
        variables
    }

    /// Replace all the variables by `variables`
    pub fn replace_all<I, K>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.variables = variables
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
    }

    /// Remove all the variables
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Number of variables defined
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Check if no variable is defined
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Lookup for VariableStore {
    fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }
}
