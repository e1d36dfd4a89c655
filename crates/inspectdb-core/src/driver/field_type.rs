use crate::Value;

use indexmap::IndexMap;

/// A backend's mapping of a native column type to a model field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    /// The field class, e.g. `CharField`. A dotted name refers to a custom
    /// field outside the `models` module.
    pub name: String,

    /// Extra keyword arguments the backend wants on the field.
    pub params: IndexMap<String, Value>,
}

impl FieldType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: IndexMap::new(),
        }
    }

    /// Adds a keyword argument to the field.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
