//! Attribute-bag objects.

use std::collections::BTreeMap;

use super::Value;

/// An object with named attributes.
///
/// A sealed object only accepts writes to attributes it already has, the
/// way a class with fixed slots does.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    type_name: String,
    attrs: BTreeMap<String, Value>,
    sealed: bool,
}

impl Object {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attrs: BTreeMap::new(),
            sealed: false,
        }
    }

    /// Set an attribute (builder pattern).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Refuse creation of new attributes from now on (builder pattern).
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Insert or replace an attribute; returns `false` if sealed and `name` is new.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if self.sealed && !self.attrs.contains_key(&name) {
            return false;
        }
        self.attrs.insert(name, value);
        true
    }

    pub(crate) fn attrs(&self) -> &BTreeMap<String, Value> {
        &self.attrs
    }

    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }
}
