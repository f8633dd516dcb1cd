//! Dynamic values that a void-safe chain navigates.
//!
//! Containers (`List`, `Map`, `Object`) have shared reference semantics:
//! cloning a [`Value`] clones the handle, not the contents, so a write made
//! through a chain is visible to every holder of the same container.

pub mod access;
pub mod builtins;
pub mod function;
pub mod json;
pub mod object;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::sentinel::VoidKind;

pub use function::{Function, NativeFn};
pub use object::Object;

/// Shared, interior-mutable container handle.
pub type Shared<T> = Arc<RwLock<T>>;

/// Mapping storage.
pub type MapEntries = BTreeMap<Key, Value>;

/// A dynamically typed value.
#[derive(Clone)]
pub enum Value {
    /// Explicitly set to "no value".
    Null,
    /// Never assigned.
    Undefined,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Shared<Vec<Value>>),
    Map(Shared<MapEntries>),
    Object(Shared<Object>),
    Function(Function),
}

/// The null sentinel.
pub const NULL: Value = Value::Null;

/// The undefined sentinel.
pub const UNDEFINED: Value = Value::Undefined;

/// Runtime type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Undefined,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Object,
    Function,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueType::Null => "NoneType",
            ValueType::Undefined => "UndefinedType",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::List => "list",
            ValueType::Map => "dict",
            ValueType::Object => "object",
            ValueType::Function => "function",
        };
        f.write_str(s)
    }
}

/// Mapping key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl TryFrom<&Value> for Key {
    type Error = crate::error::AccessError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Bool(b) => Ok(Key::Int(*b as i64)),
            Value::Str(s) => Ok(Key::Str(s.clone())),
            other => Err(crate::error::AccessError::UnhashableKey(other.value_type())),
        }
    }
}

impl Value {
    /// A new empty shared mapping.
    pub fn map() -> Self {
        Value::Map(Arc::new(RwLock::new(BTreeMap::new())))
    }

    /// A new shared mapping from key/value pairs.
    pub fn map_from<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Value::Map(Arc::new(RwLock::new(entries)))
    }

    /// A new shared list.
    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::List(Arc::new(RwLock::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Wrap an object into a shared handle.
    pub fn object(object: Object) -> Self {
        Value::Object(Arc::new(RwLock::new(object)))
    }

    /// A named native function.
    pub fn function<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Value::Function(Function::new(name, f))
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Undefined => ValueType::Undefined,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::List(_) => ValueType::List,
            Value::Map(_) => ValueType::Map,
            Value::Object(_) => ValueType::Object,
            Value::Function(_) => ValueType::Function,
        }
    }

    /// Name of the runtime type; objects report their own type name.
    pub fn type_name(&self) -> String {
        match self {
            Value::Object(obj) => obj.read().type_name().to_string(),
            other => other.value_type().to_string(),
        }
    }

    /// Whether both values have the same runtime type.
    ///
    /// `Int` and `Float` are different types even though they compare equal.
    /// Objects match only when their type names match.
    pub fn same_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => {
                Arc::ptr_eq(a, b) || a.read().type_name() == b.read().type_name()
            }
            (a, b) => a.value_type() == b.value_type(),
        }
    }

    /// Which sentinel this is, if any.
    pub fn void_kind(&self) -> Option<VoidKind> {
        match self {
            Value::Null => Some(VoidKind::Null),
            Value::Undefined => Some(VoidKind::Undefined),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Address of a container's shared storage. Containers can hold themselves,
/// so recursive walks track the addresses they are inside.
fn addr<T>(shared: &Shared<T>) -> usize {
    Arc::as_ptr(shared) as usize
}

impl Value {
    /// Structural equality that stops at a pair of containers it is already
    /// comparing. Uses `read_recursive` because a cyclic container is read
    /// again while its outer guard is still held.
    fn eq_nested(&self, other: &Value, comparing: &mut Vec<(usize, usize)>) -> bool {
        let pair = match (self, other) {
            (Value::List(a), Value::List(b)) if !Arc::ptr_eq(a, b) => (addr(a), addr(b)),
            (Value::Map(a), Value::Map(b)) if !Arc::ptr_eq(a, b) => (addr(a), addr(b)),
            (Value::Object(a), Value::Object(b)) if !Arc::ptr_eq(a, b) => (addr(a), addr(b)),
            (Value::List(_), Value::List(_))
            | (Value::Map(_), Value::Map(_))
            | (Value::Object(_), Value::Object(_)) => return true,
            (a, b) => return scalar_eq(a, b),
        };
        if comparing.contains(&pair) {
            return true;
        }
        comparing.push(pair);
        let equal = match (self, other) {
            (Value::List(a), Value::List(b)) => {
                let (a, b) = (a.read_recursive(), b.read_recursive());
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| x.eq_nested(y, comparing))
            }
            (Value::Map(a), Value::Map(b)) => {
                let (a, b) = (a.read_recursive(), b.read_recursive());
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.eq_nested(vb, comparing))
            }
            (Value::Object(a), Value::Object(b)) => {
                let (a, b) = (a.read_recursive(), b.read_recursive());
                a.type_name() == b.type_name()
                    && a.is_sealed() == b.is_sealed()
                    && a.attrs().len() == b.attrs().len()
                    && a.attrs()
                        .iter()
                        .zip(b.attrs().iter())
                        .all(|((na, va), (nb, vb))| na == nb && va.eq_nested(vb, comparing))
            }
            _ => false,
        };
        comparing.pop();
        equal
    }

    /// Python-style rendering; a container met again inside itself prints
    /// as `[...]` or `{...}`.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<usize>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Undefined => f.write_str("Undefined"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                let at = addr(items);
                if open.contains(&at) {
                    return f.write_str("[...]");
                }
                open.push(at);
                f.write_str("[")?;
                for (i, item) in items.read().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
            Value::Map(entries) => {
                let at = addr(entries);
                if open.contains(&at) {
                    return f.write_str("{...}");
                }
                open.push(at);
                f.write_str("{")?;
                for (i, (k, v)) in entries.read().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: ", k)?;
                    v.fmt_nested(f, open)?;
                }
                open.pop();
                f.write_str("}")
            }
            Value::Object(obj) => write!(f, "<{} object>", obj.read().type_name()),
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

fn scalar_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => (*a as f64) == *b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_nested(other, &mut Vec::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Undefined => f.write_str("Undefined"),
            Value::Bool(b) => write!(f, "Bool({:?})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({:?})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::List(_) => write!(f, "List({})", self),
            Value::Map(_) => write!(f, "Map({})", self),
            Value::Object(_) => write!(f, "Object({})", self),
            Value::Function(func) => write!(f, "Function({:?})", func),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(Arc::new(RwLock::new(items)))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::object(object)
    }
}

impl From<Function> for Value {
    fn from(func: Function) -> Self {
        Value::Function(func)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_distinct() {
        assert_ne!(NULL, UNDEFINED);
        assert_eq!(NULL, Value::Null);
        assert_eq!(UNDEFINED, Value::Undefined);
        assert_ne!(NULL, Value::Bool(false));
        assert_ne!(UNDEFINED, Value::Int(0));
        assert_ne!(NULL, Value::from(""));
    }

    #[test]
    fn test_numeric_equality_but_distinct_types() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert!(!Value::Int(1).same_type(&Value::Float(1.0)));
        assert!(Value::Float(3.14).same_type(&Value::Float(1.0)));
    }

    #[test]
    fn test_containers_share_handles() {
        let root = Value::map();
        let alias = root.clone();
        if let Value::Map(entries) = &alias {
            entries.write().insert(Key::from("k"), Value::from(1));
        }
        assert_eq!(root, Value::map_from([("k", 1)]));
    }

    #[test]
    fn test_object_types_compare_by_name() {
        let a = Value::object(Object::new("Point"));
        let b = Value::object(Object::new("Point"));
        let c = Value::object(Object::new("Line"));
        assert!(a.same_type(&b));
        assert!(!a.same_type(&c));
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<&str> = None;
        assert_eq!(Value::from(none), NULL);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn test_key_from_value() {
        assert_eq!(Key::try_from(&Value::from("a")).unwrap(), Key::from("a"));
        assert_eq!(Key::try_from(&Value::Int(3)).unwrap(), Key::Int(3));
        assert!(Key::try_from(&Value::Float(1.5)).is_err());
        assert!(Key::try_from(&NULL).is_err());
    }

    #[test]
    fn test_display() {
        let v = Value::map_from([("a", Value::list([1, 2])), ("b", Value::Null)]);
        assert_eq!(v.to_string(), r#"{"a": [1, 2], "b": None}"#);
        assert_eq!(UNDEFINED.to_string(), "Undefined");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
    }

    fn self_referencing_map() -> Value {
        let root = Value::map();
        if let Value::Map(entries) = &root {
            entries.write().insert(Key::from("me"), root.clone());
        }
        root
    }

    #[test]
    fn test_display_cyclic_container() {
        let root = self_referencing_map();
        assert_eq!(root.to_string(), r#"{"me": {...}}"#);
        assert_eq!(format!("{:?}", root), r#"Map({"me": {...}})"#);

        let items = Value::list([1]);
        if let Value::List(shared) = &items {
            shared.write().push(items.clone());
        }
        assert_eq!(items.to_string(), "[1, [...]]");
    }

    #[test]
    fn test_display_shared_but_acyclic() {
        let inner = Value::list([1]);
        let outer = Value::map_from([("a", inner.clone()), ("b", inner)]);
        assert_eq!(outer.to_string(), r#"{"a": [1], "b": [1]}"#);
    }

    #[test]
    fn test_cyclic_equality_terminates() {
        let a = self_referencing_map();
        let b = self_referencing_map();
        assert_eq!(a, a.clone());
        assert_eq!(a, b);

        let c = self_referencing_map();
        if let Value::Map(entries) = &c {
            entries.write().insert(Key::from("extra"), Value::Int(1));
        }
        assert_ne!(a, c);
    }

    #[test]
    fn test_cyclic_object_equality_terminates() {
        let a = Value::object(Object::new("Node"));
        let b = Value::object(Object::new("Node"));
        a.set_attr("next", a.clone()).unwrap();
        b.set_attr("next", b.clone()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "<Node object>");
    }

    #[test]
    fn test_scalar_accessors() {
        assert!(NULL.is_null());
        assert!(!UNDEFINED.is_null());
        assert!(UNDEFINED.is_undefined());
        assert_eq!(Value::from("text").as_str(), Some("text"));
        assert_eq!(Value::Int(1).as_str(), None);
        assert_eq!(Value::Int(7).as_i64(), Some(7));
        assert_eq!(Value::Float(7.0).as_i64(), None);
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(NULL.as_f64(), None);
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(1).as_bool(), None);
    }
}
