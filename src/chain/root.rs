use std::fmt;

use crate::coalesce::PendingAssignment;
use crate::config::SafeConfig;
use crate::value::Value;

use super::Chain;

/// Root wrapper: the starting point of void-safe navigation.
///
/// No access has been attempted yet, so the wrapped value is exactly what the
/// caller passed in. The first step starts a [`Chain`] seeded with
/// `(Undefined, root)`.
///
/// ```
/// use voidsafe::{value, Value, VoidSafe};
///
/// let pets = Value::map_from([("pi", Value::Float(3.14)), ("none", Value::Null)]);
/// let safe = VoidSafe::new(pets);
///
/// assert_eq!(value(&safe.item("pi")), Value::Float(3.14));
/// assert_eq!(value(&safe.item("none")), Value::Null);
/// assert_eq!(value(&safe.item("none").attr("upper").call(&[])), Value::Undefined);
/// assert_eq!(value(&safe.item("missing")), Value::Undefined);
/// ```
#[derive(Debug, Clone)]
pub struct VoidSafe {
    root: Value,
    config: SafeConfig,
}

impl VoidSafe {
    /// Wrap `root` using the process-wide configuration.
    pub fn new(root: impl Into<Value>) -> Self {
        Self::with_config(root, *SafeConfig::global())
    }

    pub fn with_config(root: impl Into<Value>, config: SafeConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn config(&self) -> &SafeConfig {
        &self.config
    }

    pub fn into_chain(self) -> Chain {
        Chain::seeded(Value::Undefined, self.root, self.config)
    }

    fn chain(&self) -> Chain {
        self.clone().into_chain()
    }

    pub fn attr(&self, name: &str) -> Chain {
        self.chain().attr(name)
    }

    pub fn item(&self, key: impl Into<Value>) -> Chain {
        self.chain().item(key)
    }

    pub fn call(&self, args: &[Value]) -> Chain {
        self.chain().call(args)
    }

    /// Set attribute `name` directly on the root. Failures are swallowed.
    pub fn set_attr(&self, name: &str, value: Value) -> bool {
        self.write(&name, self.root.set_attr(name, value).is_ok())
    }

    /// Set item `key` directly on the root. Failures are swallowed.
    pub fn set_item(&self, key: impl Into<Value>, value: Value) -> bool {
        let key = key.into();
        self.write(&key, self.root.set_item(&key, value).is_ok())
    }

    fn write(&self, slot: &dyn fmt::Display, ok: bool) -> bool {
        if self.config.trace_steps {
            log::trace!("root write {} on {}: {}", slot, self.root, if ok { "done" } else { "refused" });
        }
        ok
    }

    /// Conditionally define attribute `name` on the root.
    pub fn try_assign_attr(&self, name: &str, pending: PendingAssignment) -> bool {
        self.attr(name).try_assign(pending)
    }

    /// Conditionally define item `key` on the root.
    pub fn try_assign_item(&self, key: impl Into<Value>, pending: PendingAssignment) -> bool {
        self.item(key).try_assign(pending)
    }
}

impl PartialEq<Value> for VoidSafe {
    fn eq(&self, other: &Value) -> bool {
        self.root == *other
    }
}

impl PartialEq<VoidSafe> for Value {
    fn eq(&self, other: &VoidSafe) -> bool {
        *self == other.root
    }
}

impl fmt::Display for VoidSafe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoidSafe({})", self.root)
    }
}
