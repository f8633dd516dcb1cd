//! Failure-absorbing navigation chains.
//!
//! A [`Chain`] is started from a [`VoidSafe`] root and evaluates every step
//! eagerly. A step that cannot be performed collapses to
//! [`Value::Undefined`] instead of returning an error, and once the current
//! result is `Undefined` every later step stays `Undefined` without touching
//! anything.
//!
//! Each step remembers which slot it read (attribute name or item key) on
//! which container, so the chain can later write into that slot even when the
//! read failed. That is what makes "define it now" assignments possible.
//!
//! ```
//! use voidsafe::{Value, VoidSafe};
//!
//! let config = Value::map();
//! let mut port = VoidSafe::new(config.clone()).item("port");
//! assert!(port.current().is_undefined());
//!
//! assert!(port.write_back(Value::Int(8080)));
//! assert_eq!(port, Value::Int(8080));
//! assert_eq!(config, Value::map_from([("port", 8080)]));
//! ```

mod root;

use std::fmt;

use crate::config::SafeConfig;
use crate::error::AccessResult;
use crate::value::Value;

pub use root::VoidSafe;

/// The (previous, current) pair of a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// The container the latest step read from.
    pub parent: Value,
    /// The latest step's result.
    pub child: Value,
}

/// The slot the latest step addressed on [`Bond::parent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    /// No addressable slot (chain start, or after a call).
    None,
    Attr(String),
    Item(Value),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::None => f.write_str("<none>"),
            Accessor::Attr(name) => write!(f, ".{}", name),
            Accessor::Item(key) => write!(f, "[{}]", key),
        }
    }
}

/// Navigation state of one chain expression.
#[derive(Debug, Clone)]
pub struct Chain {
    bond: Bond,
    accessor: Accessor,
    config: SafeConfig,
}

impl Chain {
    pub(crate) fn seeded(parent: Value, child: Value, config: SafeConfig) -> Self {
        Self {
            bond: Bond { parent, child },
            accessor: Accessor::None,
            config,
        }
    }

    pub fn bond(&self) -> &Bond {
        &self.bond
    }

    /// The latest step's result; a real value or `Undefined`, never an error.
    pub fn current(&self) -> &Value {
        &self.bond.child
    }

    /// The value the latest step was performed on.
    pub fn previous(&self) -> &Value {
        &self.bond.parent
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn config(&self) -> &SafeConfig {
        &self.config
    }

    /// Consume the chain, returning its current result.
    pub fn into_value(self) -> Value {
        self.bond.child
    }

    fn move_forward(&mut self, next: Value) {
        let previous = std::mem::replace(&mut self.bond.child, next);
        self.bond.parent = previous;
    }

    fn step<F>(mut self, accessor: Accessor, label: &dyn fmt::Display, attempt: F) -> Self
    where
        F: FnOnce(&Value) -> AccessResult<Value>,
    {
        let next = if self.bond.child.is_undefined() {
            if self.config.trace_steps {
                log::trace!("step {}: short-circuit on Undefined", label);
            }
            Value::Undefined
        } else {
            match attempt(&self.bond.child) {
                Ok(value) => {
                    if self.config.trace_steps {
                        log::trace!("step {}: {}", label, value);
                    }
                    value
                }
                Err(e) => {
                    if self.config.trace_steps {
                        log::trace!("step {}: collapsed to Undefined ({})", label, e);
                    }
                    Value::Undefined
                }
            }
        };
        self.move_forward(next);
        self.accessor = accessor;
        self
    }

    /// Read attribute `name` of the current result.
    pub fn attr(self, name: &str) -> Self {
        let accessor = Accessor::Attr(name.to_string());
        let label = accessor.clone();
        self.step(accessor, &label, |current| current.get_attr(name))
    }

    /// Read item `key` of the current result.
    pub fn item(self, key: impl Into<Value>) -> Self {
        let key = key.into();
        let accessor = Accessor::Item(key.clone());
        let label = accessor.clone();
        self.step(accessor, &label, |current| current.get_item(&key))
    }

    /// Call the current result with `args`.
    pub fn call(self, args: &[Value]) -> Self {
        self.step(Accessor::None, &"()", |current| current.call(args))
    }

    /// Write `value` into the slot the latest step addressed.
    ///
    /// Returns `false` without writing when the previous value is void, when
    /// there is no addressed slot, or when the container refuses the write.
    /// On success the current result is re-read from the slot.
    pub fn write_back(&mut self, value: Value) -> bool {
        if self.bond.parent.void_kind().is_some() {
            if self.config.trace_steps {
                log::trace!("write {}: no container ({})", self.accessor, self.bond.parent);
            }
            return false;
        }
        let parent = &self.bond.parent;
        let written = match &self.accessor {
            Accessor::Attr(name) => parent
                .set_attr(name, value)
                .map(|()| parent.get_attr(name)),
            Accessor::Item(key) => parent
                .set_item(key, value)
                .map(|()| parent.get_item(key)),
            Accessor::None => {
                if self.config.trace_steps {
                    log::trace!("write: no addressed slot");
                }
                return false;
            }
        };
        match written {
            Ok(reread) => {
                self.bond.child = reread.unwrap_or(Value::Undefined);
                if self.config.trace_steps {
                    log::trace!("write {}: {}", self.accessor, self.bond.child);
                }
                true
            }
            Err(e) => {
                if self.config.trace_steps {
                    log::trace!("write {}: refused ({})", self.accessor, e);
                }
                false
            }
        }
    }
}

impl PartialEq<Value> for Chain {
    fn eq(&self, other: &Value) -> bool {
        self.bond.child == *other
    }
}

impl PartialEq<Chain> for Value {
    fn eq(&self, other: &Chain) -> bool {
        *self == other.bond.child
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Chain) -> bool {
        self.bond.child == other.bond.child
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoidSafe({})", self.bond.child)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
