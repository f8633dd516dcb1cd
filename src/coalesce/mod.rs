//! Coalescing operators.
//!
//! A [`Coalesce`] returns a caller-supplied fallback when a value matches its
//! trigger set:
//!
//! - [`IFNDEF`] triggers on `Undefined` only. Only a chain result can be
//!   `Undefined` unless the caller wraps `Undefined` directly.
//! - [`IFNONE`] triggers on `Null` only.
//! - [`IFVOID`] triggers on either.
//!
//! Coalescing is also a type filter: with the type guard on (the default), a
//! value whose runtime type differs from the fallback's is replaced too.
//!
//! ```
//! use voidsafe::{Value, VoidSafe, IFNONE, IFVOID};
//!
//! let data = Value::map_from([("pi", Value::Float(3.14)), ("none", Value::Null)]);
//! let safe = VoidSafe::new(data);
//!
//! assert_eq!(IFNONE.or(&safe.item("none"), "fallback"), Value::from("fallback"));
//! assert_eq!(IFVOID.or(&safe.item("missing"), "fallback"), Value::from("fallback"));
//! assert_eq!(IFNONE.or(&safe.item("pi"), 1.0), Value::Float(3.14));
//! assert_eq!(IFNONE.or(&safe.item("pi"), 123), Value::Int(123));
//! ```

mod assign;

use std::fmt;

use crate::chain::Chain;
use crate::config::SafeConfig;
use crate::extract::Extract;
use crate::sentinel::VoidSet;
use crate::value::Value;

pub use assign::PendingAssignment;

/// Whether coalescing also rejects values whose type differs from the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeGuard {
    /// Use the configuration carried by the operand, else the global one.
    Inherit,
    Strict,
    Lenient,
}

/// A coalescing operator: a trigger set plus a type guard policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coalesce {
    name: &'static str,
    triggers: VoidSet,
    type_guard: TypeGuard,
}

/// Fallback if `Undefined`.
pub const IFNDEF: Coalesce = Coalesce::new("ifndef", VoidSet::UNDEFINED);
/// Fallback if `Null`.
pub const IFNONE: Coalesce = Coalesce::new("ifnone", VoidSet::NULL);
/// Fallback if `Null` or `Undefined`.
pub const IFVOID: Coalesce = Coalesce::new("ifvoid", VoidSet::VOID);

impl Coalesce {
    pub const fn new(name: &'static str, triggers: VoidSet) -> Self {
        Self {
            name,
            triggers,
            type_guard: TypeGuard::Inherit,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn triggers(&self) -> VoidSet {
        self.triggers
    }

    pub fn type_guard(&self) -> TypeGuard {
        self.type_guard
    }

    /// Always apply the type guard.
    pub const fn strict(mut self) -> Self {
        self.type_guard = TypeGuard::Strict;
        self
    }

    /// Never apply the type guard; only the trigger set matters.
    pub const fn lenient(mut self) -> Self {
        self.type_guard = TypeGuard::Lenient;
        self
    }

    fn guards_type(&self, carried: Option<SafeConfig>) -> bool {
        match self.type_guard {
            TypeGuard::Strict => true,
            TypeGuard::Lenient => false,
            TypeGuard::Inherit => carried.unwrap_or(*SafeConfig::global()).type_guard,
        }
    }

    /// Whether the extracted value of `left` is in the trigger set.
    pub fn is_triggered<E: Extract + ?Sized>(&self, left: &E) -> bool {
        self.triggers.contains(left)
    }

    /// Unwrap `left`; return it unless it is a trigger sentinel or (with the
    /// type guard on) its runtime type differs from `fallback`'s.
    pub fn or<E, T>(&self, left: &E, fallback: T) -> Value
    where
        E: Extract + ?Sized,
        T: Into<Value>,
    {
        let fallback = fallback.into();
        let result = left.extract();
        if self.triggers.contains(&result) {
            return fallback;
        }
        if self.guards_type(left.carried_config()) && !result.same_type(&fallback) {
            return fallback;
        }
        result
    }

    /// Package `fallback` for a later conditional write.
    pub fn pending(&self, fallback: impl Into<Value>) -> PendingAssignment {
        PendingAssignment::new(fallback.into(), self.triggers)
    }

    /// Write `fallback` into the chain's slot if its current content triggers.
    pub fn assign(&self, chain: &mut Chain, fallback: impl Into<Value>) -> bool {
        chain.try_assign(self.pending(fallback))
    }
}

impl fmt::Display for Coalesce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Object, NULL, UNDEFINED};
    use crate::VoidSafe;

    fn dict() -> Value {
        Value::map_from([("k", Value::Null), ("pi", Value::Float(3.14)), ("s", Value::from("set"))])
    }

    #[test]
    fn test_ifnone_on_null_item() {
        let chain = VoidSafe::new(dict()).item("k");
        assert_eq!(IFNONE.or(&chain, "fallback"), Value::from("fallback"));
    }

    #[test]
    fn test_type_guard() {
        let pi = VoidSafe::new(dict()).item("pi");
        assert_eq!(IFNONE.or(&pi, 123), Value::Int(123));
        assert_eq!(IFNONE.or(&pi, 1.0), Value::Float(3.14));
        assert_eq!(IFNONE.lenient().or(&pi, 123), Value::Float(3.14));
        assert_eq!(IFNONE.strict().or(&pi, 123), Value::Int(123));
    }

    #[test]
    fn test_type_guard_from_carried_config() {
        let config = SafeConfig::new().with_type_guard(false);
        let pi = VoidSafe::with_config(dict(), config).item("pi");
        assert_eq!(IFNONE.or(&pi, 123), Value::Float(3.14));
        assert_eq!(IFNONE.strict().or(&pi, 123), Value::Int(123));
    }

    #[test]
    fn test_object_type_guard_uses_type_name() {
        let point = Value::object(Object::new("Point"));
        let other = Value::object(Object::new("Point"));
        let line = Value::object(Object::new("Line"));
        assert_eq!(IFVOID.or(&point, other.clone()), point);
        assert_eq!(IFVOID.or(&point, line.clone()), line);
    }

    #[test]
    fn test_ifndef_only_triggers_on_undefined() {
        let safe = VoidSafe::new(dict());
        assert_eq!(IFNDEF.or(&safe.item("missing"), "d"), Value::from("d"));
        // Null is not a trigger for ifndef.
        assert_eq!(IFNDEF.lenient().or(&safe.item("k"), "d"), NULL);
        assert_eq!(IFNDEF.or(&safe.item("s"), "d"), Value::from("set"));
    }

    #[test]
    fn test_ifnone_ignores_undefined_when_lenient() {
        let missing = VoidSafe::new(dict()).item("missing");
        assert_eq!(IFNONE.lenient().or(&missing, "d"), UNDEFINED);
        assert_eq!(IFNONE.or(&missing, "d"), Value::from("d"));
    }

    #[test]
    fn test_ifvoid_treats_missing_and_null_alike() {
        let safe = VoidSafe::new(dict());
        assert_eq!(IFVOID.or(&safe.item("missing"), "d"), Value::from("d"));
        assert_eq!(IFVOID.or(&safe.item("k"), "d"), Value::from("d"));
        assert_eq!(IFVOID.lenient().or(&safe.item("k"), "d"), Value::from("d"));
    }

    #[test]
    fn test_bare_values() {
        let unsafe_str: Option<&str> = None;
        assert_eq!(IFNONE.or(&Value::from(unsafe_str), "d"), Value::from("d"));
        assert_eq!(IFVOID.or(&Value::from("ok"), "d"), Value::from("ok"));
        assert_eq!(IFVOID.or(&VoidSafe::new(NULL), "d"), Value::from("d"));
    }

    #[test]
    fn test_failed_call_chain() {
        let upper = VoidSafe::new(NULL).attr("upper").call(&[]);
        assert_eq!(IFNDEF.or(&upper, "d"), Value::from("d"));
        assert!(IFNDEF.is_triggered(&upper));
        assert!(!IFNONE.is_triggered(&upper));
    }

    #[test]
    fn test_names() {
        assert_eq!(IFNDEF.to_string(), "ifndef");
        assert_eq!(IFVOID.triggers(), VoidSet::VOID);
        assert_eq!(IFNONE.type_guard(), TypeGuard::Inherit);
    }
}
