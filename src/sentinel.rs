//! The two absence sentinels and the void set.
//!
//! `Null` means "explicitly set to no value"; `Undefined` means "never
//! assigned". Together they form the void set:
//!
//! ```
//! use voidsafe::{is_void, Value, VoidSafe, VOID};
//!
//! let data = Value::map_from([("none", Value::Null), ("filled", Value::from("filled"))]);
//!
//! assert!(VOID.contains(&Value::Null));
//! assert!(!is_void(&VoidSafe::new(data.clone()).item("filled")));
//! assert!(is_void(&VoidSafe::new(data).item("undefined")));
//! ```

use std::fmt;

use crate::extract::Extract;
use crate::value::{Value, ValueType};

/// Identifies one of the two sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoidKind {
    Null,
    Undefined,
}

/// Runtime types of the two sentinels.
pub const VOID_TYPES: [ValueType; 2] = [ValueType::Null, ValueType::Undefined];

impl VoidKind {
    /// Reverse lookup of a sentinel by its runtime type.
    pub fn from_type(value_type: ValueType) -> Option<VoidKind> {
        match value_type {
            ValueType::Null => Some(VoidKind::Null),
            ValueType::Undefined => Some(VoidKind::Undefined),
            _ => None,
        }
    }

    pub fn value_type(self) -> ValueType {
        match self {
            VoidKind::Null => ValueType::Null,
            VoidKind::Undefined => ValueType::Undefined,
        }
    }

    /// The sentinel value itself.
    pub fn value(self) -> Value {
        match self {
            VoidKind::Null => Value::Null,
            VoidKind::Undefined => Value::Undefined,
        }
    }
}

impl fmt::Display for VoidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoidKind::Null => f.write_str("None"),
            VoidKind::Undefined => f.write_str("Undefined"),
        }
    }
}

impl From<VoidKind> for Value {
    fn from(kind: VoidKind) -> Self {
        kind.value()
    }
}

/// A subset of the sentinels, used as a membership predicate and as the
/// trigger set of a coalescing operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoidSet {
    null: bool,
    undefined: bool,
}

impl VoidSet {
    pub const NULL: VoidSet = VoidSet { null: true, undefined: false };
    pub const UNDEFINED: VoidSet = VoidSet { null: false, undefined: true };
    pub const VOID: VoidSet = VoidSet { null: true, undefined: true };

    pub fn contains_kind(&self, kind: VoidKind) -> bool {
        match kind {
            VoidKind::Null => self.null,
            VoidKind::Undefined => self.undefined,
        }
    }

    /// Whether the extracted value of `x` is a member of this set.
    pub fn contains<E: Extract + ?Sized>(&self, x: &E) -> bool {
        x.extract()
            .void_kind()
            .is_some_and(|kind| self.contains_kind(kind))
    }

    pub fn kinds(&self) -> impl Iterator<Item = VoidKind> + '_ {
        [VoidKind::Null, VoidKind::Undefined]
            .into_iter()
            .filter(move |k| self.contains_kind(*k))
    }
}

impl fmt::Display for VoidSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.null, self.undefined) {
            (true, true) => f.write_str("Void"),
            (true, false) => f.write_str("{None}"),
            (false, true) => f.write_str("{Undefined}"),
            (false, false) => f.write_str("{}"),
        }
    }
}

/// Both sentinels.
pub const VOID: VoidSet = VoidSet::VOID;

/// Whether `x` unwraps to `Null` or `Undefined`.
pub fn is_void<E: Extract + ?Sized>(x: &E) -> bool {
    VOID.contains(x)
}
