//! # VoidSafe
//!
//! Void-safe navigation over dynamic values.
//!
//! Chains of attribute reads, item reads and calls never fail part-way: a
//! step that cannot be performed yields [`Value::Undefined`], distinct from an
//! explicit [`Value::Null`]. Coalescing operators ([`IFNDEF`], [`IFNONE`],
//! [`IFVOID`]) turn those sentinels into defaults, and coalescing assignment
//! writes a default into a slot only while that slot is void.
//!
//! ```
//! use voidsafe::{value, Value, VoidSafe, IFVOID};
//!
//! let response = Value::parse_json(r#"{"fact": null, "length": 0}"#).unwrap();
//! let safe = VoidSafe::new(response);
//!
//! // `fact` is null, so `.upper()` cannot be called.
//! let fact = safe.item("fact").attr("upper").call(&[]);
//! assert_eq!(value(&fact), Value::Undefined);
//! assert_eq!(IFVOID.or(&fact, "NO FACT TODAY"), Value::from("NO FACT TODAY"));
//!
//! // Define a slot that was never assigned; a second attempt keeps the first value.
//! safe.item("source").try_assign(IFVOID.pending("catfact"));
//! safe.item("source").try_assign(IFVOID.pending("other"));
//! assert_eq!(value(&safe.item("source")), Value::from("catfact"));
//! ```

pub mod chain;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod extract;
pub mod sentinel;
pub mod value;

pub use chain::{Accessor, Bond, Chain, VoidSafe};
pub use coalesce::{Coalesce, PendingAssignment, TypeGuard, IFNDEF, IFNONE, IFVOID};
pub use config::SafeConfig;
pub use error::{AccessError, AccessKind, AccessResult, ConvertError};
pub use extract::{value, Extract};
pub use sentinel::{is_void, VoidKind, VoidSet, VOID, VOID_TYPES};
pub use value::{Function, Key, Object, Value, ValueType, NULL, UNDEFINED};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_membership_only_for_sentinels() {
        assert!(is_void(&NULL));
        assert!(is_void(&UNDEFINED));
        for v in [Value::Int(0), Value::from(""), Value::Bool(false), Value::map()] {
            assert!(!is_void(&v));
        }
    }

    #[test]
    fn missing_second_step_yields_undefined() {
        let r = Value::object(Object::new("R").with_attr("a", Object::new("A")));
        let chain = VoidSafe::new(r).attr("a").attr("b");
        assert_eq!(value(&chain), UNDEFINED);
    }

    #[test]
    fn null_root_attribute_yields_undefined() {
        assert_eq!(value(&VoidSafe::new(NULL).attr("anything")), UNDEFINED);
    }

    #[test]
    fn double_ifndef_assignment_keeps_first() {
        let s = Value::object(Object::new("Slot"));
        let safe = VoidSafe::new(s.clone());
        assert!(IFNDEF.assign(&mut safe.attr("s"), "X"));
        assert!(!IFNDEF.assign(&mut safe.attr("s"), "Y"));
        assert_eq!(s.get_attr("s").unwrap(), Value::from("X"));
    }

    #[test]
    fn ifnone_coalesce_read_with_type_guard() {
        let m = Value::map_from([("k", Value::Null)]);
        assert_eq!(IFNONE.or(&VoidSafe::new(m).item("k"), "fallback"), Value::from("fallback"));

        let m = Value::map_from([("k", 3.14)]);
        assert_eq!(IFNONE.or(&VoidSafe::new(m.clone()).item("k"), 123), Value::Int(123));
        assert_eq!(IFNONE.or(&VoidSafe::new(m).item("k"), 1.0), Value::Float(3.14));
    }

    #[test]
    fn ifvoid_missing_and_null_are_equivalent() {
        let m = Value::map_from([("null", Value::Null)]);
        let safe = VoidSafe::new(m);
        assert_eq!(IFVOID.or(&safe.item("missing"), "fb"), Value::from("fb"));
        assert_eq!(IFVOID.or(&safe.item("null"), "fb"), Value::from("fb"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let chain = VoidSafe::new(Value::map()).item("x");
        assert_eq!(value(&value(&chain)), value(&chain));
        let root = VoidSafe::new(Value::Int(5));
        assert_eq!(value(&value(&root)), value(&root));
    }

    #[test]
    fn empty_mapping_end_to_end() {
        let root = Value::map();
        let safe = VoidSafe::new(root.clone());

        assert_eq!(value(&safe.item("missing")), UNDEFINED);
        assert_eq!(IFVOID.or(&safe.item("missing"), "default"), Value::from("default"));

        assert!(IFVOID.assign(&mut safe.item("missing"), "default"));
        assert_eq!(root.get_item(&Value::from("missing")).unwrap(), Value::from("default"));

        assert!(!IFVOID.assign(&mut safe.item("missing"), "default"));
        assert_eq!(root.get_item(&Value::from("missing")).unwrap(), Value::from("default"));
        assert_eq!(root, Value::map_from([("missing", "default")]));
    }

    #[test]
    fn json_response_round_trip() {
        let response = Value::parse_json(r#"{"fact": "cats purr", "length": 9}"#).unwrap();
        let safe = VoidSafe::new(response.clone());
        let upper = safe.item("fact").attr("upper").call(&[]);
        assert_eq!(IFVOID.or(&upper, ""), Value::from("CATS PURR"));

        safe.item("fact").write_back(upper.into_value());
        assert_eq!(
            response.to_json().unwrap(),
            serde_json::json!({"fact": "CATS PURR", "length": 9})
        );
    }
}
