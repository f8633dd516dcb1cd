//! Unwrapping navigated results back to plain values.

use crate::chain::{Chain, VoidSafe};
use crate::config::SafeConfig;
use crate::value::Value;

/// Anything that can be unwrapped to a plain [`Value`].
///
/// A root wrapper unwraps to its root, a chain to its current result, and a
/// plain value to itself, so extraction is idempotent.
pub trait Extract {
    fn extract(&self) -> Value;

    /// Configuration carried by the wrapper, if any.
    fn carried_config(&self) -> Option<SafeConfig> {
        None
    }
}

impl Extract for Value {
    fn extract(&self) -> Value {
        self.clone()
    }
}

impl Extract for VoidSafe {
    fn extract(&self) -> Value {
        self.root().clone()
    }

    fn carried_config(&self) -> Option<SafeConfig> {
        Some(*self.config())
    }
}

impl Extract for Chain {
    fn extract(&self) -> Value {
        self.current().clone()
    }

    fn carried_config(&self) -> Option<SafeConfig> {
        Some(*self.config())
    }
}

impl<T: Extract + ?Sized> Extract for &T {
    fn extract(&self) -> Value {
        (**self).extract()
    }

    fn carried_config(&self) -> Option<SafeConfig> {
        (**self).carried_config()
    }
}

/// Extract the plain value of `x`.
///
/// ```
/// use voidsafe::{value, Value, VoidSafe};
///
/// let word = Value::from("content");
/// assert_eq!(value(&VoidSafe::new(word).attr("upper").call(&[])), Value::from("CONTENT"));
///
/// assert_eq!(value(&VoidSafe::new(Value::Null).attr("upper").call(&[])), Value::Undefined);
/// ```
pub fn value<E: Extract + ?Sized>(x: &E) -> Value {
    x.extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{NULL, UNDEFINED};

    #[test]
    fn test_extract_each_form() {
        let root = Value::map_from([("a", 1)]);
        assert_eq!(value(&root), root);
        assert_eq!(value(&VoidSafe::new(root.clone())), root);
        assert_eq!(value(&VoidSafe::new(root.clone()).item("a")), Value::Int(1));
        assert_eq!(value(&VoidSafe::new(root).item("b")), UNDEFINED);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let root = Value::map_from([("a", Value::Null)]);
        let samples: Vec<Box<dyn Extract>> = vec![
            Box::new(Value::Int(3)),
            Box::new(NULL),
            Box::new(UNDEFINED),
            Box::new(VoidSafe::new(root.clone())),
            Box::new(VoidSafe::new(root.clone()).item("a")),
            Box::new(VoidSafe::new(root).item("a").attr("b")),
        ];
        for x in &samples {
            let once = value(x.as_ref());
            assert_eq!(value(&value(&once)), once);
            assert_eq!(value(&once), value(x.as_ref()));
        }
    }
}
