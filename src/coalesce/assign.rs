//! Coalescing assignment: write a default only into a void slot.

use crate::chain::Chain;
use crate::extract::Extract;
use crate::sentinel::VoidSet;
use crate::value::Value;

/// A value waiting to be written into a slot, but only if the slot's current
/// content is in `triggers`.
///
/// ```
/// use voidsafe::{Value, VoidSafe, IFNDEF};
///
/// let dict = Value::map();
///
/// VoidSafe::new(dict.clone()).item("unsafe_def").try_assign(IFNDEF.pending("assignment #1"));
/// VoidSafe::new(dict.clone()).item("unsafe_def").try_assign(IFNDEF.pending("assignment #2"));
///
/// assert_eq!(dict, Value::map_from([("unsafe_def", "assignment #1")]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAssignment {
    value: Value,
    triggers: VoidSet,
}

impl PendingAssignment {
    pub fn new(value: Value, triggers: VoidSet) -> Self {
        Self { value, triggers }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn triggers(&self) -> VoidSet {
        self.triggers
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Whether a slot currently holding `current` would be written.
    pub fn applies_to<E: Extract + ?Sized>(&self, current: &E) -> bool {
        self.triggers.contains(current)
    }
}

impl Chain {
    /// Write the pending value into the addressed slot if the slot's current
    /// content is one of the pending triggers. Returns whether it was written.
    pub fn try_assign(&mut self, pending: PendingAssignment) -> bool {
        if !pending.applies_to(self.current()) {
            if self.config().trace_steps {
                log::trace!(
                    "assign {}: kept {} (not in {})",
                    self.accessor(),
                    self.current(),
                    pending.triggers
                );
            }
            return false;
        }
        self.write_back(pending.into_value())
    }
}
