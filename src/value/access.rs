//! Raw, fallible access on values.
//!
//! These are the operations a chain step attempts. Every failure is reported
//! as an [`AccessError`]; swallowing happens one layer up in [`crate::chain`].

use crate::error::{AccessError, AccessKind, AccessResult};

use super::{builtins, Key, Value};

/// Resolve a possibly negative index against a sequence length.
pub(crate) fn normalize_index(index: i64, len: usize) -> AccessResult<usize> {
    let resolved = if index < 0 { index + len as i64 } else { index };
    if resolved < 0 || resolved >= len as i64 {
        return Err(AccessError::IndexOutOfRange { index, len });
    }
    Ok(resolved as usize)
}

fn index_of(key: &Value) -> AccessResult<i64> {
    match key {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(*b as i64),
        other => Err(AccessError::UnhashableKey(other.value_type())),
    }
}

impl Value {
    fn void_receiver(&self, op: AccessKind) -> AccessResult<()> {
        match self.void_kind() {
            Some(kind) => Err(AccessError::VoidReceiver { kind, op }),
            None => Ok(()),
        }
    }

    /// Read an attribute (`value.name`).
    pub fn get_attr(&self, name: &str) -> AccessResult<Value> {
        self.void_receiver(AccessKind::GetAttr)?;
        let found = match self {
            Value::Object(obj) => obj.read().get(name).cloned(),
            other => builtins::method(other, name).map(Value::Function),
        };
        found.ok_or_else(|| AccessError::MissingAttribute {
            type_name: self.type_name(),
            name: name.to_string(),
        })
    }

    /// Read an item (`value[key]`).
    pub fn get_item(&self, key: &Value) -> AccessResult<Value> {
        self.void_receiver(AccessKind::GetItem)?;
        match self {
            Value::Map(entries) => {
                let key = Key::try_from(key)?;
                entries
                    .read()
                    .get(&key)
                    .cloned()
                    .ok_or_else(|| AccessError::MissingKey(key.to_string()))
            }
            Value::List(items) => {
                let items = items.read();
                let idx = normalize_index(index_of(key)?, items.len())?;
                Ok(items[idx].clone())
            }
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let idx = normalize_index(index_of(key)?, chars.len())?;
                Ok(Value::Str(chars[idx].to_string()))
            }
            other => Err(AccessError::Unsupported {
                op: AccessKind::GetItem,
                value_type: other.value_type(),
            }),
        }
    }

    /// Invoke the value (`value(*args)`).
    pub fn call(&self, args: &[Value]) -> AccessResult<Value> {
        self.void_receiver(AccessKind::Call)?;
        match self {
            Value::Function(func) => func.invoke(args).map_err(|e| AccessError::Raised {
                name: func.name().to_string(),
                message: format!("{:#}", e),
            }),
            other => Err(AccessError::NotCallable(other.value_type())),
        }
    }

    /// Write an attribute (`value.name = new`).
    pub fn set_attr(&self, name: &str, new: Value) -> AccessResult<()> {
        self.void_receiver(AccessKind::SetAttr)?;
        match self {
            Value::Object(obj) => {
                let mut obj = obj.write();
                if obj.set(name, new) {
                    Ok(())
                } else {
                    Err(AccessError::Sealed {
                        type_name: obj.type_name().to_string(),
                        name: name.to_string(),
                    })
                }
            }
            other => Err(AccessError::Unsupported {
                op: AccessKind::SetAttr,
                value_type: other.value_type(),
            }),
        }
    }

    /// Write an item (`value[key] = new`).
    pub fn set_item(&self, key: &Value, new: Value) -> AccessResult<()> {
        self.void_receiver(AccessKind::SetItem)?;
        match self {
            Value::Map(entries) => {
                let key = Key::try_from(key)?;
                entries.write().insert(key, new);
                Ok(())
            }
            Value::List(items) => {
                let mut items = items.write();
                let idx = normalize_index(index_of(key)?, items.len())?;
                items[idx] = new;
                Ok(())
            }
            other => Err(AccessError::Unsupported {
                op: AccessKind::SetItem,
                value_type: other.value_type(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
