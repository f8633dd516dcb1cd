//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! JSON `null` maps to the null sentinel. A key absent from a JSON object
//! reads as `Undefined` through a chain, and map entries holding `Undefined`
//! are dropped when converting back.

use serde_json::{Map, Number};

use crate::error::ConvertError;

use super::{addr, Key, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::from(items.into_iter().map(Value::from).collect::<Vec<_>>())
            }
            serde_json::Value::Object(fields) => {
                Value::map_from(fields.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

impl Value {
    /// Parse JSON text into a value tree.
    pub fn parse_json(text: &str) -> Result<Value, ConvertError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Value::from(json))
    }

    /// Convert back to JSON.
    ///
    /// Fails on a top-level `Undefined`, on non-finite floats, and on objects
    /// and functions, none of which JSON can carry. Also fails on a container
    /// that holds itself, and on a map where an integer key and a string key
    /// (`1` and `"1"`) would become the same field name.
    pub fn to_json(&self) -> Result<serde_json::Value, ConvertError> {
        self.to_json_nested(&mut Vec::new())
    }

    fn to_json_nested(&self, open: &mut Vec<usize>) -> Result<serde_json::Value, ConvertError> {
        let json = match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(x) => Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .ok_or(ConvertError::Unrepresentable(self.value_type()))?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                enter(open, addr(items), self)?;
                let array = items
                    .read()
                    .iter()
                    .map(|item| item.to_json_nested(open))
                    .collect::<Result<_, _>>()?;
                open.pop();
                serde_json::Value::Array(array)
            }
            Value::Map(entries) => {
                enter(open, addr(entries), self)?;
                let mut fields = Map::new();
                for (key, value) in entries.read().iter() {
                    if value.is_undefined() {
                        continue;
                    }
                    let name = match key {
                        Key::Str(s) => s.clone(),
                        Key::Int(i) => i.to_string(),
                    };
                    if fields.contains_key(&name) {
                        return Err(ConvertError::DuplicateKey(name));
                    }
                    fields.insert(name, value.to_json_nested(open)?);
                }
                open.pop();
                serde_json::Value::Object(fields)
            }
            Value::Undefined | Value::Object(_) | Value::Function(_) => {
                return Err(ConvertError::Unrepresentable(self.value_type()))
            }
        };
        Ok(json)
    }
}

fn enter(open: &mut Vec<usize>, at: usize, container: &Value) -> Result<(), ConvertError> {
    if open.contains(&at) {
        return Err(ConvertError::Cycle(container.value_type()));
    }
    open.push(at);
    Ok(())
}
