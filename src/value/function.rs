//! Native callables.

use std::fmt;
use std::sync::Arc;

use super::Value;

/// Signature of a native callable. Any `Err` counts as a raised error.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// A named, cheaply clonable callable value.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    func: NativeFn,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke(&self, args: &[Value]) -> anyhow::Result<Value> {
        (self.func)(args)
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke() {
        let double = Function::new("double", |args: &[Value]| match args {
            [Value::Int(i)] => Ok(Value::Int(i * 2)),
            _ => anyhow::bail!("double() takes one int"),
        });
        assert_eq!(double.invoke(&[Value::Int(21)]).unwrap(), Value::Int(42));
        assert!(double.invoke(&[]).is_err());
        assert_eq!(double.name(), "double");
    }

    #[test]
    fn test_identity() {
        let f = Function::new("f", |_: &[Value]| Ok(Value::Null));
        let g = Function::new("f", |_: &[Value]| Ok(Value::Null));
        assert!(f.ptr_eq(&f.clone()));
        assert!(!f.ptr_eq(&g));
    }
}
