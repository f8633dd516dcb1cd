//! Bound methods available as attributes of built-in values.
//!
//! `Value::from("abc").get_attr("upper")` yields a [`Function`] bound to the
//! receiver; calling it with no arguments returns `"ABC"`.

use anyhow::{anyhow, bail};

use super::{Function, Key, Value};

/// Look up a bound method `name` on `receiver`.
pub fn method(receiver: &Value, name: &str) -> Option<Function> {
    match receiver {
        Value::Str(s) => str_method(s.clone(), name),
        Value::Map(_) => map_method(receiver.clone(), name),
        Value::List(_) => list_method(receiver.clone(), name),
        _ => None,
    }
}

fn no_args(name: &str, args: &[Value]) -> anyhow::Result<()> {
    if !args.is_empty() {
        bail!("{}() takes no arguments ({} given)", name, args.len());
    }
    Ok(())
}

fn str_method(s: String, name: &str) -> Option<Function> {
    let f = match name {
        "upper" => Function::new("upper", move |args: &[Value]| {
            no_args("upper", args)?;
            Ok(Value::Str(s.to_uppercase()))
        }),
        "lower" => Function::new("lower", move |args: &[Value]| {
            no_args("lower", args)?;
            Ok(Value::Str(s.to_lowercase()))
        }),
        "strip" => Function::new("strip", move |args: &[Value]| {
            no_args("strip", args)?;
            Ok(Value::Str(s.trim().to_string()))
        }),
        "split" => Function::new("split", move |args: &[Value]| {
            let parts: Vec<Value> = match args {
                [] => s.split_whitespace().map(Value::from).collect(),
                [Value::Str(sep)] if !sep.is_empty() => {
                    s.split(sep.as_str()).map(Value::from).collect()
                }
                [Value::Str(_)] => bail!("empty separator"),
                _ => bail!("split() takes an optional str separator"),
            };
            Ok(Value::from(parts))
        }),
        _ => return None,
    };
    Some(f)
}

fn map_method(map: Value, name: &str) -> Option<Function> {
    let Value::Map(entries) = map else {
        return None;
    };
    let f = match name {
        "get" => Function::new("get", move |args: &[Value]| {
            let (key, default) = match args {
                [key] => (key, Value::Null),
                [key, default] => (key, default.clone()),
                _ => bail!("get() takes 1 or 2 arguments ({} given)", args.len()),
            };
            let key = Key::try_from(key)?;
            Ok(entries.read().get(&key).cloned().unwrap_or(default))
        }),
        "keys" => Function::new("keys", move |args: &[Value]| {
            no_args("keys", args)?;
            let keys: Vec<Value> = entries.read().keys().cloned().map(Value::from).collect();
            Ok(Value::from(keys))
        }),
        "values" => Function::new("values", move |args: &[Value]| {
            no_args("values", args)?;
            let values: Vec<Value> = entries.read().values().cloned().collect();
            Ok(Value::from(values))
        }),
        _ => return None,
    };
    Some(f)
}

fn list_method(list: Value, name: &str) -> Option<Function> {
    let Value::List(items) = list else {
        return None;
    };
    let f = match name {
        "count" => Function::new("count", move |args: &[Value]| {
            let [needle] = args else {
                bail!("count() takes exactly one argument ({} given)", args.len());
            };
            let n = items.read().iter().filter(|v| *v == needle).count();
            Ok(Value::from(n))
        }),
        "index" => Function::new("index", move |args: &[Value]| {
            let [needle] = args else {
                bail!("index() takes exactly one argument ({} given)", args.len());
            };
            items
                .read()
                .iter()
                .position(|v| v == needle)
                .map(Value::from)
                .ok_or_else(|| anyhow!("{} is not in list", needle))
        }),
        _ => return None,
    };
    Some(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(receiver: &Value, name: &str, args: &[Value]) -> anyhow::Result<Value> {
        method(receiver, name)
            .ok_or_else(|| anyhow!("no method {}", name))?
            .invoke(args)
    }

    #[test]
    fn test_str_methods() {
        let s = Value::from("  Content ");
        assert_eq!(call(&s, "upper", &[]).unwrap(), Value::from("  CONTENT "));
        assert_eq!(call(&s, "strip", &[]).unwrap(), Value::from("Content"));
        assert_eq!(
            call(&Value::from("a,b"), "split", &[Value::from(",")]).unwrap(),
            Value::list(["a", "b"])
        );
        assert!(call(&s, "upper", &[Value::Int(1)]).is_err());
        assert!(method(&s, "nope").is_none());
    }

    #[test]
    fn test_map_methods() {
        let m = Value::map_from([("a", 1)]);
        assert_eq!(call(&m, "get", &[Value::from("a")]).unwrap(), Value::Int(1));
        assert_eq!(call(&m, "get", &[Value::from("b")]).unwrap(), Value::Null);
        assert_eq!(
            call(&m, "get", &[Value::from("b"), Value::Int(0)]).unwrap(),
            Value::Int(0)
        );
        assert_eq!(call(&m, "keys", &[]).unwrap(), Value::list(["a"]));
    }

    #[test]
    fn test_list_methods() {
        let l = Value::list([1, 2, 1]);
        assert_eq!(call(&l, "count", &[Value::Int(1)]).unwrap(), Value::Int(2));
        assert_eq!(call(&l, "index", &[Value::Int(2)]).unwrap(), Value::Int(1));
        assert!(call(&l, "index", &[Value::Int(9)]).is_err());
    }

    #[test]
    fn test_scalars_have_no_methods() {
        assert!(method(&Value::Int(1), "upper").is_none());
        assert!(method(&Value::Null, "upper").is_none());
    }
}
