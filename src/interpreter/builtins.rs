use crate::interpreter::value::{BuiltinFunction, Value, NULL};
use std::rc::Rc;

/// The built-in function roster. Consulted after an environment lookup
/// misses, so user bindings shadow builtins without destroying them.
pub fn all_builtins() -> Vec<(&'static str, Value)> {
    vec![
        ("len", builtin("len", Some(1), builtin_len)),
        ("first", builtin("first", Some(1), builtin_first)),
        ("last", builtin("last", Some(1), builtin_last)),
        ("rest", builtin("rest", Some(1), builtin_rest)),
        ("push", builtin("push", Some(2), builtin_push)),
        ("print", builtin("print", None, builtin_print)),
    ]
}

fn builtin(
    name: &str,
    arity: Option<usize>,
    func: fn(&[Value]) -> Result<Value, String>,
) -> Value {
    Value::Builtin(Rc::new(BuiltinFunction {
        name: Rc::from(name),
        arity,
        func,
    }))
}

fn builtin_len(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.len() as i64)),
        Value::Array(elements) => Ok(Value::Integer(elements.len() as i64)),
        other => Err(format!(
            "Argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn builtin_first(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(NULL)),
        other => Err(format!(
            "Argument to `first` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_last(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(NULL)),
        other => Err(format!(
            "Argument to `last` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_rest(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(NULL)
            } else {
                Ok(Value::Array(Rc::new(elements[1..].to_vec())))
            }
        }
        other => Err(format!(
            "Argument to `rest` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_push(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Array(elements) => {
            // values are immutable once produced; push builds a fresh array
            let mut appended = elements.as_ref().clone();
            appended.push(args[1].clone());
            Ok(Value::Array(Rc::new(appended)))
        }
        other => Err(format!(
            "Argument to `push` must be ARRAY, got {}",
            other.type_name()
        )),
    }
}

fn builtin_print(args: &[Value]) -> Result<Value, String> {
    for arg in args {
        println!("{}", arg);
    }
    Ok(NULL)
}
