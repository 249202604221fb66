use crate::interpreter::environment::Environment;
use crate::parser::ast::BlockStatement;
use std::fmt;
use std::rc::Rc;

// Canonical singletons. Every boolean or null the evaluator produces is one
// of these three, so identity and equality coincide for them.
pub const TRUE: Value = Value::Boolean(true);
pub const FALSE: Value = Value::Boolean(false);
pub const NULL: Value = Value::Null;

#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    Null,
    Array(Rc<Vec<Value>>),
    Function(Rc<Function>),
    Builtin(Rc<BuiltinFunction>),
    /// Internal wrapper carrying a `return` payload out of nested blocks to
    /// the enclosing call boundary. Never escapes a program evaluation.
    Return(Box<Value>),
}

pub struct Function {
    pub parameters: Rc<Vec<String>>,
    pub body: Rc<BlockStatement>,
    pub env: Rc<Environment>,
}

// The captured environment may reach back to this very function through the
// global scope, so Debug stops at the AST.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct BuiltinFunction {
    pub name: Rc<str>,
    pub arity: Option<usize>,
    pub func: fn(&[Value]) -> Result<Value, String>,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Return(_) => "RETURN",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            // reference types compare by identity
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Str(value) => write!(f, "{}", value),
            Value::Null => write!(f, "null"),
            Value::Array(elements) => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Value::Function(function) => {
                write!(
                    f,
                    "fn({}) {{\n{}\n}}",
                    function.parameters.join(", "),
                    function.body
                )
            }
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::Return(value) => write!(f, "{}", value),
        }
    }
}
