pub mod builtins;
pub mod environment;
pub mod value;

use crate::config::RuntimeConfig;
use crate::interpreter::environment::Environment;
use crate::interpreter::value::{Function, Value, FALSE, NULL, TRUE};
use crate::lexer::token::TokenKind;
use crate::parser::ast::{BlockStatement, Expression, Program, Statement};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    fn new(message: impl Into<String>) -> Self {
        RuntimeError {
            message: message.into(),
        }
    }
}

/// The tree-walking evaluator. Owns the global environment, which persists
/// across `interpret` calls so successive REPL lines share bindings.
pub struct Interpreter {
    globals: Rc<Environment>,
    builtins: HashMap<&'static str, Value>,
    config: RuntimeConfig,
    depth: usize,
}

impl Interpreter {
    pub fn new(config: RuntimeConfig) -> Self {
        Interpreter {
            globals: Environment::new(),
            builtins: builtins::all_builtins().into_iter().collect(),
            config,
            depth: 0,
        }
    }

    /// Evaluate a program against the persistent global environment.
    /// `Ok(None)` means the program produced nothing visible, e.g. it ends
    /// in a `let` statement.
    pub fn interpret(&mut self, program: &Program) -> Result<Option<Value>, RuntimeError> {
        let env = Rc::clone(&self.globals);
        let mut result = None;
        for statement in &program.statements {
            match self.eval_statement(statement, &env)? {
                // a return at the top level ends the program with its payload
                Some(Value::Return(value)) => return Ok(Some(*value)),
                other => result = other,
            }
        }
        Ok(result)
    }

    // ── statements ──────────────────────────────────────────────────────

    fn eval_statement(
        &mut self,
        statement: &Statement,
        env: &Rc<Environment>,
    ) -> Result<Option<Value>, RuntimeError> {
        match statement {
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env)?;
                env.set(name.clone(), value);
                Ok(None)
            }
            Statement::Return(value) => {
                let value = self.eval_expression(value, env)?;
                Ok(Some(Value::Return(Box::new(value))))
            }
            Statement::Expression(expr) => Ok(Some(self.eval_expression(expr, env)?)),
        }
    }

    /// Unlike program evaluation, a `Return` wrapper passes through a block
    /// untouched so the enclosing call boundary can unwrap it.
    fn eval_block(
        &mut self,
        block: &BlockStatement,
        env: &Rc<Environment>,
    ) -> Result<Option<Value>, RuntimeError> {
        let mut result = None;
        for statement in &block.statements {
            result = self.eval_statement(statement, env)?;
            if matches!(result, Some(Value::Return(_))) {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_block_value(
        &mut self,
        block: &BlockStatement,
        env: &Rc<Environment>,
    ) -> Result<Value, RuntimeError> {
        Ok(self.eval_block(block, env)?.unwrap_or(NULL))
    }

    // ── expressions ─────────────────────────────────────────────────────

    fn eval_expression(
        &mut self,
        expression: &Expression,
        env: &Rc<Environment>,
    ) -> Result<Value, RuntimeError> {
        match expression {
            Expression::IntegerLiteral(value) => Ok(Value::Integer(*value)),
            Expression::StringLiteral(value) => Ok(Value::Str(Rc::from(value.as_str()))),
            Expression::BooleanLiteral(value) => Ok(bool_to_value(*value)),
            Expression::Identifier(name) => self.eval_identifier(name, env),

            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right, env)?;
                eval_prefix(*operator, right)
            }
            Expression::Infix {
                operator,
                left,
                right,
            } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                eval_infix(*operator, left, right)
            }

            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expression(condition, env)?;
                if is_truthy(&condition) {
                    self.eval_block_value(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block_value(alternative, env)
                } else {
                    Ok(NULL)
                }
            }

            Expression::FunctionLiteral { parameters, body } => {
                Ok(Value::Function(Rc::new(Function {
                    parameters: Rc::clone(parameters),
                    body: Rc::clone(body),
                    env: Rc::clone(env),
                })))
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let callee = self.eval_expression(function, env)?;
                let args = self.eval_expressions(arguments, env)?;
                self.apply_function(callee, args)
            }

            Expression::ArrayLiteral(elements) => {
                let elements = self.eval_expressions(elements, env)?;
                Ok(Value::Array(Rc::new(elements)))
            }
            Expression::Index { left, index } => {
                let left = self.eval_expression(left, env)?;
                let index = self.eval_expression(index, env)?;
                eval_index(left, index)
            }
        }
    }

    fn eval_identifier(
        &mut self,
        name: &str,
        env: &Rc<Environment>,
    ) -> Result<Value, RuntimeError> {
        if let Some(value) = env.get(name) {
            return Ok(value);
        }
        if let Some(builtin) = self.builtins.get(name) {
            return Ok(builtin.clone());
        }
        Err(RuntimeError::new(format!("Identifier not found: {}", name)))
    }

    fn eval_expressions(
        &mut self,
        expressions: &[Expression],
        env: &Rc<Environment>,
    ) -> Result<Vec<Value>, RuntimeError> {
        expressions
            .iter()
            .map(|expr| self.eval_expression(expr, env))
            .collect()
    }

    fn apply_function(
        &mut self,
        callee: Value,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Function(function) => {
                if args.len() != function.parameters.len() {
                    return Err(RuntimeError::new(format!(
                        "wrong number of arguments: want {}, got {}",
                        function.parameters.len(),
                        args.len()
                    )));
                }
                if self.depth >= self.config.max_call_depth {
                    return Err(RuntimeError::new(format!(
                        "Maximum call depth {} exceeded",
                        self.config.max_call_depth
                    )));
                }

                // lexical scoping: the call scope encloses the environment
                // the function captured, not the caller's
                let env = Environment::new_enclosed(Rc::clone(&function.env));
                for (parameter, arg) in function.parameters.iter().zip(args) {
                    env.set(parameter.clone(), arg);
                }

                self.depth += 1;
                let result = self.eval_block(&function.body, &env);
                self.depth -= 1;

                match result? {
                    Some(Value::Return(value)) => Ok(*value),
                    Some(value) => Ok(value),
                    None => Ok(NULL),
                }
            }
            Value::Builtin(builtin) => {
                if let Some(want) = builtin.arity {
                    if args.len() != want {
                        return Err(RuntimeError::new(format!(
                            "Wrong number of arguments. got={}, want={}",
                            args.len(),
                            want
                        )));
                    }
                }
                (builtin.func)(&args).map_err(|message| RuntimeError { message })
            }
            other => Err(RuntimeError::new(format!(
                "Not a function: {}",
                other.type_name()
            ))),
        }
    }
}

// Only `false` and `null` are falsy; everything else, `0` and empty strings
// and arrays included, is truthy.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Boolean(false) | Value::Null)
}

fn bool_to_value(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}

fn eval_prefix(operator: TokenKind, right: Value) -> Result<Value, RuntimeError> {
    match operator {
        TokenKind::Bang => Ok(bool_to_value(!is_truthy(&right))),
        TokenKind::Minus => match right {
            Value::Integer(value) => Ok(Value::Integer(value.wrapping_neg())),
            other => Err(RuntimeError::new(format!(
                "Unsupported negative operand: {}",
                other.type_name()
            ))),
        },
        other => Err(RuntimeError::new(format!(
            "Unknown prefix operator: {}{}",
            other,
            right.type_name()
        ))),
    }
}

fn eval_infix(operator: TokenKind, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(operator, l, r),
        _ if left.type_name() != right.type_name() => Err(RuntimeError::new(format!(
            "Operand type mismatch: {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        ))),
        _ => match operator {
            // same-type operands compare by canonical identity
            TokenKind::Equal => Ok(bool_to_value(left == right)),
            TokenKind::NotEqual => Ok(bool_to_value(left != right)),
            _ => Err(RuntimeError::new(format!(
                "Unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            ))),
        },
    }
}

fn eval_integer_infix(operator: TokenKind, left: i64, right: i64) -> Result<Value, RuntimeError> {
    match operator {
        TokenKind::Plus => Ok(Value::Integer(left.wrapping_add(right))),
        TokenKind::Minus => Ok(Value::Integer(left.wrapping_sub(right))),
        TokenKind::Star => Ok(Value::Integer(left.wrapping_mul(right))),
        TokenKind::Slash => {
            if right == 0 {
                Err(RuntimeError::new("Division by zero"))
            } else {
                Ok(Value::Integer(left.wrapping_div(right)))
            }
        }
        TokenKind::Percent => {
            if right == 0 {
                Err(RuntimeError::new("Division by zero"))
            } else {
                Ok(Value::Integer(left.wrapping_rem(right)))
            }
        }
        TokenKind::Equal => Ok(bool_to_value(left == right)),
        TokenKind::NotEqual => Ok(bool_to_value(left != right)),
        TokenKind::Less => Ok(bool_to_value(left < right)),
        TokenKind::Greater => Ok(bool_to_value(left > right)),
        TokenKind::LessEqual => Ok(bool_to_value(left <= right)),
        TokenKind::GreaterEqual => Ok(bool_to_value(left >= right)),
        _ => Err(RuntimeError::new(format!(
            "Unknown operator: INTEGER {} INTEGER",
            operator
        ))),
    }
}

fn eval_string_infix(operator: TokenKind, left: &str, right: &str) -> Result<Value, RuntimeError> {
    match operator {
        TokenKind::Plus => Ok(Value::Str(Rc::from(format!("{}{}", left, right)))),
        TokenKind::Equal => Ok(bool_to_value(left == right)),
        TokenKind::NotEqual => Ok(bool_to_value(left != right)),
        _ => Err(RuntimeError::new(format!(
            "Unknown string operator: STRING {} STRING",
            operator
        ))),
    }
}

fn eval_index(left: Value, index: Value) -> Result<Value, RuntimeError> {
    match (&left, &index) {
        (Value::Array(elements), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Err(RuntimeError::new(format!(
                    "Index {} out of bounds for array length {}",
                    i,
                    elements.len()
                )))
            } else {
                Ok(elements[*i as usize].clone())
            }
        }
        _ => Err(RuntimeError::new(format!(
            "Index operator not supported: {}",
            left.type_name()
        ))),
    }
}
