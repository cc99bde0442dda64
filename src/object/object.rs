use std::{
    fmt::{self, Debug, Display},
    rc::Rc,
};

use crate::ast::{expressions::join, expressions::IdentifierExpr, statements::BlockStmt};

use super::environment::Env;

/// Type tag of an `Object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    Nan,
    ReturnValue,
    Error,
    Function,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::Nan => "NAN",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
        };
        write!(f, "{name}")
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    /// Result of a numeric operation with no defined value.
    Nan,
    /// A `return` in flight, unwrapped at the nearest call boundary.
    ReturnValue(Box<Object>),
    /// Terminal; evaluation stops propagating anything else once produced.
    Error(String),
    Function(Function),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Nan => ObjectType::Nan,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
        }
    }

    /// Human readable form of the value.
    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Null => "null".to_string(),
            Object::Nan => "NAN".to_string(),
            Object::ReturnValue(value) => value.inspect(),
            Object::Error(message) => format!("ERROR: {message}"),
            Object::Function(function) => function.inspect(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Strips one `ReturnValue` wrapper; other values pass through.
    pub fn unwrap_return(self) -> Object {
        match self {
            Object::ReturnValue(value) => *value,
            other => other,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// A function value: its parameters and body as parsed, plus the environment
/// it closes over.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<IdentifierExpr>,
    pub body: BlockStmt,
    pub env: Env,
}

impl Function {
    pub fn inspect(&self) -> String {
        format!("fn({}) {{\n{}\n}}", join(&self.parameters), self.body)
    }
}

// Captured environments are compared by identity; scopes may be cyclic.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.inspect())
    }
}
