use crate::array::ArrayRef;
use crate::dict::DictRef;
use crate::list_ref::ListRef;
use ecow::EcoString;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use typed_list::{Element, Type};

/// A dynamically typed host value.
///
/// Strings and the three container kinds are reference types: cloning a
/// `Value` takes a new reference to the same object. Everything else is
/// copied.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Array(ArrayRef),
    List(ListRef),
    Dict(DictRef),
    /// A type descriptor used as a value, e.g. the argument of `empty_list`
    Type(Type),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&DictRef> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Name of the value's type for messages.
    pub fn type_name(&self) -> EcoString {
        match self {
            Value::Nil => "none".into(),
            Value::Type(_) => "type".into(),
            Value::List(l) => l.type_name(),
            other => other
                .element_type()
                .map(|ty| ty.name())
                .unwrap_or_else(|| "undefined".into()),
        }
    }

    /// Whether two values are the very same object.
    pub fn is(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Dict(a), Value::Dict(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Element for Value {
    fn element_type(&self) -> Option<Type> {
        match self {
            Value::Nil | Value::Type(_) => None,
            Value::Bool(_) => Some(Type::Bool),
            Value::Int(_) => Some(Type::Int64),
            Value::Float(_) => Some(Type::Float64),
            Value::Str(_) => Some(Type::Unicode),
            Value::Array(a) => Some(a.ty()),
            Value::List(l) => l.item_type().map(Type::list),
            Value::Dict(d) => Some(d.ty()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            (Value::List(a), Value::List(b)) => a.partial_cmp(b),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::Array(a) => write!(f, "{}", a),
            Value::List(l) => write!(f, "{}", l),
            Value::Dict(d) => write!(f, "{}", d),
            Value::Type(t) => write!(f, "{}", t),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(Rc::from(s))
    }
}

impl From<ArrayRef> for Value {
    fn from(a: ArrayRef) -> Value {
        Value::Array(a)
    }
}

impl From<ListRef> for Value {
    fn from(l: ListRef) -> Value {
        Value::List(l)
    }
}

impl From<DictRef> for Value {
    fn from(d: DictRef) -> Value {
        Value::Dict(d)
    }
}

impl From<Type> for Value {
    fn from(t: Type) -> Value {
        Value::Type(t)
    }
}
