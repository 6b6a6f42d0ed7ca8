//! Shared handles and the reference-count primitives.
//!
//! Containers hold their items by `Rc`: storing a value clones the handle
//! and removing it drops the handle. Scalars are copied and carry no count.

use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

pub type Shared<T> = Rc<RefCell<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Take one more reference to `value`.
pub fn increment_ref(value: &Value) -> Value {
    value.clone()
}

/// Give up a reference taken with [`increment_ref`].
pub fn decrement_ref(value: Value) {
    drop(value);
}

/// Live references to a reference-typed value, `None` for plain scalars.
pub fn get_refcount(value: &Value) -> Option<usize> {
    match value {
        Value::Str(s) => Some(Rc::strong_count(s)),
        Value::Array(a) => Some(a.refcount()),
        Value::List(l) => Some(l.refcount()),
        Value::Dict(d) => Some(d.refcount()),
        _ => None,
    }
}
