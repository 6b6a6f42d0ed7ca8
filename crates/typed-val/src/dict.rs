//! Typed mapping, the companion container of the list.
//!
//! Only what lists need from it: a fixed key and value type checked on every
//! store, insertion-ordered entries and shared-handle semantics. Lists may be
//! values but never keys.

use crate::shared::{shared, Shared};
use crate::value::Value;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use typed_list::{is_valid_item_type, Element, ListResult, RuntimeError, Type, TypeError, MAX_TYPE_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Bool(bool),
    Int(i64),
    /// Bit pattern of the float, with `-0.0` folded onto `0.0`
    Float(u64),
    Str(Rc<str>),
}

impl ValueKey {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(ValueKey::Bool(*b)),
            Value::Int(i) => Some(ValueKey::Int(*i)),
            Value::Float(x) => {
                let x = if *x == 0.0 { 0.0 } else { *x };
                Some(ValueKey::Float(x.to_bits()))
            }
            Value::Str(s) => Some(ValueKey::Str(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ValueKey::Bool(b) => Value::Bool(*b),
            ValueKey::Int(i) => Value::Int(*i),
            ValueKey::Float(bits) => Value::Float(f64::from_bits(*bits)),
            ValueKey::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl Display for ValueKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

#[derive(Debug)]
pub struct Dict {
    key_type: Type,
    value_type: Type,
    values: IndexMap<ValueKey, Value>,
}

/// Shared handle to a [`Dict`].
#[derive(Clone)]
pub struct DictRef {
    inner: Shared<Dict>,
}

fn check_type(expected: &Type, value: &Value) -> ListResult<()> {
    let found = value
        .element_type()
        .ok_or_else(|| TypeError::UnresolvedItemType {
            value: value.to_string(),
        })?;
    if found != *expected {
        return Err(TypeError::ItemTypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
        .into());
    }
    Ok(())
}

impl DictRef {
    /// Empty mapping from `key_type` to `value_type`.
    pub fn new(key_type: Type, value_type: Type) -> ListResult<Self> {
        if !key_type.is_hashable() {
            return Err(TypeError::UnhashableKey {
                ty: key_type.to_string(),
            }
            .into());
        }
        let ty = Type::dict(key_type.clone(), value_type.clone());
        if !is_valid_item_type(&ty, MAX_TYPE_DEPTH) {
            return Err(TypeError::InvalidItemType {
                found: ty.to_string(),
                max_depth: MAX_TYPE_DEPTH,
            }
            .into());
        }
        Ok(Self {
            inner: shared(Dict {
                key_type,
                value_type,
                values: IndexMap::new(),
            }),
        })
    }

    pub fn ty(&self) -> Type {
        let dict = self.inner.borrow();
        Type::dict(dict.key_type.clone(), dict.value_type.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(&self, key: &Value) -> ListResult<ValueKey> {
        check_type(&self.inner.borrow().key_type, key)?;
        ValueKey::from_value(key).ok_or_else(|| {
            TypeError::UnhashableKey {
                ty: key.type_name().to_string(),
            }
            .into()
        })
    }

    /// `d[key] = value`; a replaced value is released.
    pub fn set(&self, key: &Value, value: &Value) -> ListResult<()> {
        let key = self.key(key)?;
        check_type(&self.inner.borrow().value_type, value)?;
        let old = self.inner.borrow_mut().values.insert(key, value.clone());
        drop(old);
        Ok(())
    }

    pub fn get(&self, key: &Value) -> ListResult<Value> {
        let k = self.key(key)?;
        let found = self.inner.borrow().values.get(&k).cloned();
        found.ok_or_else(|| {
            RuntimeError::KeyNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    pub fn remove(&self, key: &Value) -> ListResult<Value> {
        let k = self.key(key)?;
        let removed = self.inner.borrow_mut().values.shift_remove(&k);
        removed.ok_or_else(|| {
            RuntimeError::KeyNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        match ValueKey::from_value(key) {
            Some(k) => self.inner.borrow().values.contains_key(&k),
            None => false,
        }
    }

    pub fn keys(&self) -> Vec<Value> {
        self.inner.borrow().values.keys().map(ValueKey::to_value).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().values.values().cloned().collect()
    }

    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    pub fn ptr_eq(&self, other: &DictRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for DictRef {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.inner.try_borrow(), other.inner.try_borrow()) {
            (Ok(a), Ok(b)) => {
                a.key_type == b.key_type && a.value_type == b.value_type && a.values == b.values
            }
            _ => false,
        }
    }
}

impl fmt::Debug for DictRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for DictRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let dict = match self.inner.try_borrow() {
            Ok(dict) => dict,
            Err(_) => return write!(f, "{{...}}"),
        };
        write!(f, "{{")?;
        for (i, (k, v)) in dict.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}
