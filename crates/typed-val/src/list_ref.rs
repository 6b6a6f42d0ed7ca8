//! Shared handle over a list of host values.
//!
//! `ListRef` is what an interpreter holds: cloning it takes another
//! reference to the same list. Operations whose argument may be the list
//! itself (`l.extend(l)`, `l[a:b] = l`, `l == l`) are recognised by identity
//! and routed to the self-aliasing paths of [`TypedList`], so a list is never
//! read and written through two handles at once.

use crate::shared::{shared, Shared};
use crate::types::resolve_item_type;
use crate::value::Value;
use ecow::EcoString;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;
use tracing::debug;
use typed_list::{CmpOp, ListConfig, ListResult, Slice, Type, TypeError, TypedList};

thread_local! {
    /// Lists currently being printed on this thread.
    static REPR_ACTIVE: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

#[derive(Clone)]
pub struct ListRef {
    inner: Shared<TypedList<Value>>,
}

impl Default for ListRef {
    fn default() -> Self {
        Self::new()
    }
}

/// Items of an iterable source, read out in full before any write.
fn items_of(source: &Value) -> ListResult<Vec<Value>> {
    match source {
        Value::List(list) => Ok(list.to_vec()),
        Value::Array(array) if array.ndim() == 1 => {
            Ok(array.to_vec().into_iter().map(Value::Float).collect())
        }
        Value::Str(s) => Ok(s.chars().map(|c| Value::from(c.to_string())).collect()),
        other => Err(TypeError::NotIterable {
            found: other.type_name().to_string(),
        }
        .into()),
    }
}

impl ListRef {
    /// Untyped list; the first store fixes its item type.
    pub fn new() -> Self {
        Self::from_list(TypedList::new())
    }

    pub fn from_list(list: TypedList<Value>) -> Self {
        Self {
            inner: shared(list),
        }
    }

    /// Empty list whose items have the type named by `item_type`: a type
    /// value, or a container instance standing for its own type.
    pub fn empty_list(item_type: &Value) -> ListResult<Self> {
        Self::empty_list_with(item_type, &ListConfig::default())
    }

    pub fn empty_list_with(item_type: &Value, config: &ListConfig) -> ListResult<Self> {
        let ty = resolve_item_type(item_type, config.max_type_depth)?;
        debug!(item_type = %ty, capacity = config.initial_capacity, "new typed list");
        Ok(Self::from_list(TypedList::with_config(ty, config)?))
    }

    pub fn from_values(item_type: Type, values: impl IntoIterator<Item = Value>) -> ListResult<Self> {
        Ok(Self::from_list(TypedList::from_items(item_type, values)?))
    }

    pub fn ptr_eq(&self, other: &ListRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Item type, or `None` while the list is untyped or being mutated.
    pub fn item_type(&self) -> Option<Type> {
        self.inner.try_borrow().ok()?.item_type().cloned()
    }

    pub fn type_name(&self) -> EcoString {
        match self.item_type() {
            Some(ty) => Type::list(ty).name(),
            None => "ListType[undefined]".into(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.borrow().capacity()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.inner.borrow().to_vec()
    }

    // ========== Scalar access ==========

    /// `l[index]`, a new reference to the item.
    pub fn get(&self, index: i64) -> ListResult<Value> {
        self.inner.borrow().get(index).cloned()
    }

    /// `l[index] = value`
    pub fn set(&self, index: i64, value: &Value) -> ListResult<()> {
        self.inner.borrow_mut().set(index, value.clone())
    }

    /// `del l[index]`
    pub fn delete(&self, index: i64) -> ListResult<()> {
        self.inner.borrow_mut().delete(index)
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.inner.borrow().contains(value)
    }

    // ========== Mutation ==========

    pub fn append(&self, value: &Value) -> ListResult<()> {
        self.inner.borrow_mut().append(value.clone())
    }

    pub fn insert(&self, index: i64, value: &Value) -> ListResult<()> {
        self.inner.borrow_mut().insert(index, value.clone())
    }

    pub fn pop(&self) -> ListResult<Value> {
        self.inner.borrow_mut().pop()
    }

    pub fn pop_at(&self, index: i64) -> ListResult<Value> {
        self.inner.borrow_mut().pop_at(index)
    }

    pub fn remove(&self, value: &Value) -> ListResult<()> {
        self.inner.borrow_mut().remove(value)
    }

    /// `l.extend(source)` for a list, a 1-d array or a string.
    pub fn extend(&self, source: &Value) -> ListResult<()> {
        if let Value::List(other) = source {
            if other.ptr_eq(self) {
                debug!("extend list by itself");
                return self.inner.borrow_mut().extend_from_self();
            }
        }
        let items = items_of(source)?;
        self.inner.borrow_mut().extend(items)
    }

    /// Extend from any iterator of values; it is drained before the list
    /// is written, so it may read this same list.
    pub fn extend_values(&self, values: impl IntoIterator<Item = Value>) -> ListResult<()> {
        let items: Vec<Value> = values.into_iter().collect();
        self.inner.borrow_mut().extend(items)
    }

    pub fn reverse(&self) {
        self.inner.borrow_mut().reverse();
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Shallow copy: a new list holding new references to the same items.
    pub fn copy(&self) -> ListResult<ListRef> {
        let copy = self.inner.borrow().copy()?;
        Ok(Self::from_list(copy))
    }

    // ========== Queries ==========

    pub fn count(&self, value: &Value) -> usize {
        self.inner.borrow().count(value)
    }

    pub fn index(&self, value: &Value) -> ListResult<usize> {
        self.inner.borrow().index(value)
    }

    pub fn index_within(&self, value: &Value, start: Option<i64>, stop: Option<i64>) -> ListResult<usize> {
        self.inner.borrow().index_within(value, start, stop)
    }

    // ========== Slices ==========

    pub fn get_slice(&self, slice: &Slice) -> ListResult<ListRef> {
        let part = self.inner.borrow().get_slice(slice)?;
        Ok(Self::from_list(part))
    }

    /// `l[slice] = source`, where `source` may be this very list.
    pub fn set_slice(&self, slice: &Slice, source: &Value) -> ListResult<()> {
        if let Value::List(other) = source {
            if other.ptr_eq(self) {
                debug!(%slice, "slice assigned from itself");
                return self
                    .inner
                    .borrow_mut()
                    .set_slice_from_self(slice, &Slice::full());
            }
        }
        let items = items_of(source)?;
        self.inner.borrow_mut().set_slice(slice, items)
    }

    pub fn delete_slice(&self, slice: &Slice) -> ListResult<()> {
        self.inner.borrow_mut().delete_slice(slice)
    }

    // ========== Comparison ==========

    /// `self <op> other` against any value; only lists of the same item
    /// type compare.
    pub fn richcompare(&self, op: CmpOp, other: &Value) -> ListResult<bool> {
        match other {
            Value::List(other) => {
                let (a, b) = (self.inner.borrow(), other.inner.borrow());
                a.richcompare(&b, op)
            }
            _ => Err(TypeError::CompareMismatch {
                this: self.type_name().to_string(),
                other: other.type_name().to_string(),
            }
            .into()),
        }
    }

    /// Iterate by position; see [`ListIter`].
    pub fn iter(&self) -> ListIter {
        ListIter {
            list: self.clone(),
            index: 0,
            end: self.len(),
        }
    }
}

/// Lazy iterator over a shared list.
///
/// It holds its own reference to the list and reads one slot per step, so
/// the list may be changed while iterating. The end is fixed when the
/// iterator is created: items appended meanwhile are not visited, and a list
/// that shrank ends the iteration early.
pub struct ListIter {
    list: ListRef,
    index: usize,
    end: usize,
}

impl Iterator for ListIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.index >= self.end {
            return None;
        }
        let item = self.list.inner.borrow().as_slice().get(self.index).cloned();
        match item {
            Some(_) => self.index += 1,
            None => self.index = self.end,
        }
        item
    }
}

impl IntoIterator for &ListRef {
    type Item = Value;
    type IntoIter = ListIter;

    fn into_iter(self) -> ListIter {
        self.iter()
    }
}

impl PartialEq for ListRef {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.inner.try_borrow(), other.inner.try_borrow()) {
            (Ok(a), Ok(b)) => *a == *b,
            _ => false,
        }
    }
}

impl PartialOrd for ListRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.inner.try_borrow(), other.inner.try_borrow()) {
            (Ok(a), Ok(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for ListRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let id = Rc::as_ptr(&self.inner) as *const () as usize;
        let entered = REPR_ACTIVE.with(|active| active.borrow_mut().insert(id));
        if !entered {
            return write!(f, "[...]");
        }
        let result = match self.inner.try_borrow() {
            Ok(list) => write!(f, "{}", *list),
            Err(_) => write!(f, "[...]"),
        };
        REPR_ACTIVE.with(|active| active.borrow_mut().remove(&id));
        result
    }
}
