//! The typed list itself: construction, the sequence protocol and every
//! mutation.
//!
//! Each operation validates first (indices, slice shape, item types, room
//! in the buffer) and only then writes, so a returned error means nothing
//! changed. Items leave the list by being dropped or handed back, which is
//! where shared items lose the reference the list held.

use crate::buffer::Buffer;
use crate::config::ListConfig;
use crate::element::Element;
use crate::error::{ListResult, RuntimeError, TypeError};
use crate::slice::{clamp_index, resolve_index, resolve_pop_index, resolve_slice, Slice};
use crate::types::{is_valid_item_type, Type};
use std::fmt;

#[derive(Debug)]
pub struct TypedList<T> {
    item_type: Option<Type>,
    max_type_depth: usize,
    buf: Buffer<T>,
}

impl<T: Element> Default for TypedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> TypedList<T> {
    /// Empty list whose item type is fixed by the first store.
    pub fn new() -> Self {
        Self {
            item_type: None,
            max_type_depth: ListConfig::default().max_type_depth,
            buf: Buffer::new(),
        }
    }

    /// Empty list of `item_type`.
    pub fn empty_list(item_type: Type) -> ListResult<Self> {
        Self::with_config(item_type, &ListConfig::default())
    }

    pub fn with_config(item_type: Type, config: &ListConfig) -> ListResult<Self> {
        if !is_valid_item_type(&item_type, config.max_type_depth) {
            return Err(TypeError::InvalidItemType {
                found: item_type.to_string(),
                max_depth: config.max_type_depth,
            }
            .into());
        }
        Ok(Self {
            item_type: Some(item_type),
            max_type_depth: config.max_type_depth,
            buf: Buffer::with_capacity(config.initial_capacity)?,
        })
    }

    /// List of `item_type` holding `items` in order.
    pub fn from_items(item_type: Type, items: impl IntoIterator<Item = T>) -> ListResult<Self> {
        let mut list = Self::empty_list(item_type)?;
        list.extend(items)?;
        Ok(list)
    }

    pub fn item_type(&self) -> Option<&Type> {
        self.item_type.as_ref()
    }

    pub fn is_typed(&self) -> bool {
        self.item_type.is_some()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buf.as_slice().iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.buf.as_slice().to_vec()
    }

    // ========== Type admission ==========

    /// Check that every item fits the list; returns the type to fix when the
    /// list is still untyped.
    fn admit<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> ListResult<Option<Type>>
    where
        T: 'a,
    {
        let mut expected = self.item_type.clone();
        let mut refined = None;
        for item in items {
            let found = item
                .element_type()
                .ok_or_else(|| TypeError::UnresolvedItemType {
                    value: format!("{:?}", item),
                })?;
            match &expected {
                Some(ty) if *ty != found => {
                    return Err(TypeError::ItemTypeMismatch {
                        expected: ty.to_string(),
                        found: found.to_string(),
                    }
                    .into());
                }
                Some(_) => {}
                None => {
                    if !is_valid_item_type(&found, self.max_type_depth) {
                        return Err(TypeError::InvalidItemType {
                            found: found.to_string(),
                            max_depth: self.max_type_depth,
                        }
                        .into());
                    }
                    expected = Some(found.clone());
                    refined = Some(found);
                }
            }
        }
        Ok(refined)
    }

    fn commit_type(&mut self, refined: Option<Type>) {
        if let Some(ty) = refined {
            self.item_type = Some(ty);
        }
    }

    // ========== Scalar access ==========

    pub fn get(&self, index: i64) -> ListResult<&T> {
        let at = resolve_index(index, self.len())?;
        Ok(&self.buf.as_slice()[at])
    }

    /// Overwrite the item at `index`; the displaced item is released.
    pub fn set(&mut self, index: i64, item: T) -> ListResult<()> {
        let at = resolve_index(index, self.len())?;
        let refined = self.admit([&item])?;
        self.commit_type(refined);
        drop(self.buf.replace(at, item));
        Ok(())
    }

    pub fn delete(&mut self, index: i64) -> ListResult<()> {
        let at = resolve_index(index, self.len())?;
        drop(self.buf.remove(at));
        Ok(())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|item| item == value)
    }

    // ========== Mutation ==========

    pub fn append(&mut self, item: T) -> ListResult<()> {
        let refined = self.admit([&item])?;
        self.buf.push(item)?;
        self.commit_type(refined);
        Ok(())
    }

    /// Insert before `index`, clamped into `[0, len]`; never out of range.
    pub fn insert(&mut self, index: i64, item: T) -> ListResult<()> {
        let refined = self.admit([&item])?;
        let at = clamp_index(index, self.len());
        self.buf.insert(at, item)?;
        self.commit_type(refined);
        Ok(())
    }

    /// Remove and return the last item.
    pub fn pop(&mut self) -> ListResult<T> {
        self.pop_at(-1)
    }

    /// Remove and return the item at `index`.
    pub fn pop_at(&mut self, index: i64) -> ListResult<T> {
        let at = resolve_pop_index(index, self.len())?;
        Ok(self.buf.remove(at))
    }

    /// Remove the first item equal to `value`.
    pub fn remove(&mut self, value: &T) -> ListResult<()> {
        let at = self
            .iter()
            .position(|item| item == value)
            .ok_or(RuntimeError::ValueNotFound { op: "remove" })?;
        drop(self.buf.remove(at));
        Ok(())
    }

    /// Append every item of `items` in order.
    ///
    /// The source is drained into a snapshot before the list is touched.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> ListResult<()> {
        let items: Vec<T> = items.into_iter().collect();
        let refined = self.admit(&items)?;
        self.buf.append_all(items)?;
        self.commit_type(refined);
        Ok(())
    }

    /// `l.extend(l)`: the current length is captured first, so the list
    /// doubles exactly once.
    pub fn extend_from_self(&mut self) -> ListResult<()> {
        let len = self.len();
        self.buf.extend_from_within(0..len)
    }

    pub fn reverse(&mut self) {
        self.buf.reverse();
    }

    /// Release every item and the buffer; the item type stays.
    pub fn clear(&mut self) {
        drop(self.buf.release());
    }

    /// Shallow copy with its own buffer and a new reference to every item.
    pub fn copy(&self) -> ListResult<Self> {
        Ok(Self {
            item_type: self.item_type.clone(),
            max_type_depth: self.max_type_depth,
            buf: self.buf.duplicate()?,
        })
    }

    // ========== Queries ==========

    pub fn count(&self, value: &T) -> usize {
        self.iter().filter(|item| *item == value).count()
    }

    pub fn index(&self, value: &T) -> ListResult<usize> {
        self.index_within(value, None, None)
    }

    /// Position of the first `value` within `[start:stop]`.
    pub fn index_within(&self, value: &T, start: Option<i64>, stop: Option<i64>) -> ListResult<usize> {
        let range = resolve_slice(&Slice::new(start, stop, None), self.len())?;
        let items = self.buf.as_slice();
        range
            .indices()
            .find(|&i| items[i] == *value)
            .ok_or_else(|| RuntimeError::ValueNotFound { op: "index" }.into())
    }

    // ========== Slices ==========

    /// New list of the same item type holding the selected items.
    pub fn get_slice(&self, slice: &Slice) -> ListResult<Self> {
        let range = resolve_slice(slice, self.len())?;
        let mut buf = Buffer::with_capacity(range.len)?;
        let items = self.buf.as_slice();
        buf.append_all(range.indices().map(|i| items[i].clone()).collect())?;
        Ok(Self {
            item_type: self.item_type.clone(),
            max_type_depth: self.max_type_depth,
            buf,
        })
    }

    /// `l[slice] = items`.
    ///
    /// A simple slice may grow or shrink the list; an extended slice must be
    /// given exactly as many items as it selects.
    pub fn set_slice(&mut self, slice: &Slice, items: impl IntoIterator<Item = T>) -> ListResult<()> {
        let range = resolve_slice(slice, self.len())?;
        let items: Vec<T> = items.into_iter().collect();

        if slice.is_simple() {
            let refined = self.admit(&items)?;
            let start = range.start as usize;
            let stop = (range.stop.max(range.start)) as usize;
            drop(self.buf.replace_range(start..stop, items)?);
            self.commit_type(refined);
            return Ok(());
        }

        if items.len() != range.len {
            return Err(RuntimeError::LengthMismatch {
                expected: range.len,
                got: items.len(),
            }
            .into());
        }
        let refined = self.admit(&items)?;
        for (at, item) in range.indices().zip(items) {
            drop(self.buf.replace(at, item));
        }
        self.commit_type(refined);
        Ok(())
    }

    /// `l[target] = l[source]`, with the source read out before any write.
    pub fn set_slice_from_self(&mut self, target: &Slice, source: &Slice) -> ListResult<()> {
        resolve_slice(target, self.len())?;
        let snapshot = self.get_slice(source)?;
        self.set_slice(target, snapshot)
    }

    /// `del l[slice]`.
    pub fn delete_slice(&mut self, slice: &Slice) -> ListResult<()> {
        let range = resolve_slice(slice, self.len())?;
        if range.is_empty() {
            return Ok(());
        }
        if slice.is_simple() {
            let start = range.start as usize;
            drop(self.buf.replace_range(start..start + range.len, Vec::new())?);
        } else {
            self.buf.remove_where(|i| range.contains(i));
        }
        Ok(())
    }
}

impl<T: Element> Clone for TypedList<T> {
    fn clone(&self) -> Self {
        Self {
            item_type: self.item_type.clone(),
            max_type_depth: self.max_type_depth,
            buf: Buffer::from_vec(self.to_vec()),
        }
    }
}

impl<'a, T> IntoIterator for &'a TypedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.as_slice().iter()
    }
}

impl<T> IntoIterator for TypedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        self.buf.release().into_iter()
    }
}

impl<T: fmt::Display> fmt::Display for TypedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.buf.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ListError};
    use pretty_assertions::assert_eq;

    fn to_tl(items: impl IntoIterator<Item = i32>) -> TypedList<i32> {
        TypedList::from_items(Type::Int32, items).unwrap()
    }

    #[test]
    fn test_basic() {
        let mut l = TypedList::<i32>::empty_list(Type::Int32).unwrap();
        assert_eq!(l.len(), 0);
        l.append(0).unwrap();
        assert_eq!(l.len(), 1);
        l.append(0).unwrap();
        l.append(0).unwrap();
        l.set(0, 10).unwrap();
        l.set(1, 11).unwrap();
        l.set(2, 12).unwrap();
        assert_eq!(*l.get(0).unwrap(), 10);
        assert_eq!(*l.get(-3).unwrap(), 10);
        assert_eq!(*l.get(-1).unwrap(), 12);
        assert!(l.contains(&10));
        assert!(!l.contains(&0));

        l.append(12).unwrap();
        assert_eq!(l.count(&0), 0);
        assert_eq!(l.count(&10), 1);
        assert_eq!(l.count(&12), 2);

        assert_eq!(l.pop().unwrap(), 12);
        assert_eq!(l.len(), 3);
        assert_eq!(l.pop_at(1).unwrap(), 11);
        assert_eq!(l.len(), 2);

        l.extend([100, 200, 300]).unwrap();
        assert_eq!(l.to_vec(), vec![10, 12, 100, 200, 300]);

        l.insert(0, 0).unwrap();
        l.insert(3, 13).unwrap();
        l.insert(100, 400).unwrap();
        assert_eq!(l.to_vec(), vec![0, 10, 12, 13, 100, 200, 300, 400]);

        l.remove(&0).unwrap();
        l.remove(&400).unwrap();
        l.remove(&13).unwrap();
        assert_eq!(l.to_vec(), vec![10, 12, 100, 200, 300]);

        l.clear();
        assert!(l.is_empty());

        l.extend(10..20).unwrap();
        l.reverse();
        assert_eq!(l.to_vec(), (10..20).rev().collect::<Vec<_>>());

        let mut new = l.copy().unwrap();
        assert_eq!(new.to_vec(), l.to_vec());
        assert!(l == new);
        new.set(-1, 42).unwrap();
        assert!(l != new);
        assert_eq!(l.index(&15).unwrap(), 4);
    }

    #[test]
    fn test_pop_sequence() {
        let mut l = to_tl([10, 11, 12]);
        assert_eq!(l.pop().unwrap(), 12);
        assert_eq!(l.len(), 2);
        assert_eq!(l.pop_at(1).unwrap(), 11);
        assert_eq!(l.to_vec(), vec![10]);
    }

    #[test]
    fn test_pop_errors() {
        let mut l = TypedList::<i32>::empty_list(Type::Int32).unwrap();
        let err = l.pop().unwrap_err();
        assert_eq!(err.to_string(), "pop from empty list");
        assert_eq!(err.kind(), ErrorKind::IndexError);

        l.append(0).unwrap();
        let err = l.pop_at(1).unwrap_err();
        assert_eq!(err.to_string(), "list index out of range");
        assert_eq!(err.kind(), ErrorKind::IndexError);
        assert_eq!(l.to_vec(), vec![0]);
    }

    #[test]
    fn test_pop_drain_and_rebuild() {
        let mut l = to_tl(0..6);
        for _ in 0..6 {
            l.pop().unwrap();
        }
        l.extend(0..12).unwrap();
        for x in 0..6 {
            l.pop_at(6 - x).unwrap();
        }
        assert_eq!(l.to_vec(), vec![0, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_insert_both_sides() {
        let mut l = to_tl([0]);
        let mut reference = vec![0];
        for i in 1..3i64 {
            for x in -i * 10..i * 10 {
                l.insert(x, (x * i) as i32).unwrap();
                let at = clamp_index(x, reference.len());
                reference.insert(at, (x * i) as i32);
            }
        }
        assert_eq!(l.to_vec(), reference);
    }

    #[test]
    fn test_remove_missing() {
        let mut l = to_tl([0, 0, 1]);
        l.remove(&1).unwrap();
        let err = l.remove(&1).unwrap_err();
        assert_eq!(err.to_string(), "list.remove(x): x not in list");
        assert_eq!(err.kind(), ErrorKind::ValueError);
        assert_eq!(l.to_vec(), vec![0, 0]);
    }

    #[test]
    fn test_index_within() {
        let l = to_tl([1, 2, 3, 1, 2, 3]);
        assert_eq!(l.index(&3).unwrap(), 2);
        assert_eq!(l.index_within(&1, Some(1), None).unwrap(), 3);
        assert_eq!(l.index_within(&3, Some(-2), None).unwrap(), 5);
        assert!(l.index_within(&1, Some(1), Some(3)).is_err());
        assert!(l.index(&9).is_err());
    }

    #[test]
    fn test_reverse_twice_with_growth() {
        let mut l = to_tl(0..20);
        l.reverse();
        l.extend(0..17).unwrap();
        l.reverse();
        let mut want: Vec<i32> = (0..20).rev().collect();
        want.extend(0..17);
        want.reverse();
        assert_eq!(l.to_vec(), want);
    }

    #[test]
    fn test_extend_self() {
        let mut l = to_tl(0..10);
        l.extend_from_self().unwrap();
        assert_eq!(l.len(), 20);
        assert_eq!(&l.as_slice()[..10], &l.as_slice()[10..]);
    }

    #[test]
    fn test_deferred_type_fixed_by_first_append() {
        let mut l = TypedList::<i64>::new();
        assert!(!l.is_typed());
        l.append(1).unwrap();
        assert_eq!(l.item_type(), Some(&Type::Int64));
        assert_eq!(l.to_vec(), vec![1]);
    }

    #[test]
    fn test_construction_rejects_bad_types() {
        let err = TypedList::<i32>::empty_list(Type::NoneType).unwrap_err();
        assert!(err.to_string().contains("*itemty* must be of a Type instance"));
        assert_eq!(err.kind(), ErrorKind::TypeError);

        let deep = Type::list(Type::list(Type::list(Type::Int64)));
        assert!(TypedList::<i32>::empty_list(deep).is_err());
    }

    #[test]
    fn test_store_of_wrong_type_is_rejected() {
        let mut l = TypedList::<i32>::empty_list(Type::Int64).unwrap();
        let err = l.append(1).unwrap_err();
        assert!(matches!(
            err,
            ListError::Type(TypeError::ItemTypeMismatch { .. })
        ));
        assert!(l.is_empty());
    }

    #[test]
    fn test_config_initial_capacity() {
        let config = ListConfig::default().with_initial_capacity(32);
        let l = TypedList::<i32>::with_config(Type::Int32, &config).unwrap();
        assert!(l.capacity() >= 32);
        assert!(l.is_empty());
    }

    #[test]
    fn test_get_slice_keeps_type() {
        let l = to_tl(10..20);
        let s = l.get_slice(&Slice::stepped(1, 8, 3)).unwrap();
        assert_eq!(s.item_type(), Some(&Type::Int32));
        assert_eq!(s.to_vec(), vec![11, 14, 17]);
        assert_eq!(l.get_slice(&Slice::full()).unwrap().to_vec(), l.to_vec());
    }

    #[test]
    fn test_delete_extended_slice() {
        let mut l = to_tl(10..20);
        l.delete_slice(&Slice::stepped(8, 3, -1)).unwrap();
        assert_eq!(l.to_vec(), vec![10, 11, 12, 13, 19]);
    }

    #[test]
    fn test_extended_slice_length_mismatch() {
        let mut l = to_tl(10..20);
        let err = l
            .set_slice(&Slice::stepped(8, 3, -1), [1, 2, 3])
            .unwrap_err();
        assert_eq!(
            err,
            ListError::Runtime(RuntimeError::LengthMismatch {
                expected: 5,
                got: 3
            })
        );
        assert_eq!(l.to_vec(), (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_step_never_writes() {
        let mut l = to_tl(0..5);
        assert!(l.set_slice(&Slice::step(0), [1, 2]).is_err());
        assert!(l.delete_slice(&Slice::step(0)).is_err());
        assert!(l.get_slice(&Slice::step(0)).is_err());
        assert_eq!(l.to_vec(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_set_slice_simple_shapes() {
        let mut l = to_tl(10..20);
        l.set_slice(&Slice::range(1, 3), [100, 200, 300, 400]).unwrap();
        assert_eq!(l.to_vec(), vec![10, 100, 200, 300, 400, 13, 14, 15, 16, 17, 18, 19]);

        let mut l = to_tl(10..20);
        l.set_slice(&Slice::range(1, 3), [100]).unwrap();
        assert_eq!(l.to_vec(), vec![10, 100, 13, 14, 15, 16, 17, 18, 19]);

        let mut l = to_tl(10..20);
        l.set_slice(&Slice::range(5, 2), [1]).unwrap();
        assert_eq!(l.to_vec(), vec![10, 11, 12, 13, 14, 1, 15, 16, 17, 18, 19]);

        let mut l = to_tl(10..20);
        l.set_slice(&Slice::full(), []).unwrap();
        assert!(l.is_empty());
    }

    #[test]
    fn test_set_slice_from_self() {
        let mut l = to_tl(10..20);
        l.set_slice_from_self(&Slice::range(3, 5), &Slice::range(6, 9)).unwrap();
        assert_eq!(l.to_vec(), vec![10, 11, 12, 16, 17, 18, 15, 16, 17, 18, 19]);

        let mut l = to_tl(10..20);
        l.set_slice_from_self(&Slice::step(-1), &Slice::full()).unwrap();
        assert_eq!(l.to_vec(), (10..20).rev().collect::<Vec<_>>());

        let mut l = to_tl(10..20);
        l.set_slice_from_self(&Slice::stop_at(0), &Slice::full()).unwrap();
        let mut want: Vec<i32> = (10..20).collect();
        want.extend(10..20);
        assert_eq!(l.to_vec(), want);
    }

    #[test]
    fn test_display() {
        assert_eq!(to_tl([1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(TypedList::<i32>::new().to_string(), "[]");
    }

    #[test]
    fn test_owned_iteration() {
        let l = to_tl([3, 4]);
        let doubled: Vec<i32> = l.iter().map(|x| x * 2).collect();
        assert_eq!(doubled, vec![6, 8]);
        assert_eq!(l.into_iter().collect::<Vec<_>>(), vec![3, 4]);
    }
}
