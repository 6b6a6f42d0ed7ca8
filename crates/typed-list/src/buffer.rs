//! Growable slot storage backing a list.
//!
//! Growth follows a mild over-allocation so that `k` single appends cost
//! `O(k)` overall: `0, 4, 8, 16, 25, 35, 46, 58, 72, 88, ...`. Capacity is
//! never given back on removal, only when the whole buffer is released.
//! Every reservation goes through `try_reserve_exact`, so running out of
//! memory is reported as an error and leaves the stored items untouched.

use crate::error::{ListResult, RuntimeError};
use std::ops::Range;
use tracing::trace;

/// Slot count to allocate for a buffer that must hold `needed` items.
pub fn over_allocate(needed: usize) -> usize {
    let extra = if needed < 9 { 3 } else { 6 };
    needed
        .checked_add(needed >> 3)
        .and_then(|n| n.checked_add(extra))
        .unwrap_or(needed)
}

#[derive(Debug)]
pub(crate) struct Buffer<T> {
    items: Vec<T>,
}

impl<T> Buffer<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> ListResult<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| RuntimeError::Allocation {
                requested: capacity,
            })?;
        Ok(Self { items })
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Guarantee room for `additional` more items without reallocating.
    pub fn ensure_capacity(&mut self, additional: usize) -> ListResult<()> {
        let len = self.items.len();
        let needed = len.checked_add(additional).ok_or(RuntimeError::Allocation {
            requested: usize::MAX,
        })?;
        if needed <= self.items.capacity() {
            return Ok(());
        }
        let target = over_allocate(needed);
        self.items
            .try_reserve_exact(target - len)
            .map_err(|_| RuntimeError::Allocation { requested: target })?;
        trace!(len, needed, capacity = self.items.capacity(), "buffer grown");
        Ok(())
    }

    pub fn push(&mut self, item: T) -> ListResult<()> {
        self.ensure_capacity(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Append all of `items` after a single reservation.
    pub fn append_all(&mut self, items: Vec<T>) -> ListResult<()> {
        self.ensure_capacity(items.len())?;
        self.items.extend(items);
        Ok(())
    }

    /// Open a one-slot gap at `at` and fill it. `at` must be `<= len`.
    pub fn insert(&mut self, at: usize, item: T) -> ListResult<()> {
        self.ensure_capacity(1)?;
        self.items.insert(at, item);
        Ok(())
    }

    /// Take out the item at `at` and close the gap. `at` must be `< len`.
    pub fn remove(&mut self, at: usize) -> T {
        self.items.remove(at)
    }

    /// Put `item` into slot `at`, handing back what was there.
    pub fn replace(&mut self, at: usize, item: T) -> T {
        std::mem::replace(&mut self.items[at], item)
    }

    /// Swap the run `range` for `replacement` in one shift of the tail.
    ///
    /// Room for any net growth is reserved first, so a failed reservation
    /// leaves the buffer as it was. Returns the items that left the buffer.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: Vec<T>) -> ListResult<Vec<T>> {
        let removed = range.end - range.start;
        if replacement.len() > removed {
            self.ensure_capacity(replacement.len() - removed)?;
        }
        Ok(self.items.splice(range, replacement).collect())
    }

    /// Drop every slot whose index matches `selected`, keeping the rest in order.
    pub fn remove_where(&mut self, selected: impl Fn(usize) -> bool) {
        let mut index = 0;
        self.items.retain(|_| {
            let keep = !selected(index);
            index += 1;
            keep
        });
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Give up the storage, handing back the items it held.
    pub fn release(&mut self) -> Vec<T> {
        trace!(capacity = self.items.capacity(), "buffer released");
        std::mem::take(&mut self.items)
    }
}

impl<T: Clone> Buffer<T> {
    /// Independent copy holding a fresh clone of every item.
    pub fn duplicate(&self) -> ListResult<Self> {
        let mut copy = Self::with_capacity(self.items.len())?;
        copy.items.extend(self.items.iter().cloned());
        Ok(copy)
    }

    /// Append clones of the items in `range`, which is read before it grows.
    pub fn extend_from_within(&mut self, range: Range<usize>) -> ListResult<()> {
        self.ensure_capacity(range.end - range.start)?;
        self.items.extend_from_within(range);
        Ok(())
    }
}
