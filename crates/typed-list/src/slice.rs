//! Index and slice normalization.
//!
//! User indices may be negative (counted from the end) or out of range;
//! slices are `start:stop:step` triples with any part omitted. Everything
//! here is independent of the item type and touches no storage: it only
//! turns user input into absolute positions inside `[0, len)`.

use crate::error::{ListResult, RuntimeError};
use std::fmt;

/// A `start:stop:step` triple as written by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    /// `[:]`
    pub fn full() -> Self {
        Self::default()
    }

    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// `[start:stop]`
    pub fn range(start: i64, stop: i64) -> Self {
        Self::new(Some(start), Some(stop), None)
    }

    /// `[start:stop:step]`
    pub fn stepped(start: i64, stop: i64, step: i64) -> Self {
        Self::new(Some(start), Some(stop), Some(step))
    }

    /// `[start:]`
    pub fn start_at(start: i64) -> Self {
        Self::new(Some(start), None, None)
    }

    /// `[:stop]`
    pub fn stop_at(stop: i64) -> Self {
        Self::new(None, Some(stop), None)
    }

    /// `[::step]`
    pub fn step(step: i64) -> Self {
        Self::new(None, None, Some(step))
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// A slice is simple when it selects a contiguous run.
    pub fn is_simple(&self) -> bool {
        matches!(self.step, None | Some(1))
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(stop) = self.stop {
            write!(f, "{}", stop)?;
        }
        if let Some(step) = self.step {
            write!(f, ":{}", step)?;
        }
        Ok(())
    }
}

/// A slice resolved against a concrete length.
///
/// `start` is the first selected index; `len` is the exact number of
/// selected indices, `start + i * step` for `i in 0..len`. When `len > 0`
/// every selected index lies in `[0, length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRange {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
    pub len: usize,
}

impl SliceRange {
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Selected indices in selection order.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        let SliceRange {
            start, step, len, ..
        } = *self;
        (0..len as i64).map(move |i| (start + i * step) as usize)
    }

    /// Lowest and highest selected index.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        if self.len == 0 {
            return None;
        }
        let last = self.start + (self.len as i64 - 1) * self.step;
        let (lo, hi) = if self.step > 0 {
            (self.start, last)
        } else {
            (last, self.start)
        };
        Some((lo as usize, hi as usize))
    }

    pub fn contains(&self, index: usize) -> bool {
        match self.bounds() {
            Some((lo, hi)) => {
                index >= lo && index <= hi && (index - lo) as i64 % self.step.abs() == 0
            }
            None => false,
        }
    }
}

/// Resolve a possibly negative index against `len`.
pub fn resolve_index(index: i64, len: usize) -> ListResult<usize> {
    let len_i = len as i64;
    let resolved = if index < 0 { index + len_i } else { index };
    if resolved < 0 || resolved >= len_i {
        return Err(RuntimeError::IndexOutOfRange { index, len }.into());
    }
    Ok(resolved as usize)
}

/// Resolve the index of a pop-like removal.
///
/// An empty list reports "pop from empty list" rather than a bad index.
pub fn resolve_pop_index(index: i64, len: usize) -> ListResult<usize> {
    if len == 0 {
        return Err(RuntimeError::PopFromEmpty.into());
    }
    resolve_index(index, len)
}

/// Clamp an insertion point into `[0, len]`; never fails.
pub fn clamp_index(index: i64, len: usize) -> usize {
    let len_i = len as i64;
    let resolved = if index < 0 { index + len_i } else { index };
    resolved.clamp(0, len_i) as usize
}

/// Resolve a slice against `len`, clamping out-of-range bounds.
///
/// Matches interpreted-list slicing index for index, including empty
/// selections and descending steps. A zero step is an error.
pub fn resolve_slice(slice: &Slice, len: usize) -> ListResult<SliceRange> {
    let step = slice.step.unwrap_or(1);
    if step == 0 {
        return Err(RuntimeError::ZeroStep.into());
    }
    // keep `-step` representable
    let step = step.max(-i64::MAX);
    let len_i = len as i64;

    let adjust = |bound: Option<i64>, default: i64| -> i64 {
        match bound {
            None => default,
            Some(b) if b < 0 => {
                let b = b + len_i;
                if b < 0 {
                    if step < 0 {
                        -1
                    } else {
                        0
                    }
                } else {
                    b
                }
            }
            Some(b) if b >= len_i => {
                if step < 0 {
                    len_i - 1
                } else {
                    len_i
                }
            }
            Some(b) => b,
        }
    };

    let (start, stop) = if step > 0 {
        (adjust(slice.start, 0), adjust(slice.stop, len_i))
    } else {
        (adjust(slice.start, len_i - 1), adjust(slice.stop, -1))
    };

    let count = if step > 0 && start < stop {
        (stop - start - 1) / step + 1
    } else if step < 0 && stop < start {
        (start - stop - 1) / (-step) + 1
    } else {
        0
    };

    Ok(SliceRange {
        start,
        stop,
        step,
        len: count as usize,
    })
}
