//! Lexicographic comparison between two lists of the same item type.
//!
//! The item types are checked before any item is looked at: lists of
//! different item types are not unequal, they are incomparable.

use crate::element::Element;
use crate::error::{ListResult, TypeError};
use crate::list::TypedList;
use std::cmp::Ordering;
use strum_macros::{AsRefStr, Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
pub enum CmpOp {
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = ">")]
    Gt,
}

impl CmpOp {
    pub fn is_ordering(&self) -> bool {
        !matches!(self, CmpOp::Eq | CmpOp::Ne)
    }

    fn apply<T: PartialOrd + ?Sized>(&self, a: &T, b: &T) -> bool {
        match self {
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Ge => a >= b,
            CmpOp::Gt => a > b,
        }
    }
}

impl<T: Element> TypedList<T> {
    /// Fail unless `other` holds the same item type. An untyped list is
    /// necessarily empty and matches any type.
    pub fn check_comparable(&self, other: &Self, op: CmpOp) -> ListResult<()> {
        if let (Some(a), Some(b)) = (self.item_type(), other.item_type()) {
            if a != b {
                return Err(TypeError::CompareMismatch {
                    this: a.to_string(),
                    other: b.to_string(),
                }
                .into());
            }
        }
        if op.is_ordering() {
            if let Some(ty) = self.item_type().or(other.item_type()) {
                if !ty.is_orderable() {
                    return Err(TypeError::NotOrderable { ty: ty.to_string() }.into());
                }
            }
        }
        Ok(())
    }

    /// `self <op> other` with interpreted-list semantics: the first pair of
    /// unequal items decides, otherwise the lengths do.
    pub fn richcompare(&self, other: &Self, op: CmpOp) -> ListResult<bool> {
        self.check_comparable(other, op)?;
        let (a, b) = (self.as_slice(), other.as_slice());

        if a.len() != b.len() && matches!(op, CmpOp::Eq | CmpOp::Ne) {
            return Ok(op == CmpOp::Ne);
        }
        match a.iter().zip(b.iter()).position(|(x, y)| x != y) {
            Some(i) => match op {
                CmpOp::Eq => Ok(false),
                CmpOp::Ne => Ok(true),
                _ => Ok(op.apply(&a[i], &b[i])),
            },
            None => Ok(op.apply(&a.len(), &b.len())),
        }
    }

    pub fn equals(&self, other: &Self) -> ListResult<bool> {
        self.richcompare(other, CmpOp::Eq)
    }

    /// Three-way comparison; `None` when the deciding pair of items is
    /// itself unordered (a NaN, say).
    pub fn compare(&self, other: &Self) -> ListResult<Option<Ordering>> {
        self.check_comparable(other, CmpOp::Lt)?;
        let (a, b) = (self.as_slice(), other.as_slice());
        match a.iter().zip(b.iter()).position(|(x, y)| x != y) {
            Some(i) => Ok(a[i].partial_cmp(&b[i])),
            None => Ok(Some(a.len().cmp(&b.len()))),
        }
    }
}

impl<T: Element> PartialEq for TypedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl<T: Element> PartialOrd for TypedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok().flatten()
    }
}
