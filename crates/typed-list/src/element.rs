//! The seam between the list engine and whatever owns the values.
//!
//! A list never inspects its items beyond this trait: it asks for their type
//! when they are stored, and compares them with `PartialEq`/`PartialOrd`.
//! Reference counting is carried by `Clone` (a new reference) and `Drop`
//! (a released one), so item types that are shared handles get exact counts
//! for free.

use crate::types::Type;

pub trait Element: Clone + PartialEq + PartialOrd + std::fmt::Debug {
    /// Type descriptor of this value, or `None` while it cannot be known
    /// (e.g. an empty list whose item type was never fixed).
    fn element_type(&self) -> Option<Type>;
}

impl Element for bool {
    fn element_type(&self) -> Option<Type> {
        Some(Type::Bool)
    }
}

impl Element for i32 {
    fn element_type(&self) -> Option<Type> {
        Some(Type::Int32)
    }
}

impl Element for i64 {
    fn element_type(&self) -> Option<Type> {
        Some(Type::Int64)
    }
}

impl Element for f64 {
    fn element_type(&self) -> Option<Type> {
        Some(Type::Float64)
    }
}

impl Element for String {
    fn element_type(&self) -> Option<Type> {
        Some(Type::Unicode)
    }
}
