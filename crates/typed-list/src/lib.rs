//! A homogeneously-typed, growable list with interpreted-list semantics.
//!
//! [`TypedList`] stores items of one fixed [`Type`] and reproduces the
//! indexing, slicing, mutation and comparison rules of a dynamic list,
//! including negative indices, extended slices and self-aliasing updates.
//! Items reach the list through the [`Element`] trait, which native scalars
//! implement directly and host object models implement for their values.

mod buffer;
pub mod compare;
pub mod config;
pub mod element;
pub mod error;
pub mod list;
pub mod slice;
pub mod types;

pub use buffer::over_allocate;
pub use compare::CmpOp;
pub use config::ListConfig;
pub use element::Element;
pub use error::{ErrorKind, ListError, ListResult, RuntimeError, TypeError};
pub use list::TypedList;
pub use slice::{clamp_index, resolve_index, resolve_pop_index, resolve_slice, Slice, SliceRange};
pub use types::{is_valid_item_type, Type, MAX_TYPE_DEPTH};
