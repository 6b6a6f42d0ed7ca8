//! Host values for the typed list.
//!
//! A small reference-counted object model: scalars, strings, float arrays,
//! typed dicts and [`ListRef`], the shared handle an interpreter uses to
//! drive a [`typed_list::TypedList`] of dynamic values.

mod value;
pub use value::*;

mod shared;
pub use shared::*;

mod types;
pub use types::*;

mod array;
pub use array::*;

mod dict;
pub use dict::*;

mod list_ref;
pub use list_ref::*;
