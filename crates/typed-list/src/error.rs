//! Error types and diagnostics for the typed list
//!
//! Every failure is reported before the list is touched, so an `Err` always
//! leaves the container exactly as it was. Errors carry `miette` diagnostic
//! codes the same way across both families.

use miette::Diagnostic;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub use miette::Result;

/// Alias for Result type with list errors
pub type ListResult<T> = std::result::Result<T, ListError>;

/// The interpreted-language exception class an error maps onto.
///
/// Both index variants, empty list and bad index, share `IndexError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ErrorKind {
    TypeError,
    IndexError,
    ValueError,
    KeyError,
    MemoryError,
}

/// Comprehensive error type for list operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListError {
    /// Type errors, detected before any value is touched
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Runtime errors (bad index, missing value, slice mismatch, allocation)
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Diagnostic for ListError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            ListError::Type(e) => e.code(),
            ListError::Runtime(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            ListError::Type(e) => e.severity(),
            ListError::Runtime(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            ListError::Type(e) => e.help(),
            ListError::Runtime(e) => e.help(),
        }
    }
}

impl ListError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListError::Type(_) => ErrorKind::TypeError,
            ListError::Runtime(e) => match e {
                RuntimeError::PopFromEmpty | RuntimeError::IndexOutOfRange { .. } => {
                    ErrorKind::IndexError
                }
                RuntimeError::LengthMismatch { .. }
                | RuntimeError::ZeroStep
                | RuntimeError::ValueNotFound { .. } => ErrorKind::ValueError,
                RuntimeError::KeyNotFound { .. } => ErrorKind::KeyError,
                RuntimeError::Allocation { .. } => ErrorKind::MemoryError,
            },
        }
    }
}

// ============================================================================
// Type Errors (E0101-E0199)
// ============================================================================

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TypeError {
    /// Construction with something that is not a usable item type
    #[error("*itemty* must be of a Type instance, got {found}")]
    #[diagnostic(
        code(typed_list_E0101),
        help("Pass a type descriptor (or a container instance) nested at most {max_depth} lists deep")
    )]
    InvalidItemType { found: String, max_depth: usize },

    /// Storing a value of another type than the list's item type
    #[error("cannot store a value of type '{found}' in a list of '{expected}'")]
    #[diagnostic(code(typed_list_E0102))]
    ItemTypeMismatch { expected: String, found: String },

    /// Storing a value whose type is not yet known
    #[error("cannot determine the type of {value}")]
    #[diagnostic(
        code(typed_list_E0103),
        help("Give the value a concrete type before storing it")
    )]
    UnresolvedItemType { value: String },

    /// Comparing a list with a differently typed list, or with a non-list
    #[error("list can only be compared to list, got '{other}' against '{this}'")]
    #[diagnostic(code(typed_list_E0104))]
    CompareMismatch { this: String, other: String },

    /// Ordering a list whose items have no ordering
    #[error("'{ty}' does not support ordering")]
    #[diagnostic(code(typed_list_E0105))]
    NotOrderable { ty: String },

    /// Mapping keyed by an unhashable type, e.g. a list
    #[error("unhashable key type '{ty}'")]
    #[diagnostic(code(typed_list_E0106))]
    UnhashableKey { ty: String },

    /// Extending or slice-assigning from something that is not a sequence
    #[error("'{found}' object is not iterable")]
    #[diagnostic(code(typed_list_E0107))]
    NotIterable { found: String },
}

// ============================================================================
// Runtime Errors (E0301-E0399)
// ============================================================================

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("pop from empty list")]
    #[diagnostic(code(typed_list_E0301))]
    PopFromEmpty,

    #[error("list index out of range")]
    #[diagnostic(
        code(typed_list_E0302),
        help("Index {index} is out of range for list of length {len}")
    )]
    IndexOutOfRange { index: i64, len: usize },

    #[error("length mismatch for extended slice and sequence")]
    #[diagnostic(
        code(typed_list_E0303),
        help("Attempted to assign a sequence of size {got} to an extended slice of size {expected}")
    )]
    LengthMismatch { expected: usize, got: usize },

    #[error("slice step cannot be zero")]
    #[diagnostic(code(typed_list_E0304))]
    ZeroStep,

    #[error("list.{op}(x): x not in list")]
    #[diagnostic(code(typed_list_E0305))]
    ValueNotFound { op: &'static str },

    #[error("key not found: {key}")]
    #[diagnostic(code(typed_list_E0306))]
    KeyNotFound { key: String },

    #[error("cannot allocate room for {requested} items")]
    #[diagnostic(code(typed_list_E0307), severity(Error))]
    Allocation { requested: usize },
}
