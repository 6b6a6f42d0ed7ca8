use ecow::EcoString;
use std::fmt;

/// Deepest list-in-list nesting accepted for an item type by default.
///
/// `List(int64)` nests once, `List(List(int64))` twice. A list whose items
/// would be `List(List(List(..)))` is refused at construction.
pub const MAX_TYPE_DEPTH: usize = 2;

/// Element type descriptor.
///
/// Every [`crate::TypedList`] carries exactly one of these, fixed for the
/// lifetime of the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The type of the missing value. Never a valid item type.
    NoneType,
    Bool,
    Int32,
    Int64,
    Float64,
    Unicode,
    Array { dtype: Box<Type>, ndim: usize },
    List(Box<Type>),
    Dict(Box<Type>, Box<Type>),
}

impl Type {
    pub fn list(item: Type) -> Self {
        Type::List(Box::new(item))
    }

    pub fn dict(key: Type, value: Type) -> Self {
        Type::Dict(Box::new(key), Box::new(value))
    }

    pub fn array(dtype: Type, ndim: usize) -> Self {
        Type::Array {
            dtype: Box::new(dtype),
            ndim,
        }
    }

    pub fn name(&self) -> EcoString {
        self.to_string().into()
    }

    /// Number of list constructors wrapped around the innermost item type.
    ///
    /// Dict values count too, so `Dict(int32, List(int32))` has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Type::List(item) => 1 + item.depth(),
            Type::Dict(_, value) => value.depth(),
            Type::Array { dtype, .. } => dtype.depth(),
            _ => 0,
        }
    }

    /// `<`/`>` between two values of this type is defined.
    pub fn is_orderable(&self) -> bool {
        match self {
            Type::Bool | Type::Int32 | Type::Int64 | Type::Float64 | Type::Unicode => true,
            Type::List(item) => item.is_orderable(),
            Type::NoneType | Type::Array { .. } | Type::Dict(..) => false,
        }
    }

    /// Values of this type may key a mapping.
    pub fn is_hashable(&self) -> bool {
        matches!(
            self,
            Type::Bool | Type::Int32 | Type::Int64 | Type::Float64 | Type::Unicode
        )
    }

    fn is_well_formed(&self) -> bool {
        match self {
            Type::NoneType => false,
            Type::Bool | Type::Int32 | Type::Int64 | Type::Float64 | Type::Unicode => true,
            Type::Array { dtype, ndim } => {
                *ndim > 0
                    && matches!(
                        **dtype,
                        Type::Bool | Type::Int32 | Type::Int64 | Type::Float64
                    )
            }
            Type::List(item) => item.is_well_formed(),
            Type::Dict(key, value) => {
                key.is_hashable() && key.is_well_formed() && value.is_well_formed()
            }
        }
    }
}

/// Whether `ty` may be used as the item type of a list.
///
/// Rejects the none type, malformed nested types (an unhashable dict key, a
/// non-numeric array dtype) and items nested deeper than `max_depth` lists.
pub fn is_valid_item_type(ty: &Type, max_depth: usize) -> bool {
    ty.is_well_formed() && ty.depth() <= max_depth
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::NoneType => write!(f, "none"),
            Type::Bool => write!(f, "bool"),
            Type::Int32 => write!(f, "int32"),
            Type::Int64 => write!(f, "int64"),
            Type::Float64 => write!(f, "float64"),
            Type::Unicode => write!(f, "unicode_type"),
            Type::Array { dtype, ndim } => write!(f, "array({}, {}d)", dtype, ndim),
            Type::List(item) => write!(f, "ListType[{}]", item),
            Type::Dict(key, value) => write!(f, "DictType[{},{}]", key, value),
        }
    }
}
