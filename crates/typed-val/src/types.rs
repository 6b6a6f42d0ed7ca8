use crate::value::Value;
use typed_list::{is_valid_item_type, Element, ListResult, Type, TypeError, MAX_TYPE_DEPTH};

/// The item type named by `value`.
///
/// A type value names itself. A container instance stands for its own type,
/// so `empty_list(some_dict)` builds a list of dicts shaped like it. Scalars,
/// nil and anything nested deeper than `max_depth` lists are refused.
pub fn resolve_item_type(value: &Value, max_depth: usize) -> ListResult<Type> {
    let ty = match value {
        Value::Type(ty) => Some(ty.clone()),
        Value::List(_) | Value::Dict(_) | Value::Array(_) => value.element_type(),
        _ => None,
    };
    match ty {
        Some(ty) if is_valid_item_type(&ty, max_depth) => Ok(ty),
        Some(ty) => Err(TypeError::InvalidItemType {
            found: ty.to_string(),
            max_depth,
        }
        .into()),
        None => Err(TypeError::InvalidItemType {
            found: value.type_name().to_string(),
            max_depth,
        }
        .into()),
    }
}

pub fn is_valid_type(value: &Value) -> bool {
    resolve_item_type(value, MAX_TYPE_DEPTH).is_ok()
}
