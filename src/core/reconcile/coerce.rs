//! Type-directed coercion
//!
//! Converts an untyped [`SettingValue`] into the [`TypedValue`] its field
//! declares. Numeric settings are tolerated as base-10 strings because the
//! settings API serializes most values that way; every other shape must
//! already match.

use super::record::TypedValue;
use crate::domain::{CoercionError, SettingKind, SettingValue};

/// Coerce `value` into the semantic type `kind` for the field `field`
///
/// # Errors
///
/// - [`CoercionError::TypeMismatch`] when the value's shape does not fit `kind`
/// - [`CoercionError::IntegerParse`] when an `Int` field receives a string that
///   is not a base-10 integer
/// - [`CoercionError::ElementMismatch`] when a list element is not a string
///
/// # Examples
///
/// ```
/// use esindex::core::reconcile::coerce::coerce;
/// use esindex::core::reconcile::record::TypedValue;
/// use esindex::domain::{SettingKind, SettingValue};
///
/// let value = SettingValue::from("15000");
/// let typed = coerce("max_result_window", &value, SettingKind::Int).unwrap();
/// assert_eq!(typed, TypedValue::Int(15000));
/// ```
pub fn coerce(
    field: &str,
    value: &SettingValue,
    kind: SettingKind,
) -> Result<TypedValue, CoercionError> {
    match (kind, value) {
        (SettingKind::String, SettingValue::String(s)) => Ok(TypedValue::String(s.clone())),
        (SettingKind::Bool, SettingValue::Bool(b)) => Ok(TypedValue::Bool(*b)),
        (SettingKind::Int, SettingValue::Int(i)) => Ok(TypedValue::Int(*i)),
        (SettingKind::Int, SettingValue::String(s)) => {
            s.parse::<i64>()
                .map(TypedValue::Int)
                .map_err(|_| CoercionError::IntegerParse {
                    field: field.to_string(),
                    value: s.clone(),
                })
        }
        (SettingKind::OrderedList, SettingValue::List(items)) => {
            string_elements(field, kind, items).map(TypedValue::OrderedList)
        }
        (SettingKind::UnorderedSet, SettingValue::List(items)) => string_elements(field, kind, items)
            .map(|elements| TypedValue::UnorderedSet(elements.into_iter().collect())),
        (kind, actual) => Err(CoercionError::TypeMismatch {
            field: field.to_string(),
            expected: kind,
            actual: actual.clone(),
        }),
    }
}

/// Every element of `items` as a string, in order
fn string_elements(
    field: &str,
    kind: SettingKind,
    items: &[SettingValue],
) -> Result<Vec<String>, CoercionError> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| match item {
            SettingValue::String(s) => Ok(s.clone()),
            other => Err(CoercionError::ElementMismatch {
                field: field.to_string(),
                expected: kind,
                position,
                actual: other.clone(),
            }),
        })
        .collect()
}
