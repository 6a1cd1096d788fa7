//! Settings records and the field locator
//!
//! A settings record is a plain struct with one `Option` field per registry
//! key plus a raw passthrough field. The [`settings_record!`] macro declares
//! the struct together with its [`SettingsRecord`] impl, which is a static
//! table of field descriptors and a name-to-slot lookup. Field order in the
//! struct is independent of registry order.

use crate::domain::{SettingKind, StructuralError};
use std::collections::BTreeSet;

/// Declared name and semantic type of one typed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier, as produced by the key name transform
    pub name: &'static str,
    /// Declared semantic type
    pub kind: SettingKind,
}

/// A coerced value ready to be written into a field slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    String(String),
    Bool(bool),
    Int(i64),
    OrderedList(Vec<String>),
    UnorderedSet(BTreeSet<String>),
}

impl TypedValue {
    /// The semantic type this value carries
    pub fn kind(&self) -> SettingKind {
        match self {
            Self::String(_) => SettingKind::String,
            Self::Bool(_) => SettingKind::Bool,
            Self::Int(_) => SettingKind::Int,
            Self::OrderedList(_) => SettingKind::OrderedList,
            Self::UnorderedSet(_) => SettingKind::UnorderedSet,
        }
    }
}

/// Mutable access to one typed field of a settings record
#[derive(Debug)]
pub enum FieldSlot<'a> {
    String(&'a mut Option<String>),
    Bool(&'a mut Option<bool>),
    Int(&'a mut Option<i64>),
    OrderedList(&'a mut Option<Vec<String>>),
    UnorderedSet(&'a mut Option<BTreeSet<String>>),
}

impl FieldSlot<'_> {
    /// The semantic type the slot was declared with
    pub fn kind(&self) -> SettingKind {
        match self {
            Self::String(_) => SettingKind::String,
            Self::Bool(_) => SettingKind::Bool,
            Self::Int(_) => SettingKind::Int,
            Self::OrderedList(_) => SettingKind::OrderedList,
            Self::UnorderedSet(_) => SettingKind::UnorderedSet,
        }
    }

    /// Write a value into the slot
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::SlotMismatch`] if the value's kind differs
    /// from the slot's declared kind. An ordered list is never silently
    /// reinterpreted as a set, or the other way round.
    pub fn write(self, field: &str, value: TypedValue) -> Result<(), StructuralError> {
        match (self, value) {
            (Self::String(slot), TypedValue::String(v)) => *slot = Some(v),
            (Self::Bool(slot), TypedValue::Bool(v)) => *slot = Some(v),
            (Self::Int(slot), TypedValue::Int(v)) => *slot = Some(v),
            (Self::OrderedList(slot), TypedValue::OrderedList(v)) => *slot = Some(v),
            (Self::UnorderedSet(slot), TypedValue::UnorderedSet(v)) => *slot = Some(v),
            (slot, value) => {
                return Err(StructuralError::SlotMismatch {
                    field: field.to_string(),
                    declared: slot.kind(),
                    offered: value.kind(),
                })
            }
        }
        Ok(())
    }
}

/// A statically declared record the reconciliation engine can populate
///
/// Implement it with [`settings_record!`] rather than by hand so the
/// descriptor table and the slot lookup cannot drift apart.
pub trait SettingsRecord: Default {
    /// Every typed field, in declaration order
    const FIELDS: &'static [FieldDescriptor];

    /// Mutable access to the typed field with this identifier
    fn slot_mut(&mut self, field: &str) -> Option<FieldSlot<'_>>;

    /// Store the normalized JSON of the complete settings map
    fn set_raw(&mut self, raw: String);

    /// The stored raw passthrough, if any
    fn raw(&self) -> Option<&str>;

    /// The descriptor for a field identifier
    fn descriptor(field: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|d| d.name == field)
    }
}

/// Find the slot for `field` on `record`
///
/// # Errors
///
/// Returns [`StructuralError::MissingField`] naming the registry key when the
/// record declares no such field. That is registry/record drift, never bad
/// input data.
pub fn locate<'r, R: SettingsRecord>(
    record: &'r mut R,
    key: &str,
    field: &str,
) -> Result<FieldSlot<'r>, StructuralError> {
    record
        .slot_mut(field)
        .ok_or_else(|| StructuralError::MissingField {
            key: key.to_string(),
            field: field.to_string(),
        })
}

/// Declare a settings record and its [`SettingsRecord`] impl
///
/// Each typed field is written `name: Type => Kind`, where `Kind` is a
/// [`SettingKind`](crate::domain::SettingKind) variant. The slot lookup wraps
/// the field in the `FieldSlot` variant of the same name, so a `Type` that
/// does not match its `Kind` fails to compile. The raw passthrough field is
/// named after `raw:`.
macro_rules! settings_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $kind:ident,
            )*
        }
        raw: $raw:ident
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: $ty,
            )*

            /// Normalized JSON of the complete settings map, including keys
            /// that have no typed field
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub $raw: Option<String>,
        }

        impl $crate::core::reconcile::record::SettingsRecord for $name {
            const FIELDS: &'static [$crate::core::reconcile::record::FieldDescriptor] = &[
                $(
                    $crate::core::reconcile::record::FieldDescriptor {
                        name: stringify!($field),
                        kind: $crate::domain::SettingKind::$kind,
                    },
                )*
            ];

            fn slot_mut(
                &mut self,
                field: &str,
            ) -> Option<$crate::core::reconcile::record::FieldSlot<'_>> {
                $(
                    if field == stringify!($field) {
                        return Some($crate::core::reconcile::record::FieldSlot::$kind(
                            &mut self.$field,
                        ));
                    }
                )*
                None
            }

            fn set_raw(&mut self, raw: String) {
                self.$raw = Some(raw);
            }

            fn raw(&self) -> Option<&str> {
                self.$raw.as_deref()
            }
        }
    };
}

pub(crate) use settings_record;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    settings_record! {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        struct Widget {
            title: Option<String> => String,
            enabled: Option<bool> => Bool,
            size: Option<i64> => Int,
            order: Option<Vec<String>> => OrderedList,
            tags: Option<BTreeSet<String>> => UnorderedSet,
        }
        raw: widget_raw
    }

    #[test]
    fn test_fields_table_follows_declaration() {
        let names: Vec<_> = Widget::FIELDS.iter().map(|d| d.name).collect();
        assert_eq!(names, ["title", "enabled", "size", "order", "tags"]);
        assert_eq!(Widget::descriptor("size").unwrap().kind, SettingKind::Int);
        assert!(Widget::descriptor("widget_raw").is_none());
    }

    #[test]
    fn test_slot_kinds_match_descriptors() {
        let mut widget = Widget::default();
        for descriptor in Widget::FIELDS {
            let slot = widget.slot_mut(descriptor.name).unwrap();
            assert_eq!(slot.kind(), descriptor.kind);
        }
    }

    #[test]
    fn test_locate_and_write() {
        let mut widget = Widget::default();
        locate(&mut widget, "size", "size")
            .unwrap()
            .write("size", TypedValue::Int(3))
            .unwrap();
        assert_eq!(widget.size, Some(3));
        assert_eq!(widget.title, None);
    }

    #[test]
    fn test_locate_missing_field() {
        let mut widget = Widget::default();
        let err = locate(&mut widget, "widget.color", "widget_color").unwrap_err();
        assert_eq!(
            err,
            StructuralError::MissingField {
                key: "widget.color".to_string(),
                field: "widget_color".to_string(),
            }
        );
    }

    #[test]
    fn test_raw_field_is_not_a_slot() {
        let mut widget = Widget::default();
        assert!(widget.slot_mut("widget_raw").is_none());
        widget.set_raw("{}".to_string());
        assert_eq!(widget.raw(), Some("{}"));
    }

    #[test]
    fn test_write_ordered_list_into_set_slot_is_rejected() {
        let mut widget = Widget::default();
        let slot = widget.slot_mut("tags").unwrap();
        let err = slot
            .write("tags", TypedValue::OrderedList(vec!["a".to_string()]))
            .unwrap_err();
        assert_eq!(
            err,
            StructuralError::SlotMismatch {
                field: "tags".to_string(),
                declared: SettingKind::UnorderedSet,
                offered: SettingKind::OrderedList,
            }
        );
        assert_eq!(widget.tags, None);
    }

    #[test]
    fn test_unset_fields_are_not_serialized() {
        let widget = Widget {
            enabled: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&widget).unwrap(),
            serde_json::json!({"enabled": false})
        );
    }
}
