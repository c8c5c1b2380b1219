//! Constraint primitives and the per-type registration tables that attach
//! them to fields.

use serde::Serialize;

use super::Validate;

/// Kind of a failed constraint, as recorded in a [`super::Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    Required,
    NotEmpty,
    NotBlank,
    EnumMembership,
    Min,
    CrossField,
}

/// A predicate attachable to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Optional field must hold a value.
    Required,
    /// List, map, text or buffer must hold at least one element. Absent fails too.
    NotEmpty,
    /// Text must contain something other than whitespace.
    NotBlank,
    /// Tag of a variant field must be one of the listed tags.
    OneOf(&'static [&'static str]),
    /// Integer must be greater than or equal to the bound.
    Min(i64),
    /// Validate the field's own table, and every element for collections.
    Nested,
}

impl Constraint {
    /// Kind recorded when this constraint fails. `Nested` never fails.
    pub fn kind(&self) -> Option<ConstraintKind> {
        match self {
            Constraint::Required => Some(ConstraintKind::Required),
            Constraint::NotEmpty => Some(ConstraintKind::NotEmpty),
            Constraint::NotBlank => Some(ConstraintKind::NotBlank),
            Constraint::OneOf(_) => Some(ConstraintKind::EnumMembership),
            Constraint::Min(_) => Some(ConstraintKind::Min),
            Constraint::Nested => None,
        }
    }
}

/// Shape of a field value as seen by the validation engine.
pub enum Field<'a> {
    /// Optional field without a value.
    Absent,
    Int(i64),
    Text(&'a str),
    Bytes(&'a [u8]),
    /// Plain tag without a nested payload to validate.
    Tag(&'static str),
    Node(&'a dyn Validate),
    /// Embedded base shape, validated in place without a path segment.
    Embedded(&'a dyn Validate),
    /// Variant value: its tag plus the payload to descend into.
    Tagged(&'static str, &'a dyn Validate),
    List(Vec<&'a dyn Validate>),
    /// Keyed collection, keys rendered into the violation path.
    Map(Vec<(String, &'a dyn Validate)>),
}

/// Constraints attached to one field of `T`.
pub struct FieldRule<T> {
    pub name: &'static str,
    pub constraints: &'static [Constraint],
    pub value: fn(&T) -> Field<'_>,
}

/// Compatibility predicate spanning several fields of `T`.
///
/// The check returns the violation message when the object is incompatible.
pub struct CrossFieldRule<T> {
    pub name: &'static str,
    pub check: fn(&T) -> Result<(), String>,
}

/// Registration table for a type, built once at definition time.
pub struct ConstraintTable<T: 'static> {
    pub fields: &'static [FieldRule<T>],
    pub rules: &'static [CrossFieldRule<T>],
}

/// Types whose validation is fully described by a [`ConstraintTable`].
pub trait Constrained: Sized + 'static {
    fn constraints() -> &'static ConstraintTable<Self>;
}
