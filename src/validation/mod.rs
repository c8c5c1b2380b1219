//! Constraint validation for parameter objects.
//!
//! Every parameter type registers a [`ConstraintTable`] describing its fields.
//! [`validate`] walks the object graph depth-first through those tables and
//! returns every violation it finds in a single [`ViolationReport`].

mod constraint;
mod engine;

use serde::Serialize;

pub use constraint::{
    Constrained, Constraint, ConstraintKind, ConstraintTable, CrossFieldRule, Field, FieldRule,
};
pub use engine::Walker;

/// Anything the validation engine can walk.
pub trait Validate {
    /// Adds this value's violations to `walker`, under the walker's current path.
    fn validate_into(&self, walker: &mut Walker);

    /// Validates this value as a root. Shorthand for [`validate`].
    fn validate(&self) -> ViolationReport
    where
        Self: Sized,
    {
        validate(self)
    }
}

impl<T: Constrained> Validate for T {
    fn validate_into(&self, walker: &mut Walker) {
        walker.apply(self, T::constraints());
    }
}

/// Validates `root` and everything reachable from it through nested fields.
///
/// Never stops at the first failure and never mutates `root`: validating an
/// unchanged object twice yields equal reports.
pub fn validate(root: &dyn Validate) -> ViolationReport {
    let mut walker = Walker::new();
    root.validate_into(&mut walker);
    let report = walker.into_report();
    log::debug!("Validation finished with {} violation(s)", report.len());
    report
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Qualified field path, e.g. `transitions[3].display_duration`
    pub path: String,
    pub constraint: ConstraintKind,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All violations found in one validation pass, in traversal order.
/// Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationReport {
    violations: Vec<Violation>,
}

impl ViolationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Violations of the given kind.
    pub fn of_kind(&self, kind: ConstraintKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.constraint == kind)
    }

    /// Violations at exactly `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.path == path)
    }

    /// `Ok(())` for an empty report, the report itself otherwise.
    pub fn into_result(self) -> Result<(), ViolationReport> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "no violations");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ViolationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(path: &str, constraint: ConstraintKind) -> Violation {
        Violation {
            path: path.to_string(),
            constraint,
            message: "bad".to_string(),
        }
    }

    #[test]
    fn test_report_display_and_filters() {
        let report = ViolationReport::new(vec![
            violation("sources", ConstraintKind::NotEmpty),
            violation("output", ConstraintKind::EnumMembership),
        ]);
        assert_eq!(report.to_string(), "sources: bad; output: bad");
        assert_eq!(report.of_kind(ConstraintKind::NotEmpty).count(), 1);
        assert_eq!(report.at("output").count(), 1);
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ViolationReport::default();
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "no violations");
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_report_serializes_as_list() {
        let report = ViolationReport::new(vec![violation("sources", ConstraintKind::NotEmpty)]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!([
                {"path": "sources", "constraint": "not_empty", "message": "bad"}
            ])
        );
    }
}
