use std::fmt::Write as _;

use super::constraint::{Constraint, ConstraintKind, ConstraintTable, Field};
use super::{Violation, ViolationReport};

enum Segment {
    Field(&'static str),
    Index(usize),
    Key(String),
}

/// Depth-first walker collecting every violation reachable from a root.
///
/// Holds the current field path so nested violations come out qualified,
/// e.g. `inputs[1].page_selection[0].start`.
pub struct Walker {
    path: Vec<Segment>,
    violations: Vec<Violation>,
}

impl Walker {
    pub(crate) fn new() -> Self {
        Self {
            path: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub(crate) fn into_report(self) -> ViolationReport {
        ViolationReport::new(self.violations)
    }

    /// Evaluates every rule of `table` against `target`, descending into
    /// fields marked [`Constraint::Nested`].
    pub fn apply<T: 'static>(&mut self, target: &T, table: &ConstraintTable<T>) {
        for rule in table.fields {
            let value = (rule.value)(target);
            if let Field::Embedded(base) = value {
                base.validate_into(self);
                continue;
            }
            self.path.push(Segment::Field(rule.name));
            for constraint in rule.constraints {
                self.check(constraint, &value);
            }
            if rule.constraints.contains(&Constraint::Nested) {
                self.descend(&value);
            }
            self.path.pop();
        }

        for rule in table.rules {
            if let Err(message) = (rule.check)(target) {
                self.path.push(Segment::Field(rule.name));
                self.record(ConstraintKind::CrossField, message);
                self.path.pop();
            }
        }
    }

    fn check(&mut self, constraint: &Constraint, value: &Field<'_>) {
        let failure = match (constraint, value) {
            (Constraint::Nested, _) => None,

            (Constraint::Required, Field::Absent) => Some("is required".to_string()),
            (Constraint::Required, _) => None,

            (Constraint::NotEmpty, Field::Absent) => Some("must not be empty".to_string()),
            (Constraint::NotEmpty, field) => match collection_len(field) {
                Some(0) => Some("must not be empty".to_string()),
                Some(_) => None,
                None => return self.mismatch(constraint),
            },

            (Constraint::NotBlank, Field::Absent) => None,
            (Constraint::NotBlank, Field::Text(text)) => text
                .trim()
                .is_empty()
                .then(|| "must not be blank".to_string()),

            (Constraint::OneOf(_), Field::Absent) => None,
            (Constraint::OneOf(allowed), Field::Tag(tag) | Field::Tagged(tag, _)) => {
                (!allowed.contains(tag)).then(|| {
                    format!(
                        "'{}' is not allowed, expected one of [{}]",
                        tag,
                        allowed.join(", ")
                    )
                })
            }

            (Constraint::Min(_), Field::Absent) => None,
            (Constraint::Min(min), Field::Int(value)) => (value < min)
                .then(|| format!("must be greater than or equal to {}, got {}", min, value)),

            _ => return self.mismatch(constraint),
        };

        if let (Some(message), Some(kind)) = (failure, constraint.kind()) {
            self.record(kind, message);
        }
    }

    fn descend(&mut self, value: &Field<'_>) {
        match value {
            Field::Absent => {}
            Field::Node(node) | Field::Tagged(_, node) => node.validate_into(self),
            Field::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.path.push(Segment::Index(index));
                    item.validate_into(self);
                    self.path.pop();
                }
            }
            Field::Map(entries) => {
                for (key, item) in entries {
                    self.path.push(Segment::Key(key.clone()));
                    item.validate_into(self);
                    self.path.pop();
                }
            }
            _ => self.mismatch(&Constraint::Nested),
        }
    }

    fn record(&mut self, constraint: ConstraintKind, message: String) {
        let path = self.current_path();
        self.violations.push(Violation {
            path,
            constraint,
            message,
        });
    }

    /// A table attached a constraint to a field shape it cannot check.
    fn mismatch(&self, constraint: &Constraint) {
        log::warn!(
            "Constraint {:?} cannot be applied to field '{}', ignored",
            constraint,
            self.current_path()
        );
    }

    fn current_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                Segment::Index(index) => {
                    let _ = write!(out, "[{}]", index);
                }
                Segment::Key(key) => {
                    let _ = write!(out, "[{}]", key);
                }
            }
        }
        out
    }
}

fn collection_len(field: &Field<'_>) -> Option<usize> {
    match field {
        Field::Text(text) => Some(text.len()),
        Field::Bytes(bytes) => Some(bytes.len()),
        Field::List(items) => Some(items.len()),
        Field::Map(entries) => Some(entries.len()),
        _ => None,
    }
}
