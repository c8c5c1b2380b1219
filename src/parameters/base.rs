use serde::Serialize;

use crate::output::OutputTarget;
use crate::source::PdfSource;
use crate::validation::{Constrained, Constraint, ConstraintTable, Field, FieldRule};

/// Fields shared by every task working on exactly one input document.
///
/// Embedded by value in the parameter types built on it. The output is
/// stored here but each task registers its own output constraints, since the
/// accepted output types differ from task to task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SingleSourceBase {
    source: Option<PdfSource>,
    output: Option<OutputTarget>,
}

impl SingleSourceBase {
    pub fn new(source: PdfSource, output: OutputTarget) -> Self {
        Self {
            source: Some(source),
            output: Some(output),
        }
    }

    pub fn source(&self) -> Option<&PdfSource> {
        self.source.as_ref()
    }

    /// Sets the input document, returning the one it replaced.
    pub fn set_source(&mut self, source: PdfSource) -> Option<PdfSource> {
        self.source.replace(source)
    }

    pub fn output(&self) -> Option<&OutputTarget> {
        self.output.as_ref()
    }

    /// Sets the output target, returning the one it replaced.
    pub fn set_output(&mut self, output: OutputTarget) -> Option<OutputTarget> {
        self.output.replace(output)
    }

    pub fn holds_stream(&self) -> bool {
        self.source.as_ref().is_some_and(PdfSource::holds_stream)
            || self.output.as_ref().is_some_and(OutputTarget::is_stream)
    }

    /// Output field for the owning task's table.
    pub(crate) fn output_field(&self) -> Field<'_> {
        match &self.output {
            Some(output) => output.as_field(),
            None => Field::Absent,
        }
    }
}

fn base_source(base: &SingleSourceBase) -> Field<'_> {
    match &base.source {
        Some(source) => Field::Node(source),
        None => Field::Absent,
    }
}

impl Constrained for SingleSourceBase {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<SingleSourceBase> = ConstraintTable {
            fields: &[FieldRule {
                name: "source",
                constraints: &[Constraint::Required, Constraint::Nested],
                value: base_source,
            }],
            rules: &[],
        };
        &TABLE
    }
}
