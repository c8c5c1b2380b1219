use serde::Serialize;

use crate::output::{OutputTarget, OutputType};
use crate::source::PdfSource;
use crate::validation::{Constrained, Constraint, ConstraintTable, Field, FieldRule, Validate};
use crate::view::FrozenList;

/// Parameters for extracting the attachments of one or more documents.
///
/// Sources are append-only: once added they can be read through
/// [`UnpackParameters::sources`] but not removed or reordered.
///
/// ```compile_fail
/// use task_params::{OutputTarget, PdfSource, UnpackParameters};
///
/// let mut params = UnpackParameters::new(OutputTarget::directory("/out", false));
/// params.add_source(PdfSource::file("a.pdf"));
/// params.sources().clear();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnpackParameters {
    output: OutputTarget,
    sources: Vec<PdfSource>,
}

impl UnpackParameters {
    pub const ACCEPTED_OUTPUTS: &'static [&'static str] =
        &[OutputType::Directory.as_str(), OutputType::Stream.as_str()];

    pub fn new(output: OutputTarget) -> Self {
        Self {
            output,
            sources: Vec::new(),
        }
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn set_output(&mut self, output: OutputTarget) -> OutputTarget {
        std::mem::replace(&mut self.output, output)
    }

    /// Appends a source. Sources are unpacked in insertion order.
    pub fn add_source(&mut self, source: PdfSource) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> FrozenList<'_, PdfSource> {
        FrozenList::new(&self.sources)
    }

    pub fn holds_stream(&self) -> bool {
        self.output.is_stream() || self.sources.iter().any(PdfSource::holds_stream)
    }
}

fn unpack_sources(params: &UnpackParameters) -> Field<'_> {
    Field::List(params.sources.iter().map(|s| s as &dyn Validate).collect())
}

impl Constrained for UnpackParameters {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<UnpackParameters> = ConstraintTable {
            fields: &[
                FieldRule {
                    name: "output",
                    constraints: &[
                        Constraint::OneOf(UnpackParameters::ACCEPTED_OUTPUTS),
                        Constraint::Nested,
                    ],
                    value: |p| p.output.as_field(),
                },
                FieldRule {
                    name: "sources",
                    constraints: &[Constraint::NotEmpty, Constraint::Nested],
                    value: unpack_sources,
                },
            ],
            rules: &[],
        };
        &TABLE
    }
}
