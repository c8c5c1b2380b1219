use serde::Serialize;

use crate::output::{OutputTarget, OutputType};
use crate::page::{PageNumber, PageRange};
use crate::source::PdfSource;
use crate::validation::{
    Constrained, Constraint, ConstraintTable, CrossFieldRule, Field, FieldRule, Validate,
};
use crate::view::FrozenList;

/// One document taking part in a merge, with the pages to take from it.
/// An empty selection takes every page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MergeInput {
    source: PdfSource,
    page_selection: Vec<PageRange>,
}

impl MergeInput {
    pub fn new(source: PdfSource) -> Self {
        Self {
            source,
            page_selection: Vec::new(),
        }
    }

    /// Convenience constructor selecting the given ranges.
    pub fn with_ranges(source: PdfSource, ranges: impl IntoIterator<Item = PageRange>) -> Self {
        Self {
            source,
            page_selection: ranges.into_iter().collect(),
        }
    }

    pub fn source(&self) -> &PdfSource {
        &self.source
    }

    pub fn add_page_range(&mut self, range: PageRange) {
        self.page_selection.push(range);
    }

    pub fn page_selection(&self) -> FrozenList<'_, PageRange> {
        FrozenList::new(&self.page_selection)
    }

    /// Whether `page` is part of the selection.
    pub fn includes(&self, page: PageNumber) -> bool {
        self.page_selection.is_empty() || self.page_selection.iter().any(|r| r.contains(page))
    }
}

fn input_ranges(input: &MergeInput) -> Field<'_> {
    Field::List(
        input
            .page_selection
            .iter()
            .map(|r| r as &dyn Validate)
            .collect(),
    )
}

fn ranges_are_disjoint(input: &MergeInput) -> Result<(), String> {
    let mut ranges: Vec<&PageRange> = input
        .page_selection
        .iter()
        .filter(|r| r.start <= r.end)
        .collect();
    ranges.sort_by_key(|r| r.start);
    for pair in ranges.windows(2) {
        if pair[1].start <= pair[0].end {
            return Err(format!(
                "page ranges {}-{} and {}-{} overlap",
                pair[0].start, pair[0].end, pair[1].start, pair[1].end
            ));
        }
    }
    Ok(())
}

impl Constrained for MergeInput {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<MergeInput> = ConstraintTable {
            fields: &[
                FieldRule {
                    name: "source",
                    constraints: &[Constraint::Nested],
                    value: |input| Field::Node(&input.source),
                },
                FieldRule {
                    name: "page_selection",
                    constraints: &[Constraint::Nested],
                    value: input_ranges,
                },
            ],
            rules: &[CrossFieldRule {
                name: "page_selection",
                check: ranges_are_disjoint,
            }],
        };
        &TABLE
    }
}

/// Parameters for merging several documents into one.
///
/// Inputs are append-only and each input's selection is exposed read-only:
///
/// ```compile_fail
/// use task_params::{MergeInput, MergeParameters, OutputTarget, PdfSource};
///
/// let mut params = MergeParameters::new(OutputTarget::single_file("out.pdf", false));
/// params.add_input(MergeInput::new(PdfSource::file("a.pdf")));
/// params.inputs()[0].add_page_range(task_params::PageRange::single(task_params::PageNumber::FIRST));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MergeParameters {
    output: OutputTarget,
    inputs: Vec<MergeInput>,
    blank_page_if_odd: bool,
}

impl MergeParameters {
    pub const ACCEPTED_OUTPUTS: &'static [&'static str] =
        &[OutputType::SingleFile.as_str(), OutputType::Stream.as_str()];

    pub fn new(output: OutputTarget) -> Self {
        Self {
            output,
            inputs: Vec::new(),
            blank_page_if_odd: false,
        }
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    pub fn set_output(&mut self, output: OutputTarget) -> OutputTarget {
        std::mem::replace(&mut self.output, output)
    }

    /// Appends an input. Documents are merged in insertion order.
    pub fn add_input(&mut self, input: MergeInput) {
        self.inputs.push(input);
    }

    pub fn inputs(&self) -> FrozenList<'_, MergeInput> {
        FrozenList::new(&self.inputs)
    }

    /// Add a blank page after each input with an odd number of pages.
    pub fn blank_page_if_odd(&self) -> bool {
        self.blank_page_if_odd
    }

    pub fn set_blank_page_if_odd(&mut self, blank_page_if_odd: bool) {
        self.blank_page_if_odd = blank_page_if_odd;
    }

    pub fn holds_stream(&self) -> bool {
        self.output.is_stream() || self.inputs.iter().any(|i| i.source.holds_stream())
    }
}

fn merge_inputs(params: &MergeParameters) -> Field<'_> {
    Field::List(params.inputs.iter().map(|i| i as &dyn Validate).collect())
}

impl Constrained for MergeParameters {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<MergeParameters> = ConstraintTable {
            fields: &[
                FieldRule {
                    name: "output",
                    constraints: &[
                        Constraint::OneOf(MergeParameters::ACCEPTED_OUTPUTS),
                        Constraint::Nested,
                    ],
                    value: |p| p.output.as_field(),
                },
                FieldRule {
                    name: "inputs",
                    constraints: &[Constraint::NotEmpty, Constraint::Nested],
                    value: merge_inputs,
                },
            ],
            rules: &[],
        };
        &TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ConstraintKind;

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    fn range(start: u32, end: u32) -> PageRange {
        PageRange::new(page(start), page(end))
    }

    #[test]
    fn test_includes_uses_selection() {
        let mut input = MergeInput::new(PdfSource::file("a.pdf"));
        assert!(input.includes(page(42)));
        input.add_page_range(range(2, 4));
        input.add_page_range(PageRange::single(page(9)));
        assert!(input.includes(page(3)));
        assert!(input.includes(page(9)));
        assert!(!input.includes(page(5)));
        assert_eq!(input.page_selection().len(), 2);
    }

    #[test]
    fn test_collections_of_collections_report_full_paths() {
        let mut params = MergeParameters::new(OutputTarget::single_file("out.pdf", true));
        params.add_input(MergeInput::with_ranges(PdfSource::file("a.pdf"), [range(1, 2)]));
        params.add_input(MergeInput::with_ranges(
            PdfSource::file(""),
            [range(1, 3), range(8, 5)],
        ));

        let report = params.validate();
        let paths: Vec<&str> = report.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["inputs[1].source.path", "inputs[1].page_selection[1].end"]
        );
    }

    #[test]
    fn test_overlapping_ranges() {
        let input = MergeInput::with_ranges(PdfSource::file("a.pdf"), [range(5, 9), range(1, 5)]);
        let report = input.validate();
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].path, "page_selection");
        assert_eq!(report.violations()[0].constraint, ConstraintKind::CrossField);

        let disjoint = MergeInput::with_ranges(PdfSource::file("a.pdf"), [range(6, 9), range(1, 5)]);
        assert!(disjoint.validate().is_valid());
    }

    #[test]
    fn test_empty_merge_with_directory_output() {
        let params = MergeParameters::new(OutputTarget::directory("/out", false));
        let report = params.validate();
        assert_eq!(report.len(), 2);
        assert_eq!(report.of_kind(ConstraintKind::EnumMembership).count(), 1);
        assert_eq!(report.of_kind(ConstraintKind::NotEmpty).count(), 1);
    }

    #[test]
    fn test_input_order_is_part_of_equality() {
        let a_input = MergeInput::new(PdfSource::file("a.pdf"));
        let b_input = MergeInput::new(PdfSource::file("b.pdf"));

        let mut first = MergeParameters::new(OutputTarget::single_file("out.pdf", false));
        first.add_input(a_input.clone());
        first.add_input(b_input.clone());
        let mut second = MergeParameters::new(OutputTarget::single_file("out.pdf", false));
        second.add_input(b_input);
        second.add_input(a_input);
        assert_ne!(first, second);
    }
}
