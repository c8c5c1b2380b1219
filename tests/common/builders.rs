use std::cell::{Cell, RefCell};

use task_params::{
    MergeInput, MergeParameters, OutputTarget, PageNumber, PageRange, PdfPageTransition,
    PdfPageTransitionStyle, PdfSource, RotateParameters, Rotation, SetPagesTransitionParameters,
    Submitted, TaskExecutor, TaskFailure, TaskKind, TaskParameters, UnpackParameters,
};

pub fn page(n: u32) -> PageNumber {
    PageNumber::new(n).unwrap()
}

pub fn range(start: u32, end: u32) -> PageRange {
    PageRange::new(page(start), page(end))
}

/// Unpack into `/out` from the given files.
pub fn unpack_params(files: &[&str], overwrite: bool) -> UnpackParameters {
    let mut params = UnpackParameters::new(OutputTarget::directory("/out", overwrite));
    for file in files {
        params.add_source(PdfSource::file(*file));
    }
    params
}

pub fn fade(transition_duration: u32, display_duration: u32) -> PdfPageTransition {
    PdfPageTransition::new(
        PdfPageTransitionStyle::Fade,
        transition_duration,
        display_duration,
    )
}

/// Transitions for `in.pdf` written to `out.pdf`, no transition set yet.
pub fn transition_params() -> SetPagesTransitionParameters {
    let mut params = SetPagesTransitionParameters::new();
    params.base_mut().set_source(PdfSource::file("in.pdf"));
    params
        .base_mut()
        .set_output(OutputTarget::single_file("out.pdf", false));
    params
}

pub fn rotate_params(default: Rotation) -> RotateParameters {
    let mut params = RotateParameters::with_default_rotation(default);
    params.base_mut().set_source(PdfSource::file("in.pdf"));
    params
        .base_mut()
        .set_output(OutputTarget::single_file("out.pdf", true));
    params
}

/// Merge of the given files, each with its page ranges.
pub fn merge_params(inputs: &[(&str, &[(u32, u32)])]) -> MergeParameters {
    let mut params = MergeParameters::new(OutputTarget::single_file("merged.pdf", false));
    for (file, ranges) in inputs {
        params.add_input(MergeInput::with_ranges(
            PdfSource::file(*file),
            ranges.iter().map(|(s, e)| range(*s, *e)),
        ));
    }
    params
}

/// Executor recording the parameters it ran, optionally failing.
pub struct RecordingExecutor {
    kind: TaskKind,
    fail_with: Option<String>,
    pub calls: Cell<usize>,
    pub seen: RefCell<Vec<TaskParameters>>,
}

impl RecordingExecutor {
    pub fn new(kind: TaskKind) -> Self {
        Self {
            kind,
            fail_with: None,
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(kind: TaskKind, message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(kind)
        }
    }
}

impl TaskExecutor for RecordingExecutor {
    fn kind(&self) -> TaskKind {
        self.kind
    }

    fn execute(&self, params: &Submitted<TaskParameters>) -> Result<(), TaskFailure> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push((**params).clone());
        match &self.fail_with {
            Some(message) => Err(TaskFailure::new(self.kind, message.clone())),
            None => Ok(()),
        }
    }
}
