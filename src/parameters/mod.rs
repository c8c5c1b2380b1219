//! Parameter objects, one type per task kind.
//!
//! Each type is built mutable, populated, then handed to
//! [`crate::submit::submit`] which validates it and freezes it.

mod base;
mod merge;
mod rotate;
mod transition;
mod unpack;

use std::fmt;

use serde::Serialize;

use crate::validation::{Validate, Walker};

pub use base::SingleSourceBase;
pub use merge::{MergeInput, MergeParameters};
pub use rotate::{RotateParameters, Rotation};
pub use transition::{PdfPageTransition, PdfPageTransitionStyle, SetPagesTransitionParameters};
pub use unpack::UnpackParameters;

/// Tag of a parameter variant, naming the task it configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Unpack,
    SetPagesTransition,
    Rotate,
    Merge,
}

impl TaskKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TaskKind::Unpack => "unpack",
            TaskKind::SetPagesTransition => "set_pages_transition",
            TaskKind::Rotate => "rotate",
            TaskKind::Merge => "merge",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any parameter object. Values of different variants are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum TaskParameters {
    Unpack(UnpackParameters),
    SetPagesTransition(SetPagesTransitionParameters),
    Rotate(RotateParameters),
    Merge(MergeParameters),
}

impl TaskParameters {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskParameters::Unpack(_) => TaskKind::Unpack,
            TaskParameters::SetPagesTransition(_) => TaskKind::SetPagesTransition,
            TaskParameters::Rotate(_) => TaskKind::Rotate,
            TaskParameters::Merge(_) => TaskKind::Merge,
        }
    }

    /// True when any source or output of the task is a live stream.
    pub fn holds_stream(&self) -> bool {
        match self {
            TaskParameters::Unpack(p) => p.holds_stream(),
            TaskParameters::SetPagesTransition(p) => p.holds_stream(),
            TaskParameters::Rotate(p) => p.holds_stream(),
            TaskParameters::Merge(p) => p.holds_stream(),
        }
    }
}

impl Validate for TaskParameters {
    fn validate_into(&self, walker: &mut Walker) {
        match self {
            TaskParameters::Unpack(p) => p.validate_into(walker),
            TaskParameters::SetPagesTransition(p) => p.validate_into(walker),
            TaskParameters::Rotate(p) => p.validate_into(walker),
            TaskParameters::Merge(p) => p.validate_into(walker),
        }
    }
}

impl From<UnpackParameters> for TaskParameters {
    fn from(params: UnpackParameters) -> Self {
        TaskParameters::Unpack(params)
    }
}

impl From<SetPagesTransitionParameters> for TaskParameters {
    fn from(params: SetPagesTransitionParameters) -> Self {
        TaskParameters::SetPagesTransition(params)
    }
}

impl From<RotateParameters> for TaskParameters {
    fn from(params: RotateParameters) -> Self {
        TaskParameters::Rotate(params)
    }
}

impl From<MergeParameters> for TaskParameters {
    fn from(params: MergeParameters) -> Self {
        TaskParameters::Merge(params)
    }
}
