//! Validated parameter objects for document-processing tasks.
//!
//! A caller builds a parameter object for one task kind, populates it, and
//! submits it. Submission validates the whole object graph once and either
//! returns a frozen [`Submitted`] value for an executor or a
//! [`ViolationReport`] listing every problem found.

pub mod config;
pub mod error;
pub mod execution;
pub mod identity;
pub mod output;
pub mod page;
pub mod parameters;
pub mod source;
pub mod stream;
pub mod submit;
pub mod validation;
pub mod view;

pub use config::{Config, ConfigError};
pub use error::{MisuseError, ParamsError, ParamsResult, TaskFailure};
pub use execution::{DedupeCache, ExecutionService, Outcome, TaskExecutor};
pub use identity::{ContentKey, TaskParams, content_key};
pub use output::{OutputTarget, OutputType};
pub use page::{PageNumber, PageOptions, PageRange};
pub use parameters::{
    MergeInput, MergeParameters, PdfPageTransition, PdfPageTransitionStyle, RotateParameters,
    Rotation, SetPagesTransitionParameters, SingleSourceBase, TaskKind, TaskParameters,
    UnpackParameters,
};
pub use source::PdfSource;
pub use stream::{InputStream, OutputStream};
pub use submit::{Submitted, submit};
pub use validation::{ConstraintKind, Validate, Violation, ViolationReport, validate};
pub use view::{FrozenList, FrozenMap};
