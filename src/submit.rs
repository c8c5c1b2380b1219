//! Submission: the single validation point between construction and execution.

use std::ops::Deref;

use crate::identity::{ContentKey, TaskParams, content_key};
use crate::validation::{ViolationReport, validate};

/// A validated parameter object, frozen for execution.
///
/// Only shared access to the parameters is possible, so nothing reachable
/// from them can change between validation and execution.
///
/// ```compile_fail
/// use task_params::{OutputTarget, PdfSource, UnpackParameters, submit};
///
/// let mut params = UnpackParameters::new(OutputTarget::directory("/out", false));
/// params.add_source(PdfSource::file("a.pdf"));
/// let submitted = submit(params).unwrap();
/// submitted.add_source(PdfSource::file("b.pdf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Submitted<P> {
    params: P,
    key: Option<ContentKey>,
}

impl<P: TaskParams> Submitted<P> {
    /// Key computed at submission, `None` for objects holding live streams.
    pub fn content_key(&self) -> Option<&ContentKey> {
        self.key.as_ref()
    }

    /// Gives the parameters back for another round of changes.
    /// They have to be submitted again before running.
    pub fn into_inner(self) -> P {
        self.params
    }

    /// Converts the payload, e.g. a concrete variant into [`crate::TaskParameters`].
    /// Validity and the content key carry over unchanged.
    pub fn map_into<Q>(self) -> Submitted<Q>
    where
        Q: TaskParams + From<P>,
    {
        Submitted {
            params: Q::from(self.params),
            key: self.key,
        }
    }
}

impl<P> Deref for Submitted<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.params
    }
}

/// Validates `params` once and freezes them, or returns every violation found.
pub fn submit<P: TaskParams>(params: P) -> Result<Submitted<P>, ViolationReport> {
    let report = validate(&params);
    if !report.is_valid() {
        log::info!(
            "Rejected {} parameters with {} violation(s)",
            params.kind(),
            report.len()
        );
        return Err(report);
    }

    let key = content_key(&params);
    log::debug!(
        "Submitted {} parameters, content key {}",
        params.kind(),
        key.as_ref().map_or("<stream>", ContentKey::as_str)
    );
    Ok(Submitted { params, key })
}
