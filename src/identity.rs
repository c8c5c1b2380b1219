//! Value identity of parameter objects.
//!
//! Equality and hashing are derived structurally on every parameter type.
//! The content key extends that identity beyond one process: equal objects
//! without live streams always produce the same key.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::parameters::{
    MergeParameters, RotateParameters, SetPagesTransitionParameters, TaskKind, TaskParameters,
    UnpackParameters,
};
use crate::validation::Validate;

/// Common surface of every parameter object.
pub trait TaskParams: Validate + Serialize + Eq + Hash {
    fn kind(&self) -> TaskKind;

    /// True when the object carries a live stream handle.
    fn holds_stream(&self) -> bool;

    /// Canonical JSON bytes the content key is computed from.
    fn canonical_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

macro_rules! impl_task_params {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl TaskParams for $ty {
                fn kind(&self) -> TaskKind {
                    $kind
                }

                fn holds_stream(&self) -> bool {
                    <$ty>::holds_stream(self)
                }
            }
        )*
    };
}

impl_task_params! {
    UnpackParameters => TaskKind::Unpack,
    SetPagesTransitionParameters => TaskKind::SetPagesTransition,
    RotateParameters => TaskKind::Rotate,
    MergeParameters => TaskKind::Merge,
}

impl TaskParams for TaskParameters {
    fn kind(&self) -> TaskKind {
        TaskParameters::kind(self)
    }

    fn holds_stream(&self) -> bool {
        TaskParameters::holds_stream(self)
    }

    /// The variant tag is already part of the key, only the payload is encoded.
    fn canonical_json(&self) -> serde_json::Result<Vec<u8>> {
        match self {
            TaskParameters::Unpack(p) => p.canonical_json(),
            TaskParameters::SetPagesTransition(p) => p.canonical_json(),
            TaskParameters::Rotate(p) => p.canonical_json(),
            TaskParameters::Merge(p) => p.canonical_json(),
        }
    }
}

/// Hex encoded SHA-256 of a task kind and its canonical JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable key for caching and deduplication.
///
/// `None` when `params` holds a live stream: a stream is identified by its
/// handle, not by content, so no key may outlive the process.
pub fn content_key<P: TaskParams>(params: &P) -> Option<ContentKey> {
    if params.holds_stream() {
        return None;
    }

    let json = match params.canonical_json() {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Cannot serialize {} parameters for content key: {}", params.kind(), e);
            return None;
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(params.kind().as_str().as_bytes());
    hasher.update([0u8]);
    hasher.update(&json);
    Some(ContentKey(hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputTarget;
    use crate::source::PdfSource;
    use crate::stream::OutputStream;

    fn unpack(overwrite: bool) -> UnpackParameters {
        let mut params = UnpackParameters::new(OutputTarget::directory("/out", overwrite));
        params.add_source(PdfSource::file("a.pdf"));
        params
    }

    #[test]
    fn test_equal_objects_share_a_key() {
        let key = content_key(&unpack(false)).unwrap();
        assert_eq!(content_key(&unpack(false)), Some(key.clone()));
        assert_eq!(key.as_str().len(), 64);
        assert_ne!(content_key(&unpack(true)), Some(key));
    }

    #[test]
    fn test_wrapped_and_bare_variant_share_a_key() {
        let wrapped = TaskParameters::from(unpack(false));
        assert_eq!(content_key(&wrapped), content_key(&unpack(false)));
    }

    #[test]
    fn test_kind_is_part_of_the_key() {
        let rotate = TaskParameters::from(RotateParameters::new());
        let transition = TaskParameters::from(SetPagesTransitionParameters::new());
        assert_ne!(content_key(&rotate), content_key(&transition));
    }

    #[test]
    fn test_stream_holders_have_no_key() {
        let params = UnpackParameters::new(OutputTarget::stream(OutputStream::writer(
            Vec::<u8>::new(),
        )));
        assert!(content_key(&params).is_none());
    }
}
