//! Live stream handles carried by sources and output targets.
//!
//! Handles compare and hash by identity, never by content: two handles are
//! equal only when one is a clone of the other.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::sync::{Arc, LockResult, Mutex, MutexGuard};

use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Shared handle to an open stream, identified by a process-unique id.
pub struct StreamHandle<S: ?Sized> {
    id: Uuid,
    inner: Arc<Mutex<S>>,
}

/// Stream a task writes its result to.
pub type OutputStream = StreamHandle<dyn Write + Send>;

/// Stream a task reads a document from.
pub type InputStream = StreamHandle<dyn Read + Send>;

impl StreamHandle<dyn Write + Send> {
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            id: Uuid::new_v4(),
            inner: Arc::new(Mutex::new(writer)),
        }
    }
}

impl StreamHandle<dyn Read + Send> {
    pub fn reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            id: Uuid::new_v4(),
            inner: Arc::new(Mutex::new(reader)),
        }
    }
}

impl<S: ?Sized> StreamHandle<S> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Locks the underlying stream for exclusive use by the executor.
    pub fn lock(&self) -> LockResult<MutexGuard<'_, S>> {
        self.inner.lock()
    }
}

impl<S: ?Sized> Clone for StreamHandle<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ?Sized> PartialEq for StreamHandle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S: ?Sized> Eq for StreamHandle<S> {}

impl<S: ?Sized> Hash for StreamHandle<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<S: ?Sized> fmt::Debug for StreamHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle").field("id", &self.id).finish()
    }
}

impl<S: ?Sized> Serialize for StreamHandle<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.id.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_compare_by_identity() {
        let a = OutputStream::writer(Vec::<u8>::new());
        let b = OutputStream::writer(Vec::<u8>::new());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_writes_reach_the_shared_stream() {
        let handle = OutputStream::writer(Vec::<u8>::new());
        let clone = handle.clone();
        clone.lock().unwrap().write_all(b"pdf").unwrap();
        assert_eq!(handle.id(), clone.id());
    }

    #[test]
    fn test_reader_handle_reads() {
        let handle = InputStream::reader(std::io::Cursor::new(b"%PDF".to_vec()));
        let mut buf = String::new();
        handle.lock().unwrap().read_to_string(&mut buf).unwrap();
        assert_eq!(buf, "%PDF");
    }
}
