//! Input source descriptors.
//!
//! A source only describes where a document comes from. Opening and reading
//! it is up to the executor, except for stream sources which already carry an
//! open handle.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::stream::InputStream;
use crate::validation::{
    Constrained, Constraint, ConstraintTable, Field, FieldRule, Validate, Walker,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileSource {
    pub path: PathBuf,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StreamSource {
    pub name: String,
    pub stream: InputStream,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BytesSource {
    pub name: String,
    #[serde(rename = "sha256", serialize_with = "serialize_digest")]
    pub bytes: Vec<u8>,
    pub password: Option<String>,
}

/// In-memory documents are identified by the digest of their content.
fn serialize_digest<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(Sha256::digest(bytes)))
}

/// One input document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PdfSource {
    File(FileSource),
    Stream(StreamSource),
    Bytes(BytesSource),
}

impl PdfSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        PdfSource::File(FileSource {
            path: path.into(),
            password: None,
        })
    }

    pub fn stream(name: impl Into<String>, stream: InputStream) -> Self {
        PdfSource::Stream(StreamSource {
            name: name.into(),
            stream,
            password: None,
        })
    }

    pub fn bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        PdfSource::Bytes(BytesSource {
            name: name.into(),
            bytes: bytes.into(),
            password: None,
        })
    }

    /// Sets the password needed to open the document.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        let password = Some(password.into());
        match &mut self {
            PdfSource::File(file) => file.password = password,
            PdfSource::Stream(stream) => stream.password = password,
            PdfSource::Bytes(bytes) => bytes.password = password,
        }
        self
    }

    /// Display name: file name for files, the given name otherwise.
    pub fn name(&self) -> &str {
        match self {
            PdfSource::File(file) => file
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default(),
            PdfSource::Stream(stream) => &stream.name,
            PdfSource::Bytes(bytes) => &bytes.name,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            PdfSource::File(file) => Some(&file.path),
            _ => None,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            PdfSource::File(file) => file.password.as_deref(),
            PdfSource::Stream(stream) => stream.password.as_deref(),
            PdfSource::Bytes(bytes) => bytes.password.as_deref(),
        }
    }

    /// True when this source carries a live stream handle.
    pub fn holds_stream(&self) -> bool {
        matches!(self, PdfSource::Stream(_))
    }
}

impl Validate for PdfSource {
    fn validate_into(&self, walker: &mut Walker) {
        match self {
            PdfSource::File(file) => file.validate_into(walker),
            PdfSource::Stream(stream) => stream.validate_into(walker),
            PdfSource::Bytes(bytes) => bytes.validate_into(walker),
        }
    }
}

impl Constrained for FileSource {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<FileSource> = ConstraintTable {
            fields: &[FieldRule {
                name: "path",
                constraints: &[Constraint::NotBlank],
                value: |file| Field::Text(file.path.to_str().unwrap_or("?")),
            }],
            rules: &[],
        };
        &TABLE
    }
}

impl Constrained for StreamSource {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<StreamSource> = ConstraintTable {
            fields: &[FieldRule {
                name: "name",
                constraints: &[Constraint::NotBlank],
                value: |stream| Field::Text(&stream.name),
            }],
            rules: &[],
        };
        &TABLE
    }
}

impl Constrained for BytesSource {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<BytesSource> = ConstraintTable {
            fields: &[
                FieldRule {
                    name: "name",
                    constraints: &[Constraint::NotBlank],
                    value: |bytes| Field::Text(&bytes.name),
                },
                FieldRule {
                    name: "bytes",
                    constraints: &[Constraint::NotEmpty],
                    value: |bytes| Field::Bytes(&bytes.bytes),
                },
            ],
            rules: &[],
        };
        &TABLE
    }
}
