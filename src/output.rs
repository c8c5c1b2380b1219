//! Output targets a task writes its result to.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::stream::OutputStream;
use crate::validation::{
    Constrained, Constraint, ConstraintTable, Field, FieldRule, Validate, Walker,
};

/// Tag of an [`OutputTarget`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    SingleFile,
    Directory,
    Stream,
}

impl OutputType {
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputType::SingleFile => "single_file",
            OutputType::Directory => "directory",
            OutputType::Stream => "stream",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileOutput {
    pub path: PathBuf,
    pub overwrite: bool,
}

/// A directory receiving one or more output files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DirectoryOutput {
    pub path: PathBuf,
    pub overwrite: bool,
}

/// An already open stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StreamOutput {
    pub stream: OutputStream,
}

/// Where a task writes its result.
///
/// Which variants a task accepts is declared by its parameter type and only
/// checked during validation, so any target can be assembled first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputTarget {
    SingleFile(FileOutput),
    Directory(DirectoryOutput),
    Stream(StreamOutput),
}

impl OutputTarget {
    pub fn single_file(path: impl Into<PathBuf>, overwrite: bool) -> Self {
        OutputTarget::SingleFile(FileOutput {
            path: path.into(),
            overwrite,
        })
    }

    pub fn directory(path: impl Into<PathBuf>, overwrite: bool) -> Self {
        OutputTarget::Directory(DirectoryOutput {
            path: path.into(),
            overwrite,
        })
    }

    pub fn stream(stream: OutputStream) -> Self {
        OutputTarget::Stream(StreamOutput { stream })
    }

    pub fn output_type(&self) -> OutputType {
        match self {
            OutputTarget::SingleFile(_) => OutputType::SingleFile,
            OutputTarget::Directory(_) => OutputType::Directory,
            OutputTarget::Stream(_) => OutputType::Stream,
        }
    }

    /// Destination path, `None` for streams.
    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::SingleFile(file) => Some(&file.path),
            OutputTarget::Directory(dir) => Some(&dir.path),
            OutputTarget::Stream(_) => None,
        }
    }

    /// Whether existing files may be replaced. Streams are always written.
    pub fn overwrite(&self) -> bool {
        match self {
            OutputTarget::SingleFile(file) => file.overwrite,
            OutputTarget::Directory(dir) => dir.overwrite,
            OutputTarget::Stream(_) => true,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, OutputTarget::Stream(_))
    }

    /// Field value for a parameter table: the tag plus the payload to descend into.
    pub(crate) fn as_field(&self) -> Field<'_> {
        Field::Tagged(self.output_type().as_str(), self)
    }
}

impl Validate for OutputTarget {
    fn validate_into(&self, walker: &mut Walker) {
        match self {
            OutputTarget::SingleFile(file) => file.validate_into(walker),
            OutputTarget::Directory(dir) => dir.validate_into(walker),
            OutputTarget::Stream(_) => {}
        }
    }
}

fn path_field(path: &Path) -> Field<'_> {
    // Non UTF-8 paths are never blank.
    Field::Text(path.to_str().unwrap_or("?"))
}

impl Constrained for FileOutput {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<FileOutput> = ConstraintTable {
            fields: &[FieldRule {
                name: "path",
                constraints: &[Constraint::NotBlank],
                value: |file| path_field(&file.path),
            }],
            rules: &[],
        };
        &TABLE
    }
}

impl Constrained for DirectoryOutput {
    fn constraints() -> &'static ConstraintTable<Self> {
        static TABLE: ConstraintTable<DirectoryOutput> = ConstraintTable {
            fields: &[FieldRule {
                name: "path",
                constraints: &[Constraint::NotBlank],
                value: |dir| path_field(&dir.path),
            }],
            rules: &[],
        };
        &TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ConstraintKind;

    #[test]
    fn test_output_type_tags() {
        assert_eq!(
            OutputTarget::directory("/tmp/out", false).output_type(),
            OutputType::Directory
        );
        assert_eq!(OutputType::SingleFile.to_string(), "single_file");
    }

    #[test]
    fn test_blank_path_is_reported() {
        let report = OutputTarget::single_file("  ", true).validate();
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].path, "path");
        assert_eq!(report.violations()[0].constraint, ConstraintKind::NotBlank);
    }

    #[test]
    fn test_stream_target_has_nothing_to_check() {
        let target = OutputTarget::stream(OutputStream::writer(Vec::<u8>::new()));
        assert!(target.validate().is_valid());
        assert!(target.is_stream());
        assert!(target.path().is_none());
    }

    #[test]
    fn test_overwrite_flag_is_part_of_equality() {
        assert_eq!(
            OutputTarget::directory("/out", true),
            OutputTarget::directory("/out", true)
        );
        assert_ne!(
            OutputTarget::directory("/out", true),
            OutputTarget::directory("/out", false)
        );
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let json = serde_json::to_value(OutputTarget::directory("/out", false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "directory", "path": "/out", "overwrite": false})
        );
    }
}
