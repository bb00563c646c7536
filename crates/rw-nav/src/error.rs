//! Error taxonomy for loading and validating navigation configuration.
//!
//! - [`SchemaError`]: the document cannot be interpreted (syntax error, wrong
//!   type, missing required field, wrong shape). Fatal, reported immediately.
//! - [`ValidationError`]: the document is well-formed but violates an
//!   invariant. Collected so one pass reports every problem.

use std::fmt;
use std::path::PathBuf;

use crate::loader::SourceFormat;

/// Position of an entry inside the configuration document.
///
/// Rendered as a field path, e.g. `sidebar[1].items[2]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// Location of a top-level field.
    #[must_use]
    pub fn field(name: &str) -> Self {
        Self(name.to_owned())
    }

    /// Nested field of this location.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self::field(name)
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Element of a sequence at this location.
    #[must_use]
    pub fn index(&self, idx: usize) -> Self {
        Self(format!("{}[{idx}]", self.0))
    }

    /// Path as a string slice (empty for the document root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Structurally malformed input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Source could not be parsed, or a field has the wrong type.
    #[error("{format} parse error: {message}")]
    Syntax {
        /// Source format being parsed.
        format: SourceFormat,
        /// Parser message (includes line/column when the parser reports one).
        message: String,
    },
    /// Required field is absent.
    #[error("{location}: missing required field `{field}`")]
    MissingField {
        /// Entry missing the field.
        location: Location,
        /// Field name.
        field: &'static str,
    },
    /// Entry has a shape that is not allowed at its position.
    #[error("{location}: {message}")]
    Shape {
        /// Offending entry.
        location: Location,
        /// What was expected.
        message: String,
    },
}

/// Kind of invariant violation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    /// `text` is empty or whitespace only.
    #[error("text cannot be empty")]
    EmptyText,
    /// `link` is empty.
    #[error("link cannot be empty")]
    EmptyLink,
    /// `link` is neither site-relative nor absolute http(s).
    #[error("link `{link}` must start with /, http:// or https://")]
    MalformedLink {
        /// Offending link.
        link: String,
    },
    /// Two or more siblings share a link.
    #[error("link `{link}` is used by {count} sibling items")]
    DuplicateLink {
        /// Shared link.
        link: String,
        /// Number of siblings using it.
        count: usize,
    },
    /// Site-relative link with no matching page.
    #[error("link `{link}` does not match any known page")]
    DanglingLink {
        /// Offending link.
        link: String,
    },
}

/// Semantically invalid entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Entry the error applies to. For duplicate links this is the group
    /// (or `nav`) holding the siblings.
    pub location: Location,
    /// Display text of that entry, when it has one.
    pub text: Option<String>,
    /// What is wrong.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub(crate) fn new(location: Location, text: Option<&str>, kind: ValidationErrorKind) -> Self {
        Self {
            location,
            text: text.map(str::to_owned),
            kind,
        }
    }

    /// Link the error refers to, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match &self.kind {
            ValidationErrorKind::MalformedLink { link }
            | ValidationErrorKind::DuplicateLink { link, .. }
            | ValidationErrorKind::DanglingLink { link } => Some(link),
            ValidationErrorKind::EmptyText | ValidationErrorKind::EmptyLink => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text.as_deref() {
            Some(text) if !text.trim().is_empty() => {
                write!(f, "{} (\"{}\"): {}", self.location, text.trim(), self.kind)
            }
            _ => write!(f, "{}: {}", self.location, self.kind),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Error returned by [`load`](crate::load) and [`load_file`](crate::load_file).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Navigation file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File extension does not map to a known format.
    #[error("Unsupported navigation file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Document is structurally malformed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    /// Document violates one or more invariants.
    #[error("Invalid navigation configuration:\n{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

impl LoadError {
    /// Collected validation errors (empty for other variants).
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

/// Error returned by [`SiteConfig::to_source`](crate::SiteConfig::to_source).
#[derive(Debug, thiserror::Error)]
#[error("{format} serialization error: {message}")]
pub struct SerializeError {
    /// Target format.
    pub format: SourceFormat,
    /// Serializer message.
    pub message: String,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
