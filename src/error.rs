//! Error types.
//!
//! Mirrors the taxonomy in the core's design: resolution errors, type
//! mismatches and keyword violations are all reported as `ValidationError`
//! values (they differ only in `kind`); decode errors are a distinct type
//! because they can only happen after validation has already succeeded.
use crate::{paths::Path, primitive_type::PrimitiveType};
use serde_json::Value;
use std::{error, fmt};

/// Failure to build a schema node from a JSON document.
#[derive(Debug, PartialEq, Eq)]
pub enum CompilationError {
    /// The schema document is not shaped like a valid JSON Schema node
    /// (e.g. a non-object, non-boolean top-level value, or a keyword with
    /// the wrong JSON type).
    SchemaError(String),
}

impl error::Error for CompilationError {}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilationError::SchemaError(message) => {
                write!(f, "Schema compilation error: {message}")
            }
        }
    }
}

impl From<regex::Error> for CompilationError {
    fn from(error: regex::Error) -> Self {
        CompilationError::SchemaError(error.to_string())
    }
}

/// An error produced while resolving a `$ref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionErrorKind {
    /// No such property or array index along a JSON Pointer fragment.
    PointerNotFound,
    /// The scheme-handler registry (or the default opener) could not fetch
    /// the referenced document.
    Unreachable,
    /// The fetched document was not valid JSON (or not a valid schema node).
    Unparseable,
    /// The `$ref` string itself is malformed (e.g. an unparseable URI).
    MalformedReference,
    /// Following this reference would revisit one already being chased on
    /// the same branch without ever consuming any instance data (§4.5
    /// "cycle policy").
    Cycle,
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionErrorKind::PointerNotFound => write!(f, "no such property or index"),
            ResolutionErrorKind::Unreachable => write!(f, "could not be fetched"),
            ResolutionErrorKind::Unparseable => write!(f, "did not parse as a schema document"),
            ResolutionErrorKind::MalformedReference => write!(f, "is not a valid reference"),
            ResolutionErrorKind::Cycle => write!(f, "forms a cycle with no progress"),
        }
    }
}

/// Kinds of errors a `validate` call can report. Resolution and type
/// mismatches abort the branch they occur in (§7); keyword violations are
/// always produced by the keyword-validator set named in `keyword`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `$ref` resolution failed.
    Resolution {
        reference: String,
        kind: ResolutionErrorKind,
    },
    /// The instance kind is incompatible with the schema kind and the
    /// schema declares an explicit `type`.
    WrongType {
        expected: PrimitiveType,
        actual: PrimitiveType,
    },
    /// A keyword-validator reported a constraint failure.
    Keyword { keyword: &'static str, message: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::Resolution { reference, kind } => {
                write!(f, "Could not resolve reference '{reference}': {kind}")
            }
            ValidationErrorKind::WrongType { expected, actual } => {
                write!(f, "Wrong type. Expected {expected}, was {actual}.")
            }
            ValidationErrorKind::Keyword { message, .. } => f.write_str(message),
        }
    }
}

/// A single validation failure, keyed by both the instance path and the
/// schema path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub instance_path: Path,
    pub schema_path: Path,
    pub instance: Value,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    #[must_use]
    pub fn new(
        instance_path: Path,
        schema_path: Path,
        instance: Value,
        kind: ValidationErrorKind,
    ) -> Self {
        ValidationError {
            instance_path,
            schema_path,
            instance,
            kind,
        }
    }

    pub(crate) fn resolution(
        instance_path: Path,
        schema_path: Path,
        instance: Value,
        reference: impl Into<String>,
        kind: ResolutionErrorKind,
    ) -> Self {
        ValidationError::new(
            instance_path,
            schema_path,
            instance,
            ValidationErrorKind::Resolution {
                reference: reference.into(),
                kind,
            },
        )
    }

    pub(crate) fn wrong_type(
        instance_path: Path,
        schema_path: Path,
        instance: Value,
        expected: PrimitiveType,
    ) -> Self {
        let actual = PrimitiveType::of_instance(&instance);
        ValidationError::new(
            instance_path,
            schema_path,
            instance,
            ValidationErrorKind::WrongType { expected, actual },
        )
    }

    pub(crate) fn keyword(
        instance_path: Path,
        schema_path: Path,
        instance: Value,
        keyword: &'static str,
        message: impl Into<String>,
    ) -> Self {
        ValidationError::new(
            instance_path,
            schema_path,
            instance,
            ValidationErrorKind::Keyword {
                keyword,
                message: message.into(),
            },
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}'", self.kind, self.instance_path)
    }
}

impl error::Error for ValidationError {}

/// The non-empty collection of errors produced by a failed `validate` call.
pub type ValidationErrors = Vec<ValidationError>;

/// Failure to decode an already-validated instance into a typed value.
#[derive(Debug)]
pub struct DecodeError {
    pub path: Path,
    pub message: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to decode value at '{}': {}", self.path, self.message)
    }
}

impl error::Error for DecodeError {}

/// Top-level failure of a typed entry point (§4.7): either the instance
/// failed validation, or it validated but did not decode into the
/// requested type.
#[derive(Debug)]
pub enum Error {
    Validation(ValidationErrors),
    Decode(DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(errors) => {
                writeln!(f, "{} validation error(s):", errors.len())?;
                for error in errors {
                    writeln!(f, "  {error}")?;
                }
                Ok(())
            }
            Error::Decode(error) => write!(f, "{error}"),
        }
    }
}

impl error::Error for Error {}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

impl From<DecodeError> for Error {
    fn from(error: DecodeError) -> Self {
        Error::Decode(error)
    }
}
