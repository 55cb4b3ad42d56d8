//! Unified error types for readiness-engine.
//!
//! Numeric operations degrade gracefully and only fail when an input cannot
//! be interpreted at all (an empty weight key set, an assessment record
//! without a type). Everything else is reported through `tracing` warnings
//! or the warning lists carried by the result types.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for readiness-engine operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReadinessError {
    /// Weight normalization was impossible
    #[error("Invalid weights: {context}")]
    InvalidWeights {
        context: String,
        #[source]
        source: WeightsErrorKind,
    },

    /// An assessment record could not be interpreted
    #[error("Malformed assessment record: {context}")]
    MalformedRecord {
        context: String,
        #[source]
        source: RecordErrorKind,
    },

    /// Engine input could not be decoded
    #[error("Invalid input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific weight error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WeightsErrorKind {
    #[error("Weight map is empty and no fallback keys were provided")]
    EmptyKeySet,
}

/// Specific assessment record error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RecordErrorKind {
    #[error("Record has no assessment type")]
    MissingType,

    #[error("Record is not a JSON object: {0}")]
    NotAnObject(String),
}

/// Specific input decoding error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for readiness-engine operations
pub type Result<T> = std::result::Result<T, ReadinessError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ReadinessError {
    /// Create an invalid-weights error with context
    pub fn invalid_weights(context: impl Into<String>, source: WeightsErrorKind) -> Self {
        Self::InvalidWeights {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid-weights error for an empty key set
    pub fn empty_weights(context: impl Into<String>) -> Self {
        Self::invalid_weights(context, WeightsErrorKind::EmptyKeySet)
    }

    /// Create a malformed-record error with context
    pub fn malformed_record(context: impl Into<String>, source: RecordErrorKind) -> Self {
        Self::MalformedRecord {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed-record error for a record without a type
    pub fn missing_type(context: impl Into<String>) -> Self {
        Self::malformed_record(context, RecordErrorKind::MissingType)
    }

    /// Create an input error with context
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ReadinessError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ReadinessError {
    fn from(err: serde_json::Error) -> Self {
        Self::input(
            "JSON deserialization",
            InputErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for ReadinessError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::input(
            "YAML deserialization",
            InputErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so an error raised while normalizing the
/// weights of one category inside a full assessment reads
/// `"assessment: category 'Data': subcategory weights"`.
///
/// # Example
///
/// ```
/// use readiness_engine::error::ErrorContext;
/// use readiness_engine::weights::normalize;
/// use readiness_engine::WeightMap;
///
/// let result = normalize(&WeightMap::new()).context("category weights");
/// assert!(result.unwrap_err().to_string().contains("category weights"));
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ReadinessError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ReadinessError, new_ctx: &str) -> ReadinessError {
    match err {
        ReadinessError::InvalidWeights {
            context: existing,
            source,
        } => ReadinessError::InvalidWeights {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReadinessError::MalformedRecord {
            context: existing,
            source,
        } => ReadinessError::MalformedRecord {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReadinessError::Input {
            context: existing,
            source,
        } => ReadinessError::Input {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ReadinessError::Io {
            path,
            message,
            source,
        } => ReadinessError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ReadinessError::Config(msg) => ReadinessError::Config(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns just the new context when the existing one is empty, otherwise
/// "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReadinessError::empty_weights("category weights");
        let display = err.to_string();
        assert!(
            display.contains("Invalid weights") && display.contains("category weights"),
            "unexpected message: {display}"
        );

        let err = ReadinessError::missing_type("record #2");
        assert!(err.to_string().contains("record #2"));
    }

    #[test]
    fn test_error_source_kind() {
        use std::error::Error as _;

        let err = ReadinessError::missing_type("record #0");
        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert_eq!(source, "Record has no assessment type");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ReadinessError::io("/path/to/input.json", io_err);

        assert!(err.to_string().contains("/path/to/input.json"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: ReadinessError = parse.unwrap_err().into();
        assert!(matches!(
            err,
            ReadinessError::Input {
                source: InputErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ReadinessError::empty_weights("subcategory weights"))
        }

        fn middle() -> Result<()> {
            inner().context("category 'Data'")
        }

        fn outer() -> Result<()> {
            middle().context("assessment")
        }

        match outer() {
            Err(ReadinessError::InvalidWeights { context, .. }) => {
                assert_eq!(context, "assessment: category 'Data': subcategory weights");
            }
            other => panic!("Expected InvalidWeights error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(ReadinessError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
        assert_eq!(
            chain_context("outer", "middle: inner"),
            "outer: middle: inner"
        );
    }
}
