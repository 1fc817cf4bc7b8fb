use std::num::ParseIntError;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Records all errors reported by this library.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Errors encountered while parsing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// Errors encountered while comparing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Compare(#[from] CompareError),
}

/// Errors encountered when parsing a [`Version`](crate::Version)
/// or a [`VersionRange`](crate::VersionRange) from a string.
#[derive(Error, Diagnostic, Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// The provided value was empty, which is invalid for this type.
    #[error("input was empty, which is invalid for this type")]
    Empty,

    /// The input did not match the required syntax.
    #[error("input '{input}' did not match required syntax: {error}")]
    Syntax {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The error encountered while parsing.
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,

        /// The location of the error.
        #[label("here")]
        span: SourceSpan,
    },

    /// A numeric segment was not a non-negative 64-bit integer.
    #[error("segment '{segment}' of '{input}' is not a valid number: {error}")]
    Segment {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The segment that failed to parse.
        segment: String,

        /// The error encountered while parsing the segment.
        #[source]
        error: ParseIntError,

        /// The location of the segment.
        #[label("segment")]
        span: SourceSpan,
    },

    /// The named field failed to parse.
    #[error("invalid {field} in input '{input}': {error}")]
    Field {
        /// The field that failed.
        field: String,

        /// The input originally provided.
        #[source_code]
        input: String,

        /// The error encountered while parsing.
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,

        /// The location of the error.
        #[label("field")]
        span: SourceSpan,
    },

    /// The end of an interval was written without the leading `!`.
    #[error("interval end '{end}' in input '{input}' must be exclusive (prefixed with '!')")]
    InclusiveEnd {
        /// The input originally provided.
        #[source_code]
        input: String,

        /// The end of the interval as written.
        end: String,

        /// The location of the end.
        #[label("expected '!' here")]
        span: SourceSpan,
    },
}

/// Errors encountered when ordering [`Version`](crate::Version)s.
#[derive(Error, Diagnostic, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum CompareError {
    /// Versions containing template variables only exist in feed templates
    /// and have no defined order.
    #[error("version '{version}' contains template variables and cannot be ordered")]
    TemplateVariable {
        /// The offending version, verbatim.
        version: String,
    },
}

/// Return the span of `substr` inside `text` as `(offset, length)`.
///
/// If `substr` does not occur in `text`, the whole of `text` is spanned.
pub fn span(text: &str, substr: &str) -> (usize, usize) {
    text.find(substr)
        .map(|start| (start, substr.len()))
        .unwrap_or((0, text.len()))
}

/// Return the span of the unparsed `rest` of `text` as `(offset, length)`.
///
/// `rest` must be a suffix of `text`, which is how `nom` reports where it stopped.
pub(crate) fn remainder(text: &str, rest: &str) -> (usize, usize) {
    (text.len().saturating_sub(rest.len()), rest.len())
}

/// Construct and return a new [`ParseError::Syntax`].
///
/// Provide the input, along with the part of it that failed, and the error.
///
/// ```ignore
/// error::syntax!(input => (0, 2), err);
/// ```
macro_rules! syntax {
    ($input:expr => $span:expr, $error:expr) => {
        $crate::error::ParseError::Syntax {
            input: $input.into(),
            span: $span.into(),
            error: $error.into(),
        }
    };
}
pub(crate) use syntax;

/// Construct and return a new [`ParseError::Field`].
///
/// Provide the input, along with the part of it that failed, and the error.
///
/// ```ignore
/// error::field!(input, "start" => (0, 2), err);
/// ```
macro_rules! field {
    ($input:expr, $field:expr => $span:expr, $error:expr) => {
        $crate::error::ParseError::Field {
            input: $input.into(),
            field: $field.into(),
            span: $span.into(),
            error: $error.into(),
        }
    };
}
pub(crate) use field;

/// Shorthand for conversion into [`Error`] and returning.
macro_rules! fatal {
    ($err:expr) => {
        return Err($crate::error::Error::from($err))
    };
}
pub(crate) use fatal;
