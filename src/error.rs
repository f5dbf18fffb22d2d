//! Crate-wide error type.
//!
//! The core has a closed, small set of domain failures (a bad reference
//! string, an unresolved symbol, a broken `@copydoc`), so it follows the
//! `thiserror` idiom used elsewhere in this codebase for domain error
//! enums (see the original `DocEngineError`) rather than reaching for
//! `anyhow`'s dynamic error type.

use crate::model::SymbolId;
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while parsing a reference string or
/// resolving it against a corpus.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reference parser (§4.B) could not consume the input.
    #[error("failed to parse '{text}' at offset {offset}: {reason}")]
    ParseFailure {
        text: String,
        offset: usize,
        reason: ParseFailureReason,
    },

    /// Lookup (§4.D) exhausted every enclosing scope without a match.
    #[error("no such name '{name}' visible from '{context}'")]
    SymbolNotFound { name: String, context: String },

    /// The lookup context id itself does not resolve to an `Info`.
    #[error("context '{0:?}' not found in the corpus")]
    ContextNotFound(SymbolId),

    /// More than one candidate matched a reference unambiguously enough
    /// that the core refuses to guess. Reserved for future use: the
    /// current matching algorithm (§4.D) is first-match, but callers
    /// that need strict uniqueness can detect and raise this.
    #[error("reference '{0}' is ambiguous")]
    AmbiguousReference(String),

    /// `@copydoc`/`@copybrief`/`@copydetails` named a symbol with no
    /// javadoc at all.
    #[error("copy target '{0}' has no documentation")]
    DocCopyTargetUndocumented(String),

    /// `@copydoc`/`@copybrief`/`@copydetails` named a symbol that does
    /// not resolve.
    #[error("copy target '{0}' could not be resolved")]
    DocCopyMissingSource(String),

    /// An internal invariant (§3) was violated. This should never be
    /// observable from well-formed input; when `debug_assertions` are
    /// enabled the finalizer panics instead of returning this so the
    /// bug is caught where it happens, but release builds surface it
    /// here so the host can decide whether to abort.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

/// Why the reference parser rejected an input, attached to
/// [`Error::ParseFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailureReason {
    EmptyInput,
    ExpectedIdentifier,
    UnbalancedParameterList,
    InvalidDeclSpecifierCombination,
    InvalidDeclarator,
    TrailingComponentAfterOperator,
    TrailingComponentAfterConversion,
    DuplicateCvQualifier,
    Other(String),
}

impl fmt::Display for ParseFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailureReason::EmptyInput => write!(f, "empty input"),
            ParseFailureReason::ExpectedIdentifier => write!(f, "expected an identifier"),
            ParseFailureReason::UnbalancedParameterList => {
                write!(f, "unbalanced parameter list")
            }
            ParseFailureReason::InvalidDeclSpecifierCombination => {
                write!(f, "invalid declaration-specifier combination")
            }
            ParseFailureReason::InvalidDeclarator => write!(f, "invalid declarator"),
            ParseFailureReason::TrailingComponentAfterOperator => {
                write!(f, "no component may follow an operator-function-id")
            }
            ParseFailureReason::TrailingComponentAfterConversion => {
                write!(f, "no component may follow a conversion-function-id")
            }
            ParseFailureReason::DuplicateCvQualifier => write!(f, "duplicate cv-qualifier"),
            ParseFailureReason::Other(s) => write!(f, "{s}"),
        }
    }
}
