//! Error types for IRI mutation and diagnostics.

use thiserror::Error;

/// Errors reported when a component replacement is rejected.
///
/// Construction of an [`Iri`](crate::Iri) never fails — unparsable text
/// degrades to an internally invalid canonical form whose accessors return
/// empty defaults. Errors only surface from the mutators, which guarantee
/// the value is left untouched when they return one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IriError {
    /// The original text did not parse as a canonical URL.
    #[error("IRI text did not parse as a canonical URL: {0}")]
    Parse(#[from] url::ParseError),

    /// The replacement scheme was rejected by the canonical URL engine.
    #[error("invalid scheme: {0:?}")]
    InvalidScheme(String),

    /// The replacement host was rejected by the canonical URL engine.
    #[error("invalid host: {0}")]
    InvalidHost(url::ParseError),

    /// Credentials cannot be carried by this IRI (no authority component).
    #[error("IRI cannot carry credentials")]
    CredentialsNotSupported,

    /// The operation requires a parsed canonical form, but the IRI was
    /// constructed from unparsable text.
    #[error("operation requires a parsable IRI")]
    Unparsable,
}
