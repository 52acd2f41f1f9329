//! pubiri - IRI value type for digital-publication packages
//!
//! This crate addresses resources inside a publication package — chapters,
//! images, manifest entries, fragment citations — with internationalized
//! resource identifiers that keep two synchronized representations:
//!
//! - **Display form**: human-facing Unicode text, preserved verbatim for
//!   presentation
//! - **Canonical form**: a strictly ASCII, percent-encoded spec string for
//!   network transport, storage keys, and byte-for-byte comparison
//!
//! # Features
//!
//! - **Never-failing construction**: unparsable text degrades gracefully
//!   instead of erroring; accessors return empty defaults
//! - **Namespaced names**: `urn:<id>:<nss>` identifiers (ISBN-style) with
//!   tuple equality, distinct from generic identifiers
//! - **Atomic mutation**: every mutator rewrites the canonical form in one
//!   step and either patches or invalidates the cached display text
//! - **Codec utilities**: percent-encoding for URL components, UTF-8
//!   byte escaping, and IDN (punycode) hostname encoding/decoding
//!
//! # Quick Start
//!
//! ```
//! use pubiri::{Iri, encode_unicode_bytes};
//!
//! // Address a chapter inside a publication
//! let mut chapter = Iri::from_parts("epub3", "example.com", "OPS/chapter1.xhtml", "", "");
//! assert_eq!(chapter.display_string(), "epub3://example.com/OPS/chapter1.xhtml");
//!
//! // Canonical form is always ASCII and byte-comparable
//! chapter.add_path_component("section2")?;
//! assert_eq!(
//!     chapter.canonical_string(),
//!     "epub3://example.com/OPS/chapter1.xhtml/section2",
//! );
//!
//! // ISBN-style namespaced identifiers compare by tuple
//! let isbn = Iri::from_urn("isbn", "0451450523");
//! assert_eq!(isbn, Iri::from_urn("isbn", "0451450523"));
//! assert_eq!(isbn.canonical_string(), "urn:isbn:0451450523");
//!
//! // Non-ASCII text has a transport-safe encoding
//! assert_eq!(encode_unicode_bytes("caf\u{e9}"), "caf%C3%A9");
//! # Ok::<(), pubiri::IriError>(())
//! ```
//!
//! # Equality
//!
//! Two identifiers are equal when their canonical serializations match
//! byte-for-byte — except namespaced names, which compare by their
//! `(scheme, name_id, name_string)` tuple. An identifier parsed from raw
//! `"urn:..."` text stays generic: only [`Iri::from_urn`] produces the
//! namespaced form.

// Re-export the identifier value and its constants
pub use iri::{Iri, UrnComponents, EPUB_SCHEME, PATH_SEPARATOR, URN_SCHEME};

// Re-export the canonical URL engine
pub use canon::{CanonicalUrl, Replacements};

// Re-export codec functions
pub use codec::{
    decode_international_hostname, decode_percent_escapes, encode_international_hostname,
    encode_unicode_bytes, encode_uri_component, RESERVED_CHARACTERS,
};

// Re-export error type
pub use error::IriError;

// Module declarations
pub mod canon;
pub mod codec;
pub mod error;
pub mod iri;
