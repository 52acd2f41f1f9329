//! The IRI identifier value.
//!
//! [`Iri`] is the addressing entity for publication resources. It keeps two
//! representations of the same logical value in sync:
//! - `cached`: the human-facing IRI text, kept verbatim while cheap to
//!   maintain, dropped when a mutation makes patching it risky
//! - `url`: the structured canonical form, the source of truth for the
//!   transport/storage string and for equality
//!
//! A namespaced-name (URN) variant carries its own equality rules; see
//! [`Iri::from_urn`].

use std::cmp::Ordering;
use std::fmt;

use crate::canon::{CanonicalUrl, Replacements};
use crate::codec;
use crate::error::IriError;

/// Scheme tag of namespaced-name identifiers.
pub const URN_SCHEME: &str = "urn";

/// Scheme used for addressable publication resources.
pub const EPUB_SCHEME: &str = "epub3";

/// Path component separator.
pub const PATH_SEPARATOR: char = '/';

/// The three-part tuple of a namespaced-name identifier:
/// `urn:<name_id>:<name_string>`.
///
/// Equality and ordering are field-wise in declaration order, so two URN
/// identifiers compare exactly by their tuples.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UrnComponents {
    pub scheme: String,
    pub name_id: String,
    pub name_string: String,
}

impl UrnComponents {
    fn new(name_id: &str, name_string: &str) -> Self {
        Self {
            scheme: URN_SCHEME.to_string(),
            name_id: name_id.to_string(),
            name_string: name_string.to_string(),
        }
    }
}

/// Which identity rules the value follows.
#[derive(Debug, Clone)]
enum Form {
    /// Namespaced name: identity is the URN tuple; the canonical form is
    /// kept only for string rendering.
    Urn(UrnComponents),
    /// Generic identifier: identity is the canonical serialization.
    Generic,
}

/// An internationalized resource identifier for publication resources.
///
/// Construction never fails: text the URI grammar rejects degrades to a
/// value whose component accessors return empty defaults while equality
/// and both string renderings stay well-defined. Mutators are atomic —
/// on error nothing changed.
///
/// Cloning deep-copies the structured canonical form; the clone and the
/// original can be mutated independently.
///
/// # Examples
///
/// ```
/// use pubiri::Iri;
///
/// let mut chapter = Iri::from_parts("epub3", "example.com", "OPS/chapter1.xhtml", "", "");
/// assert_eq!(chapter.display_string(), "epub3://example.com/OPS/chapter1.xhtml");
///
/// chapter.add_path_component("section2")?;
/// assert_eq!(
///     chapter.display_string(),
///     "epub3://example.com/OPS/chapter1.xhtml/section2",
/// );
/// # Ok::<(), pubiri::IriError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iri {
    form: Form,
    /// The last known-correct human-facing text. `None` means "must be
    /// reconstructed on demand" — never an empty-string sentinel, so an
    /// invalidated cache is not confused with an empty component.
    cached: Option<String>,
    url: CanonicalUrl,
}

impl Iri {
    /// Construct from raw IRI text. Never fails.
    ///
    /// The text is kept verbatim as the display form even when it cannot
    /// be parsed — it is still the best available human-facing rendering.
    ///
    /// Raw `"urn:..."` text yields a *generic* identifier, not a
    /// namespaced-name one: only [`Iri::from_urn`] produces the URN form
    /// and its tuple equality.
    pub fn parse(text: &str) -> Self {
        Self {
            form: Form::Generic,
            cached: Some(text.to_string()),
            url: CanonicalUrl::parse(text),
        }
    }

    /// Construct a namespaced-name identifier `urn:<name_id>:<name_string>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pubiri::Iri;
    ///
    /// let isbn = Iri::from_urn("isbn", "0451450523");
    /// assert_eq!(isbn.canonical_string(), "urn:isbn:0451450523");
    /// assert!(isbn.is_urn());
    /// ```
    pub fn from_urn(name_id: &str, name_string: &str) -> Self {
        let text = format!("urn:{name_id}:{name_string}");
        let url = CanonicalUrl::parse(&text);
        Self {
            form: Form::Urn(UrnComponents::new(name_id, name_string)),
            cached: Some(text),
            url,
        }
    }

    /// Construct from discrete parts. Empty `query`/`fragment` mean the
    /// component is absent; an empty `path` becomes `/`, and a relative
    /// path gains a leading separator.
    pub fn from_parts(scheme: &str, host: &str, path: &str, query: &str, fragment: &str) -> Self {
        let mut text = format!("{scheme}://{host}");
        if path.is_empty() {
            text.push(PATH_SEPARATOR);
        } else {
            if !path.starts_with(PATH_SEPARATOR) {
                text.push(PATH_SEPARATOR);
            }
            text.push_str(path);
        }
        if !query.is_empty() {
            text.push('?');
            text.push_str(query);
        }
        if !fragment.is_empty() {
            text.push('#');
            text.push_str(fragment);
        }

        let url = CanonicalUrl::parse(&text);
        Self {
            form: Form::Generic,
            cached: Some(text),
            url,
        }
    }

    /// Whether this is a namespaced-name identifier built by
    /// [`Iri::from_urn`].
    pub fn is_urn(&self) -> bool {
        matches!(self.form, Form::Urn(_))
    }

    /// The URN namespace identifier, for the namespaced-name form.
    pub fn urn_name_id(&self) -> Option<&str> {
        match &self.form {
            Form::Urn(urn) => Some(&urn.name_id),
            Form::Generic => None,
        }
    }

    /// The URN namespace-specific string, for the namespaced-name form.
    pub fn urn_name_string(&self) -> Option<&str> {
        match &self.form {
            Form::Urn(urn) => Some(&urn.name_string),
            Form::Generic => None,
        }
    }

    /// Whether the canonical form parsed successfully.
    pub fn is_valid(&self) -> bool {
        self.url.is_valid()
    }

    /// The parse failure kept from construction, if the text was
    /// unparsable.
    pub fn parse_error(&self) -> Option<IriError> {
        self.url.parse_error().map(IriError::Parse)
    }

    /// Username and password from the canonical form, absent components
    /// defaulting to empty strings. A namespaced-name identifier carries
    /// no authority and always yields `("", "")`.
    pub fn credentials(&self) -> (String, String) {
        match &self.form {
            Form::Urn(_) => (String::new(), String::new()),
            Form::Generic => (
                self.url.username().to_string(),
                self.url.password().to_string(),
            ),
        }
    }

    /// The path component: raw percent-encoded when `url_encoded` is
    /// true, percent-decoded otherwise.
    pub fn path(&self, url_encoded: bool) -> String {
        let raw = self.url.path();
        if url_encoded {
            raw.to_string()
        } else {
            codec::decode_percent_escapes(raw)
        }
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn host(&self) -> &str {
        self.url.host()
    }

    pub fn query(&self) -> &str {
        self.url.query()
    }

    pub fn fragment(&self) -> &str {
        self.url.fragment()
    }

    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// The canonical, fully percent-encoded ASCII string — the transport,
    /// storage, and equality form.
    pub fn canonical_string(&self) -> &str {
        self.url.serialize()
    }

    /// The human-facing IRI string.
    ///
    /// Returns the cached text verbatim when present. Otherwise the
    /// string is reconstructed best-effort from the canonical form: the
    /// host is IDN-decoded and, when the decoded host differs, the
    /// *first* literal occurrence of the ASCII host substring in the
    /// canonical string is replaced with the decoded form.
    ///
    /// Known limitation, preserved deliberately: if the ASCII host text
    /// also occurs verbatim earlier in the string (say, in the
    /// userinfo), that occurrence is replaced instead, producing an
    /// incorrect display string. Percent-escapes elsewhere in the string
    /// are left encoded.
    pub fn display_string(&self) -> String {
        if let Some(cached) = &self.cached {
            return cached.clone();
        }

        tracing::trace!(canonical = self.url.serialize(), "reconstructing display form");
        let mut text = self.url.serialize().to_string();
        let ascii_host = self.url.host();
        if !ascii_host.is_empty() {
            let decoded = codec::decode_international_hostname(ascii_host);
            if decoded != ascii_host {
                if let Some(pos) = text.find(ascii_host) {
                    text.replace_range(pos..pos + ascii_host.len(), &decoded);
                }
            }
        }
        text
    }

    /// Replace the scheme. Invalidates the cached display text.
    pub fn set_scheme(&mut self, scheme: &str) -> Result<(), IriError> {
        self.url.replace_components(&Replacements {
            scheme: Some(scheme),
            ..Replacements::default()
        })?;
        self.cached = None;
        Ok(())
    }

    /// Replace the host. Invalidates the cached display text.
    pub fn set_host(&mut self, host: &str) -> Result<(), IriError> {
        self.url.replace_components(&Replacements {
            host: Some(host),
            ..Replacements::default()
        })?;
        self.cached = None;
        Ok(())
    }

    /// Replace username and password together. An empty password removes
    /// the password component. Invalidates the cached display text.
    pub fn set_credentials(&mut self, username: &str, password: &str) -> Result<(), IriError> {
        self.url.replace_components(&Replacements {
            username: Some(username),
            password: Some(password),
            ..Replacements::default()
        })?;
        self.cached = None;
        Ok(())
    }

    /// Replace the query. The cached display text, when present, is
    /// patched in place: the span between `?` and the next `#` (or the
    /// end) is replaced, or `?query` is inserted before an existing
    /// `#`/appended. When the cache is absent it stays absent.
    pub fn set_query(&mut self, query: &str) -> Result<(), IriError> {
        self.url.replace_components(&Replacements {
            query: Some(query),
            ..Replacements::default()
        })?;

        if let Some(cached) = &mut self.cached {
            match cached.find('?') {
                Some(pos) => {
                    let end = cached[pos..].find('#').map_or(cached.len(), |i| pos + i);
                    cached.replace_range(pos + 1..end, query);
                }
                None => match cached.find('#') {
                    Some(pos) => {
                        cached.insert(pos, '?');
                        cached.insert_str(pos + 1, query);
                    }
                    None => {
                        cached.push('?');
                        cached.push_str(query);
                    }
                },
            }
        }
        Ok(())
    }

    /// Replace the fragment. The cached display text, when present, is
    /// patched in place: everything after `#` is replaced, or `#fragment`
    /// is appended. When the cache is absent it stays absent — a missing
    /// cache is never fabricated from a fragment alone.
    pub fn set_fragment(&mut self, fragment: &str) -> Result<(), IriError> {
        self.url.replace_components(&Replacements {
            fragment: Some(fragment),
            ..Replacements::default()
        })?;

        if let Some(cached) = &mut self.cached {
            match cached.rfind('#') {
                Some(pos) => {
                    cached.replace_range(pos + 1.., fragment);
                }
                None => {
                    cached.push('#');
                    cached.push_str(fragment);
                }
            }
        }
        Ok(())
    }

    /// Append a component to the path, inserting exactly one separator if
    /// the current path lacks a trailing one.
    ///
    /// The cached display text is extended the same way only while the
    /// canonical form has no query and no fragment — appending to the
    /// text is unambiguous only while the path is its trailing segment.
    /// Otherwise the cache is invalidated.
    pub fn add_path_component(&mut self, component: &str) -> Result<(), IriError> {
        let mut path = self.url.path().to_string();
        if !path.ends_with(PATH_SEPARATOR) {
            path.push(PATH_SEPARATOR);
        }
        path.push_str(component);

        let trailing_path = !self.url.has_query() && !self.url.has_fragment();
        self.url.replace_components(&Replacements {
            path: Some(&path),
            ..Replacements::default()
        })?;

        if trailing_path {
            if let Some(cached) = &mut self.cached {
                if !cached.ends_with(PATH_SEPARATOR) {
                    cached.push(PATH_SEPARATOR);
                }
                cached.push_str(component);
            }
        } else {
            self.cached = None;
        }
        Ok(())
    }

    /// The URN tuple this value compares by when a namespaced-name
    /// operand is involved. Generic values compare as the empty tuple.
    fn urn_key(&self) -> (&str, &str, &str) {
        match &self.form {
            Form::Urn(urn) => (&urn.scheme, &urn.name_id, &urn.name_string),
            Form::Generic => ("", "", ""),
        }
    }
}

impl PartialEq for Iri {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Iri {}

impl PartialOrd for Iri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iri {
    /// Total order: when either operand is a namespaced name, compare
    /// URN tuples; otherwise compare canonical serializations. Generic
    /// values therefore sort before all URN values.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_urn() || other.is_urn() {
            self.urn_key().cmp(&other.urn_key())
        } else {
            self.url.cmp(&other.url)
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_text_verbatim() {
        let iri = Iri::parse("https://example.com/livre%20caf\u{e9}");
        assert_eq!(iri.display_string(), "https://example.com/livre%20café");
        assert!(!iri.is_urn());
    }

    #[test]
    fn test_from_parts_path_normalization() {
        let absolute = Iri::from_parts("epub3", "example.com", "/OPS/ch1.xhtml", "", "");
        assert_eq!(absolute.display_string(), "epub3://example.com/OPS/ch1.xhtml");

        let relative = Iri::from_parts("epub3", "example.com", "OPS/ch1.xhtml", "", "");
        assert_eq!(relative.display_string(), "epub3://example.com/OPS/ch1.xhtml");

        let empty = Iri::from_parts("epub3", "example.com", "", "", "");
        assert_eq!(empty.display_string(), "epub3://example.com/");
    }

    #[test]
    fn test_from_parts_query_and_fragment() {
        let iri = Iri::from_parts("https", "example.com", "search", "q=ahab", "top");
        assert_eq!(iri.display_string(), "https://example.com/search?q=ahab#top");
        assert_eq!(iri.query(), "q=ahab");
        assert_eq!(iri.fragment(), "top");
    }

    #[test]
    fn test_urn_accessors() {
        let isbn = Iri::from_urn("isbn", "0451450523");
        assert!(isbn.is_urn());
        assert_eq!(isbn.urn_name_id(), Some("isbn"));
        assert_eq!(isbn.urn_name_string(), Some("0451450523"));
        assert_eq!(isbn.credentials(), (String::new(), String::new()));
        assert_eq!(isbn.host(), "");
    }

    #[test]
    fn test_set_query_patches_cache() {
        let mut iri = Iri::from_parts("https", "example.com", "search", "q=ahab", "top");
        iri.set_query("q=ishmael").unwrap();
        assert_eq!(iri.display_string(), "https://example.com/search?q=ishmael#top");
        assert_eq!(iri.canonical_string(), "https://example.com/search?q=ishmael#top");
    }

    #[test]
    fn test_set_query_inserts_before_fragment() {
        let mut iri = Iri::from_parts("https", "example.com", "search", "", "top");
        iri.set_query("q=1").unwrap();
        assert_eq!(iri.display_string(), "https://example.com/search?q=1#top");
    }

    #[test]
    fn test_set_fragment_replaces_remainder() {
        let mut iri = Iri::from_parts("https", "example.com", "ch1", "", "old");
        iri.set_fragment("new").unwrap();
        assert_eq!(iri.display_string(), "https://example.com/ch1#new");

        let mut plain = Iri::from_parts("https", "example.com", "ch1", "", "");
        plain.set_fragment("sec").unwrap();
        assert_eq!(plain.display_string(), "https://example.com/ch1#sec");
    }

    #[test]
    fn test_add_path_component_invalidates_past_query() {
        let mut iri = Iri::from_parts("https", "example.com", "books", "page=1", "");
        iri.add_path_component("moby-dick").unwrap();
        // The cache could not be patched; the reconstruction comes from
        // the canonical form.
        assert_eq!(
            iri.canonical_string(),
            "https://example.com/books/moby-dick?page=1"
        );
        assert_eq!(iri.display_string(), iri.canonical_string());
    }

    #[test]
    fn test_mutation_error_leaves_value_untouched() {
        let mut iri = Iri::from_parts("https", "example.com", "book", "", "");
        let before_canonical = iri.canonical_string().to_string();
        let before_display = iri.display_string();

        // https -> non-special scheme is rejected by the engine
        assert!(iri.set_scheme("epub3").is_err());
        assert_eq!(iri.canonical_string(), before_canonical);
        assert_eq!(iri.display_string(), before_display);
    }

    #[test]
    fn test_unparsable_text_degrades() {
        let iri = Iri::parse("just-a-relative-name");
        assert!(!iri.is_valid());
        assert!(matches!(iri.parse_error(), Some(IriError::Parse(_))));
        assert_eq!(iri.canonical_string(), "just-a-relative-name");
        assert_eq!(iri.display_string(), "just-a-relative-name");
        assert_eq!(iri.credentials(), (String::new(), String::new()));

        let mut iri = iri;
        assert_eq!(iri.set_query("q=1"), Err(IriError::Unparsable));
        assert_eq!(iri.display_string(), "just-a-relative-name");
    }

    #[test]
    fn test_display_trait_matches_display_string() {
        let iri = Iri::from_parts("epub3", "example.com", "OPS/ch1.xhtml", "", "");
        assert_eq!(iri.to_string(), iri.display_string());
    }
}
