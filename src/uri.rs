//! URI normalization (§4.1). A document with no `$id`/`id` of its own is
//! addressed under a synthetic root URI, the way `jsonschema::compilation`
//! addresses the root document as `json-schema:///` so every scope always
//! has a base to resolve relative references against.
use lazy_static::lazy_static;
use url::Url;

lazy_static! {
    /// The base URI a document gets when neither it nor any ancestor
    /// declared an `id`/`$id`.
    pub static ref DEFAULT_ROOT_URI: Url =
        Url::parse("json-schema:///").expect("default root URI is well-formed");
}

/// Whether `candidate` carries a URI scheme, i.e. is "absolute" rather than
/// a same-document fragment or a path relative to some base (§4.1). The
/// check is permissive on purpose (§9 Open Question): a scheme is just
/// letters/digits/`+`/`-`/`.` followed by `:`, so unusual-but-valid schemes
/// used by custom `SchemaResolver`s are still recognized instead of being
/// silently treated as relative paths.
#[must_use]
pub fn has_scheme(candidate: &str) -> bool {
    let Some(colon) = candidate.find(':') else {
        return false;
    };
    let (scheme, rest) = candidate.split_at(colon);
    if scheme.is_empty() || rest.len() < 2 {
        return false;
    }
    let mut chars = scheme.chars();
    let first_is_alpha = chars.next().map_or(false, |c| c.is_ascii_alphabetic());
    first_is_alpha && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve `reference` against `base` (§4.1's "absolute-URI-with-scheme",
/// "relative URI merged with base" and "`#` alone" cases share this one
/// join rule; only the *caller* needs to special-case bare fragments before
/// this because `Url::join` already treats `"#frag"` correctly).
#[must_use]
pub fn resolve_against(base: Option<&str>, reference: &str) -> String {
    let base = match base {
        Some(base) => Url::parse(base).unwrap_or_else(|_| DEFAULT_ROOT_URI.clone()),
        None => DEFAULT_ROOT_URI.clone(),
    };
    match base.join(reference) {
        Ok(joined) => joined.to_string(),
        Err(_) => reference.to_string(),
    }
}

/// Split a URI reference into its non-fragment part and its (still
/// percent-encoded) fragment, if any.
#[must_use]
pub fn split_fragment(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (uri, None),
    }
}
