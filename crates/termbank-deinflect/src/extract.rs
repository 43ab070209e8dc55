use thiserror::Error;

/// Opening sequence of a base-form marker.
const MARKER_OPEN: &str = "(->";

/// Tokens carrying no rule information, dropped after splitting.
const NOISE_TOKENS: [&str; 3] = ["->", "of", "the"];

/// Why a definition yielded no `(base, form span)` pair.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ExtractError {
    #[error("definition has no `(->base)` marker")]
    MissingMarker,
    #[error("no `{{...}}` block precedes the base-form marker")]
    MissingFormSpan,
}

/// Borrowed slices of a definition: the resolved base form and the raw form
/// span its rule tokens are read from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Extraction<'a> {
    pub base: &'a str,
    pub form_span: &'a str,
}

struct Marker<'a> {
    /// Byte offset of the marker's opening parenthesis.
    open: usize,
    base: &'a str,
}

/// Find the last complete `(->base)` marker in `text`.
///
/// A marker is complete when a `)` follows the opener and the text between
/// them is non-empty; `(->)` does not count. When markers nest or repeat,
/// the rightmost opener wins.
fn last_marker(text: &str) -> Option<Marker<'_>> {
    let mut found = None;
    let mut from = 0;
    while let Some(at) = text[from..].find(MARKER_OPEN) {
        let open = from + at;
        let inner = open + MARKER_OPEN.len();
        if let Some(len) = text[inner..].find(')')
            && len > 0
        {
            found = Some(Marker {
                open,
                base: &text[inner..inner + len],
            });
        }
        from = inner;
    }
    found
}

/// Whether `definition` contains a complete base-form marker.
pub(crate) fn has_marker(definition: &str) -> bool {
    last_marker(definition).is_some()
}

/// Locate the authoritative base-form marker in a definition and the form
/// span feeding [`tokenize`].
///
/// The last complete `(->base)` marker is authoritative; the form span is
/// the text strictly between the nearest `}` preceding that marker and the
/// marker's opening parenthesis. Both pieces are required: a definition
/// without a marker, or without a brace block before it, fails.
pub fn extract(definition: &str) -> Result<Extraction<'_>, ExtractError> {
    let marker = last_marker(definition).ok_or(ExtractError::MissingMarker)?;
    let brace = definition[..marker.open]
        .rfind('}')
        .ok_or(ExtractError::MissingFormSpan)?;
    Ok(Extraction {
        base: marker.base,
        form_span: &definition[brace + 1..marker.open],
    })
}

/// Remove `{...}` and `(...)` annotation blocks, shortest match first, no
/// nesting. An opener without its closer is kept literally.
fn scrub_annotations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(['{', '(']) {
        out.push_str(&rest[..at]);
        let closer = if rest.as_bytes()[at] == b'{' { '}' } else { ')' };
        match rest[at + 1..].find(closer) {
            Some(len) => rest = &rest[at + 1 + len + 1..],
            None => {
                out.push_str(&rest[at..at + 1]);
                rest = &rest[at + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Split a form span into its ordered rule tokens.
///
/// Annotation blocks are scrubbed first, then the remainder splits on runs
/// of whitespace and `/`. Empty tokens and the noise words `->`, `of`, and
/// `the` (exact matches) never appear in the output.
pub fn tokenize(form_span: &str) -> Vec<String> {
    scrub_annotations(form_span)
        .split(|c: char| c.is_whitespace() || c == '/')
        .filter(|token| !token.is_empty() && !NOISE_TOKENS.contains(token))
        .map(str::to_owned)
        .collect()
}
