use thiserror::Error;
use url::Url;

use crate::text_fragment::TEXT_DIRECTIVE;

/// The input could not be parsed as an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed URL '{input}': {source}")]
pub struct MalformedUrlError {
    input: String,
    source: url::ParseError,
}

impl MalformedUrlError {
    /// The string that failed to parse
    pub fn input(&self) -> &str {
        &self.input
    }
}

fn parse(input: &str) -> Result<Url, MalformedUrlError> {
    Url::parse(input).map_err(|source| MalformedUrlError {
        input: input.to_string(),
        source,
    })
}

/// Makes `url` absolute against `base_href`.
///
/// Only scheme-relative (`//host/...`), root-relative (`/path`) and
/// fragment-only (`#id`) forms are resolved. Scheme-relative URLs always get
/// `https:`. Anything else, including `path/relative` forms, is returned
/// unchanged.
///
/// `base_href` is only parsed for root-relative input, so a bad base is only
/// reported on that branch.
pub fn absolutize(url: &str, base_href: &str) -> Result<String, MalformedUrlError> {
    if url.starts_with("//") {
        return Ok(format!("https:{url}"));
    }

    if url.starts_with('/') {
        let base = parse(base_href)?;
        return Ok(format!("{}{url}", base.origin().ascii_serialization()));
    }

    if url.starts_with('#') {
        let without_fragment = base_href
            .split_once('#')
            .map_or(base_href, |(before, _)| before);
        return Ok(format!("{without_fragment}{url}"));
    }

    Ok(url.to_string())
}

/// Removes the fragment and any text directive from `url`.
///
/// Some pages end up with the `:~:text=` directive in the path rather than
/// the fragment, so the path is cut at the first directive as well.
pub fn strip_id_and_text_fragment(url: &str) -> Result<String, MalformedUrlError> {
    let mut parsed = parse(url)?;
    parsed.set_fragment(None);

    if let Some(index) = parsed.path().find(TEXT_DIRECTIVE) {
        let path = parsed.path()[..index].to_string();
        parsed.set_path(&path);
    }

    let stripped = String::from(parsed);
    if stripped != url {
        log::debug!("Stripped '{url}' to '{stripped}'");
    }
    Ok(stripped)
}
