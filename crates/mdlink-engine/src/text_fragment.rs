use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Marks the start of a text directive, either inside a URL fragment or
/// (on some pages) at the tail of the path.
pub const TEXT_DIRECTIVE: &str = ":~:text=";

/// Selections longer than this are shortened to their first and last words.
pub const MAX_WORDS: usize = 8;

const EDGE_WORDS: usize = 4;

/// Characters left as-is by URI component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `text` as a URI component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Builds the argument that follows `:~:text=` for a selection.
///
/// Words are split on single spaces only, so runs of spaces yield empty
/// words that still count towards the limit. Selections of more than
/// [`MAX_WORDS`] words become `start,end` using the first and last four words.
pub fn build_text_fragment_arg(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= MAX_WORDS {
        return encode_component(text);
    }

    let first = words[..EDGE_WORDS].join(" ");
    let last = words[words.len() - EDGE_WORDS..].join(" ");
    log::debug!("Shortened {} word selection to a text range", words.len());
    format!("{},{}", encode_component(&first), encode_component(&last))
}
