//! Host actions: each function turns what a toolbar or context-menu click
//! knows about the page into the markdown link to copy.
//!
//! Settings are passed in as [`LinkOptions`]; nothing here reads stored state.

use serde::{Deserialize, Serialize};

use crate::link::{
    IdBrackets, PageReference, ParseSettingError, build_markdown_link, render_element_id,
};
use crate::text_fragment::{TEXT_DIRECTIVE, build_text_fragment_arg};
use crate::url_normalize::{MalformedUrlError, absolutize, strip_id_and_text_fragment};

/// Browser variant the link is produced for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Chromium,
    Firefox,
}

impl Browser {
    /// Whether links for this variant carry a `:~:text=` directive
    pub fn supports_text_fragments(self) -> bool {
        match self {
            Self::Chrome | Self::Chromium => true,
            Self::Firefox => false,
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chrome" => Ok(Self::Chrome),
            "chromium" => Ok(Self::Chromium),
            "firefox" => Ok(Self::Firefox),
            other => Err(ParseSettingError::Browser(other.to_string())),
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Chromium => write!(f, "chromium"),
            Self::Firefox => write!(f, "firefox"),
        }
    }
}

/// Settings that shape a composed link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    pub include_text_fragment: bool,
    pub id_brackets: IdBrackets,
    pub browser: Browser,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            include_text_fragment: true,
            id_brackets: IdBrackets::default(),
            browser: Browser::default(),
        }
    }
}

impl LinkOptions {
    fn emits_text_fragments(&self) -> bool {
        self.include_text_fragment && self.browser.supports_text_fragments()
    }
}

/// Link to the page, or to an element on it, optionally scrolled to a
/// selection.
///
/// A page with no element ID and no usable selection is linked with its URL
/// untouched. Otherwise any existing fragment is dropped first and replaced
/// by `#id`, `#:~:text=arg` or `#id:~:text=arg`.
pub fn page_link(
    page: &PageReference,
    selection: Option<&str>,
    options: &LinkOptions,
) -> Result<String, MalformedUrlError> {
    let text_arg = match selection {
        Some(text) if options.emits_text_fragments() => build_text_fragment_arg(text),
        _ => String::new(),
    };
    let element_id = page
        .element_id()
        .map(|id| render_element_id(id, options.id_brackets));

    if element_id.is_none() && text_arg.is_empty() {
        return Ok(build_markdown_link(&page.title, &page.url, None));
    }

    let url = strip_id_and_text_fragment(&page.url)?;
    if text_arg.is_empty() {
        return Ok(build_markdown_link(&page.title, &url, element_id.as_deref()));
    }

    let id = element_id.as_deref().unwrap_or_default();
    let url = format!("{url}#{id}{TEXT_DIRECTIVE}{text_arg}");
    Ok(build_markdown_link(&page.title, &url, None))
}

/// Link to a hyperlink found on the page at `base_href`, titled with its text.
pub fn anchor_link(text: &str, href: &str, base_href: &str) -> Result<String, MalformedUrlError> {
    let url = absolutize(href, base_href)?;
    Ok(build_markdown_link(text, &url, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn page() -> PageReference {
        PageReference::new("Docs", "https://h.com/docs#old")
    }

    #[test]
    fn test_plain_page_keeps_url_verbatim() {
        let link = page_link(&page(), None, &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#old)");
    }

    #[test]
    fn test_plain_page_with_unparseable_url_still_links() {
        let page = PageReference::new("Local", "about blank");
        let link = page_link(&page, None, &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Local](about blank)");
    }

    #[test]
    fn test_element_replaces_existing_fragment() {
        let page = page().with_element_id("usage");
        let link = page_link(&page, None, &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#usage)");
    }

    #[test]
    fn test_selection_adds_text_directive() {
        let link = page_link(&page(), Some("hello world"), &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#:~:text=hello%20world)");
    }

    #[test]
    fn test_element_and_selection() {
        let page = page().with_element_id("usage");
        let link = page_link(&page, Some("hello"), &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#usage:~:text=hello)");
    }

    #[test]
    fn test_existing_text_directive_in_path_is_replaced() {
        let page = PageReference::new("Docs", "https://h.com/docs:~:text=stale");
        let link = page_link(&page, Some("fresh"), &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#:~:text=fresh)");
    }

    #[test]
    fn test_empty_selection_is_plain_page() {
        let link = page_link(&page(), Some(""), &LinkOptions::default()).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#old)");
    }

    #[rstest]
    #[case(LinkOptions { include_text_fragment: false, ..LinkOptions::default() })]
    #[case(LinkOptions { browser: Browser::Firefox, ..LinkOptions::default() })]
    fn test_text_fragment_disabled(#[case] options: LinkOptions) {
        let link = page_link(&page(), Some("hello"), &options).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#old)");

        let page = page().with_element_id("usage");
        let link = page_link(&page, Some("hello"), &options).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#usage)");
    }

    #[test]
    fn test_chromium_emits_text_fragments() {
        let options = LinkOptions {
            browser: Browser::Chromium,
            ..LinkOptions::default()
        };
        let link = page_link(&page(), Some("hi"), &options).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#:~:text=hi)");
    }

    #[test]
    fn test_bracket_substitution_in_element_id() {
        let options = LinkOptions {
            id_brackets: IdBrackets::Substitute,
            ..LinkOptions::default()
        };
        let page = page().with_element_id("fn(x)");
        let link = page_link(&page, Some("body"), &options).unwrap();
        assert_eq!(link, "[Docs](https://h.com/docs#fn%28x%29:~:text=body)");
    }

    #[test]
    fn test_malformed_url_with_element_fails() {
        let page = PageReference::new("Bad", "not a url").with_element_id("x");
        let err = page_link(&page, None, &LinkOptions::default()).unwrap_err();
        assert_eq!(err.input(), "not a url");
    }

    #[rstest]
    #[case("Guide", "/guide", "https://h.com/docs#x", "[Guide](https://h.com/guide)")]
    #[case("CDN", "//cdn.h.com/a.js", "https://h.com/", "[CDN](https://cdn.h.com/a.js)")]
    #[case("Top", "#top", "https://h.com/docs#x", "[Top](https://h.com/docs#top)")]
    #[case("Ext", "https://e.org/", "https://h.com/", "[Ext](https://e.org/)")]
    fn test_anchor_link(
        #[case] text: &str,
        #[case] href: &str,
        #[case] base: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(anchor_link(text, href, base).unwrap(), expected);
    }

    #[test]
    fn test_browser_parse_and_display() {
        for browser in [Browser::Chrome, Browser::Chromium, Browser::Firefox] {
            assert_eq!(browser.to_string().parse::<Browser>(), Ok(browser));
        }
        assert_eq!(
            "safari".parse::<Browser>(),
            Err(ParseSettingError::Browser("safari".to_string()))
        );
    }
}
