use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The target of a link: a page title, its URL and optionally the ID of an
/// element on that page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    pub title: String,
    pub url: String,
    pub element_id: Option<String>,
}

impl PageReference {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            element_id: None,
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    /// The element ID, with an empty ID treated as absent
    pub fn element_id(&self) -> Option<&str> {
        self.element_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// How bracket characters inside an element ID are rendered into a link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdBrackets {
    /// Emit the ID exactly as found on the page
    #[default]
    Keep,
    /// Replace `[`, `]`, `(` and `)` with their percent-escapes
    Substitute,
}

/// A setting value that names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSettingError {
    #[error("expected 'keep' or 'substitute', got '{0}'")]
    IdBrackets(String),
    #[error("expected 'chrome', 'chromium' or 'firefox', got '{0}'")]
    Browser(String),
}

impl std::str::FromStr for IdBrackets {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(Self::Keep),
            "substitute" => Ok(Self::Substitute),
            other => Err(ParseSettingError::IdBrackets(other.to_string())),
        }
    }
}

impl std::fmt::Display for IdBrackets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Substitute => write!(f, "substitute"),
        }
    }
}

/// Builds `[title](url)`, or `[title](url#element_id)` when an ID is given.
///
/// Neither the title nor the URL is escaped: a title containing `]` will
/// produce a link that markdown renderers may not recognise.
pub fn build_markdown_link(title: &str, url: &str, element_id: Option<&str>) -> String {
    match element_id.filter(|id| !id.is_empty()) {
        Some(id) => format!("[{title}]({url}#{id})"),
        None => format!("[{title}]({url})"),
    }
}

/// Applies the bracket setting to an element ID before it goes into a link.
pub fn render_element_id(element_id: &str, brackets: IdBrackets) -> Cow<'_, str> {
    const BRACKETS: [char; 4] = ['[', ']', '(', ')'];

    if brackets == IdBrackets::Keep || !element_id.contains(BRACKETS) {
        return Cow::Borrowed(element_id);
    }

    let mut rendered = String::with_capacity(element_id.len() + 8);
    for c in element_id.chars() {
        match c {
            '[' => rendered.push_str("%5B"),
            ']' => rendered.push_str("%5D"),
            '(' => rendered.push_str("%28"),
            ')' => rendered.push_str("%29"),
            _ => rendered.push(c),
        }
    }
    Cow::Owned(rendered)
}
