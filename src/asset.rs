//! Page asset references
//!
//! An [`AssetReference`] describes one stylesheet link or image element as
//! observed during a single page load: where it points and whether the
//! network load succeeded.

use serde::{Deserialize, Serialize};
use url::Url;

/// A stylesheet `<link>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetAsset {
    pub href: String,

    /// Parsed rule texts, present only when the sheet loaded this navigation
    #[serde(default, rename = "rules", skip_serializing_if = "Option::is_none")]
    pub sheet: Option<Vec<String>>,
}

/// An `<img>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub src: String,

    #[serde(default)]
    pub complete: bool,

    #[serde(default)]
    pub natural_width: u32,

    /// Position of the element on the page. Distinguishes elements that
    /// share a source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<usize>,
}

/// One cacheable asset on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetReference {
    Stylesheet(StylesheetAsset),
    Image(ImageAsset),
}

impl StylesheetAsset {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            sheet: None,
        }
    }

    /// Mark the sheet as loaded with the given rules
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheet = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.sheet.as_ref().is_some_and(|rules| !rules.is_empty())
    }

    /// Each rule's text followed by a newline
    pub fn rules_text(&self) -> String {
        let mut text = String::new();
        for rule in self.sheet.iter().flatten() {
            text.push_str(rule);
            text.push('\n');
        }
        text
    }
}

impl ImageAsset {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            complete: false,
            natural_width: 0,
            element: None,
        }
    }

    pub fn at(mut self, element: usize) -> Self {
        self.element = Some(element);
        self
    }

    /// Identity of the element on its page: its position when known,
    /// otherwise its source
    pub fn element_key(&self) -> String {
        match self.element {
            Some(index) => format!("#{}", index),
            None => self.src.clone(),
        }
    }

    /// Mark the image as decoded with the given intrinsic width
    pub fn loaded(mut self, natural_width: u32) -> Self {
        self.complete = true;
        self.natural_width = natural_width;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.complete && self.natural_width != 0
    }

    /// Blob type for this image, inferred from the source's extension
    pub fn mime_type(&self) -> String {
        let ext = last_segment(&self.src)
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()));

        match ext.as_deref() {
            Some("svg") => "image/svg+xml".to_string(),
            Some("jpg") => "image/jpeg".to_string(),
            Some("ico") => "image/x-icon".to_string(),
            Some(ext) if !ext.is_empty() => format!("image/{}", ext),
            _ => "application/octet-stream".to_string(),
        }
    }
}

impl AssetReference {
    pub fn is_loaded(&self) -> bool {
        match self {
            Self::Stylesheet(sheet) => sheet.is_loaded(),
            Self::Image(image) => image.is_loaded(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Stylesheet(sheet) => &sheet.href,
            Self::Image(image) => &image.src,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stylesheet(_) => "stylesheet",
            Self::Image(_) => "image",
        }
    }

    /// Default slot name: the last non-empty path segment of the source URL
    pub fn default_slot_name(&self) -> Option<String> {
        last_segment(self.source())
    }
}

impl From<StylesheetAsset> for AssetReference {
    fn from(sheet: StylesheetAsset) -> Self {
        Self::Stylesheet(sheet)
    }
}

impl From<ImageAsset> for AssetReference {
    fn from(image: ImageAsset) -> Self {
        Self::Image(image)
    }
}

/// Last non-empty path segment of an absolute or relative URL, ignoring
/// query and fragment.
fn last_segment(source: &str) -> Option<String> {
    if let Ok(url) = Url::parse(source) {
        return url
            .path_segments()?
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string);
    }

    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.split('/')
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}
