pub mod html;

/// Facts about a fetched document that the scoring rules care about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    /// Content of the viewport meta tag, if present and non-empty
    pub viewport: Option<String>,
    /// Content of the generator meta tag
    pub generator: Option<String>,
    /// Any of `font`, `center`, `marquee`, `frameset` or a `table` with a width attribute
    pub has_deprecated_tags: bool,
    /// A known SPA root element or framework asset path was found
    pub has_modern_framework: bool,
    /// WordPress markup or generator tag
    pub uses_wordpress: bool,
}

impl PageSignals {
    /// Whether the page declares a viewport
    pub fn has_viewport(&self) -> bool {
        self.viewport.is_some()
    }
}
