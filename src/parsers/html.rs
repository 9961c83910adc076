use crate::parsers::PageSignals;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static VIEWPORT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="viewport"]"#).expect("valid selector"));

static GENERATOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="generator"]"#).expect("valid selector"));

/// Presentational markup that predates CSS layout
static DEPRECATED: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("font, center, marquee, frameset, table[width]").expect("valid selector")
});

/// Root elements and asset paths left behind by SPA frameworks
static FRAMEWORK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(concat!(
        "#__next, [data-reactroot], #__nuxt, #___gatsby, [ng-version], [data-v-app], ",
        r#"script[src*="_next"], script[src*="_nuxt"]"#
    ))
    .expect("valid selector")
});

/// Raw markup fragment that gives WordPress away even without a generator tag
const WORDPRESS_MARKER: &str = "wp-content";

/// Parses an HTML document and extracts the signals the scoring rubric looks at
pub fn parse(html: &str) -> PageSignals {
    let doc = Html::parse_document(html);

    // An empty content attribute counts as no viewport at all
    let viewport = doc
        .select(&VIEWPORT)
        .next()
        .and_then(|e| e.value().attr("content"))
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string());

    let generator = doc
        .select(&GENERATOR)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(|c| c.to_string());

    let has_deprecated_tags = doc.select(&DEPRECATED).next().is_some();
    let has_modern_framework = doc.select(&FRAMEWORK).next().is_some();

    let uses_wordpress = html.contains(WORDPRESS_MARKER)
        || generator
            .as_deref()
            .is_some_and(|g| g.to_lowercase().contains("wordpress"));

    ::log::debug!(
        "HTML signals: viewport={:?} deprecated={} framework={} wordpress={}",
        viewport,
        has_deprecated_tags,
        has_modern_framework,
        uses_wordpress
    );

    PageSignals {
        viewport,
        generator,
        has_deprecated_tags,
        has_modern_framework,
        uses_wordpress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_detection() {
        let signals = parse(
            r#"<html><head><meta name="viewport" content="width=device-width"></head><body></body></html>"#,
        );
        assert_eq!(signals.viewport.as_deref(), Some("width=device-width"));

        let signals = parse(r#"<html><head><meta name="viewport" content=""></head></html>"#);
        assert!(signals.viewport.is_none());

        let signals = parse("<html><head><title>x</title></head></html>");
        assert!(signals.viewport.is_none());
    }

    #[test]
    fn test_deprecated_tags() {
        for markup in [
            "<font color=red>hi</font>",
            "<center>hi</center>",
            "<marquee>hi</marquee>",
            r#"<table width="600"><tr><td>x</td></tr></table>"#,
        ] {
            let html = format!("<html><body>{markup}</body></html>");
            assert!(parse(&html).has_deprecated_tags, "missed: {markup}");
        }

        let signals = parse("<html><body><table><tr><td>x</td></tr></table></body></html>");
        assert!(!signals.has_deprecated_tags);
    }

    #[test]
    fn test_framework_fingerprints() {
        for markup in [
            r#"<div id="__next"></div>"#,
            r#"<div data-reactroot=""></div>"#,
            r#"<div id="__nuxt"></div>"#,
            r#"<script src="/_next/static/chunks/main.js"></script>"#,
            r#"<app-root ng-version="17.0.0"></app-root>"#,
        ] {
            let html = format!("<html><body>{markup}</body></html>");
            assert!(parse(&html).has_modern_framework, "missed: {markup}");
        }

        let signals = parse(r#"<html><body><div id="main"></div></body></html>"#);
        assert!(!signals.has_modern_framework);
    }

    #[test]
    fn test_wordpress_detection() {
        let signals =
            parse(r#"<html><head><link href="/wp-content/themes/x.css"></head></html>"#);
        assert!(signals.uses_wordpress);

        let signals =
            parse(r#"<html><head><meta name="generator" content="WordPress 6.4"></head></html>"#);
        assert!(signals.uses_wordpress);
        assert_eq!(signals.generator.as_deref(), Some("WordPress 6.4"));

        let signals = parse(r#"<html><head><meta name="generator" content="Hugo"></head></html>"#);
        assert!(!signals.uses_wordpress);
    }
}
