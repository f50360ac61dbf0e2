use crate::utils::{network_location, parse_input_url};
use crate::{LinkMetadata, PreviewError};
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Metadata extractor, responsible for turning a fetched document into a [`LinkMetadata`]
#[derive(Clone, Default)]
pub struct MetadataExtractor;

impl MetadataExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts metadata from an already fetched document.
    ///
    /// `input_url` is what the user typed; it drives the `url` and `site_name`
    /// fallbacks.
    pub fn extract_from_html(
        &self,
        html: &str,
        input_url: &str,
    ) -> Result<LinkMetadata, PreviewError> {
        let parsed = parse_input_url(input_url)?;
        self.extract(html, &parsed, input_url)
    }

    pub(crate) fn extract(
        &self,
        html: &str,
        parsed: &Url,
        input_url: &str,
    ) -> Result<LinkMetadata, PreviewError> {
        // html5ever recovers from any markup, so parsing itself never fails.
        let document = Html::parse_document(html);

        let title = self.og_property(&document, "og:title")?;
        let description = self.og_property(&document, "og:description")?;
        let image = self.og_property(&document, "og:image")?;
        let url = self.og_property(&document, "og:url")?;
        let declared_site_name = self.og_property(&document, "og:site_name")?;

        debug!(
            title = ?title,
            description = ?description,
            image = ?image,
            url = ?url,
            site_name = ?declared_site_name,
            "Open Graph lookup results"
        );

        Ok(LinkMetadata {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            image: image.unwrap_or_default(),
            url: url.unwrap_or_else(|| input_url.trim().to_string()),
            site_name: resolve_site_name(declared_site_name.as_deref(), parsed),
        })
    }

    /// Content of the first `<meta property=...>` element, if non-empty.
    fn og_property(&self, document: &Html, property: &str) -> Result<Option<String>, PreviewError> {
        let selector = Selector::parse(&format!("meta[property='{property}']")).map_err(|e| {
            PreviewError::ParseError(format!("invalid selector for {property}: {e}"))
        })?;

        Ok(document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .map(String::from))
    }
}

/// A declared site name is only trusted when it looks like a domain (contains
/// a `.`); otherwise the host of the requested URL is used.
fn resolve_site_name(declared: Option<&str>, url: &Url) -> String {
    match declared {
        Some(name) if name.contains('.') => name.to_uppercase(),
        _ => network_location(url).to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Ignored Title</title>
    <meta property="og:title" content="Example Post">
    <meta property="og:description" content="A post about examples">
    <meta property="og:image" content="https://cdn.example.com/cover.png">
    <meta property="og:url" content="https://example.com/posts/example">
    <meta property="og:site_name" content="blog.example.com">
</head>
<body><p>Hello</p></body>
</html>"#;

    fn extract(html: &str, url: &str) -> LinkMetadata {
        MetadataExtractor::new().extract_from_html(html, url).unwrap()
    }

    #[test]
    fn test_all_tags_present() {
        let data = extract(FULL_PAGE, "https://example.com/p/1");

        assert_eq!(data.title, "Example Post");
        assert_eq!(data.description, "A post about examples");
        assert_eq!(data.image, "https://cdn.example.com/cover.png");
        assert_eq!(data.url, "https://example.com/posts/example");
        assert_eq!(data.site_name, "BLOG.EXAMPLE.COM");
    }

    #[test]
    fn test_missing_site_name_uses_host() {
        let html = r#"<meta property="og:title" content="T">"#;
        let data = extract(html, "http://example.com/a");
        assert_eq!(data.site_name, "EXAMPLE.COM");
    }

    #[test]
    fn test_site_name_without_dot_is_ignored() {
        let html = r#"<meta property="og:site_name" content="blog">"#;
        let data = extract(html, "http://example.com/a");
        assert_eq!(data.site_name, "EXAMPLE.COM");
        assert_ne!(data.site_name, "BLOG");
    }

    #[test]
    fn test_site_name_keeps_explicit_port() {
        let data = extract("<html></html>", "http://localhost:8080/page");
        assert_eq!(data.site_name, "LOCALHOST:8080");
    }

    #[test]
    fn test_internationalized_host_is_not_punycode() {
        let data = extract("<html></html>", "http://bücher.de/a");
        assert_eq!(data.site_name, "BÜCHER.DE");
    }

    #[test]
    fn test_missing_url_falls_back_to_trimmed_input() {
        let data = extract("<html></html>", "  https://example.com/a?b=c  ");
        assert_eq!(data.url, "https://example.com/a?b=c");
    }

    #[test]
    fn test_missing_tags_yield_empty_strings() {
        let data = extract("<html><head></head></html>", "https://example.com");

        assert_eq!(data.title, "");
        assert_eq!(data.description, "");
        assert_eq!(data.image, "");
        assert_eq!(data.url, "https://example.com");
        assert_eq!(data.site_name, "EXAMPLE.COM");
    }

    #[test]
    fn test_empty_and_missing_content_are_absent() {
        let html = r#"
            <meta property="og:title" content="">
            <meta property="og:description">
            <meta property="og:url" content="   ">
        "#;
        let data = extract(html, "https://example.com/x");

        assert_eq!(data.title, "");
        assert_eq!(data.description, "");
        assert_eq!(data.url, "https://example.com/x");
    }

    #[test]
    fn test_first_matching_tag_wins() {
        let html = r#"
            <meta property="og:title" content="First">
            <meta property="og:title" content="Second">
        "#;
        assert_eq!(extract(html, "https://example.com").title, "First");
    }

    #[test]
    fn test_values_are_trimmed() {
        let html = r#"<meta property="og:title" content="  Padded Title  ">"#;
        assert_eq!(extract(html, "https://example.com").title, "Padded Title");
    }

    #[test]
    fn test_name_attribute_is_not_open_graph() {
        let html = r#"<meta name="og:title" content="Wrong attribute">"#;
        assert_eq!(extract(html, "https://example.com").title, "");
    }

    #[test]
    fn test_malformed_html_does_not_fail() {
        let html = r#"<html><head><meta property="og:title" content="Still Found"
            <div><p>unclosed <b>tags</i></head"#;
        let result = MetadataExtractor::new().extract_from_html(html, "https://example.com");
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_input_url() {
        let result = MetadataExtractor::new().extract_from_html(FULL_PAGE, "not-a-url");
        assert!(matches!(result, Err(PreviewError::InvalidUrl(_))));
    }
}
