use unicode_width::UnicodeWidthChar;

use url::{Host, Position, Url};

use crate::PreviewError;

/// Safely truncate a string, ensuring it is not truncated in the middle of multi-byte characters
///
/// The display width of the result (ellipsis included) never exceeds `max_width`.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width < 3 {
        return ".".repeat(max_width);
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

/// Parses user input into a URL that has both a scheme and a host.
pub fn parse_input_url(input: &str) -> Result<Url, PreviewError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed)?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(PreviewError::InvalidUrl(format!(
            "missing host in '{trimmed}'"
        )));
    }

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PreviewError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}

/// The network location of `url`: userinfo, host and any non-default port.
///
/// Internationalized domains are shown in Unicode, not punycode.
pub fn network_location(url: &Url) -> String {
    let userinfo = &url[Position::BeforeUsername..Position::BeforeHost];

    let host = match url.host() {
        Some(Host::Domain(domain)) => match idna::domain_to_unicode(domain) {
            (unicode, Ok(())) => unicode,
            (_, Err(_)) => domain.to_string(),
        },
        _ => url.host_str().unwrap_or_default().to_string(),
    };

    match url.port() {
        Some(port) => format!("{userinfo}{host}:{port}"),
        None => format!("{userinfo}{host}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Hello, world!", 10), "Hello, ...");
        assert_eq!(truncate_str("你好，世界！", 8), "你好...");
        assert_eq!(truncate_str("Hi!", 10), "Hi!");
    }

    #[test]
    fn test_truncate_str_narrower_than_ellipsis() {
        assert_eq!(truncate_str("Hello", 2), "..");
        assert_eq!(truncate_str("Hello", 0), "");
        assert_eq!(truncate_str("Hi", 2), "Hi");
    }

    #[test]
    fn test_parse_input_url_trims_whitespace() {
        let url = parse_input_url("  https://example.com/post  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/post");
    }

    #[test]
    fn test_parse_input_url_rejects_missing_parts() {
        for input in ["not-a-url", "", "/relative/path", "mailto:someone@example.com"] {
            assert!(
                matches!(parse_input_url(input), Err(PreviewError::InvalidUrl(_))),
                "expected InvalidUrl for {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_input_url_rejects_non_http_schemes() {
        assert!(matches!(
            parse_input_url("ftp://example.com/file"),
            Err(PreviewError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_network_location() {
        let url = Url::parse("http://example.com/a").unwrap();
        assert_eq!(network_location(&url), "example.com");

        let url = Url::parse("http://user@blog.example.org:8080/x?y=1").unwrap();
        assert_eq!(network_location(&url), "user@blog.example.org:8080");

        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(network_location(&url), "example.com");

        let url = Url::parse("http://[::1]:3000/").unwrap();
        assert_eq!(network_location(&url), "[::1]:3000");
    }

    #[test]
    fn test_network_location_decodes_punycode() {
        let url = Url::parse("http://bücher.de/a").unwrap();
        assert_eq!(url.host_str(), Some("xn--bcher-kva.de"));
        assert_eq!(network_location(&url), "bücher.de");

        let url = Url::parse("http://user:pw@xn--bcher-kva.de:8080/").unwrap();
        assert_eq!(network_location(&url), "user:pw@bücher.de:8080");
    }
}
