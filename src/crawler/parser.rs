//! Hyperlink extraction from raw markup
//!
//! Produces the raw hyperlink targets of a page as absolute URLs. Domain
//! filtering and normalization happen later in the crawl loop; this module
//! only resolves and weeds out targets that can never be crawled.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all hyperlink targets from a page as absolute URLs.
///
/// Includes `<a href>` targets; skips `javascript:`/`mailto:`/`tel:`/`data:`
/// schemes, fragment-only anchors, `download` links, and anything that fails
/// to resolve against the base URL.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute http(s) URL, or None if it should be
/// excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://caltech.edu/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://sub.caltech.edu/x">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links, vec!["https://sub.caltech.edu/x"]);
    }

    #[test]
    fn test_extract_relative_links() {
        let html = r#"<body><a href="/about">A</a><a href="news">B</a></body>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec!["https://caltech.edu/about", "https://caltech.edu/news"]
        );
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <body>
                <a href="javascript:void(0)">js</a>
                <a href="mailto:someone@caltech.edu">mail</a>
                <a href="tel:+16261234567">tel</a>
                <a href="data:text/html,hi">data</a>
            </body>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_fragment_only_anchor() {
        let html = r##"<body><a href="#top">Top</a></body>"##;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_download_link() {
        let html = r#"<body><a href="/thesis.pdf" download>Get</a></body>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_duplicates_preserved_here() {
        // Insertion-order dedup happens in the crawl loop, not in extraction.
        let html = r#"<body><a href="/a">1</a><a href="/a">2</a></body>"#;
        assert_eq!(extract_links(html, &base_url()).len(), 2);
    }

    #[test]
    fn test_malformed_markup_still_yields_links() {
        let html = r#"<body><div><a href="/a">unclosed div"#;
        assert_eq!(extract_links(html, &base_url()), vec!["https://caltech.edu/a"]);
    }
}
