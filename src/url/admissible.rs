use url::Url;

/// Path extensions that never resolve to indexable HTML.
const SKIP_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".mp3", ".mp4", ".avi", ".mov",
    ".wmv", ".flv", ".zip", ".tar", ".gz", ".rar", ".7z", ".doc", ".docx", ".ppt", ".pptx",
    ".xls", ".xlsx", ".exe", ".dmg", ".pkg", ".deb", ".rpm", ".css", ".js", ".xml", ".rss",
    ".json",
];

/// Checks whether a URL belongs to the crawl's domain scope.
///
/// A URL is admissible when its host is the seed domain itself or a subdomain
/// of it, matched structurally on dot-separated labels (`blog.example.com`
/// matches `example.com`; `notexample.com` does not), and its path does not
/// end in one of the known non-HTML extensions.
///
/// Malformed URLs are simply not admissible; this predicate never fails.
///
/// # Examples
///
/// ```
/// use seine::url::is_admissible;
///
/// assert!(is_admissible("https://sub.caltech.edu/x", "caltech.edu"));
/// assert!(!is_admissible("https://notcaltech.edu/x", "caltech.edu"));
/// assert!(!is_admissible("https://caltech.edu/doc.pdf", "caltech.edu"));
/// ```
pub fn is_admissible(url: &str, domain: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    let host = match parsed.host_str() {
        Some(h) => h.to_lowercase(),
        None => return false,
    };

    // Structural suffix rule: the seed domain or any subdomain of it.
    if host != domain && !host.ends_with(&format!(".{}", domain)) {
        return false;
    }

    let path = parsed.path().to_lowercase();
    !SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
