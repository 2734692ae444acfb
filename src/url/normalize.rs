/// Normalizes a URL into its canonical form used for deduplication.
///
/// # Normalization Steps
///
/// 1. Strip the fragment (everything from the first `#`)
/// 2. Strip trailing slashes
/// 3. Rewrite `http://` to `https://`
/// 4. Prepend `https://` when no scheme is present
///
/// The result is a pure string transformation: malformed input is returned
/// in canonical-ish form rather than rejected, and admissibility is decided
/// separately by [`crate::url::is_admissible`].
///
/// Idempotence holds for all inputs: `normalize_url(&normalize_url(u)) ==
/// normalize_url(u)`. All trailing slashes are stripped (not just one) so a
/// second pass has nothing left to remove.
///
/// # Examples
///
/// ```
/// use seine::url::normalize_url;
///
/// assert_eq!(
///     normalize_url("http://www.caltech.edu/about/#staff"),
///     "https://www.caltech.edu/about"
/// );
/// ```
pub fn normalize_url(url: &str) -> String {
    // Step 1: strip fragment
    let url = match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    };

    // Step 2: strip trailing slashes
    let url = url.trim_end_matches('/');

    // Steps 3 & 4: force the canonical https scheme
    if let Some(rest) = url.strip_prefix("http://") {
        format!("https://{}", rest)
    } else if url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
