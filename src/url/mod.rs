//! URL handling for Seine
//!
//! This module provides URL normalization and the domain-admissibility
//! predicate that decides which discovered links enter the crawl frontier.

mod admissible;
mod normalize;

use crate::UrlError;
use url::Url;

pub use admissible::is_admissible;
pub use normalize::normalize_url;

/// Extracts the crawl domain from a seed URL.
///
/// The host is lowercased and a leading `www.` label is dropped, so a seed of
/// `https://www.caltech.edu/` scopes the crawl to `caltech.edu` and all of
/// its subdomains (including `www.` itself) under the structural suffix rule
/// of [`is_admissible`].
///
/// # Examples
///
/// ```
/// use seine::url::seed_domain;
///
/// assert_eq!(seed_domain("https://www.caltech.edu/").unwrap(), "caltech.edu");
/// ```
pub fn seed_domain(seed: &str) -> Result<String, UrlError> {
    let parsed = Url::parse(seed).map_err(|e| UrlError::Parse(e.to_string()))?;
    let host = parsed
        .host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| UrlError::MissingHost(seed.to_string()))?;
    Ok(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_domain() {
        assert_eq!(seed_domain("https://caltech.edu/").unwrap(), "caltech.edu");
    }

    #[test]
    fn test_seed_domain_strips_www() {
        assert_eq!(
            seed_domain("https://www.caltech.edu/").unwrap(),
            "caltech.edu"
        );
    }

    #[test]
    fn test_seed_domain_lowercased() {
        assert_eq!(
            seed_domain("https://CALTECH.EDU/about").unwrap(),
            "caltech.edu"
        );
    }

    #[test]
    fn test_www_host_admissible_under_seed_domain() {
        let domain = seed_domain("https://www.caltech.edu/").unwrap();
        assert!(is_admissible("https://www.caltech.edu/about", &domain));
        assert!(is_admissible("https://caltech.edu", &domain));
    }

    #[test]
    fn test_seed_domain_malformed() {
        assert!(seed_domain("not a url").is_err());
    }
}
