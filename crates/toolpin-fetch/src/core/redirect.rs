use crate::error::{FetchError, Result};
use reqwest::Url;

/// Returns `true` if the HTTP status code indicates a redirect.
///
/// ```
/// use toolpin_fetch::core::is_redirect;
///
/// assert!(is_redirect(302));
/// assert!(!is_redirect(200));
/// assert!(!is_redirect(304));
/// ```
pub fn is_redirect(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Resolve the next URL of a redirect chain.
///
/// `taken` is the number of hops already followed; `location` may be relative.
pub fn next_hop(current: &Url, location: &str, taken: usize, max: usize) -> Result<Url> {
    if taken >= max {
        return Err(FetchError::TooManyRedirects { max });
    }
    current.join(location).map_err(|e| FetchError::InvalidUrl {
        url: location.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_redirect() {
        for code in [301, 302, 303, 307, 308] {
            assert!(is_redirect(code), "{code} should redirect");
        }
        for code in [200, 204, 300, 304, 404, 500] {
            assert!(!is_redirect(code), "{code} should not redirect");
        }
    }

    #[test]
    fn test_next_hop_resolves_relative() {
        let current = Url::parse("https://example.com/releases/elm.gz").unwrap();
        let next = next_hop(&current, "/mirror/elm.gz", 0, 50).unwrap();
        assert_eq!(next.as_str(), "https://example.com/mirror/elm.gz");

        let next = next_hop(&current, "https://cdn.example.com/x", 49, 50).unwrap();
        assert_eq!(next.as_str(), "https://cdn.example.com/x");
    }

    #[test]
    fn test_next_hop_cap() {
        let current = Url::parse("https://example.com/").unwrap();
        assert!(matches!(
            next_hop(&current, "/next", 50, 50),
            Err(FetchError::TooManyRedirects { max: 50 })
        ));
        assert!(matches!(
            next_hop(&current, "/next", 0, 0),
            Err(FetchError::TooManyRedirects { max: 0 })
        ));
    }
}
