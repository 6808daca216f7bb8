//! URL Validator Module
//!
//! Checks target URLs against the scheme rule and the upstream allowlist.

use std::fmt;

use crate::error::{ProxyError, Result};

// == Validated URL ==
/// A target URL that passed scheme and allowlist checks.
///
/// Holds the trimmed input verbatim; no re-encoding or normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedUrl(String);

impl ValidatedUrl {
    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the URL string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// == Allowlist ==
/// Immutable, ordered set of permitted upstream prefixes.
///
/// Matching is a literal, case-sensitive byte-prefix test. A prefix without a
/// trailing `/` therefore also admits hosts that merely extend it, so entries
/// should end at a path boundary.
#[derive(Debug, Clone)]
pub struct Allowlist {
    prefixes: Vec<String>,
}

impl Allowlist {
    // == Constructor ==
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the configured prefixes in order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    // == Permits ==
    /// Returns true if `url` starts with any configured prefix.
    pub fn permits(&self, url: &str) -> bool {
        self.prefixes.iter().any(|p| url.starts_with(p.as_str()))
    }

    // == Validate ==
    /// Validates a raw target URL.
    ///
    /// The input is trimmed, then must start with `http://` or `https://`
    /// (otherwise `InvalidUrl`) and with one of the prefixes (otherwise
    /// `NotAllowed`). Returns the trimmed string unchanged.
    pub fn validate(&self, raw: &str) -> Result<ValidatedUrl> {
        let url = raw.trim();

        if url.is_empty() {
            return Err(ProxyError::InvalidUrl("empty url".to_string()));
        }

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ProxyError::InvalidUrl(format!(
                "'{}' must start with http:// or https://",
                url
            )));
        }

        if !self.permits(url) {
            return Err(ProxyError::NotAllowed(url.to_string()));
        }

        Ok(ValidatedUrl(url.to_string()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWLIST;
    use proptest::prelude::*;

    fn default_allowlist() -> Allowlist {
        Allowlist::new(DEFAULT_ALLOWLIST)
    }

    #[test]
    fn test_allowed_url_passes_unchanged() {
        let url = default_allowlist()
            .validate("https://services.arcgis.com/abc?where=1%3D1&f=json")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://services.arcgis.com/abc?where=1%3D1&f=json"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let url = default_allowlist()
            .validate("  https://overpass-api.de/api/interpreter \n")
            .unwrap();
        assert_eq!(url.as_str(), "https://overpass-api.de/api/interpreter");
    }

    #[test]
    fn test_empty_url_is_invalid() {
        assert!(matches!(
            default_allowlist().validate("   "),
            Err(ProxyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_scheme_is_invalid() {
        let list = default_allowlist();
        assert!(matches!(
            list.validate("ftp://services.arcgis.com/abc"),
            Err(ProxyError::InvalidUrl(_))
        ));
        assert!(matches!(
            list.validate("HTTPS://services.arcgis.com/abc"),
            Err(ProxyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unlisted_host_is_not_allowed() {
        assert!(matches!(
            default_allowlist().validate("https://evil.example.com/x"),
            Err(ProxyError::NotAllowed(_))
        ));
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        assert!(matches!(
            default_allowlist().validate("https://Services.arcgis.com/abc"),
            Err(ProxyError::NotAllowed(_))
        ));
    }

    #[test]
    fn test_http_variant_of_https_prefix_is_not_allowed() {
        assert!(matches!(
            default_allowlist().validate("http://services.arcgis.com/abc"),
            Err(ProxyError::NotAllowed(_))
        ));
    }

    #[test]
    fn test_lookalike_host_rejected_by_trailing_slash() {
        assert!(matches!(
            default_allowlist().validate("https://services.arcgis.com.evil.com/"),
            Err(ProxyError::NotAllowed(_))
        ));
    }

    #[test]
    fn test_prefix_without_boundary_is_literal() {
        let list = Allowlist::new(["https://api.example.com"]);
        assert!(list.validate("https://api.example.com.evil.net/").is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_non_http_scheme_is_invalid(s in "[a-z]{0,6}:?/{0,2}[a-z0-9./]{0,20}") {
            prop_assume!(!s.starts_with("http://") && !s.starts_with("https://"));
            prop_assert!(matches!(
                default_allowlist().validate(&s),
                Err(ProxyError::InvalidUrl(_))
            ));
        }

        #[test]
        fn prop_unlisted_host_is_not_allowed(host in "[a-z]{3,12}\\.example\\.(com|org|net)", path in "[a-z0-9/]{0,20}") {
            let url = format!("https://{}/{}", host, path);
            prop_assert!(matches!(
                default_allowlist().validate(&url),
                Err(ProxyError::NotAllowed(_))
            ));
        }

        #[test]
        fn prop_listed_prefix_returns_trimmed_input(
            idx in 0usize..DEFAULT_ALLOWLIST.len(),
            suffix in "[a-zA-Z0-9/?=&%._-]{0,40}",
            pad in " {0,3}",
        ) {
            let url = format!("{}{}", DEFAULT_ALLOWLIST[idx], suffix);
            let raw = format!("{}{}{}", pad, url, pad);
            let validated = default_allowlist().validate(&raw).unwrap();
            prop_assert_eq!(validated.as_str(), url.as_str());
        }
    }
}
