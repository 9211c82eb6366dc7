//! URL validation for cache keys

use url::Url;

use crate::utils::{self, FavicacheError};

/// A URL that has both a scheme and a host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidUri {
    pub scheme: String,
    pub host: String,
}

/// Turns raw URL strings into structured URIs
#[cfg_attr(test, mockall::automock)]
pub trait UrlValidator: Send + Sync {
    /// Returns `None` for anything that is not a usable URL
    fn validate(&self, raw: &str) -> Option<ValidUri>;
}

/// Default validator backed by the `url` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlParser;

impl UrlParser {
    /// Parse `raw`, explaining why it was rejected.
    ///
    /// Hosts come back in the ASCII form the `url` crate normalizes to, so
    /// internationalized hosts are punycode (`xn--...`), not Unicode.
    pub fn parse(&self, raw: &str) -> utils::Result<ValidUri> {
        let invalid = |why: &str| FavicacheError::InvalidUrl(format!("{:?}: {}", raw, why));
        let parsed = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
        let host = parsed
            .host_str()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| invalid("no host"))?;
        Ok(ValidUri {
            scheme: parsed.scheme().to_string(),
            host: host.to_string(),
        })
    }
}

impl UrlValidator for UrlParser {
    fn validate(&self, raw: &str) -> Option<ValidUri> {
        match self.parse(raw) {
            Ok(uri) => Some(uri),
            Err(e) => {
                log::debug!("{}", e);
                None
            }
        }
    }
}
