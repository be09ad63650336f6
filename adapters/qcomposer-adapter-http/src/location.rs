//! [`Location`] backed by a full page URL.

use qcomposer_session::Location;
use reqwest::Url;

use crate::error::{HttpServiceError, HttpServiceResult};

/// A page URL whose query string carries the share token.
///
/// Replacing a parameter edits the URL in place and keeps every other
/// parameter, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlLocation {
    url: Url,
}

impl UrlLocation {
    /// Wrap an already parsed URL.
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parse `url`.
    pub fn parse(url: &str) -> HttpServiceResult<Self> {
        Url::parse(url)
            .map(Self::new)
            .map_err(|e| HttpServiceError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    /// The current URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The current URL, as a string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl Location for UrlLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn replace_query_param(&mut self, key: &str, value: &str) {
        let mut found = false;
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter_map(|(k, v)| {
                if k != key {
                    Some((k.into_owned(), v.into_owned()))
                } else if !found {
                    found = true;
                    Some((k.into_owned(), value.to_string()))
                } else {
                    None
                }
            })
            .collect();

        let mut query = self.url.query_pairs_mut();
        query.clear();
        for (k, v) in &pairs {
            query.append_pair(k, v);
        }
        if !found {
            query.append_pair(key, value);
        }
    }
}
