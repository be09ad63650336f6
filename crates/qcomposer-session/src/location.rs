//! Where the share token lives.

/// A query-string store for the snapshot token.
///
/// Writes replace the current entry; they never add a history entry, so
/// persisting after every edit does not flood back/forward navigation.
pub trait Location {
    /// Current value of `key`, if present.
    fn query_param(&self, key: &str) -> Option<String>;

    /// Set `key` to `value` in place.
    fn replace_query_param(&mut self, key: &str, value: &str);
}

/// In-memory [`Location`], for embedding without a browser and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    params: Vec<(String, String)>,
    replacements: usize,
}

impl MemoryLocation {
    /// An empty query string.
    pub fn new() -> Self {
        Self::default()
    }

    /// A query string with one parameter already set.
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            params: vec![(key.into(), value.into())],
            replacements: 0,
        }
    }

    /// Number of writes so far.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    /// Render as `k=v&k=v`.
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Location for MemoryLocation {
    fn query_param(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn replace_query_param(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
        self.replacements += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_overwrites_in_place() {
        let mut location = MemoryLocation::with_param("lang", "en");
        location.replace_query_param("circuit", "abc");
        location.replace_query_param("circuit", "def");

        assert_eq!(location.query_param("circuit").as_deref(), Some("def"));
        assert_eq!(location.query_string(), "lang=en&circuit=def");
        assert_eq!(location.replacements(), 2);
    }

    #[test]
    fn test_missing_param() {
        let location = MemoryLocation::new();
        assert_eq!(location.query_param("circuit"), None);
        assert_eq!(location.replacements(), 0);
    }
}
