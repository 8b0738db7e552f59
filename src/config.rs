//! Filter configuration.

use std::collections::HashMap;

use serde::Deserialize;

/// Configuration handed to every filter's [`init`](crate::Filter::init).
///
/// The chain does not look inside it. Every filter receives the same
/// instance, by reference, in registration order.
///
/// ```rust
/// use sluice::FilterConfig;
///
/// let config = FilterConfig::new("web")
///     .param("realm", "admin")
///     .param("cache.max-age", "3600");
///
/// assert_eq!(config.init_parameter("realm"), Some("admin"));
/// ```
///
/// It also deserializes from the host's config files:
///
/// ```json
/// { "name": "web", "params": { "realm": "admin" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    name: String,
    #[serde(default)]
    params: HashMap<String, String>,
}

impl FilterConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), params: HashMap::new() }
    }

    /// Adds an init parameter. Returns `self` for chaining.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn init_parameter(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parameter names, sorted so logs and tests see a stable order.
    pub fn init_parameter_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.params.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_params() {
        let config = FilterConfig::new("web").param("b", "2").param("a", "1");
        assert_eq!(config.name(), "web");
        assert_eq!(config.init_parameter("a"), Some("1"));
        assert_eq!(config.init_parameter("missing"), None);
        assert_eq!(config.init_parameter_names(), vec!["a", "b"]);
    }

    #[test]
    fn deserializes_with_and_without_params() {
        let config: FilterConfig =
            serde_json::from_str(r#"{"name":"web","params":{"realm":"admin"}}"#).unwrap();
        assert_eq!(config, FilterConfig::new("web").param("realm", "admin"));

        let bare: FilterConfig = serde_json::from_str(r#"{"name":"bare"}"#).unwrap();
        assert!(bare.init_parameter_names().is_empty());
    }
}
