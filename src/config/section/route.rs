//! `[route]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [route]
//! fallback = "/test/{id}/"          # identifier route, exactly one {id}
//! key_param = "_seo_key"            # parameter naming the alias key
//! reserved_params = ["document"]    # never written to query strings
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::route::{DEFAULT_KEY_PARAM, DEFAULT_TEMPLATE, FallbackRoute, RouteError, RoutePolicy};

/// Routing settings shared by generation and resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Fallback route template with one `{id}` placeholder.
    pub fallback: String,

    /// Parameter that carries the alias key when generating from params.
    pub key_param: String,

    /// Parameters stripped from generated query strings.
    pub reserved_params: Vec<String>,
}

impl RouteConfig {
    pub const FALLBACK: FieldPath = FieldPath::new("route.fallback");
    pub const KEY_PARAM: FieldPath = FieldPath::new("route.key_param");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Err(err) = FallbackRoute::parse(&self.fallback) {
            diag.error_with_hint(Self::FALLBACK, err.to_string(), "e.g. fallback = \"/test/{id}/\"");
        }
        if self.key_param.trim().is_empty() {
            diag.error(Self::KEY_PARAM, "must not be empty");
        }
    }

    /// Build the runtime policy. Call after [`validate`](Self::validate).
    pub fn policy(&self) -> Result<RoutePolicy, RouteError> {
        Ok(RoutePolicy::new(
            FallbackRoute::parse(&self.fallback)?,
            self.key_param.trim(),
            self.reserved_params.iter().cloned(),
        ))
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_TEMPLATE.to_string(),
            key_param: DEFAULT_KEY_PARAM.to_string(),
            reserved_params: vec!["document".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_route_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.route.fallback, "/test/{id}/");
        assert_eq!(config.route.key_param, "_seo_key");
        assert_eq!(config.route.reserved_params, vec!["document"]);
    }

    #[test]
    fn test_route_override() {
        let config = test_parse_config(
            "[route]\nfallback = \"/p/{id}\"\nkey_param = \"lang\"\nreserved_params = []",
        );
        let policy = config.route.policy().unwrap();
        assert_eq!(policy.fallback().format("42"), "/p/42");
        assert_eq!(policy.reserved(), ["lang".to_string()]);
    }

    #[test]
    fn test_route_validate() {
        let config = test_parse_config("[route]\nfallback = \"/test/\"\nkey_param = \" \"");
        let mut diag = ConfigDiagnostics::new();
        config.route.validate(&mut diag);

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field, RouteConfig::FALLBACK);
        assert_eq!(diag.errors()[1].field, RouteConfig::KEY_PARAM);
    }
}
