//! `[serve]` section configuration.
//!
//! Contains HTTP front settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5277                 # HTTP port number
//! scheme = "http"             # Scheme used for redirect targets
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.
//! Set `scheme = "https"` behind a TLS-terminating proxy so redirect
//! targets keep the public scheme.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// HTTP front settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Scheme combined with the `Host` header to form the request origin.
    pub scheme: String,
}

impl ServeConfig {
    pub const SCHEME: FieldPath = FieldPath::new("serve.scheme");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !matches!(self.scheme.as_str(), "http" | "https") {
            diag.error(Self::SCHEME, format!("unsupported scheme `{}`", self.scheme));
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5277,
            scheme: "http".to_string(),
        }
    }
}
