//! HTTP Config

use std::time::Duration;

use serde::Deserialize;

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Listen address; a bare `:port` binds every interface.
    pub address: String,

    /// Deadline for reading a request body.
    pub read_timeout_seconds: u64,

    /// Deadline for producing a response.
    pub write_timeout_seconds: u64,

    /// Keep-alive idle limit.
    pub idle_timeout_seconds: u64,
}

impl HttpSettings {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.address.starts_with(':') {
            format!("0.0.0.0{}", self.address)
        } else {
            self.address.clone()
        }
    }

    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_seconds)
    }

    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_seconds)
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }
}
