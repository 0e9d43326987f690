use serde::Deserialize;

use routestat_core::error::{Result, RouteStatError};
use routestat_core::naming::DEFAULT_PREFIX;

/// Characters that would break a StatsD line if they appeared in a name.
const RESERVED: [char; 4] = [':', '|', '@', '#'];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub statsd: InterceptorConfig,
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RouteStatError::UnsupportedVersion);
        }
        self.statsd.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Options accepted by the interceptor factory. Absent keys fall back to
/// their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptorConfig {
    #[serde(default = "default_collector_host")]
    pub collector_host: String,

    #[serde(default = "default_collector_port")]
    pub collector_port: u16,

    /// Name of the per-request field an application may use to carry its own
    /// key. Carried in the option set; derived names do not depend on it.
    #[serde(default = "default_request_key_field")]
    pub request_key_field: String,

    /// Leading components of every metric name.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            collector_host: default_collector_host(),
            collector_port: default_collector_port(),
            request_key_field: default_request_key_field(),
            prefix: default_prefix(),
        }
    }
}

impl InterceptorConfig {
    /// Full validation, used when the factory builds its own client.
    pub fn validate(&self) -> Result<()> {
        self.validate_collector()?;
        self.validate_naming()
    }

    pub fn validate_collector(&self) -> Result<()> {
        if self.collector_host.trim().is_empty() {
            return Err(RouteStatError::InvalidConfig(
                "statsd.collector_host must not be empty".into(),
            ));
        }
        if self.collector_port == 0 {
            return Err(RouteStatError::InvalidConfig(
                "statsd.collector_port must be between 1 and 65535".into(),
            ));
        }
        Ok(())
    }

    /// Checks that only matter for naming; an injected client skips the
    /// collector checks.
    pub fn validate_naming(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(RouteStatError::InvalidConfig("statsd.prefix must not be empty".into()));
        }
        if self
            .prefix
            .chars()
            .any(|c| c.is_whitespace() || RESERVED.contains(&c))
        {
            return Err(RouteStatError::InvalidConfig(format!(
                "statsd.prefix contains a reserved character: {}",
                self.prefix
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_collector_host() -> String {
    "127.0.0.1".into()
}
fn default_collector_port() -> u16 {
    8125
}
fn default_request_key_field() -> String {
    "statsdKey".into()
}
fn default_prefix() -> String {
    DEFAULT_PREFIX.into()
}
