//! Adapter configuration - set once when the adapter is built.
//!
//! Shared by every invocation, never mutated per request.

use gateway_bridge_core::StagePrefix;

/// Environment variable read by [`AdapterConfig::from_env`].
pub const STAGE_PREFIX_ENV: &str = "GATEWAY_BRIDGE_STAGE_PREFIX";

/// Configuration for the [`Adapter`](crate::Adapter).
///
/// # Example
///
/// ```rust
/// use gateway_bridge::AdapterConfig;
///
/// let config = AdapterConfig::new().stage_prefix("dev");
/// assert_eq!(config.get_stage_prefix().as_str(), "/dev");
///
/// let config = AdapterConfig::new().stage_prefix_segments(["dev", "api"]);
/// assert_eq!(config.get_stage_prefix().as_str(), "/dev/api");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Prefix stripped from v2 raw paths.
    stage_prefix: StagePrefix,
}

impl AdapterConfig {
    /// Create a configuration with no stage prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from [`STAGE_PREFIX_ENV`].
    ///
    /// An unset or empty variable means no prefix.
    pub fn from_env() -> Self {
        match std::env::var(STAGE_PREFIX_ENV) {
            Ok(prefix) => Self::new().stage_prefix(prefix),
            Err(_) => Self::new(),
        }
    }

    /// Set the stage prefix stripped from v2 raw paths.
    pub fn stage_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.stage_prefix = StagePrefix::new(prefix);
        self
    }

    /// Set the stage prefix from several path segments.
    pub fn stage_prefix_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stage_prefix = StagePrefix::from_segments(segments);
        self
    }

    /// Returns the configured stage prefix.
    pub fn get_stage_prefix(&self) -> &StagePrefix {
        &self.stage_prefix
    }
}
