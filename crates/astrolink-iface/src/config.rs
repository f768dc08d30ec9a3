use serde::{Deserialize, Serialize};

use crate::adapter::AstrodevHandle;
use crate::error::{IfaceError, Result};

/// Interface name used when none is configured.
pub const DEFAULT_INTERFACE_NAME: &str = "ASTRODEV";

/// Per-interface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Interface display name.
    pub name: String,
    /// Inbound frames carry a link header to strip.
    pub header_mode: bool,
    /// Radio module index used for channel table bookkeeping.
    pub module: usize,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_INTERFACE_NAME.to_string(),
            header_mode: false,
            module: 0,
        }
    }
}

impl AdapterConfig {
    /// Parse a JSON configuration document. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no interface can run with.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(IfaceError::InvalidConfig(
                "interface name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The immutable handle an interface is built from.
    pub fn handle(&self) -> AstrodevHandle {
        AstrodevHandle {
            header_mode: self.header_mode,
            module: self.module,
        }
    }
}
