//! Boot configuration.
//!
//! An explicitly constructed value handed to the bootstrapper, not ambient
//! global state. A page embeds it as JSON or just uses the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootConfig {
    /// Relative URL of the compiled module, fetched once at bootstrap.
    pub module_url: String,
    /// Name of the page-provided runtime shim constructor on the global
    /// object. The shim supplies the import table and the entry point.
    pub runtime_global: String,
    /// Process-wide debug flag. Nothing in scope ever sets it to `true`.
    pub debug: bool,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            module_url: "main.wasm".to_string(),
            runtime_global: "Go".to_string(),
            debug: false,
        }
    }
}

impl BootConfig {
    /// Read-only accessor for the debug flag.
    pub fn debugging_enabled(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_accessor_is_false_by_default_on_every_read() {
        let config = BootConfig::default();
        for _ in 0..100 {
            assert!(!config.debugging_enabled());
        }
    }

    #[test]
    fn partial_json_config_falls_back_to_defaults() {
        let config: BootConfig = serde_json::from_str(r#"{"module_url":"app.wasm"}"#)
            .expect("config should parse");
        assert_eq!(config.module_url, "app.wasm");
        assert_eq!(config.runtime_global, "Go");
        assert!(!config.debugging_enabled());
    }
}
