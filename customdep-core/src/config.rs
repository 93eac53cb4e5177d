//! Configuration loading from customdep.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{CustomDepError, CustomDepResult, IoResultExt};

/// Name of the configuration file looked up at the analysed root.
pub const CONFIG_FILE: &str = "customdep.toml";

/// Main configuration structure for customdep.toml.
#[derive(Debug, Deserialize, Default)]
pub struct CustomDepConfig {
    /// Inline JSON array of deprecated APIs.
    pub deprecated_apis: Option<String>,
    /// Path to a JSON file with deprecated APIs, relative to the root.
    pub deprecated_apis_file: Option<String>,
    /// Directory names to skip while scanning for fact files.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl CustomDepConfig {
    /// Resolves the rule text: inline text wins over the referenced file.
    ///
    /// A missing or unreadable file yields `None` after a warning, so
    /// analysis proceeds with no rules.
    pub fn rules_text(&self, root: &Path) -> Option<String> {
        if let Some(text) = &self.deprecated_apis {
            return Some(text.clone());
        }
        let file = self.deprecated_apis_file.as_ref()?;
        let path = root.join(file);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read deprecated API file");
                None
            }
        }
    }

    /// True when the output format is JSON.
    pub fn wants_json(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Loads configuration from customdep.toml if it exists.
pub fn load_config(root: &Path) -> CustomDepResult<Option<CustomDepConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg = toml::from_str(&content).map_err(|e| CustomDepError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}
