//! Site configuration for mdsite.
//!
//! User config lives at `~/.mdsite/mdsite.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdsiteError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdsite.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdsite";

// ---------------------------------------------------------------------------
// Config structs (matching mdsite.toml schema)
// ---------------------------------------------------------------------------

/// Top-level site config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Document content settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Theme defaults.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// `[content]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base URL the documents are served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix under the base URL where `.md` resources live.
    #[serde(default = "default_docs_prefix")]
    pub docs_prefix: String,

    /// Logical identifier substituted when a path has no mapping.
    #[serde(default = "default_doc")]
    pub default_doc: String,

    /// Policy for unmapped logical identifiers.
    #[serde(default)]
    pub unmapped: UnmappedPolicy,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            docs_prefix: default_docs_prefix(),
            default_doc: default_doc(),
            unmapped: UnmappedPolicy::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5173".into()
}
fn default_docs_prefix() -> String {
    "content/docs".into()
}
fn default_doc() -> String {
    "introduction".into()
}

/// What to do when a navigation path has no entry in the document map.
///
/// Silent substitution masks typos in links, so the behavior is a policy
/// rather than a fact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmappedPolicy {
    /// Silently substitute the default document.
    #[default]
    Fallback,
    /// Surface the miss as a not-found error.
    NotFound,
}

/// `[theme]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Dark mode used when no persisted preference exists yet.
    #[serde(default)]
    pub default_dark_mode: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_dark_mode: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mdsite/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdsiteError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mdsite/mdsite.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the site config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<SiteConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(SiteConfig::default());
    }

    load_config_from(&path)
}

/// Load the site config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<SiteConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdsiteError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MdsiteError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| MdsiteError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = SiteConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| MdsiteError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| MdsiteError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("introduction"));
    }

    #[test]
    fn config_roundtrip() {
        let config = SiteConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: SiteConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.content.default_doc, "introduction");
        assert_eq!(parsed.content.unmapped, UnmappedPolicy::Fallback);
    }

    #[test]
    fn unmapped_policy_parses_kebab_case() {
        let toml_str = r#"
[content]
base_url = "https://docs.example.com"
unmapped = "not-found"
"#;
        let config: SiteConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.content.unmapped, UnmappedPolicy::NotFound);
        assert_eq!(config.content.base_url, "https://docs.example.com");
        // Unset fields fall back to defaults
        assert_eq!(config.content.docs_prefix, "content/docs");
    }
}
