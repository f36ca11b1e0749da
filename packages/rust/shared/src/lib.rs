//! Shared types, error model, configuration, and preferences for mdsite.
//!
//! This crate is the foundation depended on by all other mdsite crates.
//! It provides:
//! - [`MdsiteError`] — the unified error type
//! - Domain types ([`Document`], [`VersionEntry`])
//! - Configuration ([`SiteConfig`], config loading)
//! - Persisted preferences ([`ThemeState`])

pub mod config;
pub mod error;
pub mod prefs;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ContentConfig, SiteConfig, ThemeConfig, UnmappedPolicy, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{MdsiteError, Result};
pub use prefs::{Preferences, ThemeState, load_prefs_from, prefs_file_path, save_prefs_to};
pub use types::{Document, VersionEntry};
