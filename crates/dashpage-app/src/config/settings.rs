//! Application settings
//!
//! Loaded from `config.toml` in the platform config directory. A missing
//! file means defaults; a malformed file is a hard error so typos don't
//! silently fall back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dashpage_core::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub branding: BrandingSettings,

    #[serde(default)]
    pub lifecycle: LifecycleSettings,
}

/// Naming used in page titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandingSettings {
    /// Application name appended to dashboard titles.
    #[serde(default = "default_app_title")]
    pub app_title: String,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
        }
    }
}

/// Tunables for the page lifecycle controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleSettings {
    /// Delay before the post-init live-timer push, in milliseconds.
    #[serde(default = "default_live_sync_delay_ms")]
    pub live_sync_delay_ms: u64,

    /// Whether the browser URL is rewritten when focus parameters turn out
    /// to be invalid. Public routes never rewrite regardless.
    #[serde(default = "default_url_auto_fix")]
    pub url_auto_fix: bool,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            live_sync_delay_ms: default_live_sync_delay_ms(),
            url_auto_fix: default_url_auto_fix(),
        }
    }
}

fn default_app_title() -> String {
    "Dashpage".to_string()
}

fn default_live_sync_delay_ms() -> u64 {
    250
}

fn default_url_auto_fix() -> bool {
    true
}

impl Settings {
    /// Default config file location: `<config dir>/dashpage/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dashpage").join("config.toml"))
    }

    /// Load settings from the default location. Absent file means defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).map_err(|e| Error::config(format!("parsing {}: {e}", path.display())))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.branding.app_title, "Dashpage");
        assert_eq!(settings.lifecycle.live_sync_delay_ms, 250);
        assert!(settings.lifecycle.url_auto_fix);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [branding]
            app_title = "Acme Dashboards"
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.branding.app_title, "Acme Dashboards");
        assert_eq!(settings.lifecycle.live_sync_delay_ms, 250);
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [branding]
            app_title = "Ops"

            [lifecycle]
            live_sync_delay_ms = 500
            url_auto_fix = false
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.lifecycle.live_sync_delay_ms, 500);
        assert!(!settings.lifecycle.url_auto_fix);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error_when_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Settings::load_from(&path).is_err());
    }
}
