//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root.
//! Configuration is sparse: stock defaults cover everything, and a config
//! file only needs the keys it wants to override. Unknown keys are
//! rejected to catch typos early.
//!
//! ```toml
//! [site]
//! title = "Developer Portal"
//!
//! [colors.light]
//! background = "#fafafa"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in headers and metadata.
    pub site: SiteInfo,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout settings.
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site: SiteInfo::default(),
            colors: ColorConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.colors.light.named().into_iter().chain(self.colors.dark.named())
        {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "color '{name}' must be #rrggbb, got '{value}'"
                )));
            }
        }
        if self.theme.content_width.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.content_width must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    /// Absolute URL prefix for generated links, no trailing slash.
    pub base_url: String,
    pub github_url: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo {
            title: "Developer Portal".to_string(),
            description: String::new(),
            base_url: String::new(),
            github_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    #[serde(default = "ColorScheme::default_light")]
    pub light: ColorScheme,
    #[serde(default = "ColorScheme::default_dark")]
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    pub accent: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

impl ColorScheme {
    pub fn default_light() -> Self {
        ColorScheme {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#0550ae".to_string(),
            link_hover: "#033d8b".to_string(),
            accent: "#eb1f1f".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        ColorScheme {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#539bf5".to_string(),
            link_hover: "#84b8f7".to_string(),
            accent: "#ff5c5c".to_string(),
        }
    }

    fn named(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("background", &self.background),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("border", &self.border),
            ("link", &self.link),
            ("link_hover", &self.link_hover),
            ("accent", &self.accent),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Max width of the centered content container (CSS value).
    pub content_width: String,
    /// Gap between grid columns (CSS value).
    pub grid_gap: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            content_width: "72rem".to_string(),
            grid_gap: "1.5rem".to_string(),
        }
    }
}

/// Load `config.toml` from the content root, falling back to stock
/// defaults when no file exists.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.is_file() {
        let body = fs::read_to_string(&path)?;
        toml::from_str(&body)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// CSS custom properties for both color schemes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
    --color-accent: {light_accent};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
        --color-accent: {dark_accent};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        light_accent = colors.light.accent,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
        dark_accent = colors.dark.accent,
    )
}

/// A fully documented stock config, printed by `portalgen gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Portalgen Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Shown in page metadata and the hero fallback.
title = "Developer Portal"

# Meta description applied to pages without their own.
description = ""

# Absolute URL prefix for generated links (no trailing slash).
# Leave empty for root-relative links.
base_url = ""

# Linked from generated pages when set.
# github_url = "https://github.com/example/portal"

# ---------------------------------------------------------------------------
# Colors (CSS #rrggbb values; light and dark schemes)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"      # descriptions, captions, nav
border = "#e0e0e0"
link = "#0550ae"
link_hover = "#033d8b"
accent = "#eb1f1f"          # promo links, current nav item

[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#539bf5"
link_hover = "#84b8f7"
accent = "#ff5c5c"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Max width of the centered content container (CSS value).
content_width = "72rem"

# Gap between grid columns (CSS value).
grid_gap = "1.5rem"
"##
}
