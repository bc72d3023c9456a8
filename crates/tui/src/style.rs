//! Styling source for stepline widgets.
//!
//! A [`StyleSheet`] is a small JSON document of named sections, each mapping
//! attribute keys to raw values. Widgets read their required attributes
//! through typed fail-fast getters: a missing or malformed attribute is an
//! error at construction time, never a silent default.
//!
//! The sheet itself can come from three places, in priority order: a path
//! the caller supplies directly, the `STEPLINE_STYLE` environment variable,
//! or the embedded default compiled into this crate. Problems *loading* an
//! override fall back to the embedded sheet with a warning; problems with an
//! *attribute* never fall back.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use once_cell::sync::Lazy;
use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::step::StepDescriptor;

/// Environment variable naming a JSON stylesheet that overrides the
/// embedded one.
pub const STYLE_PATH_ENV: &str = "STEPLINE_STYLE";

/// Section holding the progress bar's construction-time attributes.
pub const PROGRESS_SECTION: &str = "step_progress";

const DEFAULT_SHEET: &str = include_str!("default_style.json");

static EMBEDDED: Lazy<StyleSheet> = Lazy::new(|| match StyleSheet::from_json_str(DEFAULT_SHEET) {
    Ok(sheet) => sheet,
    Err(err) => {
        warn!(%err, "embedded stylesheet failed to parse");
        StyleSheet::default()
    }
});

/// Why a stylesheet or one of its attributes could not be used.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("stylesheet I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stylesheet is not valid JSON: {0}")]
    Document(#[from] serde_json::Error),

    #[error("stylesheet section {name:?} is malformed: {source}")]
    Section {
        name: String,
        source: serde_json::Error,
    },

    #[error("required styling attribute {section}.{key} is missing")]
    MissingAttribute { section: String, key: String },

    #[error("styling attribute {section}.{key} is malformed: {reason}")]
    Malformed {
        section: String,
        key: String,
        reason: String,
    },

    #[error("color {value:?} is not of the form #RRGGBB")]
    InvalidColor { value: String },
}

fn malformed(section: &str, key: &str, reason: &str) -> StyleError {
    StyleError::Malformed {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// A parsed styling document: named sections of raw attribute values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet {
    sections: BTreeMap<String, serde_json::Map<String, serde_json::Value>>,
}

impl StyleSheet {
    /// Parses a stylesheet from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a stylesheet file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The stylesheet compiled into this crate.
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    /// Loads the effective stylesheet: the `STEPLINE_STYLE` override when it
    /// is set and readable, otherwise the embedded default.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(STYLE_PATH_ENV) {
            match Self::from_path(&path) {
                Ok(sheet) => {
                    debug!(%path, "loaded stylesheet override");
                    return sheet;
                }
                Err(err) => warn!(%path, %err, "ignoring unusable stylesheet override"),
            }
        }
        debug!("using embedded stylesheet");
        Self::embedded()
    }

    fn attr(&self, section: &str, key: &str) -> Option<&serde_json::Value> {
        self.sections.get(section)?.get(key)
    }

    /// Deserializes a whole section into `T`. Returns `Ok(None)` when the
    /// section is absent; a present-but-malformed section is an error.
    pub fn section<T: serde::de::DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, StyleError> {
        let Some(section) = self.sections.get(name) else {
            return Ok(None);
        };
        let value = serde_json::Value::Object(section.clone());
        match serde_json::from_value(value) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(source) => Err(StyleError::Section {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Reads a required `#RRGGBB` color attribute.
    pub fn color_or_err(&self, section: &str, key: &str) -> Result<Color, StyleError> {
        let value = self
            .attr(section, key)
            .ok_or_else(|| StyleError::MissingAttribute {
                section: section.to_string(),
                key: key.to_string(),
            })?;
        value
            .as_str()
            .and_then(parse_hex_color)
            .ok_or_else(|| malformed(section, key, "expected a \"#RRGGBB\" string"))
    }

    /// Reads a required non-negative integer attribute.
    pub fn int_or_err(&self, section: &str, key: &str) -> Result<u64, StyleError> {
        let value = self
            .attr(section, key)
            .ok_or_else(|| StyleError::MissingAttribute {
                section: section.to_string(),
                key: key.to_string(),
            })?;
        value
            .as_u64()
            .ok_or_else(|| malformed(section, key, "expected a non-negative integer"))
    }
}

/// Parses `#RRGGBB` (case-insensitive) into an RGB color.
pub fn parse_hex_color(raw: &str) -> Option<Color> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Construction-time configuration for the progress bar.
///
/// Read once from a stylesheet and never revisited; there is no live
/// re-theming of an existing component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBarConfig {
    pub active_tint: Color,
    pub inactive_tint: Color,
    /// Duration of one active/inactive tint transition.
    pub animation: Duration,
}

impl ProgressBarConfig {
    /// Reads the three required attributes from the `step_progress` section.
    ///
    /// Fails if any of `active_tint`, `inactive_tint`, or `duration` is
    /// absent or malformed. There is no default for any of them.
    pub fn from_styles(styles: &StyleSheet) -> Result<Self, StyleError> {
        let active_tint = styles.color_or_err(PROGRESS_SECTION, "active_tint")?;
        let inactive_tint = styles.color_or_err(PROGRESS_SECTION, "inactive_tint")?;
        let duration = styles.int_or_err(PROGRESS_SECTION, "duration")?;
        Ok(Self {
            active_tint,
            inactive_tint,
            animation: Duration::from_millis(duration),
        })
    }
}

/// One step's styling as it appears in a stylesheet list.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    pub icon: char,
    pub active_tint: String,
    pub inactive_tint: String,
}

impl RawStep {
    /// Resolves the raw tints into a [`StepDescriptor`].
    pub fn to_descriptor(&self) -> Result<StepDescriptor, StyleError> {
        let active_tint =
            parse_hex_color(&self.active_tint).ok_or_else(|| StyleError::InvalidColor {
                value: self.active_tint.clone(),
            })?;
        let inactive_tint =
            parse_hex_color(&self.inactive_tint).ok_or_else(|| StyleError::InvalidColor {
                value: self.inactive_tint.clone(),
            })?;
        Ok(StepDescriptor::new(self.icon, active_tint, inactive_tint))
    }
}
