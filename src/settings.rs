//! Fit settings and their partial-override form.

use serde::Deserialize;

use crate::Pt;

/// Errors raised while reading settings overrides.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The overrides document is not valid JSON for the settings shape.
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for [`compute_font_size`](crate::compute_font_size).
///
/// `min_size_px` is expected to be below `starting_size_px`. Nothing checks it:
/// inverted bounds make the search empty and the minimum is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSettings {
    pub max_lines: u32,
    pub font_family: String,
    pub starting_size_px: u32,
    pub min_size_px: u32,
    /// Cap the result so that no single word overflows the width on its own.
    /// Costs one ascending probe per word.
    pub one_word_line_check: bool,
    /// Total height limit. Zero means unconstrained.
    pub height_px: Pt,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            max_lines: 2,
            font_family: "sans-serif".to_string(),
            starting_size_px: 90,
            min_size_px: 30,
            one_word_line_check: false,
            height_px: Pt::ZERO,
        }
    }
}

impl FitSettings {
    /// Parses a JSON object of overrides and applies it over the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let overrides: FitOverrides = serde_json::from_str(json)?;
        Ok(Self::default().merged(overrides))
    }

    /// Returns a copy with every field set in `overrides` replaced.
    pub fn merged(mut self, overrides: FitOverrides) -> Self {
        if let Some(max_lines) = overrides.max_lines {
            self.max_lines = max_lines;
        }
        if let Some(font_family) = overrides.font_family {
            self.font_family = font_family;
        }
        if let Some(starting_size_px) = overrides.starting_size_px {
            self.starting_size_px = starting_size_px;
        }
        if let Some(min_size_px) = overrides.min_size_px {
            self.min_size_px = min_size_px;
        }
        if let Some(one_word_line_check) = overrides.one_word_line_check {
            self.one_word_line_check = one_word_line_check;
        }
        if let Some(height_px) = overrides.height_px {
            self.height_px = height_px;
        }
        self
    }

    pub fn with_max_lines(mut self, max_lines: u32) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_starting_size(mut self, starting_size_px: u32) -> Self {
        self.starting_size_px = starting_size_px;
        self
    }

    pub fn with_min_size(mut self, min_size_px: u32) -> Self {
        self.min_size_px = min_size_px;
        self
    }

    pub fn with_one_word_line_check(mut self, enabled: bool) -> Self {
        self.one_word_line_check = enabled;
        self
    }

    pub fn with_height(mut self, height_px: Pt) -> Self {
        self.height_px = height_px;
        self
    }
}

/// A partial [`FitSettings`]. Unset fields keep their defaults when merged.
///
/// Deserializes from JSON with either `snake_case` or `camelCase` keys; unknown
/// keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FitOverrides {
    #[serde(alias = "maxLines")]
    pub max_lines: Option<u32>,
    #[serde(alias = "fontFamily")]
    pub font_family: Option<String>,
    #[serde(alias = "startingSizePx", alias = "startingSize")]
    pub starting_size_px: Option<u32>,
    #[serde(alias = "minSizePx", alias = "minSize")]
    pub min_size_px: Option<u32>,
    #[serde(alias = "oneWordLineCheck")]
    pub one_word_line_check: Option<bool>,
    #[serde(alias = "heightPx", alias = "height")]
    pub height_px: Option<Pt>,
}
