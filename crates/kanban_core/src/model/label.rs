//! Label reference data.
//!
//! # Invariants
//! - `color` is 3 or 6 hex digits, case-insensitive, optionally `#`-prefixed.
//! - Labels are read-only from the board's perspective; they are seeded and
//!   only referenced by id.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

const DARK_FOREGROUND: &str = "#0f172a";
const LIGHT_FOREGROUND: &str = "#f8fafc";
const LUMINANCE_THRESHOLD: f64 = 140.0;

/// Opaque label identifier.
pub type LabelId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    pub color: String,
}

impl Label {
    pub fn new(id: impl Into<LabelId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyLabelName);
        }
        if !is_hex_color(&self.color) {
            return Err(ValidationError::InvalidLabelColor(self.color.clone()));
        }
        Ok(())
    }

    /// Foreground color readable on top of this label's background.
    ///
    /// Uses perceived luminance `0.299 r + 0.587 g + 0.114 b`; above 140 the
    /// background counts as light and a dark foreground is returned.
    pub fn contrast_color(&self) -> &'static str {
        let Some(hex) = normalize_hex_color(&self.color) else {
            return LIGHT_FOREGROUND;
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_or(0.0, f64::from)
        };
        let luminance = 0.299 * channel(0..2) + 0.587 * channel(2..4) + 0.114 * channel(4..6);
        if luminance > LUMINANCE_THRESHOLD {
            DARK_FOREGROUND
        } else {
            LIGHT_FOREGROUND
        }
    }
}

/// Returns whether `value` is a 3 or 6 digit hex color.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value.trim())
}

/// Expands a valid hex color to six lowercase digits without `#`.
///
/// Returns `None` for anything that is not a valid hex color.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if !is_hex_color(trimmed) {
        return None;
    }
    let hex = trimmed.trim_start_matches('#').to_ascii_lowercase();
    if hex.len() == 3 {
        return Some(hex.chars().flat_map(|c| [c, c]).collect());
    }
    Some(hex)
}
