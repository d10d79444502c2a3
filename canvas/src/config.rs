//! Runtime tunables for the engine.
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! host can pass a partial JSON object and override only what it needs:
//!
//! ```json
//! { "angleStepDeg": 15, "historyLimit": 500 }
//! ```

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANGLE_STEP_DEG, HIGHLIGHT_ENTITY_DISTANCE_PX, HISTORY_LIMIT, HOVERED_SNAP_POINT_TIME_MS,
    MIN_ANGLE_STEP_DEG, MOUSE_ZOOM_MULTIPLIER, SNAP_POINT_DISTANCE_PX, SVG_MARGIN,
};

/// Why a config was refused.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be {expected}, got {value}")]
    OutOfRange { field: &'static str, expected: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Screen pixels within which the closest entity is highlighted or erased.
    pub highlight_distance_px: f64,
    /// Screen pixels within which a snap point captures a click.
    pub snap_distance_px: f64,
    /// Dwell time before a hovered snap point anchors angle guides.
    pub hover_dwell_ms: f64,
    pub zoom_multiplier: f64,
    pub angle_step_deg: f64,
    pub history_limit: usize,
    pub svg_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            highlight_distance_px: HIGHLIGHT_ENTITY_DISTANCE_PX,
            snap_distance_px: SNAP_POINT_DISTANCE_PX,
            hover_dwell_ms: HOVERED_SNAP_POINT_TIME_MS,
            zoom_multiplier: MOUSE_ZOOM_MULTIPLIER,
            angle_step_deg: DEFAULT_ANGLE_STEP_DEG,
            history_limit: HISTORY_LIMIT,
            svg_margin: SVG_MARGIN,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the text is not a JSON object with correctly
    /// typed fields, [`ConfigError::OutOfRange`] if a value fails
    /// [`EngineConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("highlightDistancePx", self.highlight_distance_px)?;
        non_negative("snapDistancePx", self.snap_distance_px)?;
        non_negative("hoverDwellMs", self.hover_dwell_ms)?;
        non_negative("svgMargin", self.svg_margin)?;
        check(
            "zoomMultiplier",
            "in (0, 1)",
            self.zoom_multiplier,
            self.zoom_multiplier > 0.0 && self.zoom_multiplier < 1.0,
        )?;
        check(
            "angleStepDeg",
            "in [1, 360] degrees",
            self.angle_step_deg,
            (MIN_ANGLE_STEP_DEG..=360.0).contains(&self.angle_step_deg),
        )
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check(field, "finite and non-negative", value, value.is_finite() && value >= 0.0)
}

fn check(field: &'static str, expected: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok { Ok(()) } else { Err(ConfigError::OutOfRange { field, expected, value }) }
}
