#![forbid(unsafe_code)]

//! Policy-as-data configuration for the evasive widget.
//!
//! Captures every tunable of the placement solver, the exclusion zone, and
//! the motion trigger as a single [`EvasionPolicy`] that can be loaded from
//! TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # evasion.toml
//! [placement]
//! padding = 24.0
//! min_separation = 160.0
//!
//! [motion]
//! cooldown_ms = 250
//! ```
//!
//! ```rust,ignore
//! let policy = EvasionPolicy::from_toml_file("evasion.toml")?.validated()?;
//! let policy = EvasionPolicy::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the constant used by the component itself, so
//! `EvasionPolicy::default()` behaves exactly like the unconfigured widget.
//! Missing sections and keys keep their defaults.

use std::path::Path;
use std::time::Duration;

use evasion_layout::exclusion::{EXCLUSION_DEFAULT_HEIGHT, EXCLUSION_DEFAULT_WIDTH};
use evasion_layout::{
    ExclusionZone, PLACEMENT_DEFAULT_MAX_ATTEMPTS, PLACEMENT_DEFAULT_MIN_SEPARATION,
    PLACEMENT_DEFAULT_PADDING, PlacementConfig,
};
use serde::{Deserialize, Serialize};

use crate::cooldown::MOTION_DEFAULT_COOLDOWN;

/// Default pointer distance that triggers a relocation.
pub const MOTION_DEFAULT_SAFETY_PERIMETER: f32 = 120.0;

// ---------------------------------------------------------------------------
// Top-level EvasionPolicy
// ---------------------------------------------------------------------------

/// Top-level policy for one evasive widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionPolicy {
    /// Placement solver parameters.
    pub placement: PlacementPolicyConfig,

    /// Exclusion zone around the accept control.
    pub exclusion: ExclusionPolicyConfig,

    /// Proximity trigger and debounce.
    pub motion: MotionPolicyConfig,

    /// Taunt messages shown as the dodge count grows.
    pub taunts: TauntPolicyConfig,
}

impl EvasionPolicy {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension.
    ///
    /// `.json` is parsed as JSON; anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let lengths = [
            ("placement.padding", self.placement.padding),
            ("placement.min_separation", self.placement.min_separation),
            ("exclusion.width", self.exclusion.width),
            ("exclusion.height", self.exclusion.height),
            ("motion.safety_perimeter", self.motion.safety_perimeter),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        if self.placement.max_attempts == 0 {
            errors.push("placement.max_attempts must be > 0".into());
        }

        if self.taunts.messages.iter().any(|m| m.trim().is_empty()) {
            errors.push("taunts.messages must not contain blank entries".into());
        }

        errors
    }

    /// Return `self` if it validates, otherwise every problem found.
    pub fn validated(self) -> Result<Self, PolicyConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PolicyConfigError::Validation(errors))
        }
    }

    /// Build a [`PlacementConfig`] from this policy.
    #[must_use]
    pub fn to_placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            padding: self.placement.padding,
            min_separation: self.placement.min_separation,
            max_attempts: self.placement.max_attempts,
        }
    }

    /// Build an [`ExclusionZone`] from this policy.
    #[must_use]
    pub fn to_exclusion_zone(&self) -> ExclusionZone {
        ExclusionZone::new(self.exclusion.width, self.exclusion.height)
    }

    /// Motion lock cooldown window.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.motion.cooldown_ms)
    }

    /// Format as a JSONL line for structured logging.
    ///
    /// Non-finite floats are written as `null`.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        serde_json::json!({
            "schema": "evasion-policy-v1",
            "padding": self.placement.padding,
            "min_separation": self.placement.min_separation,
            "max_attempts": self.placement.max_attempts,
            "exclusion_width": self.exclusion.width,
            "exclusion_height": self.exclusion.height,
            "safety_perimeter": self.motion.safety_perimeter,
            "cooldown_ms": self.motion.cooldown_ms,
            "taunts": self.taunts.messages.len(),
        })
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Sub-configs (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Placement solver parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPolicyConfig {
    /// Margin kept from the arena edges (px). Default: 20.
    pub padding: f32,
    /// Minimum candidate-center to pointer distance (px). Default: 180.
    pub min_separation: f32,
    /// Random candidates before the corner fallback. Default: 50.
    pub max_attempts: u32,
}

impl Default for PlacementPolicyConfig {
    fn default() -> Self {
        Self {
            padding: PLACEMENT_DEFAULT_PADDING,
            min_separation: PLACEMENT_DEFAULT_MIN_SEPARATION,
            max_attempts: PLACEMENT_DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Exclusion zone extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionPolicyConfig {
    /// Full width (px). Default: 280.
    pub width: f32,
    /// Full height (px). Default: 100.
    pub height: f32,
}

impl Default for ExclusionPolicyConfig {
    fn default() -> Self {
        Self {
            width: EXCLUSION_DEFAULT_WIDTH,
            height: EXCLUSION_DEFAULT_HEIGHT,
        }
    }
}

/// Proximity trigger and debounce parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionPolicyConfig {
    /// Pointer-to-widget-center distance that triggers a move (px). Default: 120.
    pub safety_perimeter: f32,
    /// Motion lock window (ms). Default: 300.
    pub cooldown_ms: u64,
}

impl Default for MotionPolicyConfig {
    fn default() -> Self {
        Self {
            safety_perimeter: MOTION_DEFAULT_SAFETY_PERIMETER,
            cooldown_ms: MOTION_DEFAULT_COOLDOWN.as_millis() as u64,
        }
    }
}

/// Taunt message overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TauntPolicyConfig {
    /// Messages in display order. Empty keeps the built-in set.
    pub messages: Vec<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a policy configuration.
#[derive(Debug, thiserror::Error)]
pub enum PolicyConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
