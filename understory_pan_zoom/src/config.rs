// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::input::{Modifiers, PointerButton};
use crate::intent::IntentOrder;

/// Default lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Default upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 20.0;
/// Default exponential step per wheel tick.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.2;

/// Host-provided settings for a [`ViewportController`](crate::ViewportController).
///
/// Values are checked by [`ViewportConfig::validate`]; the controller refuses
/// configurations that fail it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewportConfig {
    /// Smallest allowed zoom scale.
    pub min_zoom: f64,
    /// Largest allowed zoom scale.
    pub max_zoom: f64,
    /// Exponent applied per wheel tick: each tick multiplies the zoom by
    /// `exp(±zoom_sensitivity)`.
    pub zoom_sensitivity: f64,
    /// Button that must be held for a move to pan.
    pub pan_button: PointerButton,
    /// Modifiers that must all be active for a move to pan.
    pub pan_modifiers: Modifiers,
    /// Modifiers that must all be active for a wheel event to zoom.
    ///
    /// Empty means wheel zoom is ungated.
    pub zoom_modifiers: Modifiers,
    /// Button whose double click resets the view.
    pub reset_button: PointerButton,
    /// How pending zoom and pan intents share a redraw pass.
    pub intent_order: IntentOrder,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            pan_button: PointerButton::Primary,
            pan_modifiers: Modifiers::SHIFT,
            zoom_modifiers: Modifiers::empty(),
            reset_button: PointerButton::Middle,
            intent_order: IntentOrder::default(),
        }
    }
}

impl ViewportConfig {
    /// Returns a copy with the given zoom bounds.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Returns a copy with the given wheel sensitivity.
    #[must_use]
    pub fn with_zoom_sensitivity(mut self, sensitivity: f64) -> Self {
        self.zoom_sensitivity = sensitivity;
        self
    }

    /// Returns a copy with the given pan gesture.
    #[must_use]
    pub fn with_pan_gesture(mut self, button: PointerButton, modifiers: Modifiers) -> Self {
        self.pan_button = button;
        self.pan_modifiers = modifiers;
        self
    }

    /// Returns a copy with the given wheel modifier gate.
    #[must_use]
    pub fn with_zoom_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.zoom_modifiers = modifiers;
        self
    }

    /// Returns a copy with the given reset button.
    #[must_use]
    pub fn with_reset_button(mut self, button: PointerButton) -> Self {
        self.reset_button = button;
        self
    }

    /// Returns a copy with the given intent ordering.
    #[must_use]
    pub fn with_intent_order(mut self, order: IntentOrder) -> Self {
        self.intent_order = order;
        self
    }

    /// Checks zoom bounds and sensitivity.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NonPositiveZoom`] if either bound is not a finite, positive number.
    /// - [`ConfigError::InvertedZoomRange`] if `min_zoom > max_zoom`.
    /// - [`ConfigError::NonPositiveSensitivity`] if the sensitivity is not a finite, positive number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_zoom_limits(self.min_zoom, self.max_zoom)?;
        validate_sensitivity(self.zoom_sensitivity)
    }

    /// Returns `true` if `zoom` lies within `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn zoom_in_range(&self, zoom: f64) -> bool {
        self.min_zoom <= zoom && zoom <= self.max_zoom
    }
}

pub(crate) fn validate_zoom_limits(min: f64, max: f64) -> Result<(), ConfigError> {
    if !is_positive(min) || !is_positive(max) {
        return Err(ConfigError::NonPositiveZoom { min, max });
    }
    if min > max {
        return Err(ConfigError::InvertedZoomRange { min, max });
    }
    Ok(())
}

pub(crate) fn validate_sensitivity(value: f64) -> Result<(), ConfigError> {
    if is_positive(value) {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveSensitivity(value))
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Error returned when a configuration write is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A zoom bound is zero, negative, or not finite.
    NonPositiveZoom {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The lower zoom bound exceeds the upper one.
    InvertedZoomRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The wheel sensitivity is zero, negative, or not finite.
    NonPositiveSensitivity(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveZoom { min, max } => {
                write!(f, "zoom bounds must be finite and positive (min: {min}, max: {max})")
            }
            Self::InvertedZoomRange { min, max } => {
                write!(f, "minimum zoom {min} exceeds maximum zoom {max}")
            }
            Self::NonPositiveSensitivity(value) => {
                write!(f, "zoom sensitivity must be finite and positive (got {value})")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ViewportConfig::default();
        assert_eq!(config.min_zoom, 0.1);
        assert_eq!(config.max_zoom, 20.0);
        assert_eq!(config.zoom_sensitivity, 0.2);
        assert_eq!(config.pan_button, PointerButton::Primary);
        assert_eq!(config.pan_modifiers, Modifiers::SHIFT);
        assert!(config.zoom_modifiers.is_empty());
        assert_eq!(config.reset_button, PointerButton::Middle);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_bounds() {
        let config = ViewportConfig::default().with_zoom_limits(0.0, 5.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveZoom { min: 0.0, max: 5.0 })
        );

        let config = ViewportConfig::default().with_zoom_limits(0.5, f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveZoom { .. })
        ));

        let config = ViewportConfig::default().with_zoom_limits(f64::NAN, 1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_range() {
        let config = ViewportConfig::default().with_zoom_limits(4.0, 2.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedZoomRange { min: 4.0, max: 2.0 })
        );
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let config = ViewportConfig::default().with_zoom_limits(1.0, 1.0);
        assert_eq!(config.validate(), Ok(()));
        assert!(config.zoom_in_range(1.0));
        assert!(!config.zoom_in_range(1.0001));
    }

    #[test]
    fn rejects_bad_sensitivity() {
        let config = ViewportConfig::default().with_zoom_sensitivity(-0.1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveSensitivity(-0.1))
        );
    }

    #[test]
    fn builder_sets_gestures() {
        let config = ViewportConfig::default()
            .with_pan_gesture(PointerButton::Middle, Modifiers::empty())
            .with_zoom_modifiers(Modifiers::CONTROL)
            .with_reset_button(PointerButton::Secondary)
            .with_intent_order(IntentOrder::ZoomPriority);
        assert_eq!(config.pan_button, PointerButton::Middle);
        assert!(config.pan_modifiers.is_empty());
        assert_eq!(config.zoom_modifiers, Modifiers::CONTROL);
        assert_eq!(config.reset_button, PointerButton::Secondary);
        assert_eq!(config.intent_order, IntentOrder::ZoomPriority);
    }

    #[test]
    fn range_check_is_inclusive() {
        let config = ViewportConfig::default();
        assert!(config.zoom_in_range(0.1));
        assert!(config.zoom_in_range(20.0));
        assert!(!config.zoom_in_range(20.5));
        assert!(!config.zoom_in_range(0.05));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ViewportConfig = serde_json::from_str(r#"{"min_zoom":0.5}"#).unwrap();
        assert_eq!(
            config,
            ViewportConfig {
                min_zoom: 0.5,
                ..ViewportConfig::default()
            }
        );
        assert_eq!(config.validate(), Ok(()));

        let empty: ViewportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ViewportConfig::default());
    }

    #[test]
    fn gestures_deserialize_by_name() {
        let config: ViewportConfig = serde_json::from_str(
            r#"{
                "pan_button": "Secondary",
                "pan_modifiers": "SHIFT | ALT",
                "zoom_modifiers": "CONTROL",
                "reset_button": "Back",
                "intent_order": "ZoomPriority"
            }"#,
        )
        .unwrap();
        assert_eq!(config.pan_button, PointerButton::Secondary);
        assert_eq!(config.pan_modifiers, Modifiers::SHIFT | Modifiers::ALT);
        assert_eq!(config.zoom_modifiers, Modifiers::CONTROL);
        assert_eq!(config.reset_button, PointerButton::Back);
        assert_eq!(config.intent_order, IntentOrder::ZoomPriority);
        assert_eq!(config.min_zoom, DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn survives_json() {
        let config = ViewportConfig::default()
            .with_zoom_limits(0.25, 8.0)
            .with_pan_gesture(PointerButton::Middle, Modifiers::empty())
            .with_intent_order(IntentOrder::ZoomPriority);
        let json = serde_json::to_string(&config).unwrap();
        let back: ViewportConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn invalid_values_still_fail_validation() {
        let config: ViewportConfig =
            serde_json::from_str(r#"{"min_zoom":4.0,"max_zoom":2.0}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedZoomRange { min: 4.0, max: 2.0 })
        );
    }
}
