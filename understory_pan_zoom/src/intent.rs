// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recorded-but-unapplied gestures.
//!
//! Input handlers never touch the view state. They record at most one
//! [`ZoomIntent`] and one [`PanIntent`] in [`PendingIntents`]; a newer intent of
//! the same kind replaces the older one. The redraw pass consumes them.

use kurbo::Point;

use crate::input::wheel_direction;

/// A pending wheel zoom centered on a device point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomIntent {
    /// Pointer location at wheel time, in device space.
    pub device_position: Point,
    /// Multiplier applied to the zoom scale; `> 1` zooms in.
    pub factor: f64,
}

impl ZoomIntent {
    /// Builds the intent for one wheel tick.
    ///
    /// The factor is `exp(direction * sensitivity)` where `direction` is the
    /// sign of `delta`, so opposite ticks cancel exactly.
    #[must_use]
    pub fn from_wheel(device_position: Point, delta: f64, sensitivity: f64) -> Self {
        Self {
            device_position,
            factor: exp(wheel_direction(delta) * sensitivity),
        }
    }
}

/// A pending drag pan toward a device point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanIntent {
    /// Current pointer location during the drag, in device space.
    pub device_position: Point,
}

/// How a redraw pass treats a pan intent while a zoom intent is also pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentOrder {
    /// Apply the zoom, then the pan, in the same pass.
    #[default]
    Sequential,
    /// Apply only the zoom; the pan stays pending until a pass without a zoom.
    ///
    /// A pan is held back even when the zoom is rejected by the bounds check.
    ZoomPriority,
}

/// Slots for the unconsumed intents, one per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendingIntents {
    zoom: Option<ZoomIntent>,
    pan: Option<PanIntent>,
}

impl PendingIntents {
    /// Creates empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a zoom intent, returning the one it replaced.
    pub fn set_zoom(&mut self, intent: ZoomIntent) -> Option<ZoomIntent> {
        self.zoom.replace(intent)
    }

    /// Stores a pan intent, returning the one it replaced.
    pub fn set_pan(&mut self, intent: PanIntent) -> Option<PanIntent> {
        self.pan.replace(intent)
    }

    /// Returns the pending zoom intent.
    #[must_use]
    pub fn zoom(&self) -> Option<ZoomIntent> {
        self.zoom
    }

    /// Returns the pending pan intent.
    #[must_use]
    pub fn pan(&self) -> Option<PanIntent> {
        self.pan
    }

    /// Removes and returns the pending zoom intent.
    pub fn take_zoom(&mut self) -> Option<ZoomIntent> {
        self.zoom.take()
    }

    /// Removes and returns the pending pan intent.
    pub fn take_pan(&mut self) -> Option<PanIntent> {
        self.pan.take()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zoom.is_none() && self.pan.is_none()
    }

    /// Drops both intents.
    pub fn clear(&mut self) {
        self.zoom = None;
        self.pan = None;
    }
}

#[cfg(feature = "std")]
fn exp(x: f64) -> f64 {
    x.exp()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn exp(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_pan_zoom requires either the `std` or `libm` feature");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_factor_is_exponential() {
        let up = ZoomIntent::from_wheel(Point::new(50.0, 50.0), 120.0, 0.2);
        assert!((up.factor - 0.2_f64.exp()).abs() < 1e-12);
        assert!((up.factor - 1.221_402_758).abs() < 1e-6);
        assert_eq!(up.device_position, Point::new(50.0, 50.0));

        let down = ZoomIntent::from_wheel(Point::ZERO, -3.0, 0.2);
        assert!((up.factor * down.factor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wheel_magnitude_is_ignored() {
        let small = ZoomIntent::from_wheel(Point::ZERO, 1.0, 0.5);
        let large = ZoomIntent::from_wheel(Point::ZERO, 480.0, 0.5);
        assert_eq!(small.factor, large.factor);
    }

    #[test]
    fn newer_intent_replaces_older() {
        let mut pending = PendingIntents::new();
        assert!(pending.is_empty());

        let first = ZoomIntent {
            device_position: Point::new(1.0, 1.0),
            factor: 2.0,
        };
        let second = ZoomIntent {
            device_position: Point::new(2.0, 2.0),
            factor: 0.5,
        };
        assert_eq!(pending.set_zoom(first), None);
        assert_eq!(pending.set_zoom(second), Some(first));
        assert_eq!(pending.zoom(), Some(second));

        assert_eq!(pending.take_zoom(), Some(second));
        assert_eq!(pending.take_zoom(), None);
    }

    #[test]
    fn clear_drops_both_kinds() {
        let mut pending = PendingIntents::new();
        pending.set_zoom(ZoomIntent {
            device_position: Point::ZERO,
            factor: 1.5,
        });
        pending.set_pan(PanIntent {
            device_position: Point::new(3.0, 4.0),
        });
        assert!(!pending.is_empty());
        assert_eq!(
            pending.pan(),
            Some(PanIntent {
                device_position: Point::new(3.0, 4.0)
            })
        );

        pending.clear();
        assert!(pending.is_empty());
    }
}
