// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Zoom scale, world-space origin, and the accumulated world → device transform.
///
/// `transform` always equals `scale(zoom) * translate(-origin)`: the world
/// point `origin` is drawn at the device origin and one world unit spans
/// `zoom` device pixels. It is built up incrementally by composing each zoom
/// and pan step onto the previous matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    zoom: f64,
    origin: Point,
    transform: Affine,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportState {
    /// Creates the identity view: zoom `1.0`, origin `(0, 0)`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zoom: 1.0,
            origin: Point::ORIGIN,
            transform: Affine::IDENTITY,
        }
    }

    /// Returns the current zoom scale.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the world-space point shown at the top-left of the viewport.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the world → device transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Zooms by `factor` while keeping the world point under `anchor` fixed.
    ///
    /// `anchor` is in device coordinates. The step is rejected, leaving the
    /// state untouched, when `factor` is not a finite positive number or when
    /// the resulting zoom falls outside `[min_zoom, max_zoom]`.
    ///
    /// Returns `true` if the state changed.
    pub fn zoom_about_device_point(
        &mut self,
        anchor: Point,
        factor: f64,
        min_zoom: f64,
        max_zoom: f64,
    ) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let new_zoom = factor * self.zoom;
        if !(min_zoom <= new_zoom && new_zoom <= max_zoom) {
            return false;
        }

        // World point under the anchor is `origin + anchor / zoom`; shift the
        // origin by the change in `anchor / zoom` so it stays put.
        let old_origin = self.origin.to_vec2();
        let shift = anchor.to_vec2() / new_zoom - anchor.to_vec2() / self.zoom;
        self.origin -= shift;

        self.transform = self.transform
            * Affine::translate(old_origin)
            * Affine::scale(factor)
            * Affine::translate(-self.origin.to_vec2());
        self.zoom = new_zoom;
        true
    }

    /// Pans by a drag distance measured in device pixels.
    ///
    /// The distance is divided by the zoom so that content follows the
    /// pointer at any zoom level: the origin moves by `-delta / zoom`.
    pub fn pan_by_device(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let world_delta = delta / self.zoom;
        self.transform *= Affine::translate(world_delta);
        self.origin -= world_delta;
    }

    /// Restores the identity view.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Converts a device-space point into world coordinates.
    #[must_use]
    pub fn device_to_world(&self, pt: Point) -> Point {
        self.origin + pt.to_vec2() / self.zoom
    }

    /// Converts a world-space point into device coordinates.
    #[must_use]
    pub fn world_to_device(&self, pt: Point) -> Point {
        ((pt - self.origin) * self.zoom).to_point()
    }

    /// Returns the world-space rectangle covered by a viewport of `view_size`
    /// device pixels.
    #[must_use]
    pub fn visible_world_rect(&self, view_size: Size) -> Rect {
        Rect::from_origin_size(self.origin, view_size / self.zoom)
    }

    /// Returns the world-units-per-pixel ratio, `1.0 / zoom`.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Affine, Point, Size, Vec2};

    use super::ViewportState;

    const EPS: f64 = 1e-9;

    fn assert_point_near(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{a:?} != {b:?}"
        );
    }

    fn assert_consistent(state: &ViewportState) {
        let expected =
            Affine::scale(state.zoom()) * Affine::translate(-state.origin().to_vec2());
        let got = state.transform().as_coeffs();
        let want = expected.as_coeffs();
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < 1e-6, "{got:?} != {want:?}");
        }
    }

    #[test]
    fn starts_at_identity() {
        let state = ViewportState::new();
        assert_eq!(state.zoom(), 1.0);
        assert_eq!(state.origin(), Point::ORIGIN);
        assert_eq!(state.transform(), Affine::IDENTITY);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut state = ViewportState::new();
        let anchor = Point::new(50.0, 50.0);
        let world_before = state.device_to_world(anchor);

        assert!(state.zoom_about_device_point(anchor, 0.2_f64.exp(), 0.1, 20.0));

        assert_point_near(state.device_to_world(anchor), world_before);
        assert_point_near(state.transform() * world_before, anchor);
        assert_consistent(&state);
    }

    #[test]
    fn zoom_origin_follows_formula() {
        let mut state = ViewportState::new();
        let factor = 0.2_f64.exp();
        state.zoom_about_device_point(Point::new(50.0, 50.0), factor, 0.1, 20.0);

        let expected = -(50.0 / factor - 50.0);
        assert!((state.zoom() - factor).abs() < EPS);
        assert!((state.origin().x - expected).abs() < EPS);
        assert!((state.origin().y - expected).abs() < EPS);
    }

    #[test]
    fn out_of_range_zoom_is_rejected() {
        let mut state = ViewportState::new();
        state.zoom_about_device_point(Point::new(10.0, 30.0), 15.0, 0.1, 20.0);
        let before = state;

        assert!(!state.zoom_about_device_point(Point::new(70.0, 20.0), 25.0 / 15.0, 0.1, 20.0));
        assert_eq!(state, before);

        assert!(!state.zoom_about_device_point(Point::ZERO, 0.0, 0.1, 20.0));
        assert!(!state.zoom_about_device_point(Point::ZERO, f64::NAN, 0.1, 20.0));
        assert_eq!(state, before);
    }

    #[test]
    fn zoom_then_inverse_restores_view() {
        let mut state = ViewportState::new();
        state.pan_by_device(Vec2::new(-40.0, 25.0));
        let before = state;

        let anchor = Point::new(120.0, 80.0);
        assert!(state.zoom_about_device_point(anchor, 1.5, 0.1, 20.0));
        assert!(state.zoom_about_device_point(anchor, 1.0 / 1.5, 0.1, 20.0));

        assert!((state.zoom() - before.zoom()).abs() < EPS);
        assert_point_near(state.origin(), before.origin());
        assert_consistent(&state);
    }

    #[test]
    fn pan_divides_by_zoom() {
        let mut state = ViewportState::new();
        state.zoom_about_device_point(Point::ZERO, 4.0, 0.1, 20.0);
        let origin = state.origin();

        state.pan_by_device(Vec2::new(20.0, -8.0));

        assert_point_near(state.origin(), origin - Vec2::new(5.0, -2.0));
        assert_consistent(&state);
    }

    #[test]
    fn repeated_steps_stay_consistent() {
        let mut state = ViewportState::new();
        state.zoom_about_device_point(Point::new(30.0, 40.0), 1.3, 0.1, 20.0);
        state.pan_by_device(Vec2::new(12.0, 7.0));
        state.zoom_about_device_point(Point::new(200.0, 10.0), 0.7, 0.1, 20.0);
        state.pan_by_device(Vec2::new(-3.0, 50.0));
        state.zoom_about_device_point(Point::new(5.0, 5.0), 2.2, 0.1, 20.0);
        assert_consistent(&state);

        let world = Point::new(17.0, -9.0);
        assert_point_near(state.device_to_world(state.world_to_device(world)), world);
        assert_point_near(state.transform() * world, state.world_to_device(world));
    }

    #[test]
    fn visible_rect_scales_with_zoom() {
        let mut state = ViewportState::new();
        state.zoom_about_device_point(Point::ZERO, 2.0, 0.1, 20.0);
        state.pan_by_device(Vec2::new(-20.0, -10.0));

        let rect = state.visible_world_rect(Size::new(800.0, 600.0));
        assert_point_near(rect.origin(), Point::new(10.0, 5.0));
        assert!((rect.width() - 400.0).abs() < EPS);
        assert!((rect.height() - 300.0).abs() < EPS);
        assert!((state.world_units_per_pixel() - 0.5).abs() < EPS);
    }

    #[test]
    fn reset_restores_identity() {
        let mut state = ViewportState::new();
        state.zoom_about_device_point(Point::new(9.0, 9.0), 3.0, 0.1, 20.0);
        state.pan_by_device(Vec2::new(4.0, 4.0));

        state.reset();
        assert_eq!(state, ViewportState::new());
        state.reset();
        assert_eq!(state, ViewportState::new());
    }
}
