// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing seams between the controller and the host.
//!
//! The controller only needs three things from a rendering backend: set the
//! current transform, fill a rectangle, and stroke a polyline. Hosts implement
//! [`Surface`] over whatever they draw with, and supply their own content
//! through [`Content`].

use core::fmt;

use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

/// Minimal drawing target used by the redraw pass.
///
/// Geometry passed to `fill_rect` and `stroke_polyline` is in world
/// coordinates; the surface maps it to device space with the transform most
/// recently given to `set_transform`.
pub trait Surface {
    /// Sets the world → device transform for subsequent draws.
    fn set_transform(&mut self, transform: Affine);

    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Strokes the connected polyline through `points`.
    ///
    /// `width` is in world units.
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64);
}

/// View parameters handed to content renderers after the transform is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo {
    /// World → device transform in effect on the surface.
    pub transform: Affine,
    /// Current zoom scale.
    pub zoom: f64,
    /// World-space point at the top-left of the viewport.
    pub origin: Point,
    /// Size of the viewport in device pixels.
    pub view_size: Size,
    /// World-space rectangle covered by the viewport.
    pub visible_world: Rect,
}

/// Host-supplied drawing strategy invoked once per redraw.
///
/// Closures `FnMut(&mut S, &FrameInfo)` implement this trait.
pub trait ContentRenderer<S: ?Sized> {
    /// Draws host content onto `surface`, whose transform is already set.
    fn render(&mut self, surface: &mut S, frame: &FrameInfo);
}

impl<S: ?Sized, F> ContentRenderer<S> for F
where
    F: FnMut(&mut S, &FrameInfo),
{
    fn render(&mut self, surface: &mut S, frame: &FrameInfo) {
        self(surface, frame);
    }
}

/// What to draw on top of the background in a redraw pass.
///
/// The content is borrowed for the duration of one pass; it stays owned by
/// the host.
pub enum Content<'a, S: ?Sized> {
    /// Background only.
    Empty,
    /// Delegate to a host renderer.
    Renderer(&'a mut dyn ContentRenderer<S>),
    /// Stroke the points as one connected polyline using the controller's
    /// [`PolylineStyle`]. Fewer than two points draw nothing.
    Polyline(&'a [Point]),
}

impl<S: ?Sized> Content<'_, S> {
    /// Returns `true` if this pass would draw nothing beyond the background.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Renderer(_) => false,
            Self::Polyline(points) => points.len() < 2,
        }
    }
}

impl<S: ?Sized> fmt::Debug for Content<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Renderer(_) => f.debug_tuple("Renderer").field(&"<renderer>").finish(),
            Self::Polyline(points) => f.debug_tuple("Polyline").field(points).finish(),
        }
    }
}

/// Stroke style for [`Content::Polyline`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolylineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in world units.
    pub width: f64,
}

impl Default for PolylineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Background fill used when no other color is set (CSS `lightgray`).
pub const DEFAULT_BACKGROUND: Color = Color::from_rgb8(0xd3, 0xd3, 0xd3);
