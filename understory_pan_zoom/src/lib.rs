// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pan_zoom --heading-base-level=0

//! Understory Pan Zoom: interactive wheel zoom and drag pan over a 2D canvas.
//!
//! This crate provides a small, headless controller that turns pointer and
//! wheel events into a world → device [`kurbo::Affine`]:
//! - Wheel ticks zoom toward the cursor by `exp(±sensitivity)`, within
//!   configurable bounds.
//! - Dragging with a configurable button + modifiers (Shift + primary by
//!   default) pans, at a speed that matches the pointer at any zoom.
//! - A double click with the reset button (middle by default) restores the
//!   identity view.
//!
//! Input never mutates the view directly. Each handler records an *intent*
//! (at most one zoom and one pan, newest wins) and sets a redraw marker. The
//! host honors the marker by calling [`ViewportController::redraw`], which
//! applies the intents, sets the transform on a [`Surface`], fills the
//! visible area, and draws the host's [`Content`].
//!
//! It does **not** own a window, an event loop, or a rendering backend.
//! Callers are expected to:
//! - Forward native input as [`InputEvent`]s (or enable `ui_events_adapter`).
//! - Implement [`Surface`] over their drawing API.
//! - Supply content as a [`ContentRenderer`] (closures work) or a polyline.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect, Size};
//! use peniko::Color;
//! use understory_pan_zoom::{Content, InputEvent, Modifiers, Surface, ViewportController};
//!
//! struct NullSurface;
//!
//! impl Surface for NullSurface {
//!     fn set_transform(&mut self, _transform: Affine) {}
//!     fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
//!     fn stroke_polyline(&mut self, _points: &[Point], _color: Color, _width: f64) {}
//! }
//!
//! let mut view = ViewportController::new();
//!
//! // One wheel tick up at (50, 50).
//! view.handle_event(&InputEvent::Wheel {
//!     position: Point::new(50.0, 50.0),
//!     delta: 120.0,
//!     modifiers: Modifiers::empty(),
//! });
//! assert!(view.take_redraw_request());
//!
//! // The zoom is applied during the redraw pass.
//! let triangle = [
//!     Point::new(10.0, 10.0),
//!     Point::new(10.0, 80.0),
//!     Point::new(100.0, 40.0),
//!     Point::new(10.0, 10.0),
//! ];
//! let frame = view.redraw(Size::new(800.0, 600.0), &mut NullSurface, Content::Polyline(&triangle));
//! assert!((frame.zoom - 0.2_f64.exp()).abs() < 1e-12);
//!
//! // The point under the cursor did not move.
//! let world = view.device_to_world(Point::new(50.0, 50.0));
//! assert!((world.x - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Intent ordering
//!
//! When a zoom and a pan are both pending, [`IntentOrder::Sequential`] (the
//! default) applies the zoom and then the pan in the same pass.
//! [`IntentOrder::ZoomPriority`] applies only the zoom and keeps the pan for
//! the next pass.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float math backend, forwarded to Kurbo and Peniko.
//! - `serde`: serialization for [`ViewportConfig`].
//! - `ui_events_adapter`: `ViewportController::handle_pointer_event` for
//!   `ui_events` pointer events.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod config;
mod controller;
mod input;
mod intent;
mod render;
mod state;
#[cfg(feature = "ui_events_adapter")]
mod ui_events_adapter;

pub use config::{
    ConfigError, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_SENSITIVITY, ViewportConfig,
};
pub use controller::{ViewportController, ViewportDebugInfo};
pub use input::{
    InputEvent, Modifiers, PointerButton, PointerButtons, PointerTracker, wheel_direction,
};
pub use intent::{IntentOrder, PanIntent, PendingIntents, ZoomIntent};
pub use render::{
    Content, ContentRenderer, DEFAULT_BACKGROUND, FrameInfo, PolylineStyle, Surface,
};
pub use state::ViewportState;
