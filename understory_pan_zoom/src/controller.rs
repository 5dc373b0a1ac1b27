// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};
use peniko::Color;

use crate::config::{ConfigError, ViewportConfig, validate_sensitivity, validate_zoom_limits};
use crate::input::{InputEvent, Modifiers, PointerButton, PointerButtons, PointerTracker};
use crate::intent::{IntentOrder, PanIntent, PendingIntents, ZoomIntent};
use crate::render::{Content, DEFAULT_BACKGROUND, FrameInfo, PolylineStyle, Surface};
use crate::state::ViewportState;

/// Pan/zoom controller for a single 2D canvas.
///
/// Input handlers (`on_*`, [`ViewportController::handle_event`]) only record
/// intents and set the redraw marker. The view state changes in exactly one
/// place, [`ViewportController::apply_pending`], which
/// [`ViewportController::redraw`] runs before drawing. Events arriving between
/// two redraws coalesce: the last intent of each kind wins.
///
/// [`ViewportController::reset`] is the exception: it replaces the state
/// immediately.
#[derive(Clone, Debug)]
pub struct ViewportController {
    config: ViewportConfig,
    state: ViewportState,
    pending: PendingIntents,
    pointer: PointerTracker,
    redraw_requested: bool,
    background: Color,
    polyline_style: PolylineStyle,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    /// Creates a controller with [`ViewportConfig::default`] at the identity view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ViewportConfig::default(),
            state: ViewportState::new(),
            pending: PendingIntents::new(),
            pointer: PointerTracker::new(),
            redraw_requested: false,
            background: DEFAULT_BACKGROUND,
            polyline_style: PolylineStyle::default(),
        }
    }

    /// Creates a controller with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`ViewportConfig::validate`].
    pub fn with_config(config: ViewportConfig) -> Result<Self, ConfigError> {
        let mut controller = Self::new();
        controller.set_config(config)?;
        Ok(controller)
    }

    // --- configuration ---

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Replaces the whole configuration.
    ///
    /// The current zoom is left as is even if it falls outside new bounds;
    /// bounds apply to subsequent zoom steps.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`ViewportConfig::validate`]; the
    /// previous configuration stays in effect.
    pub fn set_config(&mut self, config: ViewportConfig) -> Result<(), ConfigError> {
        config.validate().inspect_err(|err| {
            log::debug!("rejected viewport config: {err}");
        })?;
        self.config = config;
        Ok(())
    }

    /// Sets the zoom bounds.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonPositiveZoom`] or [`ConfigError::InvertedZoomRange`];
    /// the previous bounds stay in effect.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) -> Result<(), ConfigError> {
        validate_zoom_limits(min_zoom, max_zoom).inspect_err(|err| {
            log::debug!("rejected zoom limits: {err}");
        })?;
        self.config.min_zoom = min_zoom;
        self.config.max_zoom = max_zoom;
        Ok(())
    }

    /// Returns the zoom bounds as `(min, max)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.config.min_zoom, self.config.max_zoom)
    }

    /// Sets the exponential step per wheel tick.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NonPositiveSensitivity`]; the previous value stays in effect.
    pub fn set_zoom_sensitivity(&mut self, sensitivity: f64) -> Result<(), ConfigError> {
        validate_sensitivity(sensitivity).inspect_err(|err| {
            log::debug!("rejected zoom sensitivity: {err}");
        })?;
        self.config.zoom_sensitivity = sensitivity;
        Ok(())
    }

    /// Returns the exponential step per wheel tick.
    #[must_use]
    pub fn zoom_sensitivity(&self) -> f64 {
        self.config.zoom_sensitivity
    }

    /// Sets the button and modifiers that make a pointer move pan.
    pub fn set_pan_gesture(&mut self, button: PointerButton, modifiers: Modifiers) {
        self.config.pan_button = button;
        self.config.pan_modifiers = modifiers;
    }

    /// Sets the modifiers required for wheel zoom. Empty means ungated.
    pub fn set_zoom_modifiers(&mut self, modifiers: Modifiers) {
        self.config.zoom_modifiers = modifiers;
    }

    /// Sets the button whose double click resets the view.
    pub fn set_reset_button(&mut self, button: PointerButton) {
        self.config.reset_button = button;
    }

    /// Sets how a pending pan is treated while a zoom is also pending.
    pub fn set_intent_order(&mut self, order: IntentOrder) {
        self.config.intent_order = order;
    }

    /// Returns the background fill color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Sets the background fill color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Returns the stroke style for [`Content::Polyline`].
    #[must_use]
    pub fn polyline_style(&self) -> PolylineStyle {
        self.polyline_style
    }

    /// Sets the stroke style for [`Content::Polyline`].
    pub fn set_polyline_style(&mut self, style: PolylineStyle) {
        self.polyline_style = style;
    }

    // --- read state ---

    /// Returns the current zoom scale.
    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.state.zoom()
    }

    /// Returns the world-space point shown at the top-left of the viewport.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.state.origin()
    }

    /// Returns the world → device transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.state.transform()
    }

    /// Returns the full view state.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Returns the unconsumed intents.
    #[must_use]
    pub fn pending(&self) -> &PendingIntents {
        &self.pending
    }

    /// Returns the anchor used for the next pan delta.
    #[must_use]
    pub fn last_pointer_position(&self) -> Option<Point> {
        self.pointer.last_position()
    }

    /// Converts a device-space point into world coordinates.
    #[must_use]
    pub fn device_to_world(&self, pt: Point) -> Point {
        self.state.device_to_world(pt)
    }

    /// Converts a world-space point into device coordinates.
    #[must_use]
    pub fn world_to_device(&self, pt: Point) -> Point {
        self.state.world_to_device(pt)
    }

    /// Returns the world-space rectangle covered by a viewport of `view_size`.
    #[must_use]
    pub fn visible_world_rect(&self, view_size: Size) -> Rect {
        self.state.visible_world_rect(view_size)
    }

    // --- redraw marker ---

    /// Marks the view as needing a redraw.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns `true` if a redraw was requested and not yet performed.
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Returns and clears the redraw marker.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }

    // --- input capture ---

    /// Dispatches a host event to the matching handler.
    ///
    /// Returns `true` if the event requested a redraw.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { position, button } => {
                self.on_pointer_down(position, button);
                false
            }
            InputEvent::PointerMove {
                position,
                buttons,
                modifiers,
            } => self.on_pointer_move(position, buttons, modifiers),
            InputEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.on_wheel(position, delta, modifiers),
            InputEvent::DoubleClick {
                position,
                button,
                count,
            } => self.on_double_click(position, button, count),
        }
    }

    /// Records `position` as the drag anchor. Any button, no modifier needed.
    pub fn on_pointer_down(&mut self, position: Point, _button: PointerButton) {
        self.pointer.record(position);
    }

    /// Records a pan intent when the pan button and modifiers are held.
    ///
    /// Moves that don't qualify, or that land exactly on the current anchor,
    /// are ignored. The first qualifying move without any anchor only seeds
    /// it, so a drag never starts with a jump.
    ///
    /// Returns `true` if a redraw was requested.
    pub fn on_pointer_move(
        &mut self,
        position: Point,
        buttons: PointerButtons,
        modifiers: Modifiers,
    ) -> bool {
        if !buttons.holds(self.config.pan_button) || !modifiers.contains(self.config.pan_modifiers)
        {
            return false;
        }
        if self.pointer.last_position().is_none() && self.pending.pan().is_none() {
            self.pointer.record(position);
            return false;
        }
        if self.pointer.is_at(position) {
            return false;
        }
        log::trace!("pan intent to {position:?}");
        self.pending.set_pan(PanIntent {
            device_position: position,
        });
        self.request_redraw();
        true
    }

    /// Records a zoom intent for one wheel tick at `position`.
    ///
    /// Only the sign of `delta` matters. Returns `true` if a redraw was
    /// requested, which is always the case unless zoom modifiers are
    /// configured and not all held.
    pub fn on_wheel(&mut self, position: Point, delta: f64, modifiers: Modifiers) -> bool {
        if !modifiers.contains(self.config.zoom_modifiers) {
            return false;
        }
        let intent = ZoomIntent::from_wheel(position, delta, self.config.zoom_sensitivity);
        log::trace!(
            "zoom intent x{} at {:?}",
            intent.factor,
            intent.device_position
        );
        self.pending.set_zoom(intent);
        self.request_redraw();
        true
    }

    /// Resets the view on a double click of the reset button.
    ///
    /// Returns `true` if the view was reset.
    pub fn on_double_click(&mut self, _position: Point, button: PointerButton, count: u8) -> bool {
        if button == self.config.reset_button && count > 1 {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Restores zoom `1.0`, origin `(0, 0)` and the identity transform, drops
    /// pending intents, and requests a redraw.
    pub fn reset(&mut self) {
        log::debug!("viewport reset");
        self.state.reset();
        self.pending.clear();
        self.request_redraw();
    }

    // --- redraw pass ---

    /// Applies pending intents to the view state and consumes them.
    ///
    /// A zoom whose result would leave the configured bounds is dropped
    /// without changing anything. See [`IntentOrder`] for how a pan pending
    /// alongside a zoom is handled.
    pub fn apply_pending(&mut self) {
        let zoom = self.pending.take_zoom();
        if let Some(intent) = zoom {
            let applied = self.state.zoom_about_device_point(
                intent.device_position,
                intent.factor,
                self.config.min_zoom,
                self.config.max_zoom,
            );
            if applied {
                log::trace!("zoom applied, scale now {}", self.state.zoom());
            } else {
                log::debug!(
                    "zoom x{} rejected at scale {} (bounds {}..={})",
                    intent.factor,
                    self.state.zoom(),
                    self.config.min_zoom,
                    self.config.max_zoom
                );
            }
        }

        if zoom.is_some() && self.config.intent_order == IntentOrder::ZoomPriority {
            return;
        }
        if let Some(intent) = self.pending.take_pan() {
            let delta = self.pointer.advance(intent.device_position);
            self.state.pan_by_device(delta);
            log::trace!("pan applied, origin now {:?}", self.state.origin());
        }
    }

    /// Runs one redraw pass.
    ///
    /// 1. Applies pending intents ([`ViewportController::apply_pending`]).
    /// 2. Sets the resulting transform on `surface`.
    /// 3. Fills the visible world rectangle with the background color.
    /// 4. Draws `content`.
    ///
    /// Clears the redraw marker and returns the frame parameters handed to
    /// the content.
    pub fn redraw<S: Surface + ?Sized>(
        &mut self,
        view_size: Size,
        surface: &mut S,
        content: Content<'_, S>,
    ) -> FrameInfo {
        self.redraw_requested = false;
        self.apply_pending();

        let frame = FrameInfo {
            transform: self.state.transform(),
            zoom: self.state.zoom(),
            origin: self.state.origin(),
            view_size,
            visible_world: self.state.visible_world_rect(view_size),
        };

        surface.set_transform(frame.transform);
        surface.fill_rect(frame.visible_world, self.background);

        match content {
            Content::Empty => {}
            Content::Renderer(renderer) => renderer.render(surface, &frame),
            Content::Polyline(points) => {
                if points.len() >= 2 {
                    surface.stroke_polyline(
                        points,
                        self.polyline_style.color,
                        self.polyline_style.width,
                    );
                }
            }
        }
        frame
    }

    /// Snapshot of the controller for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            zoom: self.state.zoom(),
            origin: self.state.origin(),
            transform: self.state.transform(),
            min_zoom: self.config.min_zoom,
            max_zoom: self.config.max_zoom,
            zoom_sensitivity: self.config.zoom_sensitivity,
            intent_order: self.config.intent_order,
            pending_zoom: self.pending.zoom(),
            pending_pan: self.pending.pan(),
            last_pointer_position: self.pointer.last_position(),
            redraw_requested: self.redraw_requested,
        }
    }
}

/// Debug snapshot of a [`ViewportController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// Current zoom scale.
    pub zoom: f64,
    /// World-space point at the top-left of the viewport.
    pub origin: Point,
    /// World → device transform.
    pub transform: Affine,
    /// Minimum zoom scale.
    pub min_zoom: f64,
    /// Maximum zoom scale.
    pub max_zoom: f64,
    /// Exponential step per wheel tick.
    pub zoom_sensitivity: f64,
    /// Pan/zoom ordering within a redraw pass.
    pub intent_order: IntentOrder,
    /// Unconsumed zoom intent.
    pub pending_zoom: Option<ZoomIntent>,
    /// Unconsumed pan intent.
    pub pending_pan: Option<PanIntent>,
    /// Anchor for the next pan delta.
    pub last_pointer_position: Option<Point>,
    /// Whether a redraw is outstanding.
    pub redraw_requested: bool,
}
