// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-neutral input events and the pointer anchor used to compute pan deltas.
//!
//! Hosts translate their native pointer/wheel events into [`InputEvent`] (or
//! call the matching `on_*` methods on [`ViewportController`] directly). With
//! the `ui_events_adapter` feature, `ui_events` pointer events can be fed in
//! without writing that translation by hand.
//!
//! [`ViewportController`]: crate::ViewportController

use bitflags::bitflags;
use kurbo::{Point, Vec2};

/// A single pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch contact.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button (wheel click).
    Middle,
    /// Back side button.
    Back,
    /// Forward side button.
    Forward,
}

bitflags! {
    /// Set of pointer buttons held during a move.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PointerButtons: u8 {
        /// [`PointerButton::Primary`] is held.
        const PRIMARY = 1;
        /// [`PointerButton::Secondary`] is held.
        const SECONDARY = 1 << 1;
        /// [`PointerButton::Middle`] is held.
        const MIDDLE = 1 << 2;
        /// [`PointerButton::Back`] is held.
        const BACK = 1 << 3;
        /// [`PointerButton::Forward`] is held.
        const FORWARD = 1 << 4;
    }
}

impl PointerButtons {
    /// Returns `true` if `button` is part of this set.
    #[must_use]
    pub fn holds(self, button: PointerButton) -> bool {
        self.contains(button.into())
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::PRIMARY,
            PointerButton::Secondary => Self::SECONDARY,
            PointerButton::Middle => Self::MIDDLE,
            PointerButton::Back => Self::BACK,
            PointerButton::Forward => Self::FORWARD,
        }
    }
}

bitflags! {
    /// Keyboard modifier state at the time of a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 1;
        /// Either Control key.
        const CONTROL = 1 << 1;
        /// Either Alt/Option key.
        const ALT = 1 << 2;
        /// Either Meta/Command/Super key.
        const META = 1 << 3;
    }
}

/// Raw pointer/wheel input as delivered by the host's event dispatch.
///
/// Positions are in device space (pixels of the rendering surface).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A button was pressed.
    PointerDown {
        /// Pointer location.
        position: Point,
        /// The button that went down.
        button: PointerButton,
    },
    /// The pointer moved.
    PointerMove {
        /// Current pointer location.
        position: Point,
        /// Buttons held during the move.
        buttons: PointerButtons,
        /// Active keyboard modifiers.
        modifiers: Modifiers,
    },
    /// The wheel was turned.
    ///
    /// Only the sign of `delta` is used; positive values zoom in.
    Wheel {
        /// Pointer location at wheel time.
        position: Point,
        /// Wheel delta. Zero counts as positive.
        delta: f64,
        /// Active keyboard modifiers.
        modifiers: Modifiers,
    },
    /// A repeated click was recognized by the host.
    DoubleClick {
        /// Pointer location.
        position: Point,
        /// The clicked button.
        button: PointerButton,
        /// Click count reported by the host (2 for a double click).
        count: u8,
    },
}

/// Returns the wheel direction for a raw delta: `-1.0` for negative deltas and
/// `1.0` otherwise.
#[must_use]
pub fn wheel_direction(delta: f64) -> f64 {
    if delta < 0.0 { -1.0 } else { 1.0 }
}

/// Remembers the last device position used as the anchor for pan deltas.
///
/// The anchor is seeded by a pointer press (or by the first qualifying move
/// when no press was seen) and advanced each time a pan is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    last_pos: Option<Point>,
}

impl PointerTracker {
    /// Creates a tracker with no recorded position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `pos` as the current anchor.
    pub fn record(&mut self, pos: Point) {
        self.last_pos = Some(pos);
    }

    /// Returns the current anchor, if one was recorded.
    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_pos
    }

    /// Returns `true` if `pos` equals the recorded anchor.
    #[must_use]
    pub fn is_at(&self, pos: Point) -> bool {
        self.last_pos == Some(pos)
    }

    /// Moves the anchor to `pos`, returning the delta from the previous anchor.
    ///
    /// An unset anchor yields a zero delta.
    pub fn advance(&mut self, pos: Point) -> Vec2 {
        let delta = self.last_pos.map_or(Vec2::ZERO, |last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Forgets the recorded anchor.
    pub fn clear(&mut self) {
        self.last_pos = None;
    }
}
