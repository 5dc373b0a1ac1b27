// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter from `ui_events` pointer events.

use ::ui_events::ScrollDelta;
use ::ui_events::keyboard::Modifiers as UiModifiers;
use ::ui_events::pointer::{
    PointerButton as UiButton, PointerButtons as UiButtons, PointerEvent, PointerScrollEvent,
};

use crate::controller::ViewportController;
use crate::input::{Modifiers, PointerButton, PointerButtons};

impl ViewportController {
    /// Feeds a `ui_events` pointer event to the matching handler.
    ///
    /// - `Down` records the drag anchor; with a click count above one it is
    ///   also offered to the double-click reset.
    /// - `Move` may record a pan intent.
    /// - `Scroll` records a zoom intent from the sign of the vertical delta
    ///   (horizontal when there is no vertical component).
    ///
    /// `ScrollDelta` is a navigation delta: positive Y moves the viewport
    /// down, so turning the wheel away from the user arrives as negative Y.
    /// The sign is flipped before it reaches
    /// [`ViewportController::on_wheel`], where positive zooms in, so wheel up
    /// zooms in.
    ///
    /// Positions are taken in logical coordinates. Other events are ignored.
    ///
    /// Returns `true` if the event requested a redraw.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::Down(e) => {
                let Some(button) = e.button.and_then(button_from_ui) else {
                    return false;
                };
                let position = e.state.logical_point();
                self.on_pointer_down(position, button);
                e.state.count > 1 && self.on_double_click(position, button, e.state.count)
            }
            PointerEvent::Move(e) => self.on_pointer_move(
                e.current.logical_point(),
                buttons_from_ui(e.current.buttons),
                modifiers_from_ui(e.current.modifiers),
            ),
            PointerEvent::Scroll(e) => {
                let Some(delta) = scroll_sign_source(e) else {
                    return false;
                };
                self.on_wheel(
                    e.state.logical_point(),
                    delta,
                    modifiers_from_ui(e.state.modifiers),
                )
            }
            _ => false,
        }
    }
}

/// Maps a `ui_events` button onto the buttons this crate distinguishes.
pub(crate) fn button_from_ui(button: UiButton) -> Option<PointerButton> {
    match button {
        UiButton::Primary => Some(PointerButton::Primary),
        UiButton::Secondary => Some(PointerButton::Secondary),
        UiButton::Auxiliary => Some(PointerButton::Middle),
        UiButton::X1 => Some(PointerButton::Back),
        UiButton::X2 => Some(PointerButton::Forward),
        _ => None,
    }
}

pub(crate) fn buttons_from_ui(buttons: UiButtons) -> PointerButtons {
    let mut out = PointerButtons::empty();
    for (ui, ours) in [
        (UiButton::Primary, PointerButtons::PRIMARY),
        (UiButton::Secondary, PointerButtons::SECONDARY),
        (UiButton::Auxiliary, PointerButtons::MIDDLE),
        (UiButton::X1, PointerButtons::BACK),
        (UiButton::X2, PointerButtons::FORWARD),
    ] {
        if buttons.contains(ui) {
            out |= ours;
        }
    }
    out
}

pub(crate) fn modifiers_from_ui(modifiers: UiModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::SHIFT, modifiers.shift());
    out.set(Modifiers::CONTROL, modifiers.ctrl());
    out.set(Modifiers::ALT, modifiers.alt());
    out.set(Modifiers::META, modifiers.meta());
    out
}

/// Picks the scroll component whose sign decides the zoom direction, negated
/// so that wheel up (negative navigation delta) yields a positive value.
fn scroll_sign_source(event: &PointerScrollEvent) -> Option<f64> {
    let (x, y) = match &event.delta {
        ScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
        ScrollDelta::LineDelta(x, y) | ScrollDelta::PageDelta(x, y) => {
            (f64::from(*x), f64::from(*y))
        }
    };
    if y != 0.0 {
        Some(-y)
    } else if x != 0.0 {
        Some(-x)
    } else {
        None
    }
}
