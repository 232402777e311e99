//! winit adapters
//!
//! Converts winit's event vocabulary into the bridge's host-side types and
//! provides a [`Dispatcher`] backed by the winit event loop proxy, so engine
//! callbacks land back on the UI run loop as user events.

use std::sync::Mutex;

use winit::event::{ElementState, Modifiers, MouseButton, MouseScrollDelta, TouchPhase};
use winit::event_loop::EventLoopProxy;
use winit::keyboard::ModifiersKeyState;

use crate::key::KeyAction;
use crate::modifiers::{raw, side};
use crate::mouse::{Momentum, ScrollEvent};
use crate::relay::{Dispatcher, RelayEvent};

/// Extract the raw flag bits and the device-side mask from a winit modifiers
/// update. winit does not report caps lock here, so that bit never appears.
///
/// `ModifiersChanged` carries aggregate state only; feed the result to
/// [`crate::view::SurfaceView::modifiers_changed`], which recovers the
/// toggled key by diffing against the tracked flags.
pub fn raw_modifiers(mods: &Modifiers) -> (u32, u32) {
    let state = mods.state();
    let mut flags = 0;
    let mut sides = 0;

    if state.shift_key() {
        flags |= raw::SHIFT;
        if mods.rshift_state() == ModifiersKeyState::Pressed {
            sides |= side::RIGHT_SHIFT;
        }
    }
    if state.control_key() {
        flags |= raw::CONTROL;
        if mods.rcontrol_state() == ModifiersKeyState::Pressed {
            sides |= side::RIGHT_CONTROL;
        }
    }
    if state.alt_key() {
        flags |= raw::ALT;
        if mods.ralt_state() == ModifiersKeyState::Pressed {
            sides |= side::RIGHT_ALT;
        }
    }
    if state.super_key() {
        flags |= raw::SUPER;
        if mods.rsuper_state() == ModifiersKeyState::Pressed {
            sides |= side::RIGHT_SUPER;
        }
    }

    (flags, sides)
}

/// Map a winit button to the bridge's fixed index convention. Buttons with
/// no engine counterpart return `None` and keep their winit default behavior.
pub fn button_index(button: MouseButton) -> Option<u8> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Map a winit element state to a key action.
pub fn key_action(state: ElementState, repeat: bool) -> KeyAction {
    match state {
        ElementState::Pressed if repeat => KeyAction::Repeat,
        ElementState::Pressed => KeyAction::Press,
        ElementState::Released => KeyAction::Release,
    }
}

/// Build a scroll event from a winit wheel delta and optional touch phase.
/// Pixel deltas count as precise input; an absent phase maps to no momentum.
pub fn scroll_event(delta: MouseScrollDelta, phase: Option<TouchPhase>) -> ScrollEvent {
    let momentum = match phase {
        Some(TouchPhase::Started) => Momentum::Began,
        Some(TouchPhase::Moved) => Momentum::Changed,
        Some(TouchPhase::Ended) => Momentum::Ended,
        Some(TouchPhase::Cancelled) => Momentum::Cancelled,
        None => Momentum::None,
    };

    match delta {
        MouseScrollDelta::LineDelta(x, y) => ScrollEvent {
            delta_x: x as f64,
            delta_y: y as f64,
            precise: false,
            momentum,
        },
        MouseScrollDelta::PixelDelta(pos) => ScrollEvent {
            delta_x: pos.x,
            delta_y: pos.y,
            precise: true,
            momentum,
        },
    }
}

/// [`Dispatcher`] that posts relay events as winit user events.
pub struct ProxyDispatcher {
    proxy: Mutex<EventLoopProxy<RelayEvent>>,
}

impl ProxyDispatcher {
    pub fn new(proxy: EventLoopProxy<RelayEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

impl Dispatcher for ProxyDispatcher {
    fn post(&self, event: RelayEvent) {
        let Ok(proxy) = self.proxy.lock() else {
            return;
        };
        if proxy.send_event(event).is_err() {
            // The event loop is gone; the callback has nowhere to land.
            log::debug!("dropping engine callback after event loop shutdown");
        }
    }
}
