//! Mouse and scroll translation
//!
//! Maps pointer button, motion and scroll events into engine calls:
//! - Buttons map 1:1 by a fixed index convention (0 left, 1 right, 2 middle).
//! - Positions are flipped to the engine's bottom-left-origin convention.
//! - Pointer exit resets the position to an out-of-bounds sentinel, unless a
//!   button is held: suppressing the reset keeps a drag selection alive when
//!   the pointer momentarily leaves the view.
//! - Precise (fine-grained) scroll deltas are scaled up, and the trackpad
//!   momentum phase is packed alongside the precision bit.

use crate::engine::{Engine, SurfaceId};
use crate::key::KeyAction;
use crate::modifiers::ModifierSet;

/// Multiplier applied to deltas from precise scroll sources.
pub const PRECISE_SCROLL_FACTOR: f64 = 2.0;

/// Sentinel position reported when the pointer leaves the view.
pub const OUT_OF_BOUNDS: (f64, f64) = (-1.0, -1.0);

/// Pointer button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Map a host button index to a button identity. Unrecognized indices
    /// return `None` and fall back to host-default handling.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Right),
            2 => Some(MouseButton::Middle),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

/// Trackpad scroll-gesture lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Momentum {
    #[default]
    None,
    Began,
    Stationary,
    Changed,
    Ended,
    Cancelled,
    MayBegin,
}

impl Momentum {
    const fn code(self) -> i32 {
        match self {
            Momentum::None => 0,
            Momentum::Began => 1,
            Momentum::Stationary => 2,
            Momentum::Changed => 3,
            Momentum::Ended => 4,
            Momentum::Cancelled => 5,
            Momentum::MayBegin => 6,
        }
    }
}

/// A scroll event as delivered by the host.
#[derive(Debug, Clone, Copy)]
pub struct ScrollEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    /// Whether the deltas come from a precise (fine-grained) source
    pub precise: bool,
    pub momentum: Momentum,
}

/// Scroll modifiers as packed for the engine:
/// bit 0 carries precision, the momentum code sits in the bits above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMods(i32);

impl ScrollMods {
    pub fn new(precise: bool, momentum: Momentum) -> Self {
        Self(precise as i32 | momentum.code() << 1)
    }

    pub fn bits(self) -> i32 {
        self.0
    }

    pub fn precise(self) -> bool {
        self.0 & 1 != 0
    }
}

/// Per-view pointer state: which buttons are currently held.
#[derive(Debug, Default)]
pub struct MouseState {
    pressed: [bool; 3],
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&held| held)
    }

    /// Forward a button transition. Returns the engine's handled status.
    pub fn button(
        &mut self,
        engine: &mut dyn Engine,
        surface: SurfaceId,
        action: KeyAction,
        button: MouseButton,
        mods: ModifierSet,
    ) -> bool {
        self.pressed[button.slot()] = action == KeyAction::Press;
        engine.mouse_button(surface, action, button, mods)
    }

    /// Forward a pointer position, flipping Y to the engine's
    /// bottom-left-origin convention. `view_height` is the view's logical
    /// height.
    pub fn moved(
        &mut self,
        engine: &mut dyn Engine,
        surface: SurfaceId,
        x: f64,
        y: f64,
        view_height: f64,
        mods: ModifierSet,
    ) {
        engine.mouse_pos(surface, x, view_height - y, mods);
    }

    /// The pointer left the view. Resets the engine position to the
    /// out-of-bounds sentinel unless a button is held, which would break an
    /// in-progress drag selection.
    pub fn exited(&mut self, engine: &mut dyn Engine, surface: SurfaceId, mods: ModifierSet) {
        if self.any_pressed() {
            return;
        }
        engine.mouse_pos(surface, OUT_OF_BOUNDS.0, OUT_OF_BOUNDS.1, mods);
    }

    /// Forward a scroll event, scaling precise deltas and packing the
    /// momentum phase.
    pub fn scroll(&mut self, engine: &mut dyn Engine, surface: SurfaceId, event: &ScrollEvent) {
        let (dx, dy) = if event.precise {
            (
                event.delta_x * PRECISE_SCROLL_FACTOR,
                event.delta_y * PRECISE_SCROLL_FACTOR,
            )
        } else {
            (event.delta_x, event.delta_y)
        };
        engine.mouse_scroll(surface, dx, dy, ScrollMods::new(event.precise, event.momentum));
    }
}
