//! Embeddable terminal surface view
//!
//! One [`SurfaceView`] hosts exactly one engine surface: created when the
//! view is constructed, destroyed exactly once when it is torn down, never
//! recreated. All engine calls happen on the UI thread; engine callbacks
//! reach the view as [`RelayEvent`]s via the host's run loop.

use std::cell::RefCell;
use std::rc::Rc;

use crate::composition::{Composer, TextInterpreter};
use crate::config::SurfaceConfig;
use crate::engine::{Engine, EngineAction, SurfaceId};
use crate::error::{Error, Result};
use crate::key::{HostKey, KeyAction, KeyEvent};
use crate::modifiers::{translate, FlagsTracker, ModKey, ModifierSet};
use crate::mouse::{MouseButton, MouseState, ScrollEvent};
use crate::relay::RelayEvent;

/// Outward notification from the view to its hosting application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNotice {
    /// The surface set a new (non-empty) title.
    TitleChanged(String),
    /// The surface should be closed; it has already been torn down.
    CloseRequested,
}

/// A view hosting one terminal surface.
pub struct SurfaceView {
    engine: Rc<RefCell<dyn Engine>>,
    surface: SurfaceId,
    composer: Composer,
    mouse: MouseState,
    flags: FlagsTracker,
    /// Last translated modifier state, attached to mouse events
    mods: ModifierSet,
    logical_size: (f64, f64),
    scale: (f64, f64),
    freed: bool,
}

impl SurfaceView {
    /// Construct the view and create its surface. Fails when the
    /// configuration is invalid or the engine refuses the surface; both are
    /// fatal for this view.
    pub fn new(engine: Rc<RefCell<dyn Engine>>, config: &SurfaceConfig) -> Result<Self> {
        config.validate()?;
        let surface = engine
            .borrow_mut()
            .new_surface(config)
            .ok_or(Error::SurfaceCreation)?;
        log::debug!("created surface {:?} for {:?}", surface, config.command);

        let (width, height) = config.initial_size();
        Ok(Self {
            engine,
            surface,
            composer: Composer::new(),
            mouse: MouseState::new(),
            flags: FlagsTracker::new(0),
            mods: ModifierSet::empty(),
            logical_size: (width as f64, height as f64),
            scale: (1.0, 1.0),
            freed: false,
        })
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn is_composing(&self) -> bool {
        self.composer.is_composing()
    }

    // --- window geometry and focus ---

    /// The view's logical bounds changed.
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.logical_size = (width, height);
        self.sync_size();
    }

    /// The backing scale factor changed.
    pub fn set_scale(&mut self, x: f64, y: f64) {
        self.scale = (x, y);
        self.sync_size();
    }

    /// Push the current scale and physical size to the engine. Always
    /// reflects the last logical size times the last scale factor.
    fn sync_size(&mut self) {
        if self.freed {
            return;
        }
        let mut engine = self.engine.borrow_mut();
        engine.set_content_scale(self.surface, self.scale.0, self.scale.1);
        engine.set_size(
            self.surface,
            (self.logical_size.0 * self.scale.0) as u32,
            (self.logical_size.1 * self.scale.1) as u32,
        );
    }

    pub fn set_focus(&mut self, focused: bool) {
        if self.freed {
            return;
        }
        self.engine.borrow_mut().set_focus(self.surface, focused);
    }

    // --- keyboard ---

    /// A modifier key's own event arrived, reporting only the resulting raw
    /// flag state. Classifies the transition, updates the tracked modifier
    /// state, and forwards a press or release unless a composition is in
    /// progress; a modifier transition mid-composition would corrupt the
    /// engine's IME state, so those are swallowed.
    pub fn flags_changed(
        &mut self,
        keycode: u32,
        raw_flags: u32,
        side_mask: u32,
        key: ModKey,
    ) -> bool {
        let action = self.flags.transition(raw_flags, key);
        self.mods = translate(raw_flags, side_mask);

        let Some(action) = action else {
            return false;
        };
        if self.freed {
            return false;
        }
        if self.composer.is_composing() {
            log::debug!("swallowing bare modifier transition during composition");
            return false;
        }

        let event = KeyEvent {
            action,
            keycode,
            mods: self.mods,
            consumed_mods: ModifierSet::empty(),
            unshifted_codepoint: 0,
            text: None,
            composing: false,
        };
        self.engine.borrow_mut().key(self.surface, &event)
    }

    /// Like [`flags_changed`], for hosts whose modifier updates report the
    /// aggregate flag state without naming the key that toggled (winit's
    /// `ModifiersChanged`). Diffs against the previously observed flags to
    /// recover the key; when no modifier bit toggled, the state is tracked
    /// and nothing is forwarded.
    ///
    /// [`flags_changed`]: Self::flags_changed
    pub fn modifiers_changed(&mut self, keycode: u32, raw_flags: u32, side_mask: u32) -> bool {
        match ModKey::from_toggle(self.flags.last(), raw_flags) {
            Some(key) => self.flags_changed(keycode, raw_flags, side_mask, key),
            None => {
                self.flags.observe(raw_flags);
                self.mods = translate(raw_flags, side_mask);
                false
            }
        }
    }

    /// Process a key-down through the composition state machine. Returns
    /// false when neither the interpreter nor the engine consumed the event.
    pub fn key_down(&mut self, event: &HostKey, interpreter: &mut dyn TextInterpreter) -> bool {
        if self.freed {
            return false;
        }
        let mut engine = self.engine.borrow_mut();
        self.composer
            .key_down(&mut *engine, self.surface, event, interpreter)
    }

    /// Forward a key-up. Bypasses interpretation entirely.
    pub fn key_up(&mut self, event: &HostKey) -> bool {
        if self.freed {
            return false;
        }
        let mut engine = self.engine.borrow_mut();
        self.composer.key_up(&mut *engine, self.surface, event)
    }

    // --- mouse ---

    /// Forward a button transition by host button index. Unrecognized
    /// indices are left to host-default handling.
    pub fn mouse_button(&mut self, action: KeyAction, button_index: u8) -> bool {
        let Some(button) = MouseButton::from_index(button_index) else {
            return false;
        };
        if self.freed {
            return false;
        }
        let mut engine = self.engine.borrow_mut();
        self.mouse
            .button(&mut *engine, self.surface, action, button, self.mods)
    }

    /// Pointer moved to (x, y) in the view's top-left-origin logical
    /// coordinates.
    pub fn mouse_moved(&mut self, x: f64, y: f64) {
        if self.freed {
            return;
        }
        let mut engine = self.engine.borrow_mut();
        self.mouse.moved(
            &mut *engine,
            self.surface,
            x,
            y,
            self.logical_size.1,
            self.mods,
        );
    }

    /// Pointer left the view bounds.
    pub fn mouse_exited(&mut self) {
        if self.freed {
            return;
        }
        let mut engine = self.engine.borrow_mut();
        self.mouse.exited(&mut *engine, self.surface, self.mods);
    }

    pub fn scroll(&mut self, event: &ScrollEvent) {
        if self.freed {
            return;
        }
        let mut engine = self.engine.borrow_mut();
        self.mouse.scroll(&mut *engine, self.surface, event);
    }

    // --- host-driven passthroughs ---

    /// Send pasted text directly, bypassing key translation.
    pub fn paste(&mut self, text: &str) {
        if self.freed {
            return;
        }
        self.engine.borrow_mut().text(self.surface, text);
    }

    /// Current selection contents, for the host's copy path.
    pub fn selection_text(&mut self) -> Option<String> {
        if self.freed {
            return None;
        }
        self.engine.borrow_mut().read_selection(self.surface)
    }

    /// Ask the engine to begin an orderly close (window close button path).
    pub fn request_close(&mut self) {
        if self.freed {
            return;
        }
        self.engine.borrow_mut().request_close(self.surface);
    }

    // --- relay ---

    /// Handle a relayed engine callback on the UI thread. Returns an
    /// outward notice for the hosting application when one applies.
    pub fn handle_relay(&mut self, event: RelayEvent) -> Option<ViewNotice> {
        match event {
            RelayEvent::Wakeup => {
                self.engine.borrow_mut().tick();
                None
            }
            RelayEvent::Action { target, action } => {
                if target != self.surface {
                    return None;
                }
                self.handle_action(action)
            }
        }
    }

    fn handle_action(&mut self, action: EngineAction) -> Option<ViewNotice> {
        match action {
            EngineAction::SetTitle(title) => {
                if title.is_empty() {
                    None
                } else {
                    Some(ViewNotice::TitleChanged(title))
                }
            }
            EngineAction::ChildExited | EngineAction::CloseRequest => {
                self.teardown();
                Some(ViewNotice::CloseRequested)
            }
            EngineAction::Unknown(tag) => {
                log::debug!("unhandled engine action tag {}", tag);
                None
            }
        }
    }

    /// Free the surface. Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if self.freed {
            return;
        }
        self.freed = true;
        log::debug!("freeing surface {:?}", self.surface);
        self.engine.borrow_mut().free_surface(self.surface);
    }
}

impl Drop for SurfaceView {
    fn drop(&mut self) {
        self.teardown();
    }
}
