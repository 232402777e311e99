//! Capability surface of the embedded terminal engine
//!
//! The engine is an external collaborator: it owns rendering, the PTY and
//! escape sequence handling. The bridge reaches it only through the calls
//! below, and the engine reaches back only through the callbacks in
//! [`crate::relay`].

use crate::config::SurfaceConfig;
use crate::error::{Error, Result};
use crate::key::{KeyAction, KeyEvent};
use crate::modifiers::ModifierSet;
use crate::mouse::{MouseButton, ScrollMods};

/// Opaque handle to one engine-side terminal instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Engine-originated action targeted at a surface.
///
/// Unrecognized tags are carried through so the bridge can report them as
/// unhandled instead of dropping them silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineAction {
    /// Apply a new window title; ignored when empty
    SetTitle(String),
    /// The child process running in the surface exited
    ChildExited,
    /// The surface asked its host to close
    CloseRequest,
    /// Unrecognized action tag
    Unknown(u32),
}

/// The calls the bridge needs from a terminal engine.
///
/// All methods are synchronous and must only be invoked from the UI thread;
/// engine callbacks arriving on other threads go through
/// [`crate::relay::EngineCallbacks`] instead.
pub trait Engine {
    /// Initialize the engine process-wide. Returns false on failure, which
    /// is fatal to startup.
    fn init(&mut self, argv: &[String]) -> bool;

    /// Create a surface for the given configuration, or `None` on failure.
    fn new_surface(&mut self, config: &SurfaceConfig) -> Option<SurfaceId>;

    /// Destroy a surface. Called exactly once per surface.
    fn free_surface(&mut self, surface: SurfaceId);

    /// Run pending internal engine work. Scheduled on the UI thread in
    /// response to a wakeup callback.
    fn tick(&mut self);

    fn set_focus(&mut self, surface: SurfaceId, focused: bool);

    /// Set the surface size in physical pixels.
    fn set_size(&mut self, surface: SurfaceId, width: u32, height: u32);

    fn set_content_scale(&mut self, surface: SurfaceId, x: f64, y: f64);

    /// Dispatch a key event. Returns false if the engine did not handle it,
    /// in which case the host's default handling applies.
    fn key(&mut self, surface: SurfaceId, event: &KeyEvent) -> bool;

    /// Send already-committed text, bypassing key translation.
    fn text(&mut self, surface: SurfaceId, text: &str);

    /// Replace the engine's preedit string; `None` clears it.
    fn set_preedit(&mut self, surface: SurfaceId, preedit: Option<&str>);

    /// Dispatch a button transition. Returns false if unhandled.
    fn mouse_button(
        &mut self,
        surface: SurfaceId,
        action: KeyAction,
        button: MouseButton,
        mods: ModifierSet,
    ) -> bool;

    /// Report the pointer position in the engine's bottom-left-origin
    /// coordinates.
    fn mouse_pos(&mut self, surface: SurfaceId, x: f64, y: f64, mods: ModifierSet);

    fn mouse_scroll(&mut self, surface: SurfaceId, dx: f64, dy: f64, mods: ScrollMods);

    /// Current selection contents, if any.
    fn read_selection(&mut self, surface: SurfaceId) -> Option<String>;

    /// Ask the engine which modifiers should drive key-to-character
    /// translation for the current physical key, given the raw state.
    fn query_translation_mods(&mut self, surface: SurfaceId, mods: ModifierSet) -> ModifierSet;

    /// Ask the engine to begin an orderly close of the surface.
    fn request_close(&mut self, surface: SurfaceId);
}

/// Initialize the engine once at startup. A non-success status is fatal and
/// unrecoverable: a terminal surface cannot exist without a live engine
/// instance, so there is no retry or degraded mode.
pub fn init_engine(engine: &mut dyn Engine, argv: &[String]) -> Result<()> {
    if engine.init(argv) {
        Ok(())
    } else {
        Err(Error::EngineInit)
    }
}
