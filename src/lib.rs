//! TermDock - input bridge between a native window system and an embedded
//! terminal engine.
//!
//! This crate provides the translation layer that sits between a host
//! window system's event model and a terminal engine's event protocol:
//! - Modifier flag translation with left/right key disambiguation
//! - IME composition state and preedit synchronization
//! - Mouse, scroll and momentum-phase mapping
//! - Marshalling of engine-originated callbacks back onto the UI thread
//!
//! The terminal engine itself (glyph rendering, PTY management, escape
//! sequence parsing) is an external collaborator reached only through the
//! [`Engine`] trait. Likewise the host text-interpretation pipeline (dead
//! keys, multi-stage IME) is reached through [`TextInterpreter`].

pub mod composition;
pub mod config;
pub mod engine;
mod error;
#[cfg(feature = "gui")]
pub mod host;
pub mod key;
pub mod modifiers;
pub mod mouse;
pub mod relay;
pub mod view;

pub use composition::{Composer, TextInterpreter, TextSink};
pub use config::SurfaceConfig;
pub use engine::{init_engine, Engine, EngineAction, SurfaceId};
pub use error::{Error, Result};
pub use key::{HostKey, KeyAction, KeyEvent};
pub use modifiers::{translate, FlagsTracker, ModKey, ModifierSet};
pub use mouse::{Momentum, MouseButton, MouseState, ScrollEvent, ScrollMods};
pub use relay::{Dispatcher, EngineCallbacks, RelayEvent};
pub use view::{SurfaceView, ViewNotice};
