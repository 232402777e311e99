//! IME composition state machine
//!
//! Owns the marked (preedit) text mirrored from the host text-interpretation
//! pipeline and decides, per key-down, whether the engine receives committed
//! text, a preedit update, or a raw key event.
//!
//! Host interpretation pipelines are stateful and can synchronously call
//! back into the sink several times per keystroke (dead keys, multi-stage
//! IME). Commits are therefore batched in a scoped accumulator and the
//! engine's preedit is synchronized only after interpretation returns, so
//! the engine never sees partial intermediate states.

use crate::engine::{Engine, SurfaceId};
use crate::key::{HostKey, KeyEvent};

/// The host's native text-interpretation capability.
pub trait TextInterpreter {
    /// Interpret one key-down. May call back into the sink zero or more
    /// times, synchronously, before returning.
    fn interpret(&mut self, event: &HostKey, sink: &mut dyn TextSink);
}

/// Callbacks the interpreter issues while processing a key-down.
pub trait TextSink {
    /// Append a committed string to the current key-down's output.
    fn commit(&mut self, text: &str);

    /// Replace the marked (preedit) text. An empty string cancels the
    /// composition.
    fn set_marked(&mut self, text: &str);
}

/// Composition state for one surface.
///
/// `Idle` while the marked text is empty, `Composing` otherwise. The commit
/// accumulator exists only for the duration of one key-down and is cleared
/// afterwards regardless of what the interpreter did.
#[derive(Debug, Default)]
pub struct Composer {
    marked_text: String,
    pending: Option<Vec<String>>,
    /// Whether the interpreter replaced the marked text during the current
    /// key-down, including a replace-with-equal or replace-with-empty
    marked_touched: bool,
}

impl TextSink for Composer {
    fn commit(&mut self, text: &str) {
        if let Some(pending) = &mut self.pending {
            pending.push(text.to_string());
        } else {
            // Commit outside a key-down scope; nothing to attach it to.
            log::warn!("dropping committed text arriving outside key interpretation");
        }
    }

    fn set_marked(&mut self, text: &str) {
        self.marked_touched = true;
        self.marked_text.clear();
        self.marked_text.push_str(text);
    }
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_composing(&self) -> bool {
        !self.marked_text.is_empty()
    }

    pub fn marked_text(&self) -> &str {
        &self.marked_text
    }

    /// Process one key-down through the host interpreter and dispatch the
    /// outcome to the engine. Returns the engine's handled status; an
    /// unhandled event falls back to host-default handling.
    pub fn key_down(
        &mut self,
        engine: &mut dyn Engine,
        surface: SurfaceId,
        event: &HostKey,
        interpreter: &mut dyn TextInterpreter,
    ) -> bool {
        let composing_before = self.is_composing();

        // Let the engine pick the modifiers used for character translation.
        // Only the synthesized copy feeds the interpreter; the events
        // dispatched below keep the original physical modifier state.
        let adjusted = engine.query_translation_mods(surface, event.mods);
        let synthesized = event.with_translation_mods(adjusted);

        self.pending = Some(Vec::new());
        self.marked_touched = false;
        interpreter.interpret(&synthesized, self);
        let commits = self.pending.take().unwrap_or_default();

        let composing_now = self.is_composing();

        let handled = if !commits.is_empty() {
            // One committed-text press per string, in order. Committed text
            // carries no raw keycode semantics beyond the original action.
            let mut handled = false;
            for text in &commits {
                let committed = KeyEvent {
                    action: event.action,
                    keycode: 0,
                    mods: event.mods,
                    consumed_mods: adjusted.consumed(),
                    unshifted_codepoint: 0,
                    text: Some(text.clone()),
                    composing: false,
                };
                handled |= engine.key(surface, &committed);
            }
            handled
        } else if self.marked_touched {
            // Interpretation went entirely into the marked text; the preedit
            // sync below is the whole dispatch for this key-down.
            true
        } else {
            // Untouched marked text keeps the composition alive (the IME
            // swallowed the key without changing the preedit, e.g. candidate
            // navigation), so the raw event carries the composing flag.
            let raw = KeyEvent {
                action: event.action,
                keycode: event.keycode,
                mods: event.mods,
                consumed_mods: adjusted.consumed(),
                unshifted_codepoint: event.unshifted_codepoint,
                text: event.characters.clone(),
                composing: composing_before || composing_now,
            };
            engine.key(surface, &raw)
        };

        // Synchronize the engine preedit after committed text, never before.
        // Only a pass that actually replaced the marked text syncs: no
        // redundant re-sends while it sits unchanged, no redundant clears
        // while it stays empty.
        if self.marked_touched {
            if composing_now {
                engine.set_preedit(surface, Some(&self.marked_text));
            } else if composing_before {
                engine.set_preedit(surface, None);
            }
        }

        handled
    }

    /// Key-up events bypass interpretation entirely: always forwarded as a
    /// release with no text and no composing flag.
    pub fn key_up(&mut self, engine: &mut dyn Engine, surface: SurfaceId, event: &HostKey) -> bool {
        let release = KeyEvent::release(event.keycode, event.mods, event.unshifted_codepoint);
        engine.key(surface, &release)
    }
}
