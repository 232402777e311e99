//! Key event model
//!
//! Two shapes of key event exist in the bridge: [`HostKey`] is the raw event
//! as delivered by the window system, and [`KeyEvent`] is what crosses the
//! engine boundary after translation.

use crate::modifiers::ModifierSet;

/// Key transition kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// A key event as delivered by the host window system, before translation.
#[derive(Debug, Clone)]
pub struct HostKey {
    /// Press or Repeat for key-down, Release for key-up
    pub action: KeyAction,
    /// Host physical key code
    pub keycode: u32,
    /// Translated modifier state at the time of the event
    pub mods: ModifierSet,
    /// Raw character payload, if the host attached one
    pub characters: Option<String>,
    /// Codepoint the key produces with no modifiers applied, 0 if none
    pub unshifted_codepoint: u32,
}

impl HostKey {
    /// Copy of this event with the translation modifiers (Shift, Control,
    /// Alt, Super) overridden to `adjusted`. All other fields, including
    /// caps lock, keycode and character payload, keep their original values.
    /// Only this synthesized copy is handed to the text interpreter; the
    /// event dispatched to the engine keeps the original modifiers.
    pub fn with_translation_mods(&self, adjusted: ModifierSet) -> HostKey {
        HostKey {
            mods: self.mods.with_translation_from(adjusted),
            ..self.clone()
        }
    }
}

/// A key event as dispatched to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub keycode: u32,
    /// Raw physical modifier state
    pub mods: ModifierSet,
    /// Modifiers actually used for translation, minus Control/Super
    pub consumed_mods: ModifierSet,
    pub unshifted_codepoint: u32,
    pub text: Option<String>,
    pub composing: bool,
}

impl KeyEvent {
    /// A key release. Release events never carry text or a composing flag,
    /// and no translation ran for them.
    pub fn release(keycode: u32, mods: ModifierSet, unshifted_codepoint: u32) -> Self {
        Self {
            action: KeyAction::Release,
            keycode,
            mods,
            consumed_mods: ModifierSet::empty(),
            unshifted_codepoint,
            text: None,
            composing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::{raw, translate};

    #[test]
    fn test_synthesized_copy_keeps_original_payload() {
        let event = HostKey {
            action: KeyAction::Press,
            keycode: 12,
            mods: translate(raw::CONTROL | raw::CAPS_LOCK, 0),
            characters: Some("q".to_string()),
            unshifted_codepoint: 'q' as u32,
        };

        let synthesized = event.with_translation_mods(ModifierSet::ALT);
        assert_eq!(synthesized.keycode, 12);
        assert_eq!(synthesized.characters.as_deref(), Some("q"));
        assert_eq!(synthesized.unshifted_codepoint, 'q' as u32);
        assert!(synthesized.mods.contains(ModifierSet::ALT));
        assert!(synthesized.mods.contains(ModifierSet::CAPS_LOCK));
        assert!(!synthesized.mods.contains(ModifierSet::CTRL));

        // The original is untouched and still used for final dispatch.
        assert!(event.mods.contains(ModifierSet::CTRL));
    }

    #[test]
    fn test_release_carries_no_text() {
        let release = KeyEvent::release(36, ModifierSet::SHIFT, 0);
        assert_eq!(release.action, KeyAction::Release);
        assert!(release.text.is_none());
        assert!(!release.composing);
        assert!(release.consumed_mods.is_empty());
    }
}
