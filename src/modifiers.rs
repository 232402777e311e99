//! Modifier flag translation
//!
//! Converts the host window system's raw modifier flags into the engine's
//! modifier set. Two parts are non-obvious:
//! - Left/right disambiguation: the host reports a device-specific mask
//!   saying which physical key contributes a flag; the engine wants explicit
//!   `*_RIGHT` bits.
//! - Bare modifier key transitions: an event for a modifier key itself only
//!   reports the resulting flag state, not whether the key went down or up.
//!   [`FlagsTracker`] classifies the transition by XOR against the previously
//!   observed flags.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::key::KeyAction;

/// Raw host modifier flag bits, as delivered by the window system.
pub mod raw {
    pub const SHIFT: u32 = 1 << 0;
    pub const CONTROL: u32 = 1 << 1;
    pub const ALT: u32 = 1 << 2;
    pub const SUPER: u32 = 1 << 3;
    pub const CAPS_LOCK: u32 = 1 << 4;
}

/// Device-side mask bits indicating the right-hand physical key is the one
/// contributing the corresponding flag.
pub mod side {
    pub const RIGHT_SHIFT: u32 = 1 << 0;
    pub const RIGHT_CONTROL: u32 = 1 << 1;
    pub const RIGHT_ALT: u32 = 1 << 2;
    pub const RIGHT_SUPER: u32 = 1 << 3;
}

/// Engine-facing modifier bitset.
///
/// Invariant: a `*_RIGHT` bit is set only if its base bit is also set.
/// [`translate`] upholds this by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierSet(u16);

impl ModifierSet {
    pub const SHIFT: ModifierSet = ModifierSet(1 << 0);
    pub const CTRL: ModifierSet = ModifierSet(1 << 1);
    pub const ALT: ModifierSet = ModifierSet(1 << 2);
    pub const SUPER: ModifierSet = ModifierSet(1 << 3);
    pub const CAPS_LOCK: ModifierSet = ModifierSet(1 << 4);
    pub const SHIFT_RIGHT: ModifierSet = ModifierSet(1 << 5);
    pub const CTRL_RIGHT: ModifierSet = ModifierSet(1 << 6);
    pub const ALT_RIGHT: ModifierSet = ModifierSet(1 << 7);
    pub const SUPER_RIGHT: ModifierSet = ModifierSet(1 << 8);

    /// The four modifiers that participate in key-to-character translation,
    /// base and right bits.
    const TRANSLATION: ModifierSet = ModifierSet(
        Self::SHIFT.0
            | Self::CTRL.0
            | Self::ALT.0
            | Self::SUPER.0
            | Self::SHIFT_RIGHT.0
            | Self::CTRL_RIGHT.0
            | Self::ALT_RIGHT.0
            | Self::SUPER_RIGHT.0,
    );

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: ModifierSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: ModifierSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Remove the given bits.
    pub const fn without(self, other: ModifierSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// The modifiers reported as "consumed" by translation: everything the
    /// adjusted set contained except Control and Super, which the engine
    /// tracks itself for its own binding logic.
    pub const fn consumed(self) -> Self {
        self.without(ModifierSet(
            Self::CTRL.0 | Self::SUPER.0 | Self::CTRL_RIGHT.0 | Self::SUPER_RIGHT.0,
        ))
    }

    /// Replace this set's translation modifiers (Shift/Control/Alt/Super and
    /// their right-side bits) with those of `adjusted`, keeping everything
    /// else (caps lock) untouched.
    pub const fn with_translation_from(self, adjusted: ModifierSet) -> Self {
        Self(self.0 & !Self::TRANSLATION.0 | adjusted.0 & Self::TRANSLATION.0)
    }
}

impl BitOr for ModifierSet {
    type Output = ModifierSet;
    fn bitor(self, rhs: ModifierSet) -> ModifierSet {
        ModifierSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModifierSet {
    fn bitor_assign(&mut self, rhs: ModifierSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModifierSet {
    type Output = ModifierSet;
    fn bitand(self, rhs: ModifierSet) -> ModifierSet {
        ModifierSet(self.0 & rhs.0)
    }
}

/// Translate raw host flags plus the device-side mask into the engine's
/// modifier set. Pure function; a right-side bit is emitted only when the
/// base flag is active.
pub fn translate(raw_flags: u32, side_mask: u32) -> ModifierSet {
    let mut mods = ModifierSet::empty();

    if raw_flags & raw::SHIFT != 0 {
        mods |= ModifierSet::SHIFT;
        if side_mask & side::RIGHT_SHIFT != 0 {
            mods |= ModifierSet::SHIFT_RIGHT;
        }
    }
    if raw_flags & raw::CONTROL != 0 {
        mods |= ModifierSet::CTRL;
        if side_mask & side::RIGHT_CONTROL != 0 {
            mods |= ModifierSet::CTRL_RIGHT;
        }
    }
    if raw_flags & raw::ALT != 0 {
        mods |= ModifierSet::ALT;
        if side_mask & side::RIGHT_ALT != 0 {
            mods |= ModifierSet::ALT_RIGHT;
        }
    }
    if raw_flags & raw::SUPER != 0 {
        mods |= ModifierSet::SUPER;
        if side_mask & side::RIGHT_SUPER != 0 {
            mods |= ModifierSet::SUPER_RIGHT;
        }
    }
    if raw_flags & raw::CAPS_LOCK != 0 {
        mods |= ModifierSet::CAPS_LOCK;
    }

    mods
}

/// Logical modifier key, for bare modifier key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModKey {
    Shift,
    Control,
    Alt,
    Super,
    CapsLock,
}

impl ModKey {
    /// The raw flag bit this key contributes.
    pub const fn raw_bit(self) -> u32 {
        match self {
            ModKey::Shift => raw::SHIFT,
            ModKey::Control => raw::CONTROL,
            ModKey::Alt => raw::ALT,
            ModKey::Super => raw::SUPER,
            ModKey::CapsLock => raw::CAPS_LOCK,
        }
    }

    /// The modifier key whose flag bit differs between two raw states, for
    /// hosts whose modifier updates report aggregate state without naming
    /// the key that changed. Returns `None` when no modifier bit toggled.
    pub fn from_toggle(old_flags: u32, new_flags: u32) -> Option<ModKey> {
        let changed = old_flags ^ new_flags;
        [
            ModKey::Shift,
            ModKey::Control,
            ModKey::Alt,
            ModKey::Super,
            ModKey::CapsLock,
        ]
        .into_iter()
        .find(|key| changed & key.raw_bit() != 0)
    }
}

/// Tracks the previously observed raw flags so bare modifier key events can
/// be classified as press or release without relying on the OS event's
/// action field.
#[derive(Debug, Default)]
pub struct FlagsTracker {
    last: u32,
}

impl FlagsTracker {
    /// Start tracking from an explicitly observed initial state.
    pub fn new(initial: u32) -> Self {
        Self { last: initial }
    }

    /// Record a flags-changed event for the given modifier key. Returns the
    /// transition direction if that key's bit actually toggled, `None`
    /// otherwise. The observed flags are remembered either way.
    pub fn transition(&mut self, new_flags: u32, key: ModKey) -> Option<KeyAction> {
        let bit = key.raw_bit();
        let toggled = (self.last ^ new_flags) & bit != 0;
        self.last = new_flags;

        if !toggled {
            return None;
        }
        if new_flags & bit != 0 {
            Some(KeyAction::Press)
        } else {
            Some(KeyAction::Release)
        }
    }

    /// Record observed flags without classifying a transition.
    pub fn observe(&mut self, flags: u32) {
        self.last = flags;
    }

    /// The most recently observed raw flags.
    pub fn last(&self) -> u32 {
        self.last
    }
}
