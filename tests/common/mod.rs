//! Shared test doubles: a recording fake engine and a scripted interpreter.

use std::collections::VecDeque;

use termdock::{
    Engine, HostKey, KeyAction, KeyEvent, ModifierSet, MouseButton, ScrollMods, SurfaceConfig,
    SurfaceId, TextInterpreter, TextSink,
};

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    NewSurface(String),
    FreeSurface(u64),
    Tick,
    SetFocus(bool),
    SetSize(u32, u32),
    SetContentScale(f64, f64),
    Key(KeyEvent),
    Text(String),
    SetPreedit(Option<String>),
    MouseButton(KeyAction, MouseButton),
    MousePos(f64, f64),
    MouseScroll(f64, f64, i32),
    ReadSelection,
    QueryTranslationMods(ModifierSet),
    RequestClose,
}

/// Engine fake that records every call in order.
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    next_surface: u64,
    /// Reply for `init`
    pub init_ok: bool,
    /// When set, `new_surface` refuses to create a handle
    pub refuse_surface: bool,
    /// Reply for `key` and `mouse_button`
    pub handled: bool,
    /// Override reply for `query_translation_mods`; echoes the input when unset
    pub translation_reply: Option<ModifierSet>,
    /// Reply for `read_selection`
    pub selection: Option<String>,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            next_surface: 1,
            init_ok: true,
            refuse_surface: false,
            handled: true,
            translation_reply: None,
            selection: None,
        }
    }
}

#[allow(dead_code)]
impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded key events, in call order.
    pub fn keys(&self) -> Vec<&KeyEvent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Key(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }

    /// Position of the first call satisfying the predicate.
    pub fn index_of(&self, matches: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(matches)
    }
}

impl Engine for RecordingEngine {
    fn init(&mut self, _argv: &[String]) -> bool {
        self.init_ok
    }

    fn new_surface(&mut self, config: &SurfaceConfig) -> Option<SurfaceId> {
        if self.refuse_surface {
            return None;
        }
        let id = self.next_surface;
        self.next_surface += 1;
        self.calls.push(Call::NewSurface(config.command.clone()));
        Some(SurfaceId(id))
    }

    fn free_surface(&mut self, surface: SurfaceId) {
        self.calls.push(Call::FreeSurface(surface.0));
    }

    fn tick(&mut self) {
        self.calls.push(Call::Tick);
    }

    fn set_focus(&mut self, _surface: SurfaceId, focused: bool) {
        self.calls.push(Call::SetFocus(focused));
    }

    fn set_size(&mut self, _surface: SurfaceId, width: u32, height: u32) {
        self.calls.push(Call::SetSize(width, height));
    }

    fn set_content_scale(&mut self, _surface: SurfaceId, x: f64, y: f64) {
        self.calls.push(Call::SetContentScale(x, y));
    }

    fn key(&mut self, _surface: SurfaceId, event: &KeyEvent) -> bool {
        self.calls.push(Call::Key(event.clone()));
        self.handled
    }

    fn text(&mut self, _surface: SurfaceId, text: &str) {
        self.calls.push(Call::Text(text.to_string()));
    }

    fn set_preedit(&mut self, _surface: SurfaceId, preedit: Option<&str>) {
        self.calls.push(Call::SetPreedit(preedit.map(str::to_string)));
    }

    fn mouse_button(
        &mut self,
        _surface: SurfaceId,
        action: KeyAction,
        button: MouseButton,
        _mods: ModifierSet,
    ) -> bool {
        self.calls.push(Call::MouseButton(action, button));
        self.handled
    }

    fn mouse_pos(&mut self, _surface: SurfaceId, x: f64, y: f64, _mods: ModifierSet) {
        self.calls.push(Call::MousePos(x, y));
    }

    fn mouse_scroll(&mut self, _surface: SurfaceId, dx: f64, dy: f64, mods: ScrollMods) {
        self.calls.push(Call::MouseScroll(dx, dy, mods.bits()));
    }

    fn read_selection(&mut self, _surface: SurfaceId) -> Option<String> {
        self.calls.push(Call::ReadSelection);
        self.selection.clone()
    }

    fn query_translation_mods(&mut self, _surface: SurfaceId, mods: ModifierSet) -> ModifierSet {
        self.calls.push(Call::QueryTranslationMods(mods));
        self.translation_reply.unwrap_or(mods)
    }

    fn request_close(&mut self, _surface: SurfaceId) {
        self.calls.push(Call::RequestClose);
    }
}

/// One interpreter callback to replay.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Commit(&'static str),
    Mark(&'static str),
}

/// Interpreter that replays a scripted batch of callbacks per key-down and
/// records the modifier state of every event it is handed.
#[derive(Default)]
pub struct ScriptInterpreter {
    passes: VecDeque<Vec<Step>>,
    pub seen_mods: Vec<ModifierSet>,
}

#[allow(dead_code)]
impl ScriptInterpreter {
    pub fn new(passes: Vec<Vec<Step>>) -> Self {
        Self {
            passes: passes.into(),
            seen_mods: Vec::new(),
        }
    }

    /// Interpreter that never produces text or marked-text changes.
    pub fn silent() -> Self {
        Self::default()
    }
}

impl TextInterpreter for ScriptInterpreter {
    fn interpret(&mut self, event: &HostKey, sink: &mut dyn TextSink) {
        self.seen_mods.push(event.mods);
        for step in self.passes.pop_front().unwrap_or_default() {
            match step {
                Step::Commit(text) => sink.commit(text),
                Step::Mark(text) => sink.set_marked(text),
            }
        }
    }
}

/// A plain key-down for the character `c`.
#[allow(dead_code)]
pub fn key_down(c: char, mods: ModifierSet) -> HostKey {
    HostKey {
        action: KeyAction::Press,
        keycode: c as u32,
        mods,
        characters: Some(c.to_string()),
        unshifted_codepoint: c as u32,
    }
}
