use std::cell::RefCell;

use super::{Cue, DisplayNode, DisplaySurface, TextSlot};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Text(TextSlot, String),
    Visible(DisplayNode, bool),
    Cue(Cue),
}

/// Records every display call for assertions. Share it with the engine via
/// `Rc` and inspect `calls()` afterwards.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: RefCell<Vec<DisplayCall>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls.borrow().clone()
    }

    pub fn cue_count(&self, cue: Cue) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, DisplayCall::Cue(c) if *c == cue))
            .count()
    }

    /// Latest visibility set for the node, if any call touched it.
    pub fn visibility(&self, node: &DisplayNode) -> Option<bool> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                DisplayCall::Visible(n, visible) if n == node => Some(*visible),
                _ => None,
            })
    }

    pub fn text(&self, slot: TextSlot) -> Option<String> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                DisplayCall::Text(s, text) if *s == slot => Some(text.clone()),
                _ => None,
            })
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl DisplaySurface for RecordingDisplay {
    fn set_text(&self, slot: TextSlot, text: &str) {
        self.calls
            .borrow_mut()
            .push(DisplayCall::Text(slot, text.to_string()));
    }

    fn set_visible(&self, node: &DisplayNode, visible: bool) {
        self.calls
            .borrow_mut()
            .push(DisplayCall::Visible(node.clone(), visible));
    }

    fn play_cue(&self, cue: Cue) {
        self.calls.borrow_mut().push(DisplayCall::Cue(cue));
    }
}
