#[cfg(feature = "serde")]
use serde::Serialize;

use crate::registry::NavKey;

/// One step of the keystroke replay, in the order it must happen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "kebab-case"))]
pub enum Action {
    /// Literal characters to insert.
    Text(String),
    /// Fire the shortcut or sequence of the mapping with this id.
    Command(String),
    /// Press a navigation key without modifiers.
    Nav(NavKey),
}

static_assertions::assert_eq_size!(NavKey, u8);
static_assertions::assert_impl_all!(Action: Send, Sync);

/// Accumulates actions, keeping an open text buffer so that adjacent text is always
/// merged into a single [`Action::Text`].
#[derive(Debug, Default)]
pub(crate) struct ActionBuilder {
    actions: Vec<Action>,
    text: String,
}

impl ActionBuilder {
    #[inline]
    pub(crate) fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    #[inline]
    pub(crate) fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub(crate) fn command(&mut self, mapping_id: &str) {
        self.flush();
        self.actions.push(Action::Command(mapping_id.to_string()));
    }

    pub(crate) fn nav(&mut self, key: NavKey) {
        self.flush();
        self.actions.push(Action::Nav(key));
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.actions.push(Action::Text(std::mem::take(&mut self.text)));
        }
    }

    pub(crate) fn finish(mut self) -> Vec<Action> {
        self.flush();
        self.actions
    }
}
