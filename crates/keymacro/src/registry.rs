use rustc_hash::FxHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use crate::error::{RegistryErrKind, RegistryError};

/// A navigation key, pressed without modifiers to move the destination editor's caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NavKey {
    ArrowLeft,
    #[default]
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Tab,
    Enter,
}

impl NavKey {
    /// The key name as used by browser keyboard events, e.g. `"ArrowRight"`.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The legacy numeric key code of browser keyboard events.
    pub fn key_code(self) -> u8 {
        match self {
            NavKey::ArrowLeft => 37,
            NavKey::ArrowUp => 38,
            NavKey::ArrowRight => 39,
            NavKey::ArrowDown => 40,
            NavKey::Tab => 9,
            NavKey::Enter => 13,
        }
    }

    /// The key name understood by the hotkey macro language, e.g. `"Right"`.
    pub fn macro_name(self) -> &'static str {
        match self {
            NavKey::ArrowLeft => "Left",
            NavKey::ArrowRight => "Right",
            NavKey::ArrowUp => "Up",
            NavKey::ArrowDown => "Down",
            NavKey::Tab => "Tab",
            NavKey::Enter => "Enter",
        }
    }
}

/// What happens in the destination editor when a mapping fires.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum MappingAction {
    /// A single key pressed together with modifiers, e.g. Ctrl+F.
    Shortcut {
        key: char,
        #[cfg_attr(feature = "serde", serde(default))]
        ctrl: bool,
        #[cfg_attr(feature = "serde", serde(default))]
        shift: bool,
        #[cfg_attr(feature = "serde", serde(default))]
        alt: bool,
    },
    /// Literal text that the destination editor expands by itself, e.g. `"/frac "`.
    Sequence { text: String },
}

/// A user-configured binding from a markup trigger to an editor action.
///
/// # Example
///
/// ```rust
/// use keymacro::{KeyMapping, MappingAction, NavKey};
///
/// let mapping = KeyMapping {
///     id: "overline".to_string(),
///     name: "Overline".to_string(),
///     trigger: "overline".to_string(),
///     action: MappingAction::Shortcut { key: 'o', ctrl: true, shift: true, alt: false },
///     delay: Some(20),
///     advance_key: None,
///     exit_key: Some(NavKey::ArrowRight),
/// };
/// assert!(mapping.is_shortcut());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub struct KeyMapping {
    pub id: String,
    /// Display name; never interpreted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Command name without the backslash (`frac`), or a single marker character (`^`).
    pub trigger: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub action: MappingAction,
    /// Milliseconds to wait after firing, so the destination page can react.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub delay: Option<u32>,
    /// Key that moves from the first to the second argument slot.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub advance_key: Option<NavKey>,
    /// Key that leaves the construct.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub exit_key: Option<NavKey>,
}

impl KeyMapping {
    #[inline]
    pub fn is_shortcut(&self) -> bool {
        matches!(self.action, MappingAction::Shortcut { .. })
    }

    #[inline]
    pub fn advance_key(&self) -> NavKey {
        self.advance_key.unwrap_or_default()
    }

    #[inline]
    pub fn exit_key(&self) -> NavKey {
        self.exit_key.unwrap_or_default()
    }

    /// The configured delay, or `fallback` if the mapping does not set one.
    #[inline]
    pub fn delay_or(&self, fallback: u32) -> u32 {
        self.delay.unwrap_or(fallback)
    }
}

/// The starter set of mappings: sub-/superscript, fraction and square root, bound to
/// Ctrl shortcuts.
pub fn default_mappings() -> Vec<KeyMapping> {
    fn ctrl(id: &str, name: &str, trigger: &str, key: char, advance: bool) -> KeyMapping {
        KeyMapping {
            id: id.to_string(),
            name: name.to_string(),
            trigger: trigger.to_string(),
            action: MappingAction::Shortcut {
                key,
                ctrl: true,
                shift: false,
                alt: false,
            },
            delay: Some(5),
            advance_key: advance.then_some(NavKey::ArrowRight),
            exit_key: Some(NavKey::ArrowRight),
        }
    }
    vec![
        ctrl("subscript", "Subscript (_)", "_", 'l', false),
        ctrl("superscript", "Superscript (^)", "^", 'h', false),
        ctrl("fraction", r"Fraction (\frac)", "frac", 'f', true),
        ctrl("sqrt", r"Square root (\sqrt)", "sqrt", 'r', false),
    ]
}

/// An immutable snapshot of key mappings, indexed by trigger and by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    mappings: Vec<KeyMapping>,
    by_trigger: FxHashMap<String, usize>,
    by_id: FxHashMap<String, usize>,
}

impl Registry {
    /// Build a registry, checking that ids and triggers are present and unique.
    pub fn new(mappings: Vec<KeyMapping>) -> Result<Self, RegistryError> {
        let mut by_trigger =
            FxHashMap::with_capacity_and_hasher(mappings.len(), Default::default());
        let mut by_id = FxHashMap::with_capacity_and_hasher(mappings.len(), Default::default());
        for (idx, mapping) in mappings.iter().enumerate() {
            if mapping.id.is_empty() {
                return Err(RegistryError(idx, RegistryErrKind::EmptyId));
            }
            if mapping.trigger.is_empty() {
                return Err(RegistryError(idx, RegistryErrKind::EmptyTrigger));
            }
            if !is_valid_trigger(&mapping.trigger) {
                return Err(RegistryError(
                    idx,
                    RegistryErrKind::InvalidTrigger(mapping.trigger.as_str().into()),
                ));
            }
            if by_id.insert(mapping.id.clone(), idx).is_some() {
                return Err(RegistryError(
                    idx,
                    RegistryErrKind::DuplicateId(mapping.id.as_str().into()),
                ));
            }
            if by_trigger.insert(mapping.trigger.clone(), idx).is_some() {
                return Err(RegistryError(
                    idx,
                    RegistryErrKind::DuplicateTrigger(mapping.trigger.as_str().into()),
                ));
            }
        }
        Ok(Self {
            mappings,
            by_trigger,
            by_id,
        })
    }

    pub fn by_trigger(&self, trigger: &str) -> Option<&KeyMapping> {
        let idx = *self.by_trigger.get(trigger)?;
        self.mappings.get(idx)
    }

    pub fn by_id(&self, id: &str) -> Option<&KeyMapping> {
        let idx = *self.by_id.get(id)?;
        self.mappings.get(idx)
    }

    /// All mappings, in the order they were configured.
    #[inline]
    pub fn mappings(&self) -> &[KeyMapping] {
        &self.mappings
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// A trigger is either a script marker (`^` or `_`), or a command name that the scanner
/// can actually produce, which means ASCII letters only.
fn is_valid_trigger(s: &str) -> bool {
    match s {
        "" => false,
        "^" | "_" => true,
        _ => s.bytes().all(|b| b.is_ascii_alphabetic()),
    }
}
