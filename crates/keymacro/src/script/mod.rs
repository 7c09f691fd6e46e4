//! Code generators that turn actions into executable replay scripts.

mod browser;
mod hotkey;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use crate::action::Action;
use crate::error::GenerateError;
use crate::registry::{KeyMapping, Registry};

pub use self::browser::BrowserScript;
pub use self::hotkey::HotkeyScript;

/// Fallback delay after a mapping fires, for mappings that do not configure one.
pub const DEFAULT_DELAY_MS: u32 = 150;

/// The kind of script to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ScriptTarget {
    /// An asynchronous script for a browser's developer console.
    Browser,
    /// A desktop hotkey macro.
    Hotkey,
}

impl ScriptTarget {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Timing and trigger settings shared by the generators.
///
/// # Example usage
///
/// ```rust
/// use keymacro::ScriptOptions;
///
/// let options = ScriptOptions {
///     default_delay_ms: 200,
///     hotkey: "F9".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(options.focus_wait_ms, 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ScriptOptions {
    /// Pause after a mapping fires if the mapping has no delay of its own.
    pub default_delay_ms: u32,
    /// Browser: time the operator has to click into the destination field.
    pub focus_wait_ms: u32,
    /// Browser: time between key-down and key-up of the main key.
    pub key_hold_ms: u32,
    /// Browser: pause after a navigation key press.
    pub nav_delay_ms: u32,
    /// Hotkey: the key that starts the macro.
    pub hotkey: String,
    /// Hotkey: uniform delay between keystrokes.
    pub key_delay_ms: u32,
    /// Hotkey: pause after a navigation key press.
    pub nav_pause_ms: u32,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            default_delay_ms: DEFAULT_DELAY_MS,
            focus_wait_ms: 3000,
            key_hold_ms: 50,
            nav_delay_ms: 100,
            hotkey: "F8".to_string(),
            key_delay_ms: 40,
            nav_pause_ms: 100,
        }
    }
}

/// A backend that compiles actions into the source text of a replay script.
pub trait ScriptGenerator {
    /// Generate the script.
    ///
    /// `registry` must be the registry the actions were parsed against; a command whose
    /// mapping cannot be found is reported as [`GenerateError::UnknownMapping`].
    fn generate(&self, actions: &[Action], registry: &Registry) -> Result<String, GenerateError>;
}

/// Generate a browser console script with default options.
pub fn browser_script(actions: &[Action], registry: &Registry) -> Result<String, GenerateError> {
    BrowserScript::new(&ScriptOptions::default()).generate(actions, registry)
}

/// Generate a hotkey macro with default options.
pub fn hotkey_script(actions: &[Action], registry: &Registry) -> Result<String, GenerateError> {
    HotkeyScript::new(&ScriptOptions::default()).generate(actions, registry)
}

fn lookup<'registry>(
    registry: &'registry Registry,
    id: &str,
) -> Result<&'registry KeyMapping, GenerateError> {
    registry
        .by_id(id)
        .ok_or_else(|| GenerateError::UnknownMapping(id.into()))
}
