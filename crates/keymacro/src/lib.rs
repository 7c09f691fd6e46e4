//! Turn LaTeX-flavoured math markup into keystroke replay scripts.
//!
//! Many web-based editors have an equation tool that is driven by keyboard shortcuts
//! (Ctrl+F for a fraction template, Ctrl+H for a superscript, ...) rather than by LaTeX
//! input. This crate parses markup into a flat sequence of [`Action`]s according to a
//! user-configured table of [`KeyMapping`]s, and compiles those actions into a script
//! that replays the equivalent keystrokes: either a script for the browser's developer
//! console, or a desktop hotkey macro.
//!
//! # Usage
//!
//! The main struct of this library is [`Converter`]. Create it from a [`KeyMacroConfig`]
//! and call [`Converter::convert`]:
//!
//! ```rust
//! use keymacro::{Converter, KeyMacroConfig, ScriptTarget};
//!
//! let converter = Converter::new(KeyMacroConfig::default()).unwrap();
//! let script = converter
//!     .convert(r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}", ScriptTarget::Hotkey)
//!     .unwrap();
//! assert!(script.contains("Send, ^f"));
//! ```
//!
//! The two stages are also available separately, see [`parse`], [`BrowserScript`] and
//! [`HotkeyScript`].
//!
//! # Features
//!
//! - `serde`: With this feature, [`KeyMacroConfig`] and the types it contains implement
//!   serde's `Serialize` and `Deserialize`, and [`Action`] implements `Serialize`.
//!
mod action;
mod commands;
mod error;
mod escape;
mod parser;
mod registry;
mod script;
mod symbols;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::action::Action;
pub use self::commands::{CommandClass, classify};
pub use self::error::{GenerateError, RegistryErrKind, RegistryError};
pub use self::parser::parse;
pub use self::registry::{KeyMapping, MappingAction, NavKey, Registry, default_mappings};
pub use self::script::{
    BrowserScript, DEFAULT_DELAY_MS, HotkeyScript, ScriptGenerator, ScriptOptions, ScriptTarget,
    browser_script, hotkey_script,
};
pub use self::symbols::get_symbol;

/// A formula that exercises every default mapping.
pub const SAMPLE_MARKUP: &str = r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}";

/// Configuration object for the converter.
///
/// # Example usage
///
/// ```rust
/// use keymacro::{KeyMacroConfig, KeyMapping, MappingAction, ScriptOptions, default_mappings};
///
/// // Default values
/// let config = KeyMacroConfig::default();
///
/// // An extra mapping that types a literal sequence
/// let mut mappings = default_mappings();
/// mappings.push(KeyMapping {
///     id: "vector".to_string(),
///     name: "Vector arrow".to_string(),
///     trigger: "vec".to_string(),
///     action: MappingAction::Sequence { text: "/vec ".to_string() },
///     delay: Some(100),
///     advance_key: None,
///     exit_key: None,
/// });
/// let config = KeyMacroConfig {
///     mappings,
///     script: ScriptOptions {
///         default_delay_ms: 200,
///         ..Default::default()
///     },
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct KeyMacroConfig {
    /// The key-mapping table, in display order.
    pub mappings: Vec<KeyMapping>,
    /// Timing and trigger settings for the generated scripts.
    pub script: ScriptOptions,
}

impl Default for KeyMacroConfig {
    fn default() -> Self {
        Self {
            mappings: default_mappings(),
            script: ScriptOptions::default(),
        }
    }
}

/// A converter from markup to replay scripts.
///
/// The converter owns the registry, so actions are always generated against the same
/// mappings they were parsed with.
#[derive(Debug, Clone)]
pub struct Converter {
    registry: Registry,
    options: ScriptOptions,
}

impl Converter {
    /// Create a new converter with the given configuration.
    ///
    /// This function returns an error if the mappings have missing or duplicate ids or
    /// triggers.
    pub fn new(config: KeyMacroConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            registry: Registry::new(config.mappings)?,
            options: config.script,
        })
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn options(&self) -> &ScriptOptions {
        &self.options
    }

    /// Parse markup into actions.
    #[inline]
    pub fn parse(&self, markup: &str) -> Vec<Action> {
        parse(markup, &self.registry)
    }

    /// Parse markup and generate a script for the given target.
    ///
    /// ```rust
    /// use keymacro::{Converter, KeyMacroConfig, ScriptTarget};
    ///
    /// let converter = Converter::new(KeyMacroConfig::default()).unwrap();
    /// let script = converter.convert(r"a_1 + a_2", ScriptTarget::Browser).unwrap();
    /// assert!(script.starts_with("(async function() {"));
    /// ```
    pub fn convert(&self, markup: &str, target: ScriptTarget) -> Result<String, GenerateError> {
        let actions = self.parse(markup);
        self.generate(&actions, target)
    }

    /// Generate a script from actions previously returned by [`Converter::parse`].
    pub fn generate(
        &self,
        actions: &[Action],
        target: ScriptTarget,
    ) -> Result<String, GenerateError> {
        tracing::debug!(
            script = target.as_str(),
            actions = actions.len(),
            "generating script"
        );
        match target {
            ScriptTarget::Browser => {
                BrowserScript::new(&self.options).generate(actions, &self.registry)
            }
            ScriptTarget::Hotkey => {
                HotkeyScript::new(&self.options).generate(actions, &self.registry)
            }
        }
    }
}

static_assertions::assert_impl_all!(Converter: Send, Sync);
