use std::fmt::Write;

use tracing::debug;

use super::{ScriptGenerator, ScriptOptions, lookup};
use crate::action::Action;
use crate::error::GenerateError;
use crate::escape::escape_hotkey_literal;
use crate::registry::{MappingAction, Registry};

/// Generates a desktop hotkey macro in AutoHotkey (v1) syntax.
///
/// The whole replay is bound to a single hotkey; pressing it types the actions into
/// whichever window has focus.
#[derive(Debug, Clone, Copy)]
pub struct HotkeyScript<'options> {
    options: &'options ScriptOptions,
}

impl<'options> HotkeyScript<'options> {
    pub fn new(options: &'options ScriptOptions) -> Self {
        Self { options }
    }

    fn write_action(
        &self,
        out: &mut String,
        action: &Action,
        registry: &Registry,
    ) -> Result<(), GenerateError> {
        match action {
            Action::Text(text) => {
                out.push_str("Send, ");
                escape_hotkey_literal(out, text);
                out.push('\n');
            }
            Action::Command(id) => {
                let mapping = lookup(registry, id)?;
                match &mapping.action {
                    MappingAction::Shortcut {
                        key,
                        ctrl,
                        shift,
                        alt,
                    } => {
                        out.push_str("Send, ");
                        if *ctrl {
                            out.push('^');
                        }
                        if *shift {
                            out.push('+');
                        }
                        if *alt {
                            out.push('!');
                        }
                        // An upper-case letter would imply Shift.
                        let key = key.to_ascii_lowercase();
                        escape_hotkey_literal(out, key.encode_utf8(&mut [0u8; 4]));
                        out.push('\n');
                    }
                    MappingAction::Sequence { text } => {
                        out.push_str("Send, ");
                        escape_hotkey_literal(out, text);
                        out.push('\n');
                    }
                }
                let _ = writeln!(
                    out,
                    "Sleep, {}",
                    mapping.delay_or(self.options.default_delay_ms)
                );
            }
            Action::Nav(key) => {
                let _ = writeln!(out, "Send, {{{}}}", key.macro_name());
                let _ = writeln!(out, "Sleep, {}", self.options.nav_pause_ms);
            }
        }
        Ok(())
    }
}

impl ScriptGenerator for HotkeyScript<'_> {
    fn generate(&self, actions: &[Action], registry: &Registry) -> Result<String, GenerateError> {
        let opts = self.options;
        let mut out = String::new();
        let _ = writeln!(out, "; Press {} to start typing.", opts.hotkey);
        let _ = writeln!(out, "{}::", opts.hotkey);
        let _ = writeln!(out, "SetKeyDelay, {0}, {0}", opts.key_delay_ms);
        for action in actions {
            self.write_action(&mut out, action, registry)?;
        }
        out.push_str("Return\n");
        debug!(
            actions = actions.len(),
            output_len = out.len(),
            "generated hotkey script"
        );
        Ok(out)
    }
}
