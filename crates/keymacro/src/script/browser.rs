use std::fmt::Write;

use tracing::debug;

use super::{ScriptGenerator, ScriptOptions, lookup};
use crate::action::Action;
use crate::error::GenerateError;
use crate::escape::escape_js_single_quoted;
use crate::registry::{MappingAction, Registry};

/// Generates a self-contained asynchronous script for a browser's developer console.
///
/// After a grace period for the operator to click into the destination field, the
/// script replays every action on the focused element by dispatching synthetic keyboard
/// events and inserting text. It performs no navigation or network access.
#[derive(Debug, Clone, Copy)]
pub struct BrowserScript<'options> {
    options: &'options ScriptOptions,
}

impl<'options> BrowserScript<'options> {
    pub fn new(options: &'options ScriptOptions) -> Self {
        Self { options }
    }

    fn write_preamble(&self, out: &mut String) {
        let opts = self.options;
        out.push_str("(async function() {\n");
        out.push_str("  const wait = ms => new Promise(r => setTimeout(r, ms));\n");
        let _ = writeln!(
            out,
            "  console.log(\"%cClick the target input within {} ms...\", \"color: blue; font-size: 16px;\");",
            opts.focus_wait_ms
        );
        let _ = writeln!(out, "  await wait({});", opts.focus_wait_ms);
        out.push_str("  const target = document.activeElement;\n");
        out.push_str("  if (!target || target === document.body) return;\n");
        out.push_str("  target.focus();\n");
        out.push_str(
            "  const KEY_CODES = { ArrowLeft: 37, ArrowUp: 38, ArrowRight: 39, ArrowDown: 40, Tab: 9, Enter: 13 };\n",
        );
        // Event dispatcher.
        out.push_str("  const dispatchKey = (type, key, code, keyCode, ctrl, shift, alt) => {\n");
        out.push_str(
            "    const event = new KeyboardEvent(type, { key, code, keyCode, which: keyCode, ctrlKey: ctrl, shiftKey: shift, altKey: alt, bubbles: true, cancelable: true });\n",
        );
        out.push_str("    target.dispatchEvent(event);\n");
        out.push_str("  };\n");
        // Text insertion.
        out.push_str("  const typeText = async (txt) => {\n");
        out.push_str("    if (!txt) return;\n");
        out.push_str("    if (document.execCommand('insertText', false, txt)) return;\n");
        out.push_str("    if (target.tagName === 'INPUT' || target.tagName === 'TEXTAREA') {\n");
        out.push_str("      const start = target.selectionStart;\n");
        out.push_str("      const end = target.selectionEnd;\n");
        out.push_str(
            "      target.value = target.value.slice(0, start) + txt + target.value.slice(end);\n",
        );
        out.push_str("      target.selectionStart = target.selectionEnd = start + txt.length;\n");
        out.push_str("      target.dispatchEvent(new Event('input', { bubbles: true }));\n");
        out.push_str("    }\n");
        out.push_str("  };\n");
        // Combo press.
        let _ = writeln!(
            out,
            "  const press = async (keyChar, ctrl, shift, alt, delay = {}) => {{",
            opts.default_delay_ms
        );
        out.push_str("    const upperKey = keyChar.toUpperCase();\n");
        out.push_str("    const named = keyChar in KEY_CODES;\n");
        out.push_str(
            "    const code = named ? keyChar : /^[0-9]$/.test(keyChar) ? 'Digit' + keyChar : 'Key' + upperKey;\n",
        );
        out.push_str("    const keyCode = named ? KEY_CODES[keyChar] : upperKey.charCodeAt(0);\n");
        out.push_str(
            "    if (ctrl) dispatchKey('keydown', 'Control', 'ControlLeft', 17, true, false, false);\n",
        );
        out.push_str(
            "    if (shift) dispatchKey('keydown', 'Shift', 'ShiftLeft', 16, ctrl, true, false);\n",
        );
        out.push_str(
            "    if (alt) dispatchKey('keydown', 'Alt', 'AltLeft', 18, ctrl, shift, true);\n",
        );
        out.push_str("    dispatchKey('keydown', keyChar, code, keyCode, ctrl, shift, alt);\n");
        let _ = writeln!(out, "    await wait({});", opts.key_hold_ms);
        out.push_str("    dispatchKey('keyup', keyChar, code, keyCode, ctrl, shift, alt);\n");
        out.push_str(
            "    if (alt) dispatchKey('keyup', 'Alt', 'AltLeft', 18, ctrl, shift, false);\n",
        );
        out.push_str(
            "    if (shift) dispatchKey('keyup', 'Shift', 'ShiftLeft', 16, ctrl, false, false);\n",
        );
        out.push_str(
            "    if (ctrl) dispatchKey('keyup', 'Control', 'ControlLeft', 17, false, false, false);\n",
        );
        out.push_str("    await wait(delay);\n");
        out.push_str("  };\n");
    }

    fn write_action(
        &self,
        out: &mut String,
        action: &Action,
        registry: &Registry,
    ) -> Result<(), GenerateError> {
        match action {
            Action::Text(text) => {
                out.push_str("  await typeText('");
                escape_js_single_quoted(out, text);
                out.push_str("');\n");
            }
            Action::Command(id) => {
                let mapping = lookup(registry, id)?;
                let delay = mapping.delay_or(self.options.default_delay_ms);
                match &mapping.action {
                    MappingAction::Shortcut {
                        key,
                        ctrl,
                        shift,
                        alt,
                    } => {
                        out.push_str("  await press('");
                        escape_js_single_quoted(out, key.encode_utf8(&mut [0u8; 4]));
                        let _ = writeln!(out, "', {ctrl}, {shift}, {alt}, {delay});");
                    }
                    MappingAction::Sequence { text } => {
                        out.push_str("  await typeText('");
                        escape_js_single_quoted(out, text);
                        let _ = writeln!(out, "'); await wait({delay});");
                    }
                }
            }
            Action::Nav(key) => {
                let _ = writeln!(
                    out,
                    "  await press('{}', false, false, false, {});",
                    key.as_str(),
                    self.options.nav_delay_ms
                );
            }
        }
        Ok(())
    }
}

impl ScriptGenerator for BrowserScript<'_> {
    fn generate(&self, actions: &[Action], registry: &Registry) -> Result<String, GenerateError> {
        let mut out = String::new();
        self.write_preamble(&mut out);
        for action in actions {
            self.write_action(&mut out, action, registry)?;
        }
        out.push_str("  console.log(\"%cDone.\", \"color: green; font-size: 16px;\");\n");
        out.push_str("})();\n");
        debug!(
            actions = actions.len(),
            output_len = out.len(),
            "generated browser script"
        );
        Ok(out)
    }
}
