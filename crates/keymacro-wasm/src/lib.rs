extern crate alloc;

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// SAFETY: This application is single threaded, so using AssumeSingleThreaded is allowed.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

use js_sys::Array;
use keymacro::{
    Converter, KeyMacroConfig, KeyMapping, MappingAction, NavKey, ScriptOptions, ScriptTarget,
    default_mappings,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ConfigError {
    message: String,
    index: Option<u32>,
}

#[wasm_bindgen]
impl ConfigError {
    #[wasm_bindgen(getter, unchecked_return_type = "string")]
    pub fn message(&self) -> JsValue {
        JsValue::from_str(&self.message)
    }

    /// Position of the offending mapping, if the error concerns a single mapping.
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> Option<u32> {
        self.index
    }
}

impl ConfigError {
    fn at(index: usize, message: impl Into<String>) -> Self {
        ConfigError {
            message: message.into(),
            index: Some(index as u32),
        }
    }
}

#[wasm_bindgen(typescript_custom_section)]
const KEY_MACRO_OPTIONS: &'static str = r#"
type NavKey = "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" | "Tab" | "Enter";

interface KeyMappingOptions {
    id: string;
    name?: string;
    trigger: string;
    kind: "shortcut" | "sequence";
    key?: string;
    ctrl?: boolean;
    shift?: boolean;
    alt?: boolean;
    text?: string;
    delay?: number;
    advanceKey?: NavKey;
    exitKey?: NavKey;
}

interface KeyMacroOptions {
    defaultDelayMs?: number;
    focusWaitMs?: number;
    keyHoldMs?: number;
    navDelayMs?: number;
    hotkey?: string;
    keyDelayMs?: number;
    navPauseMs?: number;
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "KeyMappingOptions")]
    pub type KeyMappingOptions;

    #[wasm_bindgen(method, getter)]
    fn id(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn name(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn trigger(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn kind(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn key(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn ctrl(this: &KeyMappingOptions) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn shift(this: &KeyMappingOptions) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn alt(this: &KeyMappingOptions) -> Option<bool>;

    #[wasm_bindgen(method, getter)]
    fn text(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn delay(this: &KeyMappingOptions) -> Option<u32>;

    #[wasm_bindgen(method, getter = advanceKey)]
    fn advance_key(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(method, getter = exitKey)]
    fn exit_key(this: &KeyMappingOptions) -> Option<String>;

    #[wasm_bindgen(typescript_type = "KeyMacroOptions")]
    pub type KeyMacroOptions;

    #[wasm_bindgen(method, getter = defaultDelayMs)]
    fn default_delay_ms(this: &KeyMacroOptions) -> Option<u32>;

    #[wasm_bindgen(method, getter = focusWaitMs)]
    fn focus_wait_ms(this: &KeyMacroOptions) -> Option<u32>;

    #[wasm_bindgen(method, getter = keyHoldMs)]
    fn key_hold_ms(this: &KeyMacroOptions) -> Option<u32>;

    #[wasm_bindgen(method, getter = navDelayMs)]
    fn nav_delay_ms(this: &KeyMacroOptions) -> Option<u32>;

    #[wasm_bindgen(method, getter)]
    fn hotkey(this: &KeyMacroOptions) -> Option<String>;

    #[wasm_bindgen(method, getter = keyDelayMs)]
    fn key_delay_ms(this: &KeyMacroOptions) -> Option<u32>;

    #[wasm_bindgen(method, getter = navPauseMs)]
    fn nav_pause_ms(this: &KeyMacroOptions) -> Option<u32>;
}

fn nav_key(
    index: usize,
    field: &str,
    value: Option<String>,
) -> Result<Option<NavKey>, ConfigError> {
    match value {
        Some(name) => match name.parse::<NavKey>() {
            Ok(key) => Ok(Some(key)),
            Err(_) => Err(ConfigError::at(
                index,
                format!("Invalid value for {field}: \"{name}\""),
            )),
        },
        None => Ok(None),
    }
}

// This is the poor man's `serde_wasm_bindgen::from_value`.
fn key_mapping(index: usize, js_mapping: &KeyMappingOptions) -> Result<KeyMapping, ConfigError> {
    let action = match js_mapping.kind().as_deref() {
        Some("shortcut") => {
            let Some(key) = js_mapping.key() else {
                return Err(ConfigError::at(index, "A shortcut needs a key"));
            };
            let mut chars = key.chars();
            let (Some(key), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::at(index, "The key must be a single character"));
            };
            MappingAction::Shortcut {
                key,
                ctrl: js_mapping.ctrl().unwrap_or_default(),
                shift: js_mapping.shift().unwrap_or_default(),
                alt: js_mapping.alt().unwrap_or_default(),
            }
        }
        Some("sequence") => MappingAction::Sequence {
            text: js_mapping.text().unwrap_or_default(),
        },
        _ => {
            return Err(ConfigError::at(
                index,
                "Invalid value for kind, expected \"shortcut\" or \"sequence\"",
            ));
        }
    };
    Ok(KeyMapping {
        id: js_mapping.id().unwrap_or_default(),
        name: js_mapping.name().unwrap_or_default(),
        trigger: js_mapping.trigger().unwrap_or_default(),
        action,
        delay: js_mapping.delay(),
        advance_key: nav_key(index, "advanceKey", js_mapping.advance_key())?,
        exit_key: nav_key(index, "exitKey", js_mapping.exit_key())?,
    })
}

fn script_options(js_options: &KeyMacroOptions) -> ScriptOptions {
    let defaults = ScriptOptions::default();
    ScriptOptions {
        default_delay_ms: js_options.default_delay_ms().unwrap_or(defaults.default_delay_ms),
        focus_wait_ms: js_options.focus_wait_ms().unwrap_or(defaults.focus_wait_ms),
        key_hold_ms: js_options.key_hold_ms().unwrap_or(defaults.key_hold_ms),
        nav_delay_ms: js_options.nav_delay_ms().unwrap_or(defaults.nav_delay_ms),
        hotkey: js_options.hotkey().unwrap_or(defaults.hotkey),
        key_delay_ms: js_options.key_delay_ms().unwrap_or(defaults.key_delay_ms),
        nav_pause_ms: js_options.nav_pause_ms().unwrap_or(defaults.nav_pause_ms),
    }
}

#[wasm_bindgen]
pub struct KeyMacro {
    inner: Converter,
}

#[wasm_bindgen]
impl KeyMacro {
    /// Without `mappings`, the built-in default mappings are used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        mappings: Option<Array>,
        options: Option<KeyMacroOptions>,
    ) -> Result<KeyMacro, ConfigError> {
        let mappings = match mappings {
            Some(array) => array
                .iter()
                .enumerate()
                .map(|(index, value)| key_mapping(index, value.unchecked_ref()))
                .collect::<Result<Vec<_>, _>>()?,
            None => default_mappings(),
        };
        let script = match options {
            Some(ref js_options) => script_options(js_options),
            None => ScriptOptions::default(),
        };
        let inner = Converter::new(KeyMacroConfig { mappings, script })
            .map_err(|e| ConfigError::at(e.index(), e.error_message()))?;
        Ok(KeyMacro { inner })
    }

    #[wasm_bindgen(js_name = browserScript, unchecked_return_type = "string")]
    pub fn browser_script(&self, markup: &str) -> Result<JsValue, JsError> {
        self.script(markup, ScriptTarget::Browser)
    }

    #[wasm_bindgen(js_name = hotkeyScript, unchecked_return_type = "string")]
    pub fn hotkey_script(&self, markup: &str) -> Result<JsValue, JsError> {
        self.script(markup, ScriptTarget::Hotkey)
    }

    /// Number of actions the markup compiles to.
    #[wasm_bindgen(js_name = actionCount)]
    pub fn action_count(&self, markup: &str) -> u32 {
        self.inner.parse(markup).len() as u32
    }
}

impl KeyMacro {
    fn script(&self, markup: &str, target: ScriptTarget) -> Result<JsValue, JsError> {
        match self.inner.convert(markup, target) {
            Ok(script) => Ok(JsValue::from_str(&script)),
            Err(e) => Err(JsError::new(&e.string())),
        }
    }
}
