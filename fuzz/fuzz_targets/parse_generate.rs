#![no_main]

use keymacro::{Action, Converter, KeyMacroConfig, ScriptTarget};
use libfuzzer_sys::fuzz_target;

fn count_lines(script: &str, prefixes: &[&str]) -> usize {
    script
        .lines()
        .filter(|line| prefixes.iter().any(|p| line.starts_with(p)))
        .count()
}

fuzz_target!(|data: &[u8]| {
    let Ok(markup) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(converter) = Converter::new(KeyMacroConfig::default()) else {
        return;
    };
    let actions = converter.parse(markup);

    // Adjacent text is always merged.
    for pair in actions.windows(2) {
        assert!(!matches!(pair, [Action::Text(_), Action::Text(_)]));
    }
    assert!(
        actions
            .iter()
            .all(|action| !matches!(action, Action::Text(text) if text.is_empty()))
    );

    let browser = converter
        .generate(&actions, ScriptTarget::Browser)
        .unwrap();
    let hotkey = converter.generate(&actions, ScriptTarget::Hotkey).unwrap();
    assert_eq!(
        count_lines(&browser, &["  await typeText(", "  await press("]),
        actions.len()
    );
    assert_eq!(count_lines(&hotkey, &["Send, "]), actions.len());
});
