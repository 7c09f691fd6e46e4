/// Escapes `input` for inclusion in a single-quoted JavaScript string literal.
/// Specifically, it replaces:
/// - `\` with `\\`
/// - `'` with `\'`
/// - line feed with `\n`
/// - carriage return with `\r`
///
/// This function uses `memchr` to skip over runs without special characters; carriage
/// returns are rare enough to be handled inside those runs.
pub fn escape_js_single_quoted(output: &mut String, input: &str) {
    let mut rest = input;
    while let Some(index) = memchr::memchr3(b'\\', b'\'', b'\n', rest.as_bytes()) {
        push_escaping_cr(output, &rest[..index]);
        match rest.as_bytes()[index] {
            b'\\' => output.push_str(r"\\"),
            b'\'' => output.push_str(r"\'"),
            _ => output.push_str(r"\n"),
        }
        rest = &rest[index + 1..];
    }
    push_escaping_cr(output, rest);
}

fn push_escaping_cr(output: &mut String, input: &str) {
    let mut parts = input.split('\r');
    if let Some(first) = parts.next() {
        output.push_str(first);
    }
    for part in parts {
        output.push_str(r"\r");
        output.push_str(part);
    }
}

/// Escapes `input` so that the hotkey macro language's `Send` command types it literally.
///
/// The characters `{`, `}`, `^`, `!`, `+` and `#` are wrapped in braces (`{^}`), which is
/// how `Send` is told to type a key instead of interpreting it as a modifier. The
/// language's own escape character handles what would otherwise break the statement:
/// `` ` ``, `%`, `;`, tab and line feed. Carriage returns are dropped, as the line feed
/// already produces the line break. Leading and trailing spaces are written as
/// `{Space}` because the command trims its argument.
///
/// The output is meant for a plain `Send`, not `SendRaw` or `{Raw}` mode, where the
/// braces would be typed literally.
pub fn escape_hotkey_literal(output: &mut String, input: &str) {
    let body = input.trim_matches(' ');
    let leading = if body.is_empty() {
        input.len()
    } else {
        input.len() - input.trim_start_matches(' ').len()
    };
    let trailing = input.len() - body.len() - leading;

    for _ in 0..leading {
        output.push_str("{Space}");
    }
    for ch in body.chars() {
        match ch {
            '{' | '}' | '^' | '!' | '+' | '#' => {
                output.push('{');
                output.push(ch);
                output.push('}');
            }
            '`' => output.push_str("``"),
            '%' => output.push_str("`%"),
            ';' => output.push_str("`;"),
            '\t' => output.push_str("`t"),
            '\n' => output.push_str("`n"),
            '\r' => {}
            _ => output.push(ch),
        }
    }
    for _ in 0..trailing {
        output.push_str("{Space}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js(input: &str) -> String {
        let mut output = String::new();
        escape_js_single_quoted(&mut output, input);
        output
    }

    fn hotkey(input: &str) -> String {
        let mut output = String::new();
        escape_hotkey_literal(&mut output, input);
        output
    }

    #[test]
    fn js_escapes() {
        let problems = [
            ("empty", "", ""),
            ("plain", "x + y", "x + y"),
            ("backslash", r"a\b", r"a\\b"),
            ("quote", "it's", r"it\'s"),
            ("newline", "a\nb", r"a\nb"),
            ("crlf", "a\r\nb", r"a\r\nb"),
            ("lone_cr", "a\rb", r"a\rb"),
            ("consecutive", r"\'\", r"\\\'\\"),
            ("unicode", "α ≤ β's", r"α ≤ β\'s"),
            ("double_quote_untouched", r#"say "hi""#, r#"say "hi""#),
        ];
        for (name, input, expected) in problems {
            assert_eq!(js(input), expected, "{name}");
        }
    }

    #[test]
    fn js_appends_to_existing_output() {
        let mut output = "typeText('".to_string();
        escape_js_single_quoted(&mut output, "'");
        assert_eq!(output, r"typeText('\'");
    }

    #[test]
    fn hotkey_escapes() {
        let problems = [
            ("empty", "", ""),
            ("plain", "x = 1", "x = 1"),
            ("braces", "{a}", "{{}a{}}"),
            ("modifiers", "a^b+c!d#e", "a{^}b{+}c{!}d{#}e"),
            ("escape_char", "a`b", "a``b"),
            ("percent", "50%", "50`%"),
            ("semicolon", "a; b", "a`; b"),
            ("newline", "a\r\nb", "a`nb"),
            ("tab", "a\tb", "a`tb"),
            ("leading_space", " x", "{Space}x"),
            ("trailing_spaces", "x  ", "x{Space}{Space}"),
            ("only_spaces", "  ", "{Space}{Space}"),
            ("inner_spaces_kept", " a b ", "{Space}a b{Space}"),
            ("unicode", "α ≤ β", "α ≤ β"),
        ];
        for (name, input, expected) in problems {
            assert_eq!(hotkey(input), expected, "{name}");
        }
    }
}
