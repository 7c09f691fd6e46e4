use tracing::{debug, trace};

use crate::action::{Action, ActionBuilder};
use crate::commands::{CommandClass, classify};
use crate::registry::Registry;

/// Parse markup into the sequence of actions that reproduces it in the destination editor.
///
/// Parsing never fails. Constructs that cannot be understood are typed out as literal
/// text, and an argument group that is never closed extends to the end of the input.
///
/// ```rust
/// use keymacro::{Action, NavKey, Registry, default_mappings, parse};
///
/// let registry = Registry::new(default_mappings()).unwrap();
/// let actions = parse(r"\frac{a}{b}", &registry);
/// assert_eq!(
///     actions,
///     [
///         Action::Command("fraction".to_string()),
///         Action::Text("a".to_string()),
///         Action::Nav(NavKey::ArrowRight),
///         Action::Text("b".to_string()),
///         Action::Nav(NavKey::ArrowRight),
///     ]
/// );
/// ```
pub fn parse(input: &str, registry: &Registry) -> Vec<Action> {
    let mut parser = Parser {
        input,
        registry,
        pos: 0,
        end: input.len(),
        builder: ActionBuilder::default(),
    };
    parser.parse_range();
    let actions = parser.builder.finish();
    debug!(input_len = input.len(), actions = actions.len(), "parsed markup");
    actions
}

/// A left-to-right scanner over `input[pos..end]`.
///
/// Argument groups are parsed by narrowing `end` to the group's closing brace and
/// scanning the same buffer again, so nested groups never copy the input.
struct Parser<'source, 'registry> {
    input: &'source str,
    registry: &'registry Registry,
    pos: usize,
    end: usize,
    builder: ActionBuilder,
}

impl Parser<'_, '_> {
    #[inline]
    fn peek(&self) -> Option<char> {
        self.input.get(self.pos..self.end)?.chars().next()
    }

    fn parse_range(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                '\\' => self.parse_command(),
                '^' | '_' => self.parse_script(ch),
                '$' => self.pos += 1,
                _ => {
                    self.builder.push_char(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// Parse a command starting at the backslash under the cursor.
    fn parse_command(&mut self) {
        let input = self.input;
        let registry = self.registry;
        let name_start = self.pos + 1;
        let rest = &input.as_bytes()[name_start..self.end];

        if rest.first() == Some(&b',') {
            self.builder.push_char(' ');
            self.pos += 2;
            return;
        }

        let name_len = rest.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        let name_end = name_start + name_len;
        let name = &input[name_start..name_end];
        let class = classify(name);

        if let Some(mapping) = registry.by_trigger(name) {
            self.pos = name_end;
            self.builder.command(&mapping.id);
            match class {
                CommandClass::BinaryArgument => {
                    self.parse_group();
                    self.builder.nav(mapping.advance_key());
                    self.parse_group();
                    self.builder.nav(mapping.exit_key());
                }
                CommandClass::UnaryArgument => {
                    self.parse_group();
                    self.builder.nav(mapping.exit_key());
                }
                CommandClass::Wrapper
                | CommandClass::Passthrough
                | CommandClass::LayoutOnly
                | CommandClass::Symbol(_)
                | CommandClass::Unknown => {}
            }
            return;
        }

        match class {
            CommandClass::Wrapper => {
                self.pos = name_end;
                self.parse_group();
            }
            CommandClass::Passthrough => {
                self.pos = name_end;
                self.builder.push_str(name);
            }
            CommandClass::LayoutOnly => {
                self.pos = name_end;
            }
            CommandClass::Symbol(symbol) => {
                self.pos = name_end;
                self.builder.push_str(symbol);
                // The space only terminates the command name.
                if input.as_bytes()[..self.end].get(self.pos) == Some(&b' ') {
                    self.pos += 1;
                }
            }
            CommandClass::BinaryArgument | CommandClass::UnaryArgument | CommandClass::Unknown => {
                // Only the backslash is consumed; the letters that follow are scanned
                // again as ordinary characters.
                trace!(name, "unknown command typed out literally");
                self.builder.push_char('\\');
                self.pos += 1;
            }
        }
    }

    /// Parse a subscript or superscript marker under the cursor.
    fn parse_script(&mut self, marker: char) {
        let registry = self.registry;
        self.pos += marker.len_utf8();
        let mut buf = [0u8; 4];
        let Some(mapping) = registry.by_trigger(marker.encode_utf8(&mut buf)) else {
            self.builder.push_char(marker);
            return;
        };
        self.builder.command(&mapping.id);
        match self.peek() {
            Some('{') => self.parse_group(),
            Some(ch) => {
                self.builder.push_char(ch);
                self.pos += ch.len_utf8();
            }
            None => {}
        }
        self.builder.nav(mapping.exit_key());
    }

    /// Parse an optional `{...}` argument, skipping leading whitespace.
    ///
    /// If no opening brace follows, nothing is consumed apart from the whitespace.
    fn parse_group(&mut self) {
        let rest = &self.input[self.pos..self.end];
        let trimmed = rest.trim_start();
        self.pos = self.end - trimmed.len();
        if !trimmed.starts_with('{') {
            trace!(pos = self.pos, "argument group absent");
            return;
        }
        let start = self.pos + 1;
        let close = self.find_group_end(start);

        let outer_end = std::mem::replace(&mut self.end, close);
        self.pos = start;
        self.parse_range();
        self.end = outer_end;
        self.pos = (close + 1).min(outer_end);
    }

    /// Find the brace that closes a group whose content starts at `start`.
    ///
    /// Returns `self.end` if the group is never closed.
    fn find_group_end(&self, start: usize) -> usize {
        let bytes = &self.input.as_bytes()[..self.end];
        let mut depth = 1usize;
        let mut pos = start;
        while let Some(offset) = memchr::memchr2(b'{', b'}', &bytes[pos..]) {
            pos += offset;
            if bytes[pos] == b'{' {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    return pos;
                }
            }
            pos += 1;
        }
        trace!(start, "unclosed group absorbs the rest of the input");
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{KeyMapping, MappingAction, NavKey, default_mappings};

    fn text(s: &str) -> Action {
        Action::Text(s.to_string())
    }

    fn cmd(id: &str) -> Action {
        Action::Command(id.to_string())
    }

    const RIGHT: Action = Action::Nav(NavKey::ArrowRight);

    fn shortcut(id: &str, trigger: &str, key: char) -> KeyMapping {
        KeyMapping {
            id: id.to_string(),
            name: String::new(),
            trigger: trigger.to_string(),
            action: MappingAction::Shortcut {
                key,
                ctrl: true,
                shift: false,
                alt: false,
            },
            delay: None,
            advance_key: None,
            exit_key: None,
        }
    }

    fn assert_coalesced(actions: &[Action]) {
        for pair in actions.windows(2) {
            assert!(
                !matches!(pair, [Action::Text(_), Action::Text(_)]),
                "adjacent text actions in {actions:?}"
            );
        }
    }

    #[test]
    fn parse_with_default_mappings() {
        let registry = Registry::new(default_mappings()).unwrap();
        let problems = [
            ("plain_text", "x + y = 1", vec![text("x + y = 1")]),
            (
                "fraction",
                r"\frac{a}{b}",
                vec![cmd("fraction"), text("a"), RIGHT, text("b"), RIGHT],
            ),
            (
                "fraction_with_spaces",
                r"\frac {a} {b}c",
                vec![cmd("fraction"), text("a"), RIGHT, text("b"), RIGHT, text("c")],
            ),
            (
                "nested_sqrt_in_fraction",
                r"\frac{\sqrt{x}}{2}",
                vec![
                    cmd("fraction"),
                    cmd("sqrt"),
                    text("x"),
                    RIGHT,
                    RIGHT,
                    text("2"),
                    RIGHT,
                ],
            ),
            (
                "superscript_single_char",
                "x^2",
                vec![text("x"), cmd("superscript"), text("2"), RIGHT],
            ),
            (
                "superscript_takes_one_char_only",
                "x^23",
                vec![text("x"), cmd("superscript"), text("2"), RIGHT, text("3")],
            ),
            (
                "superscript_group",
                r"e^{i\pi}",
                vec![text("e"), cmd("superscript"), text("iπ"), RIGHT],
            ),
            (
                "subscript_and_superscript",
                "a_1^2",
                vec![
                    text("a"),
                    cmd("subscript"),
                    text("1"),
                    RIGHT,
                    cmd("superscript"),
                    text("2"),
                    RIGHT,
                ],
            ),
            (
                "marker_at_end",
                "x^",
                vec![text("x"), cmd("superscript"), RIGHT],
            ),
            (
                "marker_before_command",
                r"x^\pi",
                vec![text("x"), cmd("superscript"), text("\\"), RIGHT, text("pi")],
            ),
            (
                "unicode_base",
                "α^β",
                vec![text("α"), cmd("superscript"), text("β"), RIGHT],
            ),
            (
                "missing_argument_groups",
                r"\frac12",
                vec![cmd("fraction"), RIGHT, RIGHT, text("12")],
            ),
            (
                "sqrt_without_group",
                r"\sqrt x",
                vec![cmd("sqrt"), RIGHT, text("x")],
            ),
            (
                "unclosed_group",
                r"\sqrt{a",
                vec![cmd("sqrt"), text("a"), RIGHT],
            ),
            (
                "unclosed_group_inside_group",
                r"\frac{a}{\sqrt{b}",
                vec![
                    cmd("fraction"),
                    text("a"),
                    RIGHT,
                    cmd("sqrt"),
                    text("b"),
                    RIGHT,
                    RIGHT,
                ],
            ),
            (
                "inner_braces_are_text",
                r"\sqrt{{a}}",
                vec![cmd("sqrt"), text("{a}"), RIGHT],
            ),
            (
                "quadratic_formula",
                r"$$ x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a} $$",
                vec![
                    text(" x = "),
                    cmd("fraction"),
                    text("-b ±"),
                    cmd("sqrt"),
                    text("b"),
                    cmd("superscript"),
                    text("2"),
                    RIGHT,
                    text(" - 4ac"),
                    RIGHT,
                    RIGHT,
                    text("2a"),
                    RIGHT,
                    text(" "),
                ],
            ),
        ];
        for (name, input, expected) in problems {
            let actions = parse(input, &registry);
            assert_eq!(actions, expected, "{name}: {input}");
            assert_coalesced(&actions);
        }
    }

    #[test]
    fn parse_without_mappings() {
        let registry = Registry::default();
        let problems = [
            ("symbol", r"\pi", "π"),
            ("symbol_eats_one_space", r"\alpha x", "αx"),
            ("symbol_keeps_second_space", r"\alpha  x", "α x"),
            ("symbol_before_letter", r"\infty\in", "∞∈"),
            ("unknown_command", r"\zzz", r"\zzz"),
            ("unknown_command_keeps_space", r"\zzz y", r"\zzz y"),
            ("unmapped_fraction", r"\frac{a}{b}", r"\frac{a}{b}"),
            ("unmapped_markers", "x^2_i", "x^2_i"),
            ("thin_space", r"a\,b", "a b"),
            ("passthrough", r"\sin x + \log y", "sin x + log y"),
            ("wrapper", r"a\text{ and }b", "a and b"),
            ("wrapper_with_space", r"\mathrm {d}x", "dx"),
            ("wrapper_without_group", r"\text x", "x"),
            ("layout_only", r"\left( x \right)", "( x )"),
            ("dollars", "$a$ and $$b$$", "a and b"),
            ("trailing_backslash", "a\\", "a\\"),
            ("backslash_digit", r"\1", r"\1"),
            ("double_backslash", r"\\", r"\\"),
        ];
        for (name, input, expected) in problems {
            let actions = parse(input, &registry);
            assert_eq!(actions, [text(expected)], "{name}: {input}");
        }
    }

    #[test]
    fn empty_input() {
        assert!(parse("", &Registry::default()).is_empty());
        assert!(parse("$$", &Registry::default()).is_empty());
        assert!(parse(r"\left\right", &Registry::default()).is_empty());
    }

    #[test]
    fn text_without_markup_is_one_action() {
        let registry = Registry::new(default_mappings()).unwrap();
        for input in ["a", "x + y", "línea 1\nlínea 2", "  {braces} (parens) ", "日本語"] {
            assert_eq!(parse(input, &registry), [text(input)], "{input}");
        }
    }

    #[test]
    fn wrapper_payload_merges_with_surrounding_text() {
        let registry = Registry::new(default_mappings()).unwrap();
        assert_eq!(parse(r"x\text{y}z", &registry), [text("xyz")]);
        assert_eq!(
            parse(r"\sqrt{\text{ab}}c", &registry),
            [cmd("sqrt"), text("ab"), RIGHT, text("c")]
        );
    }

    #[test]
    fn plain_shortcut_command() {
        let registry = Registry::new(vec![shortcut("foo-id", "foo", 'k')]).unwrap();
        assert_eq!(parse(r"\foo", &registry), [cmd("foo-id")]);
    }

    #[test]
    fn mapped_symbol_does_not_eat_space() {
        let registry = Registry::new(vec![shortcut("alpha", "alpha", 'a')]).unwrap();
        assert_eq!(parse(r"\alpha x", &registry), [cmd("alpha"), text(" x")]);
    }

    #[test]
    fn mapped_wrapper_takes_no_argument() {
        let registry = Registry::new(vec![shortcut("text", "text", 't')]).unwrap();
        assert_eq!(parse(r"\text{a}", &registry), [cmd("text"), text("{a}")]);
    }

    #[test]
    fn custom_navigation_keys() {
        let mut frac = shortcut("frac", "frac", 'f');
        frac.advance_key = Some(NavKey::Tab);
        frac.exit_key = Some(NavKey::Enter);
        let mut sup = shortcut("sup", "^", 'h');
        sup.exit_key = Some(NavKey::ArrowDown);
        let registry = Registry::new(vec![frac, sup]).unwrap();
        assert_eq!(
            parse(r"\frac{a^2}{b}", &registry),
            [
                cmd("frac"),
                text("a"),
                cmd("sup"),
                text("2"),
                Action::Nav(NavKey::ArrowDown),
                Action::Nav(NavKey::Tab),
                text("b"),
                Action::Nav(NavKey::Enter),
            ]
        );
    }

    #[test]
    fn deeply_nested_groups() {
        let registry = Registry::new(default_mappings()).unwrap();
        let input = r"\sqrt{".repeat(50) + "x" + &"}".repeat(50);
        let actions = parse(&input, &registry);
        assert_eq!(actions.len(), 101);
        assert_eq!(actions[50], text("x"));
        assert!(actions[..50].iter().all(|a| *a == cmd("sqrt")));
        assert!(actions[51..].iter().all(|a| *a == RIGHT));
    }

    #[test]
    fn parsing_is_deterministic() {
        let registry = Registry::new(default_mappings()).unwrap();
        let input = r"\Delta = b^2 - 4ac, \quad a_{n+1} = \frac{a_n}{2}";
        assert_eq!(parse(input, &registry), parse(input, &registry));
    }
}
