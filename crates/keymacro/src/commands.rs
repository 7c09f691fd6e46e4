use crate::symbols::get_symbol;

/// How the scanner consumes a backslash command, decided by its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandClass {
    /// Takes two brace groups, e.g. `\frac{a}{b}`.
    BinaryArgument,
    /// Takes one brace group, e.g. `\sqrt{a}`.
    UnaryArgument,
    /// Text-mode wrapper whose payload is inlined, e.g. `\text{...}`.
    Wrapper,
    /// Function names that are typed out as letters, e.g. `\sin`.
    Passthrough,
    /// Delimiter sizing commands that produce no output, e.g. `\left`.
    LayoutOnly,
    /// A command standing for one literal character, e.g. `\pi`.
    Symbol(&'static str),
    /// Anything else.
    Unknown,
}

static STRUCTURAL: phf::Map<&'static str, CommandClass> = phf::phf_map! {
    "frac" => CommandClass::BinaryArgument,
    "dfrac" => CommandClass::BinaryArgument,
    "tfrac" => CommandClass::BinaryArgument,
    "cfrac" => CommandClass::BinaryArgument,
    "sqrt" => CommandClass::UnaryArgument,
    "text" => CommandClass::Wrapper,
    "mathrm" => CommandClass::Wrapper,
    "mbox" => CommandClass::Wrapper,
    "sin" => CommandClass::Passthrough,
    "cos" => CommandClass::Passthrough,
    "tan" => CommandClass::Passthrough,
    "cot" => CommandClass::Passthrough,
    "sec" => CommandClass::Passthrough,
    "csc" => CommandClass::Passthrough,
    "arcsin" => CommandClass::Passthrough,
    "arccos" => CommandClass::Passthrough,
    "arctan" => CommandClass::Passthrough,
    "sinh" => CommandClass::Passthrough,
    "cosh" => CommandClass::Passthrough,
    "tanh" => CommandClass::Passthrough,
    "ln" => CommandClass::Passthrough,
    "log" => CommandClass::Passthrough,
    "lg" => CommandClass::Passthrough,
    "exp" => CommandClass::Passthrough,
    "lim" => CommandClass::Passthrough,
    "min" => CommandClass::Passthrough,
    "max" => CommandClass::Passthrough,
    "left" => CommandClass::LayoutOnly,
    "right" => CommandClass::LayoutOnly,
};

/// Classify a command name (without the leading backslash).
pub fn classify(name: &str) -> CommandClass {
    if let Some(class) = STRUCTURAL.get(name) {
        return *class;
    }
    match get_symbol(name) {
        Some(symbol) => CommandClass::Symbol(symbol),
        None => CommandClass::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let problems = [
            ("frac", CommandClass::BinaryArgument),
            ("dfrac", CommandClass::BinaryArgument),
            ("sqrt", CommandClass::UnaryArgument),
            ("text", CommandClass::Wrapper),
            ("mbox", CommandClass::Wrapper),
            ("sin", CommandClass::Passthrough),
            ("lim", CommandClass::Passthrough),
            ("max", CommandClass::Passthrough),
            ("left", CommandClass::LayoutOnly),
            ("right", CommandClass::LayoutOnly),
            ("alpha", CommandClass::Symbol("α")),
            ("to", CommandClass::Symbol("→")),
            ("zzz", CommandClass::Unknown),
            ("", CommandClass::Unknown),
        ];
        for (name, expected) in problems {
            assert_eq!(classify(name), expected, "class of `{name}`");
        }
    }

    #[test]
    fn structural_names_shadow_nothing() {
        // Structural names are looked up first.
        for name in STRUCTURAL.keys() {
            assert_eq!(get_symbol(name), None, "`{name}` is also a symbol");
        }
    }
}
