//! Command names that stand for a single literal character.
//!
//! These are typed into the destination editor as plain text, so there is no
//! distinction between operators, relations and letters here: all that matters is
//! the Unicode replacement.

static SYMBOLS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    // Lower-case Greek
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ε",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "iota" => "ι",
    "kappa" => "κ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "omicron" => "ο",
    "pi" => "π",
    "rho" => "ρ",
    "sigma" => "σ",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "ϕ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",
    // Upper-case Greek
    "Alpha" => "Α",
    "Beta" => "Β",
    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Epsilon" => "Ε",
    "Zeta" => "Ζ",
    "Eta" => "Η",
    "Theta" => "Θ",
    "Iota" => "Ι",
    "Kappa" => "Κ",
    "Lambda" => "Λ",
    "Mu" => "Μ",
    "Nu" => "Ν",
    "Xi" => "Ξ",
    "Omicron" => "Ο",
    "Pi" => "Π",
    "Rho" => "Ρ",
    "Sigma" => "Σ",
    "Tau" => "Τ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Chi" => "Χ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
    // Relations
    "le" => "≤",
    "leq" => "≤",
    "ge" => "≥",
    "geq" => "≥",
    "ne" => "≠",
    "neq" => "≠",
    "approx" => "≈",
    "equiv" => "≡",
    "sim" => "∼",
    "simeq" => "≃",
    "cong" => "≅",
    "subset" => "⊂",
    "subseteq" => "⊆",
    "supset" => "⊃",
    "supseteq" => "⊇",
    "in" => "∈",
    "notin" => "∉",
    // Binary operators
    "times" => "×",
    "cdot" => "·",
    "div" => "÷",
    "pm" => "±",
    "mp" => "∓",
    "cup" => "∪",
    "cap" => "∩",
    "vee" => "∨",
    "wedge" => "∧",
    "oplus" => "⊕",
    "otimes" => "⊗",
    // Arrows
    "leftarrow" => "←",
    "rightarrow" => "→",
    "uparrow" => "↑",
    "downarrow" => "↓",
    "Leftarrow" => "⇐",
    "Rightarrow" => "⇒",
    "leftrightarrow" => "↔",
    "Leftrightarrow" => "⇔",
    "to" => "→",
    "gets" => "←",
    // Miscellaneous
    "infty" => "∞",
    "partial" => "∂",
    "nabla" => "∇",
    "forall" => "∀",
    "exists" => "∃",
    "empty" => "∅",
    "emptyset" => "∅",
    "angle" => "∠",
    "therefore" => "∴",
    "because" => "∵",
};

/// Returns the literal replacement text for a symbol command, e.g. `"π"` for `pi`.
#[inline]
pub fn get_symbol(name: &str) -> Option<&'static str> {
    SYMBOLS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols() {
        let problems = [
            ("pi", "π"),
            ("Delta", "Δ"),
            ("leq", "≤"),
            ("le", "≤"),
            ("pm", "±"),
            ("Rightarrow", "⇒"),
            ("infty", "∞"),
            ("in", "∈"),
            ("Eta", "Η"),
        ];
        for (name, expected) in problems {
            assert_eq!(get_symbol(name), Some(expected), "symbol `{name}`");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(get_symbol("PI"), None);
        assert_eq!(get_symbol("Infty"), None);
    }

    #[test]
    fn structural_commands_are_not_symbols() {
        for name in ["frac", "sqrt", "text", "sin", "left", ""] {
            assert_eq!(get_symbol(name), None, "`{name}` must not be a symbol");
        }
    }

    #[test]
    fn every_symbol_is_nonempty() {
        for (name, text) in SYMBOLS.entries() {
            assert!(!text.is_empty(), "`{name}` maps to empty text");
        }
    }
}
