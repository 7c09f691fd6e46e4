use std::{
    fmt::Write,
    io::Read,
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};
use tracing::debug;

use keymacro::{Action, Converter, KeyMacroConfig, SAMPLE_MARKUP, ScriptTarget};

mod config_file;
mod logging;

use config_file::load_config_file;

/// Compiles math markup into keystroke replay scripts
#[derive(Parser, Debug)]
#[command(version, about = "Compiles math markup into keystroke replay scripts", long_about = None)]
struct Args {
    /// The markup file to convert ("-" for standard input)
    #[arg(conflicts_with_all = ["formula", "sample"], value_name = "FILE")]
    file: Option<PathBuf>,

    /// Specifies the markup directly
    #[arg(short, long, conflicts_with = "sample")]
    formula: Option<String>,

    /// Converts the built-in sample formula
    #[arg(long)]
    sample: bool,

    /// Loads key mappings and script options from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// What to write to standard output
    #[arg(short, long, value_enum, default_value_t = Target::Browser)]
    target: Target,

    /// Prints the default configuration as TOML and exits
    #[arg(long, exclusive = true)]
    print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    /// A script for the browser's developer console
    Browser,
    /// A desktop hotkey macro
    Hotkey,
    /// The parsed actions, one per line
    Actions,
}

fn main() {
    logging::init();
    let args = Args::parse();

    if args.print_config {
        match toml::to_string(&KeyMacroConfig::default()) {
            Ok(config) => print!("{}", config),
            Err(e) => exit_config_error(e, None),
        }
        return;
    }

    let config = match args.config {
        Some(ref path) => load_config_file(path).unwrap_or_else(|e| {
            e.eprint_report(&path.display().to_string());
            std::process::exit(2)
        }),
        None => KeyMacroConfig::default(),
    };
    let converter =
        Converter::new(config).unwrap_or_else(|e| exit_config_error(e, args.config.as_deref()));

    let markup = if let Some(ref fpath) = args.file {
        if fpath == &PathBuf::from("-") {
            read_stdin()
        } else {
            std::fs::read_to_string(fpath).unwrap_or_else(|e| exit_io_error(e))
        }
    } else if let Some(ref formula) = args.formula {
        formula.clone()
    } else if args.sample {
        SAMPLE_MARKUP.to_string()
    } else {
        read_stdin()
    };
    debug!(output = ?args.target, markup_len = markup.len(), "converting");

    let output = match args.target {
        Target::Browser => converter.convert(&markup, ScriptTarget::Browser),
        Target::Hotkey => converter.convert(&markup, ScriptTarget::Hotkey),
        Target::Actions => Ok(format_actions(&converter.parse(&markup))),
    };
    match output {
        Ok(output) => print!("{}", output),
        Err(e) => exit_generate_error(e),
    }
}

fn read_stdin() -> String {
    let mut buffer = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
        exit_io_error(e);
    }
    buffer
}

/// Render actions one per line, e.g. `text "x = "`, `command fraction`, `nav ArrowRight`.
fn format_actions(actions: &[Action]) -> String {
    let mut out = String::new();
    for action in actions {
        let _ = match action {
            Action::Text(text) => writeln!(out, "text {:?}", text),
            Action::Command(id) => writeln!(out, "command {}", id),
            Action::Nav(key) => writeln!(out, "nav {}", key.as_str()),
        };
    }
    out
}

fn exit_config_error<E: std::error::Error>(e: E, fp: Option<&Path>) -> ! {
    eprint!("Configuration error");
    if let Some(fp) = fp {
        eprint!(" in '{}'", fp.display());
    }
    eprintln!(": {}", e);
    std::process::exit(2);
}

fn exit_generate_error<E: std::error::Error>(e: E) -> ! {
    eprintln!("Generation error: {}", e);
    std::process::exit(2);
}

fn exit_io_error(e: std::io::Error) -> ! {
    eprintln!("IO Error: {}", e);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use keymacro::NavKey;

    use super::*;

    #[test]
    fn verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from(["keymacro", "-f", "x^2", "--target", "hotkey"]).unwrap();
        assert_eq!(args.formula.as_deref(), Some("x^2"));
        assert_eq!(args.target, Target::Hotkey);

        let args = Args::try_parse_from(["keymacro", "-"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("-")));
        assert_eq!(args.target, Target::Browser);

        assert!(Args::try_parse_from(["keymacro", "in.tex", "-f", "x"]).is_err());
        assert!(Args::try_parse_from(["keymacro", "--print-config", "--sample"]).is_err());
        assert!(Args::try_parse_from(["keymacro", "--target", "ahk"]).is_err());
    }

    #[test]
    fn actions_listing() {
        let actions = [
            Action::Text("say \"hi\"".to_string()),
            Action::Command("fraction".to_string()),
            Action::Nav(NavKey::Tab),
        ];
        assert_eq!(
            format_actions(&actions),
            "text \"say \\\"hi\\\"\"\ncommand fraction\nnav Tab\n"
        );
    }

    #[test]
    fn default_config_is_printable() {
        let printed = toml::to_string(&KeyMacroConfig::default()).unwrap();
        let parsed: KeyMacroConfig = toml::from_str(&printed).unwrap();
        assert_eq!(parsed, KeyMacroConfig::default());
    }
}
