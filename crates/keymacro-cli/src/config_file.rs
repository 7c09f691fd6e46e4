use std::{fs, io, ops::Range, path::Path};

use keymacro::KeyMacroConfig;

/// Error type for configuration loading operations.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error when reading the file.
    Io(io::Error),
    /// TOML parsing error, together with the text that failed to parse.
    Parse { error: toml::de::Error, source: String },
}

impl ConfigError {
    /// Print the error to stderr, pointing into the configuration file if possible.
    pub fn eprint_report(&self, source_name: &str) {
        let (error, source) = match self {
            ConfigError::Parse { error, source } => (error, source),
            ConfigError::Io(_) => {
                eprintln!("Configuration error in '{}': {}", source_name, self);
                return;
            }
        };
        let Some(span) = error.span() else {
            eprintln!("Configuration error in '{}': {}", source_name, self);
            return;
        };
        if report(source_name, source, span, error.message()).is_err() {
            eprintln!("Configuration error in '{}': {}", source_name, self);
        }
    }
}

fn report(source_name: &str, source: &str, span: Range<usize>, message: &str) -> io::Result<()> {
    use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

    Report::build(ReportKind::Error, (source_name, span.start..span.start))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message("invalid configuration")
        .with_label(Label::new((source_name, span)).with_message(message))
        .finish()
        .eprint((source_name, Source::from(source)))
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {}", err),
            ConfigError::Parse { error, .. } => write!(f, "TOML parsing error: {}", error),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse { error, .. } => Some(error),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

/// Loads and deserializes the key mappings and script options from a TOML file.
///
/// Keys that are left out fall back to their defaults; in particular, a file without any
/// `[[mappings]]` table uses the built-in mapping set.
pub fn load_config_file(path: &Path) -> Result<KeyMacroConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(content)
}

#[inline]
fn parse_config(content: String) -> Result<KeyMacroConfig, ConfigError> {
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(error) => Err(ConfigError::Parse {
            error,
            source: content,
        }),
    }
}
