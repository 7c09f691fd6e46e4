use std::fmt;

/// A key-mapping configuration that cannot be turned into a [`Registry`](crate::Registry).
///
/// The `usize` is the position of the offending mapping in the list that was passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError(pub usize, pub RegistryErrKind);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryErrKind {
    EmptyId,
    DuplicateId(Box<str>),
    EmptyTrigger,
    DuplicateTrigger(Box<str>),
    InvalidTrigger(Box<str>),
}

impl RegistryErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            RegistryErrKind::EmptyId => "Mapping id must not be empty.".to_string(),
            RegistryErrKind::DuplicateId(id) => {
                "Duplicate mapping id \"".to_string() + id + "\"."
            }
            RegistryErrKind::EmptyTrigger => "Mapping trigger must not be empty.".to_string(),
            RegistryErrKind::DuplicateTrigger(trigger) => {
                "Duplicate trigger \"".to_string() + trigger + "\"."
            }
            RegistryErrKind::InvalidTrigger(trigger) => {
                "Invalid trigger \"".to_string()
                    + trigger
                    + "\": must be \"^\", \"_\" or consist of ASCII letters only."
            }
        }
    }
}

impl RegistryError {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }

    pub fn error_message(&self) -> String {
        self.1.string()
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mapping #{}: {}", self.0, self.1.string())
    }
}

impl std::error::Error for RegistryError {}

/// Script generation was handed actions that do not fit the registry.
///
/// This only happens when the actions were parsed against a different registry than
/// the one used for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    UnknownMapping(Box<str>),
}

impl GenerateError {
    pub fn string(&self) -> String {
        match self {
            GenerateError::UnknownMapping(id) => {
                "Action refers to mapping \"".to_string()
                    + id
                    + "\", which is not in the registry."
            }
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

impl std::error::Error for GenerateError {}
