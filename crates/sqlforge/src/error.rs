//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for sqlforge operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while assembling or configuring statements.
///
/// Structural variants (`UnbalancedEnd`, `Unfinished`, `UnbalancedClause`,
/// `CompositeValue`) indicate a bug in the code driving the tree, not a runtime
/// condition. They are reported as soon as they are detected and a statement is
/// never produced from a tree that raised one.
#[derive(Debug, Error)]
pub enum SqlError {
    /// `end_node` called while only the root is open
    #[error("end_node called at root depth")]
    UnbalancedEnd,

    /// The tree was finished while nodes were still open
    #[error("tree finished with {depth} open node(s) besides the root")]
    Unfinished { depth: usize },

    /// A clause assembler left the cursor at a different depth than it found it
    #[error("clause changed cursor depth from {expected} to {actual}")]
    UnbalancedClause { expected: usize, actual: usize },

    /// Scalar value requested from a composite expression
    #[error("{0} expression has no single scalar value")]
    CompositeValue(&'static str),

    /// Identifier text could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Statement validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing a configuration file failed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error reports a malformed tree
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedEnd
                | Self::Unfinished { .. }
                | Self::UnbalancedClause { .. }
                | Self::CompositeValue(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
