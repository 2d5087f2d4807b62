//! Error types for the database engine and the command shell.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the schema registry, the table store and the query executor.
///
/// Every variant is recoverable: the shell reports it and keeps reading commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Table \"{0}\" already exists")]
    DuplicateTable(String),

    #[error("Table \"{0}\" does not exist")]
    UnknownTable(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Column \"{column}\" does not exist in table \"{table}\"")]
    UnknownColumn { table: String, column: String },

    #[error("Column \"{0}\" cannot be modified")]
    ReadOnlyColumn(String),

    #[error("Expected {expected} values, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Type mismatch on column \"{column}\": expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Row index {0} is out of bounds")]
    RowOutOfBounds(usize),
}

/// Errors raised by the interactive shell around the engine.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Db(#[from] Error),

    #[error("Input error: {0}")]
    Readline(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),
}

/// End of input and interrupts are not errors: [crate::LineReader]
/// implementations report them as `Ok(None)` before converting.
impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err.to_string())
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        ShellError::Configuration(format!("TOML parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownTable("users".into());
        assert_eq!(err.to_string(), "Table \"users\" does not exist");

        let err = Error::ArityMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "Expected 3 values, found 2");

        let err = Error::TypeMismatch {
            column: "age".into(),
            expected: "int".into(),
            found: "\"old\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch on column \"age\": expected int, found \"old\""
        );
    }

    #[test]
    fn test_shell_error_wraps_db_error() {
        let err: ShellError = Error::DuplicateTable("users".into()).into();
        assert!(matches!(err, ShellError::Db(Error::DuplicateTable(_))));
        assert_eq!(err.to_string(), "Table \"users\" already exists");
    }

    #[test]
    fn test_readline_error_conversion() {
        let io = std::io::Error::other("terminal gone");
        let err: ShellError = rustyline::error::ReadlineError::Io(io).into();
        assert!(matches!(err, ShellError::Readline(_)));
        assert!(err.to_string().starts_with("Input error: "));
    }
}
