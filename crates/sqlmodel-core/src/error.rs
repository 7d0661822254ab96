//! Error types for SQLModel operations.

use std::fmt;

/// The primary error type for all SQLModel operations.
#[derive(Debug)]
pub enum Error {
    /// Query errors raised while serving mocked statements
    Query(QueryError),
    /// Type conversion errors
    Type(TypeError),
    /// Expectation wiring errors
    Expectation(ExpectationError),
    /// Configuration errors
    Config(ConfigError),
    /// Custom error with message
    Custom(String),
}

#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub sql: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// No registered expectation matches the statement
    Unexpected,
    /// The statement matched but its bound arguments did not
    Arguments,
    /// The expectation was already consumed
    Consumed,
}

#[derive(Debug)]
pub struct TypeError {
    pub expected: &'static str,
    pub actual: String,
    pub column: Option<String>,
    pub rust_type: Option<&'static str>,
}

/// Failure while turning an expected value into mock expectations.
#[derive(Debug)]
pub struct ExpectationError {
    pub kind: ExpectationErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationErrorKind {
    /// Replaying the deferred calls recorded no statement
    NoStatements,
    /// A preload tag names a field the model does not have (strict mode only)
    UnresolvedPreload,
    /// A row does not have one value per column
    RowWidth,
    /// Registered expectations were never triggered
    Unfulfilled,
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl Error {
    /// Get the SQL that caused this error, if available
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.sql.as_deref(),
            _ => None,
        }
    }

    /// Is this an unexpected-query error from the mock driver?
    pub fn is_unexpected_query(&self) -> bool {
        matches!(self, Error::Query(q) if q.kind == QueryErrorKind::Unexpected)
    }

    /// The expectation error kind, if this is an expectation error.
    pub fn expectation_kind(&self) -> Option<ExpectationErrorKind> {
        match self {
            Error::Expectation(e) => Some(e.kind),
            _ => None,
        }
    }
}

impl ExpectationError {
    pub fn new(kind: ExpectationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Query(e) => match &e.sql {
                Some(sql) => write!(f, "Query error: {} (sql: {})", e.message, sql),
                None => write!(f, "Query error: {}", e.message),
            },
            Error::Type(e) => {
                if let Some(col) = &e.column {
                    write!(
                        f,
                        "Type error in column '{}': expected {}, found {}",
                        col, e.expected, e.actual
                    )
                } else {
                    write!(f, "Type error: expected {}, found {}", e.expected, e.actual)
                }
            }
            Error::Expectation(e) => write!(f, "Expectation error: {}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
            Error::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(col) = &self.column {
            write!(
                f,
                "expected {} in column '{}', found {}",
                self.expected, col, self.actual
            )
        } else {
            write!(f, "expected {}, found {}", self.expected, self.actual)
        }
    }
}

impl fmt::Display for ExpectationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(err)
    }
}

impl From<ExpectationError> for Error {
    fn from(err: ExpectationError) -> Self {
        Error::Expectation(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

/// Result type alias for SQLModel operations.
pub type Result<T> = std::result::Result<T, Error>;
