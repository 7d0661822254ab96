//! Statements captured while replaying deferred query calls.

use sqlmodel_core::Value;

/// A statement the ORM handle would have executed.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub args: Vec<Value>,
    /// Relationship field this statement preloads, if any.
    pub preload: Option<String>,
}

impl RecordedStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
            preload: None,
        }
    }

    /// Set the bound arguments.
    #[must_use]
    pub fn args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Tag the statement as the preload of relationship field `field`.
    #[must_use]
    pub fn preload(mut self, field: impl Into<String>) -> Self {
        self.preload = Some(field.into());
        self
    }

    /// The preload tag, if it is present and non-empty.
    pub fn preload_tag(&self) -> Option<&str> {
        self.preload.as_deref().filter(|tag| !tag.is_empty())
    }
}

/// Ordered log of recorded statements.
///
/// Statement 0 is the main query; later statements are preload queries.
#[derive(Debug, Default)]
pub struct Recorder {
    stmts: Vec<RecordedStatement>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stmt: RecordedStatement) {
        tracing::trace!(sql = %stmt.sql, preload = ?stmt.preload, "recorded statement");
        self.stmts.push(stmt);
    }

    pub fn statements(&self) -> &[RecordedStatement] {
        &self.stmts
    }

    /// The main query, when anything was recorded.
    pub fn main(&self) -> Option<&RecordedStatement> {
        self.stmts.first()
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn reset(&mut self) {
        self.stmts.clear();
    }
}
