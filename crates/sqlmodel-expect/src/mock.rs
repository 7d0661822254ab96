//! In-memory mock driver.
//!
//! `SqlMock` stores `(statement, rows)` expectations and serves them back
//! when a matching query runs. It implements [`MockAdapter`], so an
//! [`Expecter`](crate::Expecter) can register into it directly.

use regex::Regex;
use sqlmodel_core::{
    Error, ExpectationError, ExpectationErrorKind, QueryError, QueryErrorKind, Result, Row, Value,
};
use tracing::instrument;

use crate::adapter::MockAdapter;
use crate::config::{MockConfig, QueryMatcher};
use crate::recorder::RecordedStatement;
use crate::rows::RowSet;

#[derive(Debug)]
struct ExpectedQuery {
    sql: String,
    pattern: Option<Regex>,
    args: Vec<Value>,
    rows: RowSet,
    triggered: bool,
}

impl ExpectedQuery {
    fn matches_sql(&self, matcher: QueryMatcher, actual: &str) -> bool {
        match (matcher, &self.pattern) {
            (QueryMatcher::Regexp, Some(pattern)) => pattern.is_match(actual),
            _ => collapse_whitespace(&self.sql) == collapse_whitespace(actual),
        }
    }

    fn matches_args(&self, config: &MockConfig, args: &[Value]) -> bool {
        !config.match_args || self.args.is_empty() || self.args == args
    }
}

/// Mock driver holding registered query results.
#[derive(Debug, Default)]
pub struct SqlMock {
    config: MockConfig,
    expected: Vec<ExpectedQuery>,
}

impl SqlMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            expected: Vec::new(),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Register `rows` as the result of `sql` with `args`.
    pub fn expect(&mut self, sql: impl Into<String>, args: Vec<Value>, rows: RowSet) -> &mut Self {
        let sql = sql.into();
        let pattern = match Regex::new(&regex::escape(&sql)) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!(%sql, error = %err, "cannot compile query pattern; matching exactly");
                None
            }
        };
        self.expected.push(ExpectedQuery {
            sql,
            pattern,
            args,
            rows,
            triggered: false,
        });
        self
    }

    /// Number of registered expectations.
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Registered `(sql, rows)` pairs, in registration order.
    pub fn expectations(&self) -> impl Iterator<Item = (&str, &RowSet)> {
        self.expected.iter().map(|e| (e.sql.as_str(), &e.rows))
    }

    /// Rows registered for the first expectation whose SQL is exactly `sql`.
    pub fn rows_for(&self, sql: &str) -> Option<&RowSet> {
        self.expected.iter().find(|e| e.sql == sql).map(|e| &e.rows)
    }

    /// Run `sql` against the expectations and return the registered rows.
    #[instrument(level = "trace", skip(self))]
    pub fn query(&mut self, sql: &str, args: &[Value]) -> Result<Vec<Row>> {
        let index = if self.config.ordered {
            self.next_ordered(sql, args)?
        } else {
            self.next_unordered(sql, args)?
        };
        let expected = &mut self.expected[index];
        expected.triggered = true;
        tracing::trace!(rows = expected.rows.len(), "serving mocked rows");
        Ok(expected.rows.to_rows())
    }

    fn next_ordered(&self, sql: &str, args: &[Value]) -> Result<usize> {
        let Some((index, next)) = self.expected.iter().enumerate().find(|(_, e)| !e.triggered)
        else {
            return Err(unexpected(sql, args, "all expectations were already fulfilled"));
        };
        if !next.matches_sql(self.config.matcher, sql) {
            return Err(unexpected(
                sql,
                args,
                &format!("next expectation is '{}'", next.sql),
            ));
        }
        if !next.matches_args(&self.config, args) {
            return Err(Error::Query(QueryError {
                kind: QueryErrorKind::Arguments,
                sql: Some(sql.to_string()),
                message: format!("arguments {:?} do not match expected {:?}", args, next.args),
            }));
        }
        Ok(index)
    }

    fn next_unordered(&self, sql: &str, args: &[Value]) -> Result<usize> {
        let mut consumed = false;
        for (index, expected) in self.expected.iter().enumerate() {
            if !expected.matches_sql(self.config.matcher, sql)
                || !expected.matches_args(&self.config, args)
            {
                continue;
            }
            if expected.triggered {
                consumed = true;
                continue;
            }
            return Ok(index);
        }
        if consumed {
            return Err(Error::Query(QueryError {
                kind: QueryErrorKind::Consumed,
                sql: Some(sql.to_string()),
                message: "matching expectation was already consumed".to_string(),
            }));
        }
        Err(unexpected(sql, args, "no expectation matches"))
    }

    /// Check that every registered expectation was triggered.
    pub fn expectations_were_met(&self) -> Result<()> {
        let pending: Vec<&str> = self
            .expected
            .iter()
            .filter(|e| !e.triggered)
            .map(|e| e.sql.as_str())
            .collect();
        if pending.is_empty() {
            return Ok(());
        }
        Err(Error::Expectation(ExpectationError::new(
            ExpectationErrorKind::Unfulfilled,
            format!(
                "{} expectation(s) were not met: {}",
                pending.len(),
                pending.join("; ")
            ),
        )))
    }
}

impl MockAdapter for SqlMock {
    fn expect_query(&mut self, statement: &RecordedStatement, rows: RowSet) {
        self.expect(statement.sql.clone(), statement.args.clone(), rows);
    }
}

fn unexpected(sql: &str, args: &[Value], detail: &str) -> Error {
    Error::Query(QueryError {
        kind: QueryErrorKind::Unexpected,
        sql: Some(sql.to_string()),
        message: format!("call to query with args {args:?} was not expected, {detail}"),
    })
}

fn collapse_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
