//! Sink for row sets bound to recorded statements.

use crate::recorder::RecordedStatement;
use crate::rows::RowSet;

/// A mock driver that can be told what a statement returns.
pub trait MockAdapter {
    /// Register `rows` as the result of `statement`.
    fn expect_query(&mut self, statement: &RecordedStatement, rows: RowSet);
}

impl<A: MockAdapter + ?Sized> MockAdapter for &mut A {
    fn expect_query(&mut self, statement: &RecordedStatement, rows: RowSet) {
        (**self).expect_query(statement, rows);
    }
}

/// Collects registrations in order, for inspection.
impl MockAdapter for Vec<(RecordedStatement, RowSet)> {
    fn expect_query(&mut self, statement: &RecordedStatement, rows: RowSet) {
        self.push((statement.clone(), rows));
    }
}
