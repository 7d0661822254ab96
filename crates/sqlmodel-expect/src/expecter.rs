//! Deferred query expectations.
//!
//! An [`Expecter`] records query-building calls without running them. When
//! the test supplies the value the query should return, the calls are
//! replayed against the ORM handle in recording mode, and the expected value
//! is turned into row sets: one for the main query and one per preload.
//!
//! ```ignore
//! let mut expect = Expecter::new(handle, SqlMock::new());
//! expect
//!     .preload("posts")
//!     .first::<User>(vec![])
//!     .returns(&user)?;
//! ```

use sqlmodel_core::{Error, ExpectationError, ExpectationErrorKind, Model, Result, Value};
use tracing::{debug, instrument, trace, warn};

use crate::adapter::MockAdapter;
use crate::config::ExpectConfig;
use crate::context::ExpectContext;
use crate::destination::{Destination, dest_rows};
use crate::handle::{Call, QueryHandle, replay};
use crate::recorder::Recorder;
use crate::relation::{relation_columns, relation_rows};
use crate::rows::RowSet;
use crate::scope::Scope;

/// Records deferred calls and registers expected rows on a mock adapter.
pub struct Expecter<H, A> {
    handle: H,
    adapter: A,
    recorder: Recorder,
    calls: Vec<Call>,
    config: ExpectConfig,
}

impl<H: QueryHandle, A: MockAdapter> Expecter<H, A> {
    pub fn new(handle: H, adapter: A) -> Self {
        Self {
            handle,
            adapter,
            recorder: Recorder::new(),
            calls: Vec::new(),
            config: ExpectConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ExpectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExpectConfig {
        &self.config
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// Calls queued since the last `returns`.
    pub fn pending_calls(&self) -> &[Call] {
        &self.calls
    }

    /// Queue an arbitrary call.
    pub fn call(&mut self, method: impl Into<String>, args: Vec<Value>) -> &mut Self {
        self.calls.push(Call::new(method, args));
        self
    }

    /// Queue a preload of the relationship field `field`.
    pub fn preload(&mut self, field: &str) -> &mut Self {
        self.call("Preload", vec![Value::from(field)])
    }

    /// Queue a filter.
    pub fn where_(&mut self, query: &str, args: Vec<Value>) -> &mut Self {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(Value::from(query));
        all.extend(args);
        self.call("Where", all)
    }

    pub fn order(&mut self, expr: &str) -> &mut Self {
        self.call("Order", vec![Value::from(expr)])
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.call("Limit", vec![Value::from(limit)])
    }

    /// Scope following calls to the table of `M`.
    pub fn model<M: Model>(&mut self) -> &mut Self {
        self.call("Model", vec![Value::from(M::TABLE_NAME)])
    }

    /// Expect a first-row lookup on the table of `M`.
    pub fn first<M: Model>(&mut self, conds: Vec<Value>) -> QueryExpectation<'_, H, A> {
        self.terminal::<M>("First", conds)
    }

    /// Expect a lookup of every matching row on the table of `M`.
    pub fn find<M: Model>(&mut self, conds: Vec<Value>) -> QueryExpectation<'_, H, A> {
        self.terminal::<M>("Find", conds)
    }

    /// Expect a last-row lookup on the table of `M`.
    pub fn last<M: Model>(&mut self, conds: Vec<Value>) -> QueryExpectation<'_, H, A> {
        self.terminal::<M>("Last", conds)
    }

    /// Expect a row count on the table of `M`.
    pub fn count<M: Model>(&mut self) -> QueryExpectation<'_, H, A> {
        self.terminal::<M>("Count", Vec::new())
    }

    fn terminal<M: Model>(&mut self, method: &str, conds: Vec<Value>) -> QueryExpectation<'_, H, A> {
        let mut args = Vec::with_capacity(conds.len() + 1);
        args.push(Value::from(M::TABLE_NAME));
        args.extend(conds);
        self.call(method, args);
        QueryExpectation { parent: self }
    }

    fn reset(&mut self) {
        self.recorder.reset();
        self.calls.clear();
    }

    fn expect_returns(&mut self, destination: &Destination<'_>) -> Result<()> {
        let scope = destination.scope();
        if destination.is_absent() {
            debug!("expected value is absent; the main query returns no rows");
        }

        {
            let cx = ExpectContext::new(destination, scope.as_ref());
            let applied = replay(&mut self.handle, &self.calls, &cx, &mut self.recorder);
            trace!(applied, queued = self.calls.len(), "replayed deferred calls");
        }

        let result = self.register(destination, scope.as_ref());
        self.reset();
        result
    }

    fn register(&mut self, destination: &Destination<'_>, scope: Option<&Scope<'_>>) -> Result<()> {
        let Some(main) = self.recorder.main() else {
            return Err(Error::Expectation(ExpectationError::new(
                ExpectationErrorKind::NoStatements,
                "replaying the deferred calls recorded no statements",
            )));
        };

        let rows = dest_rows(destination, scope)?;
        debug!(sql = %main.sql, rows = rows.len(), "registering main query");
        self.adapter.expect_query(main, rows);

        for stmt in self.recorder.statements().iter().skip(1) {
            let Some(preload) = stmt.preload_tag() else {
                continue;
            };
            debug!("Preloading: {preload}");

            match preload_rows(destination, scope, preload)? {
                PreloadRows::Rows(rows) => {
                    debug!(sql = %stmt.sql, rows = rows.len(), "registering preload query");
                    self.adapter.expect_query(stmt, rows);
                }
                PreloadRows::Skipped => {}
                PreloadRows::Unresolved if self.config.strict_preload => {
                    return Err(Error::Expectation(ExpectationError::new(
                        ExpectationErrorKind::UnresolvedPreload,
                        format!(
                            "preload '{preload}' names no relationship on the {} destination",
                            destination.kind_name()
                        ),
                    )));
                }
                PreloadRows::Unresolved => {
                    warn!(preload, "preload names no relationship field; skipping");
                }
            }
        }
        Ok(())
    }
}

/// A terminal query call waiting for its expected result.
pub struct QueryExpectation<'e, H, A> {
    parent: &'e mut Expecter<H, A>,
}

impl<'e, H: QueryHandle, A: MockAdapter> QueryExpectation<'e, H, A> {
    /// Register `out` as the result of the queued query and its preloads.
    ///
    /// Afterwards the expecter is empty and ready for the next chain, whether
    /// or not registration succeeded.
    ///
    /// # Panics
    ///
    /// Panics when `out` is a non-integer scalar.
    #[instrument(level = "debug", skip_all)]
    pub fn returns<'v>(self, out: impl Into<Destination<'v>>) -> Result<&'e mut Expecter<H, A>> {
        let destination = out.into();
        debug!(kind = destination.kind_name(), "resolving expected value");
        self.parent.expect_returns(&destination)?;
        Ok(self.parent)
    }

    /// Register an absent result: a `count` column and no rows.
    pub fn returns_nothing(self) -> Result<&'e mut Expecter<H, A>> {
        self.returns(Destination::absent())
    }
}

enum PreloadRows {
    Rows(RowSet),
    Skipped,
    Unresolved,
}

fn preload_rows(
    destination: &Destination<'_>,
    scope: Option<&Scope<'_>>,
    field: &str,
) -> Result<PreloadRows> {
    match destination {
        Destination::Composite(entity) => {
            let Some(relationship) = scope.and_then(|s| s.relationship(field)) else {
                return Ok(PreloadRows::Unresolved);
            };
            Ok(relation_rows(*entity, field, relationship)?
                .map_or(PreloadRows::Skipped, PreloadRows::Rows))
        }
        Destination::Sequence { items, .. } => {
            let Some(relationship) = destination.sequence_relationship(field) else {
                return Ok(PreloadRows::Unresolved);
            };
            let Some(columns) = relation_columns(relationship) else {
                return Ok(PreloadRows::Skipped);
            };
            let mut merged: Option<RowSet> = None;
            for item in items {
                let Some(rows) = relation_rows(*item, field, relationship)? else {
                    continue;
                };
                match merged.as_mut() {
                    Some(all) => {
                        all.append(rows)?;
                    }
                    None => merged = Some(rows),
                }
            }
            Ok(PreloadRows::Rows(
                merged.unwrap_or_else(|| RowSet::new(columns)),
            ))
        }
        Destination::Scalar(_) | Destination::Absent { .. } => Ok(PreloadRows::Unresolved),
    }
}
