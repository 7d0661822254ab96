//! Mock-driver expectations for SQLModel Rust models.
//!
//! `sqlmodel-expect` lets a unit test say "this query returns this value"
//! in terms of models instead of hand-written rows. The expected value (a
//! model, a slice of models, a count, or nothing) is turned into row sets
//! and registered against the statements the ORM would have executed: the
//! main query first, then one statement per preloaded association.
//!
//! The pieces:
//!
//! - [`Expecter`] queues query calls and replays them once
//!   [`QueryExpectation::returns`] supplies the expected value
//! - [`QueryHandle`] is the ORM side: it records statements during replay
//! - [`MockAdapter`] is the driver side: it receives `(statement, rows)`
//! - [`SqlMock`] is an in-memory adapter that serves the rows back
//! - [`Preload`] exposes a model's loaded associations to the row builders

pub mod adapter;
pub mod config;
pub mod context;
pub mod destination;
pub mod entity;
pub mod expecter;
pub mod handle;
pub mod mock;
pub mod recorder;
pub mod relation;
pub mod rows;
pub mod scope;

pub use adapter::MockAdapter;
pub use config::{ExpectConfig, MockConfig, QueryMatcher, STRICT_ENV};
pub use context::ExpectContext;
pub use destination::{COUNT_COLUMN, Destination, dest_rows};
pub use entity::{Association, Entity, Preload};
pub use expecter::{Expecter, QueryExpectation};
pub use handle::{Call, Dispatch, QueryHandle, replay};
pub use mock::SqlMock;
pub use recorder::{RecordedStatement, Recorder};
pub use relation::{relation_columns, relation_rows};
pub use rows::RowSet;
pub use scope::{Field, Scope, row_for_fields};

pub use sqlmodel_core::{
    Error, ExpectationErrorKind, FieldInfo, LinkTableInfo, Model, Related, RelatedMany,
    RelationshipInfo, RelationshipKind, Result, Row, Value,
};

/// Everything a test needs in one import.
pub mod prelude {
    pub use crate::{
        Association, Destination, ExpectConfig, ExpectContext, Expecter, MockAdapter, MockConfig,
        Preload, QueryHandle, RecordedStatement, Recorder, RowSet, SqlMock,
    };
    pub use crate::handle::Dispatch;
    pub use sqlmodel_core::{
        Error, FieldInfo, LinkTableInfo, Model, Related, RelatedMany, RelationshipInfo,
        RelationshipKind, Result, Row, Value,
    };
}
