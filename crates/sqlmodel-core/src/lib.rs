//! Core types and traits for SQLModel Rust.
//!
//! This crate provides the model introspection surface used by the
//! expectation layer:
//!
//! - `Model` trait for ORM-style struct mapping
//! - `FieldInfo` column metadata
//! - `RelationshipInfo` association metadata, including link tables
//! - `Value` and `Row` for dynamically typed cells and result rows

pub mod error;
pub mod field;
pub mod model;
pub mod relationship;
pub mod row;
pub mod value;

pub use error::{
    ConfigError, Error, ExpectationError, ExpectationErrorKind, QueryError, QueryErrorKind,
    Result, TypeError,
};
pub use field::{FieldInfo, normal_columns};
pub use model::Model;
pub use relationship::{LinkTableInfo, Related, RelatedMany, RelationshipInfo, RelationshipKind};
pub use row::{ColumnInfo, FromValue, Row};
pub use value::Value;
