//! Model trait for ORM-style struct mapping.
//!
//! The `Model` trait defines the contract for structs that map to database
//! tables: static column and relationship metadata plus conversion between
//! an instance and a row of values.

use crate::Result;
use crate::field::FieldInfo;
use crate::relationship::RelationshipInfo;
use crate::row::Row;
use crate::value::Value;

/// Trait for types that can be mapped to database tables.
///
/// # Example
///
/// ```ignore
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Model for User {
///     const TABLE_NAME: &'static str = "users";
///     const PRIMARY_KEY: &'static [&'static str] = &["id"];
///     // ...
/// }
/// ```
pub trait Model: Sized {
    /// The name of the database table.
    const TABLE_NAME: &'static str;

    /// The primary key column name(s).
    const PRIMARY_KEY: &'static [&'static str];

    /// Relationship metadata for this model.
    const RELATIONSHIPS: &'static [RelationshipInfo] = &[];

    /// Get field metadata for all columns.
    fn fields() -> &'static [FieldInfo];

    /// Convert this model instance to a row of `(column, value)` pairs.
    fn to_row(&self) -> Vec<(&'static str, Value)>;

    /// Construct a model instance from a database row.
    fn from_row(row: &Row) -> Result<Self>;

    /// Get the value of the primary key field(s).
    fn primary_key_value(&self) -> Vec<Value>;

    /// Check if this is a new record (primary key is None/default).
    fn is_new(&self) -> bool;
}
