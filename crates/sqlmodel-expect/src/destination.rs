//! Expected query outputs and the row sets they turn into.

use sqlmodel_core::{RelationshipInfo, Result, Value, normal_columns};

use crate::entity::{Entity, Preload};
use crate::rows::RowSet;
use crate::scope::Scope;

/// Column of the single-cell row set a scalar or untyped-nil result uses.
pub const COUNT_COLUMN: &str = "count";

/// What a query is expected to return.
pub enum Destination<'a> {
    /// A sequence of model values of one type.
    Sequence {
        columns: Vec<String>,
        relationships: &'static [RelationshipInfo],
        items: Vec<&'a dyn Entity>,
    },
    /// A single model value.
    Composite(&'a dyn Entity),
    /// A scalar such as a count.
    Scalar(Value),
    /// No value: the query returns the given columns and no rows.
    Absent { columns: Vec<String> },
}

impl<'a> Destination<'a> {
    /// Untyped nil: a `count` column and no rows.
    pub fn absent() -> Self {
        Destination::Absent {
            columns: vec![COUNT_COLUMN.to_string()],
        }
    }

    /// A sequence of model values.
    pub fn many<M: Preload>(items: &'a [M]) -> Self {
        Destination::Sequence {
            columns: normal_columns(M::fields()),
            relationships: M::RELATIONSHIPS,
            items: items.iter().map(|m| m as &dyn Entity).collect(),
        }
    }

    /// Typed nil: the model's columns and no rows.
    pub fn none<M: Preload>() -> Self {
        Destination::Absent {
            columns: normal_columns(M::fields()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Destination::Absent { .. })
    }

    /// Short name of the destination kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Destination::Sequence { .. } => "slice",
            Destination::Composite(_) => "struct",
            Destination::Scalar(_) => "scalar",
            Destination::Absent { .. } => "nil",
        }
    }

    /// Columns of the main query's row set.
    pub fn columns(&self) -> Vec<String> {
        match self {
            Destination::Sequence { columns, .. } | Destination::Absent { columns } => {
                columns.clone()
            }
            Destination::Composite(entity) => normal_columns(entity.field_info()),
            Destination::Scalar(_) => vec![COUNT_COLUMN.to_string()],
        }
    }

    /// Scope of a single-model destination.
    pub fn scope(&self) -> Option<Scope<'a>> {
        match self {
            Destination::Composite(entity) => Some(Scope::new(*entity)),
            _ => None,
        }
    }

    /// Model values held by the destination, in order.
    pub fn entities(&self) -> Vec<&'a dyn Entity> {
        match self {
            Destination::Sequence { items, .. } => items.clone(),
            Destination::Composite(entity) => vec![*entity],
            Destination::Scalar(_) | Destination::Absent { .. } => Vec::new(),
        }
    }

    /// Relationship metadata for the field `name` of a sequence destination.
    pub fn sequence_relationship(&self, name: &str) -> Option<&'static RelationshipInfo> {
        match self {
            Destination::Sequence { relationships, .. } => {
                relationships.iter().find(|r| r.name == name)
            }
            _ => None,
        }
    }
}

impl<'a, M: Preload> From<&'a M> for Destination<'a> {
    fn from(value: &'a M) -> Self {
        Destination::Composite(value)
    }
}

impl<'a, M: Preload> From<&'a [M]> for Destination<'a> {
    fn from(items: &'a [M]) -> Self {
        Destination::many(items)
    }
}

impl<'a, M: Preload> From<Option<&'a M>> for Destination<'a> {
    fn from(value: Option<&'a M>) -> Self {
        match value {
            Some(value) => Destination::Composite(value),
            None => Destination::none::<M>(),
        }
    }
}

impl From<Value> for Destination<'_> {
    fn from(value: Value) -> Self {
        Destination::Scalar(value)
    }
}

macro_rules! impl_scalar_destination {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Destination<'_> {
                fn from(value: $ty) -> Self {
                    Destination::Scalar(Value::from(value))
                }
            }
        )*
    };
}

impl_scalar_destination!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Destination<'_> {
    fn from(value: u64) -> Self {
        Destination::Scalar(unsigned_count(value))
    }
}

impl From<usize> for Destination<'_> {
    fn from(value: usize) -> Self {
        Destination::Scalar(unsigned_count(value as u64))
    }
}

// Counts above i64::MAX fail the driver's parameter conversion and leave the
// cell NULL.
fn unsigned_count(value: u64) -> Value {
    Value::try_from(value).unwrap_or_else(|err| {
        tracing::warn!(value, error = %err, "count does not fit a driver integer; cell is NULL");
        Value::Null
    })
}

/// Build the main query's row set for `destination`.
///
/// `scope` is the pre-built scope of a single-model destination; when it is
/// `None` one is built on demand.
///
/// # Panics
///
/// Panics when the destination is a scalar that is neither an integer nor
/// NULL. That is a mistake in the test itself, not a runtime condition.
pub fn dest_rows(destination: &Destination<'_>, scope: Option<&Scope<'_>>) -> Result<RowSet> {
    let mut rows = RowSet::new(destination.columns());
    match destination {
        Destination::Absent { .. } => {}
        Destination::Sequence { items, .. } => {
            for item in items {
                rows.add_row(Scope::new(*item).row())?;
            }
        }
        Destination::Composite(entity) => {
            let row = match scope {
                Some(scope) => scope.row(),
                None => Scope::new(*entity).row(),
            };
            rows.add_row(row)?;
        }
        Destination::Scalar(value) => match driver_integer(value) {
            Some(cell) => {
                rows.add_row(vec![cell])?;
            }
            None => panic!(
                "can only get rows for slice, struct, int/uint, or nil. Got: {}",
                value.type_name()
            ),
        },
    }
    Ok(rows)
}

// The driver stores every integer width as a 64-bit signed cell; a failed
// conversion is already NULL.
fn driver_integer(value: &Value) -> Option<Value> {
    if value.is_null() {
        Some(Value::Null)
    } else if value.is_integer() {
        value.as_i64().map(Value::BigInt)
    } else {
        None
    }
}
