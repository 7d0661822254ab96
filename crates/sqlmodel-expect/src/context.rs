//! State handed to the ORM handle while deferred calls replay.

use sqlmodel_core::Value;

use crate::destination::Destination;
use crate::entity::Entity;
use crate::scope::Scope;

/// The resolved expected value, visible to the handle during replay.
///
/// The handle uses it to build preload statements that need the destination's
/// primary key, and to answer the main query with zero rows when the
/// expected value is absent.
pub struct ExpectContext<'a> {
    destination: &'a Destination<'a>,
    scope: Option<&'a Scope<'a>>,
}

impl<'a> ExpectContext<'a> {
    pub fn new(destination: &'a Destination<'a>, scope: Option<&'a Scope<'a>>) -> Self {
        Self { destination, scope }
    }

    pub fn destination(&self) -> &'a Destination<'a> {
        self.destination
    }

    pub fn scope(&self) -> Option<&'a Scope<'a>> {
        self.scope
    }

    /// The main query should produce no rows.
    pub fn returns_nil_rows(&self) -> bool {
        self.destination.is_absent()
    }

    /// The single model value being returned, if any.
    pub fn resolved(&self) -> Option<&'a dyn Entity> {
        match self.destination {
            Destination::Composite(entity) => Some(*entity),
            _ => None,
        }
    }

    /// Primary keys of every model value being returned, in order.
    pub fn primary_keys(&self) -> Vec<Vec<Value>> {
        if let Some(scope) = self.scope {
            return vec![scope.primary_key_value()];
        }
        self.destination
            .entities()
            .into_iter()
            .map(|entity| entity.primary_key())
            .collect()
    }
}
