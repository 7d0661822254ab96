//! Row sets for preloaded associations.

use sqlmodel_core::{RelationshipInfo, RelationshipKind, Result, Value, normal_columns};

use crate::entity::Entity;
use crate::rows::RowSet;
use crate::scope::Scope;

/// Columns of the row set a preload of `relationship` returns.
///
/// The related model's normal columns, followed for many-to-many by the
/// link table's local then remote key columns. `None` for kinds that get no
/// preload rows.
pub fn relation_columns(relationship: &RelationshipInfo) -> Option<Vec<String>> {
    let mut columns = normal_columns(relationship.related_fields_info());
    match relationship.kind {
        RelationshipKind::OneToOne | RelationshipKind::OneToMany => Some(columns),
        RelationshipKind::ManyToMany => {
            if let Some(link) = &relationship.link_table {
                columns.extend(link.local_cols().iter().map(ToString::to_string));
                columns.extend(link.remote_cols().iter().map(ToString::to_string));
            } else {
                tracing::warn!(
                    relationship = relationship.name,
                    "many_to_many relationship has no link table; join columns omitted"
                );
            }
            Some(columns)
        }
        RelationshipKind::ManyToOne => None,
    }
}

/// Build the row set for the relationship field `field_name` of `owner`.
///
/// * has_one: one row when the association is set, else columns only.
/// * has_many: one row per element.
/// * many_to_many: one row per element, each followed by the owner's
///   primary key and the primary key of a default-constructed element.
///
/// Returns `Ok(None)` for relationship kinds without preload rows.
#[tracing::instrument(
    level = "trace",
    skip(owner, relationship),
    fields(kind = relationship.kind.as_str())
)]
pub fn relation_rows(
    owner: &dyn Entity,
    field_name: &str,
    relationship: &RelationshipInfo,
) -> Result<Option<RowSet>> {
    let Some(columns) = relation_columns(relationship) else {
        tracing::debug!(
            relationship = relationship.name,
            kind = relationship.kind.as_str(),
            "no preload rows for relationship kind"
        );
        return Ok(None);
    };

    let association = owner.related(field_name);
    let entities = association
        .as_ref()
        .map(|a| a.entities())
        .unwrap_or_default();

    // Metadata without a related-fields hook: fall back to the values themselves.
    let columns = match entities.first() {
        Some(first) if relationship.related_fields_info().is_empty() => {
            let mut derived = Scope::new(*first).columns();
            derived.extend(columns);
            derived
        }
        _ => columns,
    };
    let mut rows = RowSet::new(columns);

    match relationship.kind {
        RelationshipKind::OneToOne => {
            if let Some(first) = entities.first() {
                rows.add_row(Scope::new(*first).row())?;
            }
        }
        RelationshipKind::OneToMany => {
            for entity in &entities {
                rows.add_row(Scope::new(*entity).row())?;
            }
        }
        RelationshipKind::ManyToMany => {
            let default_key = association
                .as_ref()
                .map_or(&[][..], |a| a.default_key());
            let join_key = join_key(owner, relationship, default_key);
            for entity in &entities {
                let mut row = Scope::new(*entity).row();
                row.extend(join_key.iter().cloned());
                rows.add_row(row)?;
            }
        }
        RelationshipKind::ManyToOne => {}
    }

    tracing::trace!(rows = rows.len(), "built relation rows");
    Ok(Some(rows))
}

// Values for the link-table columns: owner key, then destination key.
fn join_key(
    owner: &dyn Entity,
    relationship: &RelationshipInfo,
    default_key: &[Value],
) -> Vec<Value> {
    if relationship.link_table.is_none() {
        return Vec::new();
    }
    let mut key = owner.primary_key();
    key.extend(default_key.iter().cloned());
    key
}
