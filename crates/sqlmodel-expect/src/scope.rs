//! Field-level view of a single model value.

use sqlmodel_core::{RelationshipInfo, Value, normal_columns};

use crate::entity::Entity;

/// One field of a model value.
///
/// Column fields are normal and carry the value the model reported for
/// that column. Relationship fields are not normal, carry no value, and
/// point at their relationship metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub column: &'static str,
    pub is_normal: bool,
    pub value: Option<Value>,
    pub relationship: Option<&'static RelationshipInfo>,
}

/// Model-introspection view of one model value.
pub struct Scope<'a> {
    entity: &'a dyn Entity,
    fields: Vec<Field>,
}

impl<'a> Scope<'a> {
    /// Build the field list for `entity`: its columns in declaration order,
    /// then its relationship fields.
    pub fn new(entity: &'a dyn Entity) -> Self {
        let values = entity.values();
        let mut fields: Vec<Field> = entity
            .field_info()
            .iter()
            .map(|info| Field {
                name: info.name,
                column: info.column_name,
                is_normal: info.is_normal(),
                value: values
                    .iter()
                    .find(|(column, _)| *column == info.column_name)
                    .map(|(_, value)| value.clone()),
                relationship: None,
            })
            .collect();

        fields.extend(entity.relationships().iter().map(|rel| Field {
            name: rel.name,
            column: "",
            is_normal: false,
            value: None,
            relationship: Some(rel),
        }));

        Self { entity, fields }
    }

    /// The value this scope describes.
    pub fn entity(&self) -> &'a dyn Entity {
        self.entity
    }

    pub fn table_name(&self) -> &'static str {
        self.entity.table_name()
    }

    /// All fields, columns first.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by its model name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Relationship metadata of the relationship field `name`.
    pub fn relationship(&self, name: &str) -> Option<&'static RelationshipInfo> {
        self.field_by_name(name).and_then(|f| f.relationship)
    }

    pub fn primary_key_value(&self) -> Vec<Value> {
        self.entity.primary_key()
    }

    /// Names of the normal columns.
    pub fn columns(&self) -> Vec<String> {
        normal_columns(self.entity.field_info())
    }

    /// Cell values of the normal columns, in declaration order.
    pub fn row(&self) -> Vec<Value> {
        row_for_fields(&self.fields)
    }
}

/// Collect the values of the normal fields that carry one.
///
/// Relationship fields and fields without a value contribute nothing.
pub fn row_for_fields(fields: &[Field]) -> Vec<Value> {
    fields
        .iter()
        .filter(|f| f.is_normal)
        .filter_map(|f| f.value.clone())
        .collect()
}
