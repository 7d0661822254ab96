//! Object-safe access to model values and their loaded associations.
//!
//! Expected outputs mix models of different types (a `User` with its
//! `Post`s and `Language`s), so the row builders work over `&dyn Entity`.
//! Every [`Preload`] model is an `Entity` through a blanket impl.

use sqlmodel_core::{FieldInfo, Model, Related, RelatedMany, RelationshipInfo, Value};

/// A model that can report the contents of its relationship fields.
///
/// Only relationships that are actually loaded on the value should return
/// `Some`; an unset association is `None` or an empty [`Association`].
///
/// ```ignore
/// impl Preload for User {
///     fn association(&self, field: &str) -> Option<Association<'_>> {
///         match field {
///             "posts" => Some(Association::many(&self.posts)),
///             "profile" => Some((&self.profile).into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Preload: Model {
    /// The loaded value of the relationship field named `field`.
    fn association(&self, field: &str) -> Option<Association<'_>> {
        let _ = field;
        None
    }
}

/// Dynamic view over a model value.
pub trait Entity {
    /// Table the model maps to.
    fn table_name(&self) -> &'static str;

    /// Static column metadata.
    fn field_info(&self) -> &'static [FieldInfo];

    /// Static relationship metadata.
    fn relationships(&self) -> &'static [RelationshipInfo];

    /// Current column values as `(column, value)` pairs.
    fn values(&self) -> Vec<(&'static str, Value)>;

    /// Primary key value(s).
    fn primary_key(&self) -> Vec<Value>;

    /// Loaded association behind the relationship field `field`.
    fn related(&self, field: &str) -> Option<Association<'_>>;
}

impl<M: Preload> Entity for M {
    fn table_name(&self) -> &'static str {
        M::TABLE_NAME
    }

    fn field_info(&self) -> &'static [FieldInfo] {
        M::fields()
    }

    fn relationships(&self) -> &'static [RelationshipInfo] {
        M::RELATIONSHIPS
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        self.to_row()
    }

    fn primary_key(&self) -> Vec<Value> {
        self.primary_key_value()
    }

    fn related(&self, field: &str) -> Option<Association<'_>> {
        self.association(field)
    }
}

/// Contents of one relationship field.
pub enum Association<'a> {
    /// A single related value, `None` when unset.
    One(Option<&'a dyn Entity>),
    /// A sequence of related values.
    ///
    /// `default_key` is the primary key of a default-constructed element,
    /// used as the destination key of many-to-many join rows.
    Many {
        items: Vec<&'a dyn Entity>,
        default_key: Vec<Value>,
    },
}

impl<'a> Association<'a> {
    /// A single related value.
    pub fn one<T: Preload>(value: Option<&'a T>) -> Self {
        Association::One(value.map(|v| v as &dyn Entity))
    }

    /// A sequence of related values.
    pub fn many<T: Preload + Default>(items: &'a [T]) -> Self {
        Association::Many {
            items: items.iter().map(|v| v as &dyn Entity).collect(),
            default_key: T::default().primary_key_value(),
        }
    }

    /// The associated values, in order.
    pub fn entities(&self) -> Vec<&'a dyn Entity> {
        match self {
            Association::One(value) => value.iter().copied().collect(),
            Association::Many { items, .. } => items.clone(),
        }
    }

    /// No associated value is present.
    pub fn is_unset(&self) -> bool {
        match self {
            Association::One(value) => value.is_none(),
            Association::Many { items, .. } => items.is_empty(),
        }
    }

    /// Primary key of a default destination element (empty for `One`).
    pub fn default_key(&self) -> &[Value] {
        match self {
            Association::One(_) => &[],
            Association::Many { default_key, .. } => default_key,
        }
    }
}

impl<'a, T: Preload> From<&'a Related<T>> for Association<'a> {
    fn from(related: &'a Related<T>) -> Self {
        Association::one(related.get())
    }
}

impl<'a, T: Preload + Default> From<&'a RelatedMany<T>> for Association<'a> {
    fn from(related: &'a RelatedMany<T>) -> Self {
        Association::many(related.get().unwrap_or(&[]))
    }
}

impl<'a, T: Preload> From<Option<&'a T>> for Association<'a> {
    fn from(value: Option<&'a T>) -> Self {
        Association::one(value)
    }
}

impl<'a, T: Preload + Default> From<&'a Vec<T>> for Association<'a> {
    fn from(items: &'a Vec<T>) -> Self {
        Association::many(items)
    }
}
