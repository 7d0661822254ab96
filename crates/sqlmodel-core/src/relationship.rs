//! Relationship metadata for SQLModel Rust.
//!
//! Relationships are static metadata on each `Model`. The expectation layer
//! reads them to decide which columns a preload query returns and how rows
//! for the association are shaped.

use crate::field::FieldInfo;
use std::fmt;

/// The type of relationship between two models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelationshipKind {
    /// One-to-one: `User` has one `Profile`.
    OneToOne,
    /// Many-to-one: many `Post`s belong to one `User`.
    #[default]
    ManyToOne,
    /// One-to-many: one `User` has many `Post`s.
    OneToMany,
    /// Many-to-many: `User`s have many `Language`s via a link table.
    ManyToMany,
}

impl RelationshipKind {
    /// Conventional ORM name of the kind (`has_one`, `belongs_to`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            RelationshipKind::OneToOne => "has_one",
            RelationshipKind::ManyToOne => "belongs_to",
            RelationshipKind::OneToMany => "has_many",
            RelationshipKind::ManyToMany => "many_to_many",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information about a link/join table for many-to-many relationships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTableInfo {
    /// The link table name (e.g., `"user_languages"`).
    pub table_name: &'static str,

    /// Column in link table pointing to the local model (e.g., `"user_id"`).
    pub local_column: &'static str,

    /// Column in link table pointing to the remote model (e.g., `"language_id"`).
    pub remote_column: &'static str,

    /// Composite local key columns; takes precedence over `local_column`.
    pub local_columns: Option<&'static [&'static str]>,

    /// Composite remote key columns; takes precedence over `remote_column`.
    pub remote_columns: Option<&'static [&'static str]>,
}

impl LinkTableInfo {
    /// Create a new link-table definition.
    #[must_use]
    pub const fn new(
        table_name: &'static str,
        local_column: &'static str,
        remote_column: &'static str,
    ) -> Self {
        Self {
            table_name,
            local_column,
            remote_column,
            local_columns: None,
            remote_columns: None,
        }
    }

    /// Create a new composite link-table definition.
    ///
    /// `local_columns` follow the parent PK value ordering and
    /// `remote_columns` the child PK value ordering.
    #[must_use]
    pub const fn composite(
        table_name: &'static str,
        local_columns: &'static [&'static str],
        remote_columns: &'static [&'static str],
    ) -> Self {
        Self {
            table_name,
            local_column: "",
            remote_column: "",
            local_columns: Some(local_columns),
            remote_columns: Some(remote_columns),
        }
    }

    /// Return the local key columns (single or composite).
    #[must_use]
    pub fn local_cols(&self) -> &[&'static str] {
        if let Some(cols) = self.local_columns {
            return cols;
        }
        if self.local_column.is_empty() {
            return &[];
        }
        std::slice::from_ref(&self.local_column)
    }

    /// Return the remote key columns (single or composite).
    #[must_use]
    pub fn remote_cols(&self) -> &[&'static str] {
        if let Some(cols) = self.remote_columns {
            return cols;
        }
        if self.remote_column.is_empty() {
            return &[];
        }
        std::slice::from_ref(&self.remote_column)
    }
}

/// Metadata about a relationship between models.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipInfo {
    /// Name of the relationship field.
    pub name: &'static str,

    /// The related model's table name.
    pub related_table: &'static str,

    /// Kind of relationship.
    pub kind: RelationshipKind,

    /// Local foreign key column (for ManyToOne).
    pub local_key: Option<&'static str>,

    /// Remote foreign key column (for OneToMany / OneToOne).
    pub remote_key: Option<&'static str>,

    /// Link table for ManyToMany relationships.
    pub link_table: Option<LinkTableInfo>,

    /// Function pointer returning the related model's fields metadata.
    pub related_fields_fn: fn() -> &'static [FieldInfo],
}

impl PartialEq for RelationshipInfo {
    fn eq(&self, other: &Self) -> bool {
        // Function-pointer equality is not stable across codegen units.
        self.name == other.name
            && self.related_table == other.related_table
            && self.kind == other.kind
            && self.local_key == other.local_key
            && self.remote_key == other.remote_key
            && self.link_table == other.link_table
    }
}

impl Eq for RelationshipInfo {}

impl RelationshipInfo {
    fn empty_related_fields() -> &'static [FieldInfo] {
        &[]
    }

    /// Create a new relationship with required fields.
    #[must_use]
    pub const fn new(
        name: &'static str,
        related_table: &'static str,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            name,
            related_table,
            kind,
            local_key: None,
            remote_key: None,
            link_table: None,
            related_fields_fn: Self::empty_related_fields,
        }
    }

    /// Provide the related model's `Model::fields()` function pointer.
    #[must_use]
    pub const fn related_fields(mut self, f: fn() -> &'static [FieldInfo]) -> Self {
        self.related_fields_fn = f;
        self
    }

    /// Set the local foreign key column (ManyToOne).
    #[must_use]
    pub const fn local_key(mut self, key: &'static str) -> Self {
        self.local_key = Some(key);
        self
    }

    /// Set the remote foreign key column (OneToMany / OneToOne).
    #[must_use]
    pub const fn remote_key(mut self, key: &'static str) -> Self {
        self.remote_key = Some(key);
        self
    }

    /// Set the link table metadata (ManyToMany).
    #[must_use]
    pub const fn link_table(mut self, info: LinkTableInfo) -> Self {
        self.link_table = Some(info);
        self
    }

    /// Field metadata of the related model.
    #[must_use]
    pub fn related_fields_info(&self) -> &'static [FieldInfo] {
        (self.related_fields_fn)()
    }
}

impl Default for RelationshipInfo {
    fn default() -> Self {
        Self::new("", "", RelationshipKind::default())
    }
}

/// A single related object (one-to-one or many-to-one).
///
/// `None` until the association is loaded onto the owning value.
#[derive(Debug, Clone, PartialEq)]
pub struct Related<T> {
    value: Option<T>,
}

impl<T> Related<T> {
    /// An association that was not loaded.
    #[must_use]
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// An association loaded with `obj`.
    #[must_use]
    pub fn loaded(obj: T) -> Self {
        Self { value: Some(obj) }
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for Related<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A collection of related objects (one-to-many or many-to-many).
///
/// Unloaded and loaded-but-empty are distinct: only the latter yields a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedMany<T> {
    items: Option<Vec<T>>,
}

impl<T> RelatedMany<T> {
    /// A collection that was not loaded.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: None }
    }

    /// A collection loaded with `objects`.
    #[must_use]
    pub fn loaded(objects: Vec<T>) -> Self {
        Self {
            items: Some(objects),
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }
}

impl<T> Default for RelatedMany<T> {
    fn default() -> Self {
        Self::empty()
    }
}
