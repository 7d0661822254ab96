//! Field and column definitions.

/// Metadata about a model field/column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Rust field name
    pub name: &'static str,
    /// Database column name (may differ from field name)
    pub column_name: &'static str,
    /// Whether this field is nullable
    pub nullable: bool,
    /// Whether this is a primary key
    pub primary_key: bool,
    /// Whether this field auto-increments
    pub auto_increment: bool,
    /// Foreign key reference (table.column)
    pub foreign_key: Option<&'static str>,
    /// Field is declared on the struct but never persisted
    pub skip: bool,
}

impl FieldInfo {
    /// Create a new field info with minimal required data.
    pub const fn new(name: &'static str, column_name: &'static str) -> Self {
        Self {
            name,
            column_name,
            nullable: false,
            primary_key: false,
            auto_increment: false,
            foreign_key: None,
            skip: false,
        }
    }

    /// Set the database column name.
    pub const fn column(mut self, name: &'static str) -> Self {
        self.column_name = name;
        self
    }

    /// Set nullable flag.
    pub const fn nullable(mut self, value: bool) -> Self {
        self.nullable = value;
        self
    }

    /// Set primary key flag.
    pub const fn primary_key(mut self, value: bool) -> Self {
        self.primary_key = value;
        self
    }

    /// Set auto-increment flag.
    pub const fn auto_increment(mut self, value: bool) -> Self {
        self.auto_increment = value;
        self
    }

    /// Set foreign key reference.
    pub const fn foreign_key(mut self, reference: &'static str) -> Self {
        self.foreign_key = Some(reference);
        self
    }

    /// Mark the field as not persisted.
    pub const fn skip(mut self, value: bool) -> Self {
        self.skip = value;
        self
    }

    /// A persisted, non-relation column.
    pub const fn is_normal(&self) -> bool {
        !self.skip
    }
}

/// Column names of the normal fields in `fields`, in declaration order.
pub fn normal_columns(fields: &[FieldInfo]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.is_normal())
        .map(|f| f.column_name.to_string())
        .collect()
}
