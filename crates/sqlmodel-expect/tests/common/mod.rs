#![allow(dead_code)]

use sqlmodel_expect::prelude::*;
use sqlmodel_expect::{Association, Entity};

// ---------------------------------------------------------------------------
// Fixture models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

impl Model for Post {
    const TABLE_NAME: &'static str = "posts";
    const PRIMARY_KEY: &'static [&'static str] = &["id"];

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("id", "id").primary_key(true),
            FieldInfo::new("user_id", "user_id").foreign_key("users.id"),
            FieldInfo::new("title", "title"),
        ];
        FIELDS
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(self.id)),
            ("user_id", Value::from(self.user_id)),
            ("title", Value::from(self.title.as_str())),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            user_id: row.get_named("user_id")?,
            title: row.get_named("title")?,
        })
    }

    fn primary_key_value(&self) -> Vec<Value> {
        vec![Value::from(self.id)]
    }

    fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl Preload for Post {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub bio: Option<String>,
}

impl Model for Profile {
    const TABLE_NAME: &'static str = "profiles";
    const PRIMARY_KEY: &'static [&'static str] = &["id"];

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("id", "id").primary_key(true),
            FieldInfo::new("user_id", "user_id"),
            FieldInfo::new("bio", "bio").nullable(true),
        ];
        FIELDS
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(self.id)),
            ("user_id", Value::from(self.user_id)),
            ("bio", Value::from(self.bio.clone())),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            user_id: row.get_named("user_id")?,
            bio: row.get_named("bio")?,
        })
    }

    fn primary_key_value(&self) -> Vec<Value> {
        vec![Value::from(self.id)]
    }

    fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl Preload for Profile {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Language {
    pub id: i64,
    pub name: String,
}

impl Model for Language {
    const TABLE_NAME: &'static str = "languages";
    const PRIMARY_KEY: &'static [&'static str] = &["id"];

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("id", "id").primary_key(true),
            FieldInfo::new("name", "name"),
        ];
        FIELDS
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(self.id)),
            ("name", Value::from(self.name.as_str())),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            name: row.get_named("name")?,
        })
    }

    fn primary_key_value(&self) -> Vec<Value> {
        vec![Value::from(self.id)]
    }

    fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl Preload for Language {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

impl Model for Company {
    const TABLE_NAME: &'static str = "companies";
    const PRIMARY_KEY: &'static [&'static str] = &["id"];

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("id", "id").primary_key(true),
            FieldInfo::new("name", "name"),
        ];
        FIELDS
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(self.id)),
            ("name", Value::from(self.name.as_str())),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            name: row.get_named("name")?,
        })
    }

    fn primary_key_value(&self) -> Vec<Value> {
        vec![Value::from(self.id)]
    }

    fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl Preload for Company {}

#[derive(Debug, Clone, Default)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub company_id: Option<i64>,
    pub posts: Vec<Post>,
    pub profile: Related<Profile>,
    pub languages: RelatedMany<Language>,
    pub company: Related<Company>,
}

impl User {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            age: 30,
            ..Self::default()
        }
    }
}

impl Model for User {
    const TABLE_NAME: &'static str = "users";
    const PRIMARY_KEY: &'static [&'static str] = &["id"];
    const RELATIONSHIPS: &'static [RelationshipInfo] = &[
        RelationshipInfo::new("posts", "posts", RelationshipKind::OneToMany)
            .remote_key("user_id")
            .related_fields(Post::fields),
        RelationshipInfo::new("profile", "profiles", RelationshipKind::OneToOne)
            .remote_key("user_id")
            .related_fields(Profile::fields),
        RelationshipInfo::new("languages", "languages", RelationshipKind::ManyToMany)
            .link_table(LinkTableInfo::new(
                "user_languages",
                "user_id",
                "language_id",
            ))
            .related_fields(Language::fields),
        RelationshipInfo::new("company", "companies", RelationshipKind::ManyToOne)
            .local_key("company_id")
            .related_fields(Company::fields),
    ];

    fn fields() -> &'static [FieldInfo] {
        static FIELDS: &[FieldInfo] = &[
            FieldInfo::new("id", "id").primary_key(true),
            FieldInfo::new("name", "name"),
            FieldInfo::new("age", "age"),
            FieldInfo::new("company_id", "company_id").nullable(true),
        ];
        FIELDS
    }

    fn to_row(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("id", Value::from(self.id)),
            ("name", Value::from(self.name.as_str())),
            ("age", Value::from(self.age)),
            ("company_id", Value::from(self.company_id)),
        ]
    }

    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get_named("id")?,
            name: row.get_named("name")?,
            age: row.get_named("age")?,
            company_id: row.get_named("company_id")?,
            ..Self::default()
        })
    }

    fn primary_key_value(&self) -> Vec<Value> {
        vec![Value::from(self.id)]
    }

    fn is_new(&self) -> bool {
        self.id == 0
    }
}

impl Preload for User {
    fn association(&self, field: &str) -> Option<Association<'_>> {
        match field {
            "posts" => Some(Association::many(&self.posts)),
            "profile" => Some((&self.profile).into()),
            "languages" => Some((&self.languages).into()),
            "company" => Some((&self.company).into()),
            _ => None,
        }
    }
}

pub fn post(id: i64, user_id: i64, title: &str) -> Post {
    Post {
        id,
        user_id,
        title: title.to_string(),
    }
}

pub fn language(id: i64, name: &str) -> Language {
    Language {
        id,
        name: name.to_string(),
    }
}

pub fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Recording ORM handle
// ---------------------------------------------------------------------------

/// Minimal ORM handle that turns query-building calls into SQL text.
#[derive(Debug, Default)]
pub struct FakeOrm {
    table: Option<String>,
    wheres: Vec<(String, Vec<Value>)>,
    preloads: Vec<String>,
    order: Option<String>,
    limit: Option<i64>,
}

impl FakeOrm {
    fn terminal(
        &mut self,
        method: &str,
        table: &str,
        conds: &[Value],
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch {
        let table = self.table.take().unwrap_or_else(|| table.to_string());
        let mut args = Vec::new();
        let mut clauses = Vec::new();
        for (query, values) in self.wheres.drain(..) {
            clauses.push(query);
            args.extend(values);
        }
        if !conds.is_empty() {
            clauses.push(format!("\"{table}\".\"id\" = ?"));
            args.extend(conds.iter().cloned());
        }

        let mut sql = if method == "Count" {
            format!("SELECT count(*) FROM \"{table}\"")
        } else {
            format!("SELECT * FROM \"{table}\"")
        };
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        match method {
            "First" => sql.push_str(&format!(" ORDER BY \"{table}\".\"id\" ASC LIMIT 1")),
            "Last" => sql.push_str(&format!(" ORDER BY \"{table}\".\"id\" DESC LIMIT 1")),
            _ => {
                if let Some(order) = self.order.take() {
                    sql.push_str(&format!(" ORDER BY {order}"));
                }
                if let Some(limit) = self.limit.take() {
                    sql.push_str(&format!(" LIMIT {limit}"));
                }
            }
        }
        recorder.record(RecordedStatement::new(sql).args(args));

        let preloads = std::mem::take(&mut self.preloads);
        if cx.returns_nil_rows() {
            return Dispatch::Applied;
        }
        let keys: Vec<Value> = cx.primary_keys().into_iter().flatten().collect();
        for field in preloads {
            let relationship = cx
                .scope()
                .and_then(|s| s.relationship(&field))
                .or_else(|| cx.destination().sequence_relationship(&field));
            let placeholders = vec!["?"; keys.len().max(1)].join(",");
            let sql = match relationship {
                Some(rel) if rel.kind == RelationshipKind::ManyToMany && rel.link_table.is_some() => {
                    let link = rel.link_table.unwrap();
                    format!(
                        "SELECT * FROM \"{}\" INNER JOIN \"{}\" ON \"{}\".\"{}\" = \"{}\".\"id\" WHERE \"{}\".\"{}\" IN ({placeholders})",
                        rel.related_table,
                        link.table_name,
                        link.table_name,
                        link.remote_column,
                        rel.related_table,
                        link.table_name,
                        link.local_column,
                    )
                }
                Some(rel) if rel.kind == RelationshipKind::ManyToOne => format!(
                    "SELECT * FROM \"{}\" WHERE \"id\" IN ({placeholders})",
                    rel.related_table
                ),
                Some(rel) => format!(
                    "SELECT * FROM \"{}\" WHERE \"{}\" IN ({placeholders})",
                    rel.related_table,
                    rel.remote_key.unwrap_or("id"),
                ),
                None => format!("SELECT * FROM \"{field}\""),
            };
            // A belongs_to preload looks up the owner's foreign key, which
            // only a single resolved value can supply.
            let args = match (relationship, cx.resolved()) {
                (Some(rel), Some(owner)) if rel.kind == RelationshipKind::ManyToOne => owner
                    .values()
                    .into_iter()
                    .filter(|(name, _)| Some(*name) == rel.local_key)
                    .map(|(_, value)| value)
                    .collect(),
                _ => keys.clone(),
            };
            recorder.record(
                RecordedStatement::new(sql)
                    .args(args)
                    .preload(field),
            );
        }
        Dispatch::Applied
    }
}

impl QueryHandle for FakeOrm {
    fn unary(
        &mut self,
        method: &str,
        arg: &Value,
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch {
        match method {
            "Preload" => match arg.as_str() {
                Some(field) => {
                    self.preloads.push(field.to_string());
                    Dispatch::Applied
                }
                None => Dispatch::Unsupported,
            },
            "Model" => {
                self.table = arg.as_str().map(ToString::to_string);
                Dispatch::Applied
            }
            "Order" => {
                self.order = arg.as_str().map(ToString::to_string);
                Dispatch::Applied
            }
            "Limit" => {
                self.limit = arg.as_i64();
                Dispatch::Applied
            }
            "First" | "Find" | "Last" | "Count" => match arg.as_str() {
                Some(table) => self.terminal(method, table, &[], cx, recorder),
                None => Dispatch::Unsupported,
            },
            _ => Dispatch::Unsupported,
        }
    }

    fn variadic(
        &mut self,
        method: &str,
        arg: &Value,
        rest: &[Value],
        cx: &ExpectContext<'_>,
        recorder: &mut Recorder,
    ) -> Dispatch {
        match (method, arg.as_str()) {
            ("Where", Some(query)) => {
                self.wheres.push((query.to_string(), rest.to_vec()));
                Dispatch::Applied
            }
            ("First" | "Find" | "Last", Some(table)) => {
                self.terminal(method, table, rest, cx, recorder)
            }
            _ => Dispatch::Unsupported,
        }
    }
}

/// A handle that never records anything.
#[derive(Debug, Default)]
pub struct SilentOrm;

impl QueryHandle for SilentOrm {
    fn unary(&mut self, _: &str, _: &Value, _: &ExpectContext<'_>, _: &mut Recorder) -> Dispatch {
        Dispatch::Applied
    }

    fn variadic(
        &mut self,
        _: &str,
        _: &Value,
        _: &[Value],
        _: &ExpectContext<'_>,
        _: &mut Recorder,
    ) -> Dispatch {
        Dispatch::Applied
    }
}

pub type Registrations = Vec<(RecordedStatement, RowSet)>;

pub fn expecter() -> Expecter<FakeOrm, Registrations> {
    Expecter::new(FakeOrm::default(), Vec::new())
}
