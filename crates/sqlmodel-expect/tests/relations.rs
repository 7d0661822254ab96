mod common;

use common::*;
use sqlmodel_expect::prelude::*;
use sqlmodel_expect::{Scope, relation_columns, relation_rows, row_for_fields};

fn relationship(name: &str) -> &'static RelationshipInfo {
    User::RELATIONSHIPS
        .iter()
        .find(|r| r.name == name)
        .unwrap()
}

#[test]
fn scope_lists_columns_then_relationships() {
    let user = User::new(1, "jinzhu");
    let scope = Scope::new(&user);

    let names: Vec<&str> = scope.fields().iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        ["id", "name", "age", "company_id", "posts", "profile", "languages", "company"]
    );
    assert!(scope.field_by_name("posts").is_some_and(|f| !f.is_normal));
    assert_eq!(
        scope.relationship("languages").map(|r| r.kind),
        Some(RelationshipKind::ManyToMany)
    );
    assert!(scope.relationship("name").is_none());
    assert_eq!(scope.primary_key_value(), [Value::BigInt(1)]);
    assert_eq!(scope.table_name(), "users");
}

#[test]
fn scope_row_ignores_relationship_fields() {
    let mut user = User::new(4, "ann");
    user.posts = vec![post(1, 4, "x")];
    let scope = Scope::new(&user);

    assert_eq!(scope.row(), row_for_fields(scope.fields()));
    assert_eq!(scope.row().len(), scope.columns().len());
}

#[test]
fn has_many_without_children_yields_columns_only() {
    let user = User::new(1, "a");
    let rows = relation_rows(&user, "posts", relationship("posts"))
        .unwrap()
        .unwrap();

    assert_eq!(rows.columns(), strings(&["id", "user_id", "title"]));
    assert!(rows.is_empty());
}

#[test]
fn many_to_many_row_width_is_related_columns_plus_two() {
    let user = User {
        languages: RelatedMany::loaded(vec![
            language(1, "ZH"),
            language(2, "EN"),
            language(3, "FR"),
        ]),
        ..User::new(9, "a")
    };
    let rel = relationship("languages");
    let rows = relation_rows(&user, "languages", rel).unwrap().unwrap();

    assert_eq!(rows.len(), 3);
    for row in rows.rows() {
        assert_eq!(row.len(), Language::fields().len() + 2);
        assert_eq!(row[2], Value::BigInt(9));
        assert_eq!(row[3], Value::BigInt(0));
    }
    assert_eq!(relation_columns(rel).unwrap(), rows.columns());
}

#[test]
fn many_to_many_not_loaded_is_empty() {
    let user = User::new(9, "a");
    let rows = relation_rows(&user, "languages", relationship("languages"))
        .unwrap()
        .unwrap();
    assert_eq!(rows.columns().len(), 4);
    assert!(rows.is_empty());
}

#[test]
fn belongs_to_has_no_rows() {
    let user = User::new(1, "a");
    let rel = relationship("company");
    assert!(relation_columns(rel).is_none());
    assert!(relation_rows(&user, "company", rel).unwrap().is_none());
}

#[test]
fn composite_link_table_keys() {
    static REL: RelationshipInfo =
        RelationshipInfo::new("languages", "languages", RelationshipKind::ManyToMany)
            .link_table(LinkTableInfo::composite(
                "tenant_user_languages",
                &["tenant_id", "user_id"],
                &["language_id"],
            ))
            .related_fields(Language::fields);

    assert_eq!(
        relation_columns(&REL).unwrap(),
        strings(&["id", "name", "tenant_id", "user_id", "language_id"])
    );

    // The owner key has one column but the link table expects two.
    let user = User {
        languages: RelatedMany::loaded(vec![language(1, "ZH")]),
        ..User::new(9, "a")
    };
    let err = relation_rows(&user, "languages", &REL).unwrap_err();
    assert_eq!(
        err.expectation_kind(),
        Some(sqlmodel_expect::ExpectationErrorKind::RowWidth)
    );
}

#[test]
fn missing_related_fields_fall_back_to_values() {
    static REL: RelationshipInfo =
        RelationshipInfo::new("posts", "posts", RelationshipKind::OneToMany).remote_key("user_id");

    let mut user = User::new(1, "a");
    user.posts = vec![post(3, 1, "t")];
    let rows = relation_rows(&user, "posts", &REL).unwrap().unwrap();

    assert_eq!(rows.columns(), strings(&["id", "user_id", "title"]));
    assert_eq!(rows.len(), 1);
}
