use serde_json::{json, Map, Value};

use crate::errors::IssueKind;
use crate::record::IdStrategy;
use crate::resource::{all_resources, crud_resources};
use crate::validation::{validate, validate_partial};
use crate::{book, movie, product, task, user, RecordId};

fn obj(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

fn sample_movie() -> Map<String, Value> {
    obj(json!({
        "name": "Arrival",
        "language": "English",
        "description": "Linguist meets heptapods",
        "duration": 116,
        "releaseYear": 2016,
        "genres": ["Drama", "Sci-Fi"],
        "directors": ["Denis Villeneuve"],
        "coverImage": "arrival.jpg",
        "actors": ["Amy Adams"],
        "price": 12.5
    }))
}

#[test]
fn catalogue_names_are_unique() {
    let names: Vec<_> = all_resources().iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["tasks", "books", "products", "movies", "users"]);
    assert!(crud_resources().iter().all(|r| r.name != "users"));
}

#[test]
fn sequential_and_uuid_strategies() {
    assert_eq!(task::definition().id_strategy, IdStrategy::Sequential);
    assert_eq!(book::definition().id_strategy, IdStrategy::Sequential);
    assert_eq!(product::definition().id_strategy, IdStrategy::Sequential);
    assert_eq!(movie::definition().id_strategy, IdStrategy::Uuid);
    assert_eq!(user::definition().id_strategy, IdStrategy::Uuid);
    assert_eq!(movie::definition().default_page_size, Some(5));
}

#[test]
fn task_requires_title() {
    let spec = task::spec();
    assert!(validate(&obj(json!({"title": "study mongodb"})), &spec).is_ok());
    let err = validate(&obj(json!({"title": ""})), &spec).unwrap_err();
    assert_eq!(err.missing_fields, vec!["title"]);
}

#[test]
fn task_update_with_empty_status_is_accepted_but_empty_title_is_not() {
    let spec = task::spec();
    let id = RecordId::Int(3);
    assert!(validate_partial(&obj(json!({"status": "Complete"})), &spec, &id).is_ok());
    let err = validate_partial(&obj(json!({"title": ""})), &spec, &id).unwrap_err();
    assert_eq!(err.missing_fields, vec!["title"]);
}

#[test]
fn book_requires_title_author_year() {
    let err = validate(&obj(json!({"title": "book title"})), &book::spec()).unwrap_err();
    assert_eq!(err.missing_fields, vec!["author", "year"]);
    assert!(validate(&obj(json!({"title": "t", "author": "Ali", "year": 2025})), &book::spec()).is_ok());
}

#[test]
fn product_requires_name_and_price() {
    let err = validate(&obj(json!({"productName": "Pen", "price": "cheap"})), &product::spec()).unwrap_err();
    assert!(err.missing_fields.is_empty());
    assert_eq!(err.invalid_fields[0].field, "price");
}

#[test]
fn movie_schema_accepts_sample_and_rejects_language() {
    let spec = movie::spec();
    assert!(validate(&sample_movie(), &spec).is_ok());

    let mut bad = sample_movie();
    bad.insert("language".into(), json!("Klingon"));
    let err = validate(&bad, &spec).unwrap_err();
    assert!(matches!(err.invalid_fields[0].issue, IssueKind::NotAllowed { .. }));

    let mut missing = sample_movie();
    missing.remove("actors");
    missing.remove("price");
    let err = validate(&missing, &spec).unwrap_err();
    assert_eq!(err.missing_fields, vec!["actors", "price"]);
}

#[test]
fn user_schema_checks_email_and_password() {
    let spec = user::spec();
    let err = validate(&obj(json!({"name": "Ali", "email": "ali", "password": "1234"})), &spec).unwrap_err();
    let fields: Vec<_> = err.invalid_fields.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["email", "password"]);
}
