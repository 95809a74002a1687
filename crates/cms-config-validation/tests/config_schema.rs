use cms_config_validation::{ViolationKind, validate_config};
use serde_json::{Value, json};

fn report(document: Value) -> String {
    match validate_config(&document) {
        Ok(()) => String::new(),
        Err(error) => error.to_string(),
    }
}

fn base() -> Value {
    json!({"backend": {"name": "bar"}, "media_folder": "baz"})
}

fn with_collections(collections: Value) -> Value {
    let mut document = base();
    document["collections"] = collections;
    document
}

#[test]
fn empty_document_reports_every_root_requirement() {
    assert_eq!(
        report(json!({})),
        "config should have required property 'backend'\n\
         config should have required property 'collections'\n\
         config should have required property 'media_folder'\n\
         config should have required property 'media_library'\n\
         config should match some schema in anyOf"
    );
}

#[test]
fn backend_without_name() {
    assert_eq!(
        report(json!({"backend": {}})),
        "'backend' should have required property 'name'\n\
         config should have required property 'collections'\n\
         config should have required property 'media_folder'\n\
         config should have required property 'media_library'\n\
         config should match some schema in anyOf"
    );
}

#[test]
fn empty_collections() {
    assert_eq!(
        report(with_collections(json!([]))),
        "'collections' should NOT have less than 1 items"
    );
}

#[test]
fn valid_folder_collection() {
    let document = with_collections(json!([{
        "name": "foo",
        "label": "Foo",
        "folder": "bar",
        "fields": [{"name": "title"}],
    }]));
    assert!(validate_config(&document).is_ok());
}

#[test]
fn identifier_field_not_among_fields() {
    let document = with_collections(json!([{
        "name": "foo",
        "label": "Foo",
        "folder": "bar",
        "identifier_field": "baz",
        "fields": [{"name": "title"}],
    }]));
    assert_eq!(
        report(document),
        "'collections[0]' must have a field named \"baz\"\n\
         'collections[0]' should match \"then\" schema"
    );
}

#[test]
fn collection_without_folder_or_files() {
    let document = with_collections(json!([{
        "name": "foo",
        "label": "Foo",
        "fields": [{"name": "title"}],
    }]));
    assert_eq!(
        report(document),
        "'collections[0]' should have required property 'files'\n\
         'collections[0]' should have required property 'folder'\n\
         'collections[0]' should match exactly one schema in oneOf"
    );
}

#[test]
fn backend_name_not_a_string() {
    insta::assert_snapshot!(report(json!({"backend": {"name": {}}})), @r"
    'backend.name' should be string
    config should have required property 'collections'
    config should have required property 'media_folder'
    config should have required property 'media_library'
    config should match some schema in anyOf
    ");
}

#[test]
fn media_folder_missing() {
    insta::assert_snapshot!(report(json!({"backend": {"name": "bar"}})), @r"
    config should have required property 'collections'
    config should have required property 'media_folder'
    config should have required property 'media_library'
    config should match some schema in anyOf
    ");
}

#[test]
fn media_folder_not_a_string() {
    let document = json!({"backend": {"name": "bar"}, "media_folder": {}});
    insta::assert_snapshot!(report(document), @r"
    'media_folder' should be string
    config should have required property 'collections'
    ");
}

#[test]
fn collections_missing() {
    insta::assert_snapshot!(report(base()), @"config should have required property 'collections'");
}

#[test]
fn collections_not_an_array() {
    insta::assert_snapshot!(report(with_collections(json!({}))), @"'collections' should be array");
}

#[test]
fn collections_with_single_null() {
    insta::assert_snapshot!(report(with_collections(json!([null]))), @r"
    'collections[0]' should be object
    'collections[0]' should match exactly one schema in oneOf
    ");
}

#[test]
fn collection_without_name() {
    let document = with_collections(json!([{
        "label": "Foo",
        "folder": "bar",
        "fields": [{"name": "title"}],
    }]));
    insta::assert_snapshot!(report(document), @"'collections[0]' should have required property 'name'");
}

#[test]
fn collection_without_label() {
    let document = with_collections(json!([{
        "name": "foo",
        "folder": "bar",
        "fields": [{"name": "title"}],
    }]));
    insta::assert_snapshot!(report(document), @"'collections[0]' should have required property 'label'");
}

#[test]
fn default_identifier_fields_are_accepted() {
    for identifier in ["title", "path"] {
        let document = with_collections(json!([{
            "name": "foo",
            "label": "Foo",
            "folder": "bar",
            "fields": [{"name": identifier}],
        }]));
        assert!(validate_config(&document).is_ok(), "{identifier}");
    }
}

#[test]
fn custom_identifier_field_is_accepted() {
    let document = with_collections(json!([{
        "name": "foo",
        "label": "Foo",
        "folder": "bar",
        "identifier_field": "baz",
        "fields": [{"name": "baz"}],
    }]));
    assert!(validate_config(&document).is_ok());
}

#[test]
fn extra_root_keys_are_allowed() {
    let mut document = with_collections(json!([{
        "name": "posts",
        "label": "Posts",
        "folder": "_posts",
        "fields": [{"name": "title"}],
    }]));
    document["foo"] = json!("bar");
    assert!(validate_config(&document).is_ok());
}

#[test]
fn field_without_name_is_located_precisely() {
    let document = with_collections(json!([{
        "name": "posts",
        "label": "Posts",
        "folder": "_posts",
        "fields": [{"name": "title"}, {"widget": "markdown"}],
    }]));
    insta::assert_snapshot!(report(document), @"'collections[0].fields[1]' should have required property 'name'");
}

#[test]
fn violations_are_reported_for_every_collection() {
    let document = with_collections(json!([
        {"name": "a", "folder": "a", "fields": [{"name": "title"}]},
        {"name": "b", "label": "B", "files": [], "folder": "b", "fields": []},
    ]));
    insta::assert_snapshot!(report(document), @r"
    'collections[0]' should have required property 'label'
    'collections[1]' should match exactly one schema in oneOf
    ");
}

#[test]
fn structured_violations_accompany_the_report() {
    let error = validate_config(&json!({})).unwrap_err();

    let keywords: Vec<&str> = error.violations().iter().map(|v| v.keyword()).collect();
    assert_eq!(
        keywords,
        ["required", "required", "required", "required", "anyOf"]
    );
    assert_eq!(error.violations()[4].kind, ViolationKind::AnyOfFailed);
    assert_eq!(error.lines().len(), 5);
}
