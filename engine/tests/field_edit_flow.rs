//! End-to-end field edit scenarios across the whole engine

#![allow(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::time::Duration;

use formgraph::form::FormBinding;
use formgraph::{FormContext, FormOptions, ScalarConverters, SchemaDocument, TypeDescriptors};
use serde_json::{Value, json};

fn document() -> Arc<SchemaDocument> {
    Arc::new(
        SchemaDocument::from_json(json!({
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "DomainType",
                    "fields": [
                        {"name": "id", "type": {"kind": "SCALAR", "name": "Int"}},
                        {"name": "name", "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "String"}}},
                        {"name": "count", "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "Int"}}},
                        {"name": "price", "type": {"kind": "SCALAR", "name": "Currency"}},
                        {"name": "fields", "type": {"kind": "LIST", "ofType": {"kind": "OBJECT", "name": "FieldSpec"}}}
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "FieldSpec",
                    "fields": [
                        {"name": "maxLength", "type": {"kind": "SCALAR", "name": "Int"}}
                    ]
                },
                {"kind": "SCALAR", "name": "Int"},
                {"kind": "SCALAR", "name": "String"},
                {"kind": "SCALAR", "name": "Currency"}
            ]
        }))
        .unwrap(),
    )
}

fn root_value() -> Value {
    json!({
        "_type": "DomainType",
        "id": 1,
        "name": "widget",
        "count": 5,
        "price": 19_999,
        "fields": [{"_type": "FieldSpec", "maxLength": 10}]
    })
}

fn mount(context: &FormContext, options: FormOptions) -> FormBinding {
    let root_id = context.assign_root();
    FormBinding::new(
        document(),
        Arc::new(ScalarConverters::builtin()),
        Arc::new(TypeDescriptors::new()),
        context.clone(),
        "DomainType",
        &root_value(),
        root_id,
        options,
    )
    .unwrap()
}

#[test]
fn clearing_a_required_field_stores_the_required_error() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());

    let outcome = form.handle_change("name", "").unwrap();
    assert!(!outcome.committed);
    assert_eq!(outcome.messages, vec!["DomainType.name:Field Required".to_string()]);

    let stored = context.find_error(form.root_id(), "name");
    assert_eq!(
        stored,
        vec!["".to_string(), "DomainType.name:Field Required".to_string()]
    );
    // The previous committed value is untouched
    assert_eq!(form.working_copy()["name"], json!("widget"));
}

#[test]
fn invalid_integer_preserves_the_raw_keystrokes() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());

    let outcome = form.handle_change("count", "1a").unwrap();
    assert!(!outcome.committed);
    assert_eq!(outcome.messages, vec!["Invalid Integer".to_string()]);
    assert_eq!(form.working_copy()["count"], json!(5));

    // The field context redisplays the raw input, not the committed value
    let field = form.field("count").unwrap();
    assert_eq!(field.editable_value, json!("1a"));
    assert_eq!(field.messages, vec!["Invalid Integer".to_string()]);
}

#[test]
fn a_valid_edit_commits_and_clears_the_error() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());

    form.handle_change("count", "1a").unwrap();
    let outcome = form.handle_change("count", "42").unwrap();
    assert!(outcome.committed);
    assert!(outcome.messages.is_empty());
    assert_eq!(form.working_copy()["count"], json!(42));
    assert!(context.find_error(form.root_id(), "count").is_empty());
}

#[test]
fn currency_edits_round_trip_through_the_fixed_locale() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());

    let field = form.field("price").unwrap();
    assert_eq!(field.editable_value, json!("2.00"));

    let outcome = form.handle_change("price", "3.25").unwrap();
    assert!(outcome.committed);
    assert_eq!(form.working_copy()["price"], json!(32_500));
}

#[test]
fn list_indexed_paths_edit_the_addressed_element() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());

    let outcome = form.handle_change("fields.0.maxLength", "64").unwrap();
    assert!(outcome.committed);
    assert_eq!(form.working_copy()["fields"][0]["maxLength"], json!(64));
}

#[test]
fn external_errors_seed_the_committed_editable_value() {
    let context = FormContext::new();
    let form = mount(&context, FormOptions::default());

    form.add_error("name", "Name already taken").unwrap();
    let stored = context.find_error(form.root_id(), "name");
    assert_eq!(
        stored,
        vec!["widget".to_string(), "Name already taken".to_string()]
    );

    // Redisplay keeps the committed value visible
    let field = form.field("name").unwrap();
    assert_eq!(field.editable_value, json!("widget"));
    assert_eq!(field.messages, vec!["Name already taken".to_string()]);
}

#[test]
fn unresolvable_fields_are_configuration_errors() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());
    assert!(form.handle_change("ghost", "x").is_err());
    // Nothing was stored as a field error
    assert!(!context.errors().has_errors());
}

#[test]
fn sibling_forms_on_distinct_roots_are_isolated() {
    let context = FormContext::new();
    let mut first = mount(&context, FormOptions::default());
    let mut second = mount(&context, FormOptions::default());

    first.handle_change("count", "bad").unwrap();
    second.handle_change("count", "also bad").unwrap();

    assert_eq!(context.find_error(first.root_id(), "count")[0], "bad");
    assert_eq!(context.find_error(second.root_id(), "count")[0], "also bad");
    assert_eq!(context.errors().all_errors().len(), 2);
}

#[test]
fn unmount_reclaims_errors_and_cancels_submit() {
    let context = FormContext::new();
    let options = FormOptions {
        validator:   None,
        auto_submit: Some(Duration::from_millis(150)),
    };
    let mut form = mount(&context, options);

    form.handle_change("count", "bad").unwrap();
    let outcome = form.handle_change("name", "renamed").unwrap();
    let ticket = outcome.submit.unwrap();

    form.unmount();
    assert!(!context.errors().has_errors());
    // A dangling timer firing after teardown is a no-op
    assert!(!form.debouncer().fire(ticket));
}

#[test]
fn interim_edits_supersede_pending_submits() {
    let context = FormContext::new();
    let options = FormOptions {
        validator:   None,
        auto_submit: Some(Duration::from_millis(150)),
    };
    let mut form = mount(&context, options);

    let first = form.handle_change("name", "a").unwrap().submit.unwrap();
    let second = form.handle_change("name", "ab").unwrap().submit.unwrap();
    assert!(!form.debouncer().fire(first));
    assert!(form.debouncer().fire(second));
}

#[test]
fn high_level_validator_messages_are_appended_and_block_commit() {
    let context = FormContext::new();
    let options = FormOptions {
        validator:   Some(std::rc::Rc::new(|info, raw| {
            if info.qualified_path == "DomainType.name" && raw.len() > 8 {
                vec!["Name too long".to_string()]
            } else {
                Vec::new()
            }
        })),
        auto_submit: None,
    };
    let mut form = mount(&context, options);

    let outcome = form.handle_change("name", "unreasonably long").unwrap();
    assert!(!outcome.committed);
    assert_eq!(outcome.messages, vec!["Name too long".to_string()]);
    assert_eq!(form.working_copy()["name"], json!("widget"));

    let outcome = form.handle_change("name", "short").unwrap();
    assert!(outcome.committed);
    assert_eq!(form.working_copy()["name"], json!("short"));
}

#[test]
fn commit_writes_the_working_copy_back_onto_the_original() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());
    let mut original = root_value();

    form.handle_change("name", "renamed").unwrap();
    form.handle_change("count", "9").unwrap();
    form.commit_to(&mut original).unwrap();

    assert_eq!(original["name"], json!("renamed"));
    assert_eq!(original["count"], json!(9));
    assert_eq!(original["id"], json!(1));
}

#[test]
fn discarding_a_form_leaves_the_original_untouched() {
    let context = FormContext::new();
    let mut form = mount(&context, FormOptions::default());
    let original = root_value();

    form.handle_change("name", "renamed").unwrap();
    drop(form);
    assert_eq!(original["name"], json!("widget"));
}
