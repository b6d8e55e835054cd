use std::path::{Path, PathBuf};

use datasim_plan::{FieldKind, Literal, PlanError, load_document, parse_json, validate_document};

fn example(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../plans/examples")
        .join(name)
}

#[test]
fn toml_example_loads_in_declaration_order() {
    let doc = load_document(&example("people.toml")).expect("load people.toml");

    assert_eq!(doc.count, 200);
    assert_eq!(doc.seed, Some(42));
    assert_eq!(doc.format, "csv");
    let names: Vec<&str> = doc.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "id", "first_name", "last_name", "full_name", "age", "balance", "active", "signup",
            "last_login", "nickname", "email"
        ]
    );

    let balance = &doc.fields[5].def.kind;
    let FieldKind::Float { min, max, .. } = balance else {
        panic!("balance should be a float field");
    };
    assert_eq!(min, &Some(Literal::Text("0".to_string())));
    assert_eq!(max.as_ref().and_then(Literal::as_f64), Some(5000.0));

    assert_eq!(doc.fields[10].def.generator.as_deref(), Some("email"));

    let report = validate_document(&doc);
    assert!(report.is_ok(), "unexpected errors: {:?}", report.errors);
    assert!(report.warnings.is_empty());
}

#[test]
fn json_example_loads_nested_fields() {
    let doc = load_document(&example("orders.json")).expect("load orders.json");

    assert_eq!(doc.format, "json");
    assert!(!doc.log);
    let FieldKind::List { field, .. } = &doc.fields[2].def.kind else {
        panic!("items should be a list field");
    };
    let FieldKind::Dict { fields } = &field.kind else {
        panic!("list items should be dicts");
    };
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[1].def.kind.type_name(), "int");
}

#[test]
fn defaults_apply_when_settings_are_omitted() {
    let doc = parse_json(r#"{ "fields": [ { "name": "flag", "type": "bool" } ] }"#)
        .expect("parse document");
    assert_eq!(doc.count, 100);
    assert_eq!(doc.seed, None);
    assert!(doc.log);
    assert_eq!(doc.format, "csv");
}

#[test]
fn validation_flags_format_and_forward_references() {
    let doc = parse_json(
        r#"{
            "format": "xml",
            "fields": [
                { "name": "greeting", "type": "template", "template": "hi {name}" },
                { "name": "name", "type": "str" },
                { "name": "picked", "type": "custom" }
            ]
        }"#,
    )
    .expect("parse document");

    let report = validate_document(&doc);
    let codes: Vec<&str> = report.errors.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["unsupported_format", "missing_generator"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, "forward_reference");
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load_document(&example("people.toml").with_extension("yaml"))
        .expect_err("unsupported extension");
    assert!(matches!(err, PlanError::Schema(_)));
}
