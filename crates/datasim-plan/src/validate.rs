use std::collections::HashSet;

use crate::errors::{ValidationIssue, ValidationReport};
use crate::model::{FieldDef, FieldEntry, FieldKind, SchemaDocument};

const SUPPORTED_FORMATS: &[&str] = &["csv", "json"];

/// Structural checks that do not need a generator registry.
///
/// Parameter ranges are checked when the document is compiled; this pass
/// reports naming problems, obviously empty rules and template references
/// to fields that are not generated yet.
pub fn validate_document(doc: &SchemaDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !SUPPORTED_FORMATS.contains(&doc.format.as_str()) {
        report.push(
            ValidationIssue::error(
                "unsupported_format",
                "/format",
                format!("unsupported file format: {}", doc.format),
            )
            .with_hint("use \"csv\" or \"json\""),
        );
    }

    if doc.count == 0 {
        report.push(ValidationIssue::warning(
            "empty_dataset",
            "/count",
            "count is 0; the output will contain no rows",
        ));
    }

    validate_entries(&doc.fields, "/fields", &mut report);
    validate_template_order(&doc.fields, &mut report);
    report
}

fn validate_entries(entries: &[FieldEntry], path: &str, report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for (idx, entry) in entries.iter().enumerate() {
        let entry_path = format!("{path}/{idx}");
        if entry.name.trim().is_empty() {
            report.push(ValidationIssue::error(
                "empty_name",
                format!("{entry_path}/name"),
                "field name cannot be empty",
            ));
        } else if !seen.insert(entry.name.as_str()) {
            report.push(ValidationIssue::error(
                "duplicate_name",
                format!("{entry_path}/name"),
                format!("duplicate field name '{}'", entry.name),
            ));
        }
        validate_def(&entry.def, &entry_path, report);
    }
}

fn validate_def(def: &FieldDef, path: &str, report: &mut ValidationReport) {
    match &def.kind {
        FieldKind::Custom if def.generator.is_none() => {
            report.push(
                ValidationIssue::error(
                    "missing_generator",
                    format!("{path}/generator"),
                    "custom field requires a generator name",
                )
                .with_hint("set generator = \"<registered name>\""),
            );
        }
        FieldKind::Choice { values } if values.is_empty() => {
            report.push(ValidationIssue::error(
                "empty_choice",
                format!("{path}/values"),
                "choice values cannot be empty",
            ));
        }
        FieldKind::List { field, .. } | FieldKind::Nullable { field, .. } => {
            validate_def(field, &format!("{path}/field"), report);
        }
        FieldKind::Dict { fields } => {
            validate_entries(fields, &format!("{path}/fields"), report);
        }
        _ => {}
    }
}

fn validate_template_order(entries: &[FieldEntry], report: &mut ValidationReport) {
    for (idx, entry) in entries.iter().enumerate() {
        let FieldKind::Template { template } = &entry.def.kind else {
            continue;
        };
        for column in placeholder_names(template) {
            let declared_before = entries[..idx].iter().any(|other| other.name == column);
            if !declared_before {
                report.push(
                    ValidationIssue::warning(
                        "forward_reference",
                        format!("/fields/{idx}/template"),
                        format!(
                            "template of '{}' reads '{column}', which is not generated before it",
                            entry.name
                        ),
                    )
                    .with_hint("declare referenced fields earlier; missing values render empty"),
                );
            }
        }
    }
}

fn placeholder_names(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template.replace("{{", "").replace("}}", "");
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let name = rest[open + 1..open + close].trim().to_string();
        if !name.is_empty() {
            names.push(name);
        }
        rest = rest[open + close + 1..].to_string();
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_toml;

    #[test]
    fn placeholder_names_skip_escaped_braces() {
        assert_eq!(
            placeholder_names("{{literal}} {first} and { last }"),
            vec!["first".to_string(), "last".to_string()]
        );
    }

    #[test]
    fn reports_duplicates_in_nested_dicts() {
        let doc = parse_toml(
            r#"
            [[fields]]
            name = "address"
            type = "dict"

            [[fields.fields]]
            name = "city"
            type = "str"

            [[fields.fields]]
            name = "city"
            type = "bool"
            "#,
        )
        .expect("parse document");

        let report = validate_document(&doc);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "duplicate_name");
        assert_eq!(report.errors[0].path, "/fields/0/fields/1/name");
    }

    #[test]
    fn format_must_be_an_exact_identifier() {
        let doc = parse_toml("format = \"CSV\"").expect("parse document");
        let report = validate_document(&doc);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "unsupported_format");
    }
}
