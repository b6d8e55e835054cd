use serde::{Deserialize, Serialize};

fn default_count() -> usize {
    100
}

fn default_log() -> bool {
    true
}

fn default_format() -> String {
    "csv".to_string()
}

/// Top-level schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Number of rows to generate.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Optional seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Emit progress events while generating.
    #[serde(default = "default_log")]
    pub log: bool,
    /// Default output format (`csv` or `json`).
    #[serde(default = "default_format")]
    pub format: String,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

/// A named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(flatten)]
    pub def: FieldDef,
}

/// A field rule with an optional named custom generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Registered custom generator replacing the default rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
}

/// Field rule union, tagged by `type`.
///
/// Numeric parameters are kept as [`Literal`]s so that type mismatches are
/// reported as validation errors by the compiler rather than parse errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Int {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Literal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Literal>,
    },
    Float {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Literal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Literal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        precision: Option<Literal>,
    },
    Str {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<Literal>,
    },
    Bool,
    Choice {
        values: Vec<Literal>,
    },
    Date {
        start: Literal,
        end: Literal,
    },
    #[serde(rename = "datetime")]
    DateTime {
        start: Literal,
        end: Literal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    Sequence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<Literal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<Literal>,
    },
    List {
        field: Box<FieldDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<Literal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<Literal>,
    },
    Dict {
        fields: Vec<FieldEntry>,
    },
    Nullable {
        field: Box<FieldDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        probability: Option<Literal>,
    },
    /// String rendered from earlier values of the row.
    Template {
        template: String,
    },
    /// Values come only from the `generator` named on the field.
    Custom,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Int { .. } => "int",
            FieldKind::Float { .. } => "float",
            FieldKind::Str { .. } => "str",
            FieldKind::Bool => "bool",
            FieldKind::Choice { .. } => "choice",
            FieldKind::Date { .. } => "date",
            FieldKind::DateTime { .. } => "datetime",
            FieldKind::Sequence { .. } => "sequence",
            FieldKind::List { .. } => "list",
            FieldKind::Dict { .. } => "dict",
            FieldKind::Nullable { .. } => "nullable",
            FieldKind::Template { .. } => "template",
            FieldKind::Custom => "custom",
        }
    }
}

/// Scalar literal as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    /// Integer value; floats and strings are not integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Real value, coercing integers and numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(value) => Some(*value as f64),
            Literal::Float(value) => Some(*value),
            Literal::Text(value) => value.trim().parse().ok(),
            Literal::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}
