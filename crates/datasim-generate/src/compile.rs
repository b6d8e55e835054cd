//! Turns a declarative schema document into a runnable [`Schema`].

use datasim_core::{Error, Result, Value};
use datasim_plan::{FieldDef, FieldEntry, FieldKind, Literal, SchemaDocument};

use crate::fields::{
    BoolField, ChoiceField, DEFAULT_FLOAT_MAX, DEFAULT_FLOAT_MIN, DEFAULT_INT_MAX, DEFAULT_INT_MIN,
    DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_NULL_PROBABILITY, DEFAULT_PRECISION,
    DEFAULT_STR_LENGTH, DateField, DateTimeField, DictField, FieldSpec, FloatField,
    GeneratorRegistry, IntField, ListField, NullableField, SequenceField, StrField, TemplateField,
};
use crate::schema::{Schema, SchemaSettings};

/// Build a schema from `doc`, resolving named custom generators through
/// `registry`.
///
/// Parameter problems surface as validation errors and unknown generator
/// names as configuration errors, both prefixed with the field path.
pub fn compile_document(doc: &SchemaDocument, registry: &GeneratorRegistry) -> Result<Schema> {
    let mut builder = Schema::builder().settings(SchemaSettings {
        count: doc.count,
        seed: doc.seed,
        log: doc.log,
        format: doc.format.clone(),
    });
    for entry in &doc.fields {
        let spec = compile_def(&entry.def, registry).map_err(|err| in_field(&entry.name, err))?;
        builder = builder.field(entry.name.clone(), spec);
    }
    builder.build()
}

fn compile_def(def: &FieldDef, registry: &GeneratorRegistry) -> Result<FieldSpec> {
    let spec = match &def.kind {
        FieldKind::Int { min, max } => {
            let message = "int min and max must be integers";
            FieldSpec::from(IntField::new(
                int_or(min, DEFAULT_INT_MIN, message)?,
                int_or(max, DEFAULT_INT_MAX, message)?,
            )?)
        }
        FieldKind::Float {
            min,
            max,
            precision,
        } => {
            let min = number_or(min, DEFAULT_FLOAT_MIN)?;
            let max = number_or(max, DEFAULT_FLOAT_MAX)?;
            let precision = match precision {
                None => DEFAULT_PRECISION,
                Some(literal) => non_negative(literal, "precision must be a non-negative int")?,
            };
            FieldSpec::from(FloatField::with_precision(min, max, precision)?)
        }
        FieldKind::Str { length } => {
            let length = match length {
                None => DEFAULT_STR_LENGTH,
                Some(literal) => {
                    non_negative::<usize>(literal, "str length must be a non-negative int")?
                }
            };
            FieldSpec::from(StrField::new(length))
        }
        FieldKind::Bool => FieldSpec::from(BoolField),
        FieldKind::Choice { values } => {
            FieldSpec::from(ChoiceField::new(values.iter().map(literal_value))?)
        }
        FieldKind::Date { start, end } => {
            let message = "date start and end must be ISO date strings";
            FieldSpec::from(DateField::parse(
                text(start, message)?,
                text(end, message)?,
            )?)
        }
        FieldKind::DateTime {
            start,
            end,
            timezone,
        } => {
            let message = "datetime start and end must be ISO datetime strings";
            let field = DateTimeField::parse(text(start, message)?, text(end, message)?)?;
            let field = match timezone {
                Some(name) => field.with_timezone(name)?,
                None => field,
            };
            FieldSpec::from(field)
        }
        FieldKind::Sequence { start, step } => {
            let message = "sequence start and step must be integers";
            FieldSpec::from(SequenceField::new(
                int_or(start, 1, message)?,
                int_or(step, 1, message)?,
            ))
        }
        FieldKind::List {
            field,
            min_length,
            max_length,
        } => {
            let message = "list min_length and max_length must be non-negative ints";
            let min_length = match min_length {
                None => DEFAULT_MIN_LENGTH,
                Some(literal) => non_negative(literal, message)?,
            };
            let max_length = match max_length {
                None => DEFAULT_MAX_LENGTH,
                Some(literal) => non_negative(literal, message)?,
            };
            let child = compile_def(field, registry).map_err(|err| in_field("[]", err))?;
            FieldSpec::from(ListField::new(child, min_length, max_length)?)
        }
        FieldKind::Dict { fields } => FieldSpec::from(DictField::new(compile_entries(
            fields, registry,
        )?)?),
        FieldKind::Nullable { field, probability } => {
            let probability = match probability {
                None => DEFAULT_NULL_PROBABILITY,
                Some(literal) => literal.as_f64().ok_or_else(|| {
                    Error::validation("nullable probability must be a number")
                })?,
            };
            let child = compile_def(field, registry).map_err(|err| in_field("?", err))?;
            FieldSpec::from(NullableField::new(child, probability)?)
        }
        FieldKind::Template { template } => FieldSpec::from(TemplateField::new(template)?),
        FieldKind::Custom => {
            let name = def.generator.as_deref().ok_or_else(|| {
                Error::configuration("custom field requires a generator name")
            })?;
            return Ok(FieldSpec::custom(registry.resolve(name)?));
        }
    };

    match &def.generator {
        Some(name) => Ok(spec.with_generator(registry.resolve(name)?)),
        None => Ok(spec),
    }
}

fn compile_entries(
    entries: &[FieldEntry],
    registry: &GeneratorRegistry,
) -> Result<Vec<(String, FieldSpec)>> {
    entries
        .iter()
        .map(|entry| {
            compile_def(&entry.def, registry)
                .map(|spec| (entry.name.clone(), spec))
                .map_err(|err| in_field(&entry.name, err))
        })
        .collect()
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Bool(value) => Value::Bool(*value),
        Literal::Int(value) => Value::Int(*value),
        Literal::Float(value) => Value::Float(*value),
        Literal::Text(value) => Value::Str(value.clone()),
    }
}

fn int_or(literal: &Option<Literal>, default: i64, message: &str) -> Result<i64> {
    match literal {
        None => Ok(default),
        Some(literal) => literal
            .as_i64()
            .ok_or_else(|| Error::validation(message)),
    }
}

fn number_or(literal: &Option<Literal>, default: f64) -> Result<f64> {
    match literal {
        None => Ok(default),
        Some(literal) => literal
            .as_f64()
            .ok_or_else(|| Error::validation("float min and max must be numbers")),
    }
}

fn non_negative<T: TryFrom<i64>>(literal: &Literal, message: &str) -> Result<T> {
    literal
        .as_i64()
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| Error::validation(message))
}

fn text<'a>(literal: &'a Literal, message: &str) -> Result<&'a str> {
    literal.as_str().ok_or_else(|| Error::validation(message))
}

fn in_field(name: &str, err: Error) -> Error {
    match err {
        Error::Validation(message) => Error::Validation(format!("field '{name}': {message}")),
        Error::Configuration(message) => {
            Error::Configuration(format!("field '{name}': {message}"))
        }
        Error::TypeCoercion(message) => Error::TypeCoercion(format!("field '{name}': {message}")),
    }
}
