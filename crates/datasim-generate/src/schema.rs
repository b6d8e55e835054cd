use serde::{Deserialize, Serialize};

use datasim_core::{Error, Result};

use crate::fields::FieldSpec;

pub const DEFAULT_COUNT: usize = 100;
pub const DEFAULT_FORMAT: &str = "csv";

/// Scalar generation settings carried by a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSettings {
    /// Number of rows to generate.
    pub count: usize,
    /// Seed for the run's random source; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Emit progress events while generating.
    pub log: bool,
    /// Default output format identifier.
    pub format: String,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: None,
            log: true,
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

/// Ordered field definitions plus generation settings.
///
/// Declaration order is evaluation order: a field can read every field
/// declared before it from the row context.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<(String, FieldSpec)>,
    settings: SchemaSettings,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[(String, FieldSpec)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, spec)| spec)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn settings(&self) -> &SchemaSettings {
        &self.settings
    }

    pub fn count(&self) -> usize {
        self.settings.count
    }

    pub fn seed(&self) -> Option<u64> {
        self.settings.seed
    }

    pub fn log(&self) -> bool {
        self.settings.log
    }

    pub fn format(&self) -> &str {
        &self.settings.format
    }

    /// Copy of this schema with different settings; fields are shared.
    pub fn with_settings(&self, settings: SchemaSettings) -> Self {
        Self {
            fields: self.fields.clone(),
            settings,
        }
    }
}

/// Builder collecting `(name, field)` pairs in declaration order.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<(String, FieldSpec)>,
    settings: SchemaSettings,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, field: impl Into<FieldSpec>) -> Self {
        self.fields.push((name.into(), field.into()));
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.settings.count = count;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    pub fn log(mut self, log: bool) -> Self {
        self.settings.log = log;
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.settings.format = format.into();
        self
    }

    pub fn settings(mut self, settings: SchemaSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Finish the schema, rejecting empty or duplicate field names.
    pub fn build(self) -> Result<Schema> {
        for (idx, (name, _)) in self.fields.iter().enumerate() {
            if name.is_empty() {
                return Err(Error::validation(format!("field #{idx} has an empty name")));
            }
            if self.fields[..idx].iter().any(|(other, _)| other == name) {
                return Err(Error::validation(format!("duplicate field name '{name}'")));
            }
        }
        Ok(Schema {
            fields: self.fields,
            settings: self.settings,
        })
    }
}
