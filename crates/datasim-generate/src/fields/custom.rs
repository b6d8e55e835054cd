use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use datasim_core::{Error, Result, RowContext, Value};

use super::Field;

type NoArgFn = dyn Fn() -> Value + Send + Sync;
type ContextFn = dyn Fn(&RowContext) -> Value + Send + Sync;
type RandomFn = dyn Fn(&RowContext, &mut dyn RngCore) -> Value + Send + Sync;

/// User-supplied generation function, tagged by the inputs it takes.
#[derive(Clone)]
pub enum CustomGenerator {
    /// Takes nothing.
    NoArg(Arc<NoArgFn>),
    /// Reads the row generated so far.
    Context(Arc<ContextFn>),
    /// Reads the row and draws from the run's random source, so the values
    /// stay reproducible under a seed.
    Random(Arc<RandomFn>),
}

impl CustomGenerator {
    pub fn no_arg<F, T>(func: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        CustomGenerator::NoArg(Arc::new(move || func().into()))
    }

    pub fn context<F, T>(func: F) -> Self
    where
        F: Fn(&RowContext) -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        CustomGenerator::Context(Arc::new(move |ctx: &RowContext| func(ctx).into()))
    }

    pub fn random<F, T>(func: F) -> Self
    where
        F: Fn(&RowContext, &mut dyn RngCore) -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        CustomGenerator::Random(Arc::new(
            move |ctx: &RowContext, rng: &mut dyn RngCore| func(ctx, rng).into(),
        ))
    }

    pub fn invoke(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        match self {
            CustomGenerator::NoArg(func) => func(),
            CustomGenerator::Context(func) => func(ctx),
            CustomGenerator::Random(func) => func(ctx, rng),
        }
    }
}

impl Field for CustomGenerator {
    fn kind(&self) -> &'static str {
        "custom"
    }

    fn generate(&self, ctx: &RowContext, rng: &mut dyn RngCore) -> Value {
        self.invoke(ctx, rng)
    }
}

impl fmt::Debug for CustomGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            CustomGenerator::NoArg(_) => "NoArg",
            CustomGenerator::Context(_) => "Context",
            CustomGenerator::Random(_) => "Random",
        };
        f.debug_tuple(tag).finish()
    }
}

/// Named custom generators that schema documents refer to by name.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, CustomGenerator>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `uuid.v4`, `email` and `name`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("uuid.v4", CustomGenerator::random(|_, rng| random_uuid(rng)));
        registry.register("email", CustomGenerator::random(|_, rng| random_email(rng)));
        registry.register("name", CustomGenerator::random(|_, rng| random_name(rng)));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, generator: CustomGenerator) {
        self.generators.insert(name.into(), generator);
    }

    pub fn generator(&self, name: &str) -> Option<&CustomGenerator> {
        self.generators.get(name)
    }

    /// Look up `name`, failing with a configuration error when it is not
    /// registered.
    pub fn resolve(&self, name: &str) -> Result<CustomGenerator> {
        self.generators.get(name).cloned().ok_or_else(|| {
            Error::configuration(format!("custom generator '{name}' is not registered"))
        })
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn random_uuid(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}

fn random_email(rng: &mut dyn RngCore) -> String {
    let user = format!("user{:04}", rng.random_range(1..=9999));
    format!("{user}@example.com")
}

fn random_name(rng: &mut dyn RngCore) -> String {
    let first = [
        "Ana", "Bruno", "Carlos", "Daniela", "Eduardo", "Fernanda", "Gustavo", "Helena",
    ];
    let last = [
        "Silva", "Santos", "Oliveira", "Souza", "Lima", "Costa", "Ribeiro", "Almeida",
    ];
    let first = first[rng.random_range(0..first.len())];
    let last = last[rng.random_range(0..last.len())];
    format!("{first} {last}")
}
