use rand::RngCore;

use datasim_core::{Error, Result, RowContext, Value};

use super::Field;

pub const DEFAULT_STR_LENGTH: usize = 10;

/// Placeholder string: `"x"` repeated `length` times.
#[derive(Debug, Clone)]
pub struct StrField {
    length: usize,
}

impl StrField {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for StrField {
    fn default() -> Self {
        Self::new(DEFAULT_STR_LENGTH)
    }
}

impl Field for StrField {
    fn kind(&self) -> &'static str {
        "str"
    }

    fn generate(&self, _ctx: &RowContext, _rng: &mut dyn RngCore) -> Value {
        Value::Str("x".repeat(self.length))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Column(String),
}

/// String rendered from values already generated in the row.
///
/// `{name}` is replaced by the text of the `name` value (empty when the row
/// has no such value yet); `{{` and `}}` escape literal braces.
#[derive(Debug, Clone)]
pub struct TemplateField {
    segments: Vec<Segment>,
}

impl TemplateField {
    pub fn new(template: &str) -> Result<Self> {
        Ok(Self {
            segments: parse_template(template)?,
        })
    }

    /// Column names the template reads, in order of appearance.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Column(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl Field for TemplateField {
    fn kind(&self) -> &'static str {
        "template"
    }

    fn generate(&self, ctx: &RowContext, _rng: &mut dyn RngCore) -> Value {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Column(name) => {
                    if let Some(value) = ctx.get(name) {
                        out.push_str(&value.to_text());
                    }
                }
            }
        }
        Value::Str(out)
    }
}

fn parse_template(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(Error::validation(format!(
                                "template '{template}' has an unclosed placeholder"
                            )));
                        }
                        Some(c) => name.push(c),
                    }
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::validation(format!(
                        "template '{template}' has an empty placeholder"
                    )));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Column(name.to_string()));
            }
            '}' => {
                return Err(Error::validation(format!(
                    "template '{template}' has an unmatched '}}'"
                )));
            }
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn str_repeats_placeholder() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            StrField::new(4).generate(&RowContext::new(), &mut rng),
            Value::from("xxxx")
        );
        assert_eq!(
            StrField::new(0).generate(&RowContext::new(), &mut rng),
            Value::from("")
        );
    }

    #[test]
    fn template_reads_earlier_columns() {
        let field = TemplateField::new("{first} {last} <{id}>").expect("valid template");
        let mut ctx = RowContext::new();
        ctx.insert("first", Value::from("Ana"));
        ctx.insert("last", Value::from("Lima"));
        ctx.insert("id", Value::Int(7));
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(field.generate(&ctx, &mut rng), Value::from("Ana Lima <7>"));
        assert_eq!(field.columns().collect::<Vec<_>>(), vec!["first", "last", "id"]);
    }

    #[test]
    fn template_missing_column_renders_empty() {
        let field = TemplateField::new("[{later}]").expect("valid template");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            field.generate(&RowContext::new(), &mut rng),
            Value::from("[]")
        );
    }

    #[test]
    fn template_escapes_braces() {
        let field = TemplateField::new("{{{name}}}").expect("valid template");
        let mut ctx = RowContext::new();
        ctx.insert("name", Value::from("x"));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(field.generate(&ctx, &mut rng), Value::from("{x}"));
    }

    #[test]
    fn template_rejects_malformed_placeholders() {
        for bad in ["{open", "close}", "{}", "{a{b}}"] {
            let err = TemplateField::new(bad).expect_err(bad);
            assert!(matches!(err, Error::Validation(_)), "{bad}");
        }
    }
}
