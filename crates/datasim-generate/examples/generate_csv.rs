use std::env;
use std::path::PathBuf;

use datasim_generate::{DatasetGenerator, GeneratorRegistry, compile_document};
use datasim_plan::load_document;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut schema_path: Option<PathBuf> = None;
    let mut out_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out_path = args.next().map(PathBuf::from),
            _ => {
                if schema_path.is_none() {
                    schema_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let schema_path = schema_path.ok_or("missing schema path")?;
    let out_path = out_path.unwrap_or_else(|| PathBuf::from("out/data.csv"));

    let doc = load_document(&schema_path)?;
    let schema = compile_document(&doc, &GeneratorRegistry::with_builtins())?;
    let mut generator = DatasetGenerator::new(&schema)?;
    let report = generator.write_as(&out_path, "csv")?;

    println!("path={} rows={}", report.path.display(), report.rows_written);
    Ok(())
}
