//! Demo driver for the sievelet library.
//!
//! Seeds a small product catalog and a pair of office templates, sifts the
//! catalog with a selector (first CLI argument, falling back to the
//! configured default) and stamps two employees. Settings are layered from
//! an optional `sievelet.toml` and `SIEVELET_`-prefixed environment
//! variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sievelet::construct::{DuplicatePolicy, Item, Record, TemplateKeeper};
use sievelet::datatype::Value;
use sievelet::error::{Result, SieveletError};
use sievelet::selector;

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    duplicate_policy: String,
    selector: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duplicate_policy: String::from("reject"),
            selector: String::from("color = \"green\""),
        }
    }
}

impl Settings {
    fn load() -> Result<Self> {
        Config::builder()
            .add_source(File::with_name("sievelet").required(false))
            .add_source(Environment::with_prefix("SIEVELET"))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SieveletError::Config(e.to_string()))
    }
    fn duplicate_policy(&self) -> Result<DuplicatePolicy> {
        match self.duplicate_policy.as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(SieveletError::Config(format!(
                "unknown duplicate_policy: {}",
                other
            ))),
        }
    }
}

fn catalog() -> Vec<Item> {
    vec![
        Item::new()
            .with("name", "Apple")
            .with("color", "green")
            .with("size", "small"),
        Item::new()
            .with("name", "Tree")
            .with("color", "green")
            .with("size", "large"),
        Item::new()
            .with("name", "House")
            .with("color", "blue")
            .with("size", "large"),
    ]
}

fn keep_office_templates(keeper: &mut TemplateKeeper) -> Result<()> {
    keeper.keep(
        "main_office",
        Record::new().with_value("name", "").with_record(
            "address",
            Record::new()
                .with_value("street", "123 East Dr")
                .with_value("suite", 0),
        ),
    )?;
    keeper.keep(
        "aux_office",
        Record::new().with_value("name", "").with_record(
            "address",
            Record::new()
                .with_value("street", "123-B East Dr")
                .with_value("suite", 0),
        ),
    )?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = Settings::load()?;
    let selection = std::env::args()
        .nth(1)
        .unwrap_or_else(|| settings.selector.clone());

    let predicate = selector::parse(&selection)?;
    info!(%predicate, "sifting catalog");
    println!("Items matching {}:", selection);
    let items = catalog();
    for sifted in predicate.sift(&items) {
        match sifted {
            Ok(item) => println!("  {}", item),
            Err(e) => eprintln!("  evaluation failed: {}", e),
        }
    }

    let mut keeper = TemplateKeeper::with_policy(settings.duplicate_policy()?);
    keep_office_templates(&mut keeper)?;
    let john = keeper.stamp(
        "main_office",
        &[("name", Value::from("John")), ("address.suite", Value::from(101))],
    )?;
    let jane = keeper.stamp(
        "aux_office",
        &[("name", Value::from("Jane")), ("address.suite", Value::from(102))],
    )?;
    println!("Stamped employees:");
    println!("  {}", john);
    println!("  {}", jane);
    Ok(())
}
