//! Prints snapshot statistics as a single JSON record on stdout.
//!
//! This is a developer utility over the library accessors: load a snapshot,
//! report per-category counts and summaries, optionally enumerate one
//! category or run the provenance cross-checks. Findings and failures go to
//! stderr; the process exits non-zero when a check fails.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::json;
use std::env;
use std::path::PathBuf;
use uavdb::{Category, ComponentIndex, validation};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;

    let db_path = args
        .db_path
        .unwrap_or_else(uavdb::bundled_snapshot_path);
    let index = ComponentIndex::load(&db_path)
        .with_context(|| format!("loading snapshot from {}", db_path.display()))?;

    if let Some(category) = args.category {
        let record = json!({
            "snapshot": index.key(),
            "category": category,
            "components": index.list(category),
        });
        print_record(&record, args.pretty)?;
        return Ok(());
    }

    if args.check {
        let mut findings = validation::check_airfoils_against_literature(
            index.catalog(),
            validation::LITERATURE_TOLERANCE,
        );
        findings.extend(validation::check_cell_ranges(index.catalog()));
        if !findings.is_empty() {
            for finding in &findings {
                eprintln!("{finding}");
            }
            bail!("{} provenance check(s) failed", findings.len());
        }
    }

    let record = json!({
        "snapshot": index.key(),
        "statistics": index.statistics(),
    });
    print_record(&record, args.pretty)?;
    Ok(())
}

fn print_record(record: &serde_json::Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    println!("{rendered}");
    Ok(())
}

struct CliArgs {
    db_path: Option<PathBuf>,
    category: Option<Category>,
    check: bool,
    pretty: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut db_path = None;
        let mut category = None;
        let mut check = false;
        let mut pretty = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("Missing value for --db"))?;
                    db_path = Some(PathBuf::from(value));
                }
                "--category" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("Missing value for --category"))?;
                    category = Some(Category::from_str(&value).ok_or_else(|| {
                        anyhow!(
                            "Unknown category '{value}' (expected one of {})",
                            category_names()
                        )
                    })?);
                }
                "--check" => check = true,
                "--pretty" => pretty = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(1);
                }
                other => {
                    eprintln!("Unknown flag: {other}");
                    print_usage();
                    std::process::exit(1);
                }
            }
        }

        Ok(Self {
            db_path,
            category,
            check,
            pretty,
        })
    }
}

fn category_names() -> String {
    Category::ALL
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

fn print_usage() {
    eprintln!(
        "Usage: catalog-stats [--db PATH] [--category NAME] [--check] [--pretty]\n\n\
         Options:\n  --db PATH        snapshot to load (default: bundled snapshot)\n  \
         --category NAME  list one category's component names\n  \
         --check          run provenance cross-checks before reporting\n  \
         --pretty         pretty-print the JSON record\n"
    );
}
