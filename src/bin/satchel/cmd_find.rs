use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use SatchelDB::db::Db;
use SatchelDB::query::{Direction, Query, Where};

pub fn exec(
    path: PathBuf,
    collection: String,
    where_json: Option<String>,
    order: Vec<String>,
    skip: Option<i64>,
    take: Option<i64>,
    compact: bool,
) -> Result<()> {
    let db = Db::open(&path)?;

    let mut q = Query::new();
    if let Some(text) = where_json {
        let v: serde_json::Value =
            serde_json::from_str(&text).context("parse --where as JSON")?;
        q = q.filter(Where::from_json(&v)?);
    }
    for spec in &order {
        let (field, dir) = parse_order(spec)?;
        q = q.sort(field, dir);
    }
    if let Some(n) = skip {
        q = q.skip(n);
    }
    if let Some(n) = take {
        q = q.take(n);
    }

    let records = db.find_many(&collection, &q);
    let out = if compact {
        serde_json::to_string(&records)?
    } else {
        serde_json::to_string_pretty(&records)?
    };
    println!("{out}");
    Ok(())
}

/// "field:asc" | "field:desc" | "field" (asc по умолчанию).
fn parse_order(spec: &str) -> Result<(&str, Direction)> {
    match spec.split_once(':') {
        None => Ok((spec, Direction::Asc)),
        Some((field, dir)) => {
            let dir = dir
                .parse::<Direction>()
                .map_err(|e| anyhow!("--order {spec}: {e}"))?;
            Ok((field, dir))
        }
    }
}
