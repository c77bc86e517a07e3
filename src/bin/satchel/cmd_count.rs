use anyhow::{Context, Result};
use std::path::PathBuf;

use SatchelDB::db::Db;
use SatchelDB::query::Where;

pub fn exec(path: PathBuf, collection: String, where_json: Option<String>) -> Result<()> {
    let db = Db::open(&path)?;

    let filter = match where_json {
        None => None,
        Some(text) => {
            let v: serde_json::Value =
                serde_json::from_str(&text).context("parse --where as JSON")?;
            Some(Where::from_json(&v)?)
        }
    };

    let n = db.count(&collection, filter.as_ref());
    println!("{n}");
    Ok(())
}
