use anyhow::{Context, Result};
use std::path::PathBuf;

use SatchelDB::db::Db;
use SatchelDB::is_not_found;

pub fn exec(path: PathBuf, collection: String, key: String) -> Result<()> {
    let key: serde_json::Value = serde_json::from_str(&key).context("parse --key as JSON")?;

    let db = Db::open(&path)?;
    match db.delete(&collection, &key) {
        Ok(rec) => {
            let id = rec
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<no id>");
            println!("DELETED '{id}' from {collection}");
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            println!("NOT FOUND in {collection}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
