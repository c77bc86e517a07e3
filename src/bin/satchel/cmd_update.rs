use anyhow::{Context, Result};
use std::path::PathBuf;

use SatchelDB::db::Db;
use SatchelDB::is_not_found;

pub fn exec(path: PathBuf, collection: String, key: String, fields: String) -> Result<()> {
    let key: serde_json::Value = serde_json::from_str(&key).context("parse --key as JSON")?;
    let fields: serde_json::Value =
        serde_json::from_str(&fields).context("parse --fields as JSON")?;

    let db = Db::open(&path)?;
    match db.update(&collection, &key, fields) {
        Ok(rec) => {
            println!("{}", serde_json::to_string_pretty(&rec)?);
            Ok(())
        }
        Err(e) if is_not_found(&e) => {
            println!("NOT FOUND in {collection}");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
