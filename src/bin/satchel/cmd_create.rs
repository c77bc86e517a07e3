use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use SatchelDB::db::Db;

pub fn exec(
    path: PathBuf,
    collection: String,
    fields: Option<String>,
    fields_file: Option<PathBuf>,
) -> Result<()> {
    let text = match (fields_file, fields) {
        (Some(file), _) => std::fs::read_to_string(&file)
            .with_context(|| format!("read fields file {}", file.display()))?,
        (None, Some(text)) => text,
        (None, None) => return Err(anyhow!("provide --fields or --fields-file")),
    };
    let v: serde_json::Value = serde_json::from_str(&text).context("parse fields as JSON")?;

    let db = Db::open(&path)?;
    let rec = db.create(&collection, v)?;
    println!("{}", serde_json::to_string_pretty(&rec)?);
    Ok(())
}
