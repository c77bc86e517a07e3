use anyhow::{anyhow, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use SatchelDB::fallback::default_dataset;

pub fn exec(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let ds = default_dataset();
    let bytes = serde_json::to_vec_pretty(&ds)?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(&bytes)?;
    f.sync_all()?;

    println!(
        "SEEDED {} ({} collections, {} records)",
        path.display(),
        ds.collections.len(),
        ds.total_records()
    );
    Ok(())
}
