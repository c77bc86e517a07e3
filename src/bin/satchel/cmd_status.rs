use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use SatchelDB::db::Db;
use SatchelDB::metrics;

pub fn exec(path: PathBuf, json_out: bool) -> Result<()> {
    let db = Db::open(&path)?;
    let snapshot = db.snapshot();
    let fallback = db.store().fallback_active();
    let m = metrics::snapshot();

    if json_out {
        let collections: serde_json::Map<String, serde_json::Value> = snapshot
            .collections
            .iter()
            .map(|(name, records)| (name.clone(), json!(records.len())))
            .collect();
        let doc = json!({
            "path": path.display().to_string(),
            "fallback_active": fallback,
            "total_records": snapshot.total_records(),
            "collections": collections,
            "metrics": {
                "snapshot_reloads": m.snapshot_reloads,
                "fallback_activations": m.fallback_activations,
                "persist_writes": m.persist_writes,
                "persist_failures": m.persist_failures,
                "queries_served": m.queries_served,
                "mutations_applied": m.mutations_applied,
            }
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("path:            {}", path.display());
    println!("fallback_active: {fallback}");
    println!("total_records:   {}", snapshot.total_records());
    println!("collections:");
    for (name, records) in &snapshot.collections {
        println!("  {:<16} {}", name, records.len());
    }
    println!(
        "metrics: reloads={} fallbacks={} writes={} write_failures={}",
        m.snapshot_reloads, m.fallback_activations, m.persist_writes, m.persist_failures
    );
    Ok(())
}
