//! Попарная уникальность id и round trip на случайных наборах полей.

use anyhow::Result;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use SatchelDB::db::Db;

#[test]
fn ids_are_pairwise_distinct_over_many_creates() -> Result<()> {
    let root = unique_root("ids");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");
    fs::write(&path, b"{\"Media\": []}")?;

    let db = Db::open(&path)?;
    let mut rng = oorandom::Rand32::new(0x5a7c_4e11);

    let mut ids: HashSet<String> = HashSet::new();
    for i in 0..200 {
        let fields = random_fields(&mut rng, i);
        let rec = db.create("Media", fields.clone())?;

        let id = rec.get("id").unwrap().as_str().unwrap().to_string();
        assert!(ids.insert(id.clone()), "duplicate id {id} after {i} creates");

        // round trip: созданная запись равна полям + id/таймстампы
        let found = db
            .find_unique("Media", &json!({"id": id}))
            .expect("record must be findable by id");
        let Value::Object(fields) = fields else { unreachable!() };
        for (k, v) in &fields {
            assert_eq!(found.get(k), Some(v), "field {k} must survive create");
        }
        assert!(found.contains_key("createdAt"));
        assert!(found.contains_key("updatedAt"));
    }

    assert_eq!(db.count("Media", None), 200);
    Ok(())
}

/// Случайный набор полей: числа, строки, флаги, иногда вложенность.
fn random_fields(rng: &mut oorandom::Rand32, i: u32) -> Value {
    let kind = rng.rand_range(0..4);
    match kind {
        0 => json!({"kind": "image", "width": rng.rand_range(1..4096), "seq": i}),
        1 => json!({"kind": "video", "title": format!("clip-{}", rng.rand_u32()), "seq": i}),
        2 => json!({"kind": "doc", "draft": rng.rand_range(0..2) == 0, "seq": i}),
        _ => json!({
            "kind": "bundle",
            "items": [rng.rand_u32(), rng.rand_u32()],
            "meta": {"origin": "import"},
            "seq": i
        }),
    }
}

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("satchel-{}-{}-{}", prefix, pid, t))
}
