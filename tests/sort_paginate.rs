//! Multi-key стабильная сортировка и границы пагинации на живой базе.

use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use SatchelDB::db::Db;
use SatchelDB::query::{Direction, Query, Where};

fn ids(records: &[SatchelDB::Record]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.get("id").unwrap().as_str().unwrap())
        .collect()
}

#[test]
fn stable_sort_keeps_insertion_order_for_ties() -> Result<()> {
    let root = unique_root("stable");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");

    // Одинаковый ключ сортировки у p1/p3/p4 — известный порядок вставки
    fs::write(
        &path,
        serde_json::to_vec_pretty(&json!({
            "Project": [
                {"id": "p1", "priority": 1},
                {"id": "p2", "priority": 0},
                {"id": "p3", "priority": 1},
                {"id": "p4", "priority": 1}
            ]
        }))?,
    )?;

    let db = Db::open(&path)?;
    let q = Query::new().sort("priority", Direction::Asc);
    assert_eq!(ids(&db.find_many("Project", &q)), vec!["p2", "p1", "p3", "p4"]);

    // Desc: группа единиц впереди, внутри группы — тот же порядок вставки
    let q = Query::new().sort("priority", Direction::Desc);
    assert_eq!(ids(&db.find_many("Project", &q)), vec!["p1", "p3", "p4", "p2"]);
    Ok(())
}

#[test]
fn multi_key_sort_priority() -> Result<()> {
    let root = unique_root("multikey");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");

    fs::write(
        &path,
        serde_json::to_vec_pretty(&json!({
            "Career": [
                {"id": "c1", "dept": "Eng", "level": 2},
                {"id": "c2", "dept": "Design", "level": 3},
                {"id": "c3", "dept": "Eng", "level": 5},
                {"id": "c4", "dept": "Design", "level": 1}
            ]
        }))?,
    )?;

    let db = Db::open(&path)?;
    let q = Query::new()
        .sort("dept", Direction::Asc)
        .sort("level", Direction::Desc);
    assert_eq!(ids(&db.find_many("Career", &q)), vec!["c2", "c4", "c3", "c1"]);
    Ok(())
}

#[test]
fn pagination_windows_and_bounds() -> Result<()> {
    let root = unique_root("paginate");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");

    fs::write(
        &path,
        serde_json::to_vec_pretty(&json!({
            "Lead": [
                {"id": "l0", "type": "CONTACT"},
                {"id": "l1", "type": "CONTACT"},
                {"id": "l2", "type": "CONTACT"},
                {"id": "l3", "type": "CONTACT"},
                {"id": "l4", "type": "CONTACT"},
                {"id": "skip-me", "type": "SPAM"}
            ]
        }))?,
    )?;

    let db = Db::open(&path)?;
    let contacts = Where::new().eq("type", "CONTACT");

    // skip=2, take=2 над пятью отфильтрованными — позиции 2 и 3
    let q = Query::new().filter(contacts.clone()).skip(2).take(2);
    assert_eq!(ids(&db.find_many("Lead", &q)), vec!["l2", "l3"]);

    // skip за пределами — пусто
    let q = Query::new().filter(contacts.clone()).skip(5);
    assert!(db.find_many("Lead", &q).is_empty());

    // take=0 — пусто
    let q = Query::new().filter(contacts.clone()).take(0);
    assert!(db.find_many("Lead", &q).is_empty());

    // отрицательные значения — дефолты
    let q = Query::new().filter(contacts).skip(-1).take(-5);
    assert_eq!(db.find_many("Lead", &q).len(), 5);
    Ok(())
}

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("satchel-{}-{}-{}", prefix, pid, t))
}
