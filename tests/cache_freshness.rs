//! Инвалидация кэша по mtime backing-файла.
//!
//! mtime продвигаем явно через File::set_modified — не зависим от
//! гранулярности таймстампов файловой системы.

use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use SatchelDB::store::Store;

fn write_doc(path: &Path, doc: &serde_json::Value) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(doc)?)?;
    Ok(())
}

fn bump_mtime(path: &Path, ahead: Duration) -> Result<()> {
    let f = fs::OpenOptions::new().append(true).open(path)?;
    f.set_modified(SystemTime::now() + ahead)?;
    Ok(())
}

#[test]
fn unchanged_mtime_returns_same_snapshot_instance() -> Result<()> {
    let root = unique_root("same-arc");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");
    write_doc(&path, &json!({"Blog": [{"id": "b1"}]}))?;

    let store = Store::open(&path)?;
    let a = store.load();
    let b = store.load();
    assert!(Arc::ptr_eq(&a, &b), "same mtime must serve the same snapshot");
    Ok(())
}

#[test]
fn advanced_mtime_triggers_reload() -> Result<()> {
    let root = unique_root("reload");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");
    write_doc(&path, &json!({"Blog": [{"id": "b1"}]}))?;

    let store = Store::open(&path)?;
    let before = store.load();
    assert_eq!(before.records("Blog").len(), 1);

    // Внешняя правка + явное продвижение mtime
    write_doc(&path, &json!({"Blog": [{"id": "b1"}, {"id": "b2"}]}))?;
    bump_mtime(&path, Duration::from_secs(2))?;

    let after = store.load();
    assert!(!Arc::ptr_eq(&before, &after), "newer mtime must replace snapshot");
    assert_eq!(after.records("Blog").len(), 2);
    Ok(())
}

#[test]
fn file_vanishing_after_load_keeps_cached_snapshot() -> Result<()> {
    let root = unique_root("vanish");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");
    write_doc(&path, &json!({"Blog": [{"id": "b1"}]}))?;

    let store = Store::open(&path)?;
    let before = store.load();

    fs::remove_file(&path)?;
    let after = store.load();
    assert!(Arc::ptr_eq(&before, &after), "missing file must not drop the cache");
    assert!(!store.fallback_active());
    Ok(())
}

#[test]
fn file_appearing_after_fallback_is_picked_up() -> Result<()> {
    let root = unique_root("appear");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");

    // Файла нет: первый load() отдаёт fallback
    let store = Store::open(&path)?;
    let fb = store.load();
    assert!(store.fallback_active());
    assert!(fb.records("Blog").len() >= 2, "built-in fallback has seed posts");

    // Файл появился — следующий load() читает его
    write_doc(&path, &json!({"Blog": [{"id": "real"}]}))?;
    let real = store.load();
    assert!(!store.fallback_active());
    assert_eq!(real.records("Blog").len(), 1);
    assert_eq!(real.records("Blog")[0].get("id").unwrap(), "real");
    Ok(())
}

#[test]
fn corrupt_file_serves_fallback_until_it_changes() -> Result<()> {
    let root = unique_root("corrupt");
    fs::create_dir_all(&root)?;
    let path = root.join("content.json");
    fs::write(&path, b"{ this is not json")?;

    let store = Store::open(&path)?;
    let fb = store.load();
    assert!(store.fallback_active());

    // Без изменения mtime повторный load() не перечитывает битый файл
    let fb2 = store.load();
    assert!(Arc::ptr_eq(&fb, &fb2));

    // Файл починили — подхватывается после продвижения mtime
    write_doc(&path, &json!({"Blog": []}))?;
    bump_mtime(&path, Duration::from_secs(2))?;
    let healed = store.load();
    assert!(!store.fallback_active());
    assert!(healed.records("Blog").is_empty());
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
