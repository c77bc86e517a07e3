//! store/persist — применение мутаций и атомарная запись backing-файла.
//!
//! Путь мутации (целиком под Mutex):
//! 1. refresh_locked — сначала подтянуть свежий снапшот с диска.
//! 2. Клонировать набор, применить замыкание (Err — выходим, ничего не пишем).
//! 3. tmp+rename запись, затем fsync родительского каталога (best-effort).
//! 4. Заменить (snapshot, token).
//!
//! Неудачная запись при PersistMode::Degrade НЕ ошибка для вызывающего:
//! снапшот в памяти всё равно заменяется, процесс видит свою запись.
//! PersistMode::Require пробрасывает ошибку (снапшот не меняется).

use anyhow::{Context, Result};
use log::warn;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use crate::config::PersistMode;
use crate::dataset::Dataset;
use crate::metrics::{record_persist_failure, record_persist_write};

use super::core::Store;

#[cfg(unix)]
fn fsync_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = std::fs::File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl Store {
    /// Применить мутацию к копии текущего набора и сохранить результат.
    /// Возвращает значение замыкания (обычно созданную/обновлённую запись).
    pub fn update<T>(&self, f: impl FnOnce(&mut Dataset) -> Result<T>) -> Result<T> {
        let mut st = self.lock_state();
        self.refresh_locked(&mut st);

        let mut next = (*st.snapshot).clone();
        let out = f(&mut next)?;
        let next = Arc::new(next);

        match self.write_to_disk(&next) {
            Ok(mtime) => {
                st.snapshot = next;
                st.token = mtime;
                st.fallback_active = false;
                record_persist_write();
            }
            Err(e) => match self.config().persist_mode {
                PersistMode::Require => return Err(e),
                PersistMode::Degrade => {
                    record_persist_failure();
                    warn!(
                        "satchel: persist to {} failed ({e:#}); keeping in-memory snapshot only",
                        self.path().display()
                    );
                    // Токен не трогаем: на диске прежнее содержимое, и пока
                    // его mtime не уйдёт вперёд, load() отдаёт нашу копию.
                    st.snapshot = next;
                }
            },
        }
        Ok(out)
    }

    /// Сериализовать и записать набор через tmp+rename; вернуть новый mtime.
    fn write_to_disk(&self, ds: &Dataset) -> Result<Option<SystemTime>> {
        let bytes = if self.config().pretty_json {
            serde_json::to_vec_pretty(ds)?
        } else {
            serde_json::to_vec(ds)?
        };

        let path = self.path();
        let tmp = tmp_path(path);
        let _ = fs::remove_file(&tmp); // best-effort

        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .with_context(|| format!("open tmp {}", tmp.display()))?;
        f.write_all(&bytes)?;
        f.sync_all()?; // flush tmp to disk

        fs::rename(&tmp, path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
        let _ = fsync_dir(path);

        Ok(fs::metadata(path).and_then(|m| m.modified()).ok())
    }
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "satchel".to_string());
    name.push_str(".tmp");
    path.with_file_name(name)
}
