//! store/load — freshness-проверка и перечитывание backing-файла.
//!
//! Семантика (единый атомарный блок под Mutex):
//! - Нет снапшота → прочитать файл; не удалось → fallback + warn.
//! - mtime файла новее токена → перечитать и заменить снапшот.
//! - mtime не изменился → отдать текущий снапшот (тот же Arc).
//! - Файл исчез после успешного чтения → продолжаем отдавать кэш.
//! - После fallback с отсутствующим файлом токен пуст: появление файла
//!   подхватывается следующим load().

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::sync::Arc;
use std::time::SystemTime;

use crate::dataset::Dataset;
use crate::fallback::default_dataset;
use crate::metrics::{record_fallback_activation, record_snapshot_reload};

use super::core::{State, Store};

impl Store {
    /// Текущий снапшот; перечитывает файл, если тот изменился.
    /// Не возвращает ошибок: нечитаемый файл — это fallback, не сбой.
    pub fn load(&self) -> Arc<Dataset> {
        let mut st = self.lock_state();
        self.refresh_locked(&mut st);
        Arc::clone(&st.snapshot)
    }

    /// Freshness-проверка + возможное перечитывание. Вызывается только под
    /// Mutex (из load() и из мутаций перед клонированием набора).
    pub(crate) fn refresh_locked(&self, st: &mut State) {
        let mtime = self.backing_mtime();

        if st.loaded {
            let stale = match (mtime, st.token) {
                // Файл новее того, что мы видели.
                (Some(m), Some(t)) => m > t,
                // Токена нет (fallback после отсутствия файла), файл появился.
                (Some(_), None) => true,
                // Файла нет (или stat не прошёл) — отдаём кэш.
                (None, _) => false,
            };
            if !stale {
                return;
            }
        }

        match self.read_dataset_from_disk() {
            Ok(ds) => {
                st.snapshot = Arc::new(ds);
                st.token = mtime;
                st.fallback_active = false;
                record_snapshot_reload();
                debug!(
                    "satchel: loaded {} ({} records)",
                    self.path().display(),
                    st.snapshot.total_records()
                );
            }
            Err(e) => {
                warn!(
                    "satchel: cannot read {} ({e:#}); serving fallback dataset",
                    self.path().display()
                );
                st.snapshot = Arc::new(self.fallback_dataset());
                // Для нечитаемого, но существующего файла запоминаем его
                // mtime: повторный разбор только после изменения файла.
                st.token = mtime;
                st.fallback_active = true;
                record_fallback_activation();
            }
        }
        st.loaded = true;
    }

    fn backing_mtime(&self) -> Option<SystemTime> {
        fs::metadata(self.path()).and_then(|m| m.modified()).ok()
    }

    fn read_dataset_from_disk(&self) -> Result<Dataset> {
        let text = fs::read_to_string(self.path())
            .with_context(|| format!("read {}", self.path().display()))?;
        let ds: Dataset = serde_json::from_str(&text)
            .with_context(|| format!("parse {}", self.path().display()))?;
        Ok(ds)
    }

    /// Выбрать fallback-документ: программный → из файла по пути → встроенный.
    fn fallback_dataset(&self) -> Dataset {
        if let Some(ds) = &self.config().fallback {
            return ds.clone();
        }
        if let Some(path) = &self.config().fallback_path {
            match fs::read_to_string(path)
                .map_err(anyhow::Error::from)
                .and_then(|t| serde_json::from_str::<Dataset>(&t).map_err(Into::into))
            {
                Ok(ds) => return ds,
                Err(e) => {
                    warn!("satchel: fallback file {path} unusable ({e:#}); using built-in");
                }
            }
        }
        default_dataset()
    }
}
