//! store/core — структура Store, состояние снапшота, open().

use anyhow::Result;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use crate::config::SatchelConfig;
use crate::dataset::Dataset;
use crate::lock::{try_exclusive_lock, LockGuard};

/// Внутреннее состояние под Mutex: пара (snapshot, token) плюс служебные флаги.
pub(crate) struct State {
    /// Текущий снапшот. Заменяется целиком, не мутируется.
    pub snapshot: Arc<Dataset>,
    /// Freshness-токен: mtime файла на момент последнего чтения/записи.
    /// None — файла не было (или он был нечитаем) — следующий load()
    /// попробует диск снова.
    pub token: Option<SystemTime>,
    /// false до первого load(): начальное состояние не считается снапшотом.
    pub loaded: bool,
    /// Снапшот пришёл из встроенного fallback-документа, а не с диска.
    pub fallback_active: bool,
}

pub struct Store {
    path: PathBuf,
    cfg: SatchelConfig,
    pub(crate) state: Mutex<State>,
    // Держим advisory lock на всё время жизни Store (best-effort).
    _lock: Option<LockGuard>,
}

impl Store {
    /// Открыть Store над backing-файлом. Файл не обязан существовать:
    /// отсутствие — штатный повод для fallback при первом load().
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_config(path, SatchelConfig::from_env())
    }

    pub fn open_with_config(path: &Path, cfg: SatchelConfig) -> Result<Self> {
        let lock = if cfg.lock_file {
            match try_exclusive_lock(path) {
                Ok(g) => Some(g),
                Err(e) => {
                    // Read-only mount или второй держатель: работаем без lock.
                    warn!(
                        "satchel: advisory lock unavailable for {} ({e:#}); continuing unlocked",
                        path.display()
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            path: path.to_path_buf(),
            cfg,
            state: Mutex::new(State {
                snapshot: Arc::new(Dataset::default()),
                token: None,
                loaded: false,
                fallback_active: false,
            }),
            _lock: lock,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn config(&self) -> &SatchelConfig {
        &self.cfg
    }

    /// Активен ли fallback-режим (файл отсутствовал/не разбирался при
    /// последнем обращении к диску).
    pub fn fallback_active(&self) -> bool {
        self.lock_state().fallback_active
    }

    #[inline]
    pub(crate) fn lock_state(&self) -> MutexGuard<'_, State> {
        // Отравленный Mutex здесь означает панику внутри reload/persist;
        // состояние пары остаётся согласованным, продолжаем с ним.
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
