//! db/core — структура Db поверх Dataset Store.
//!
//! Db сам по себе без состояния: всё разделяемое живёт в Store
//! (пара snapshot/token под Mutex). Db можно свободно шарить по ссылке
//! между потоками.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::{DbBuilder, SatchelConfig};
use crate::dataset::Dataset;
use crate::store::Store;

use super::collection::Collection;

pub struct Db {
    store: Store,
}

impl Db {
    /// Открыть базу над backing-файлом (конфиг из ENV).
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            store: Store::open(path)?,
        })
    }

    pub fn open_with_config(path: &Path, cfg: SatchelConfig) -> Result<Self> {
        Ok(Self {
            store: Store::open_with_config(path, cfg)?,
        })
    }

    /// Builder конфигурации: Db::builder().persist_mode(..).build().
    pub fn builder() -> DbBuilder {
        DbBuilder::new()
    }

    /// Именованный фасад коллекции ("Blog", "Lead", ...).
    pub fn collection<'a>(&'a self, name: &'a str) -> Collection<'a> {
        Collection::new(self, name)
    }

    /// Текущий снапшот набора данных (свежий по mtime).
    pub fn snapshot(&self) -> Arc<Dataset> {
        self.store.load()
    }

    /// Имена коллекций текущего снапшота.
    pub fn collection_names(&self) -> Vec<String> {
        self.snapshot()
            .collection_names()
            .map(str::to_string)
            .collect()
    }

    #[inline]
    pub fn store(&self) -> &Store {
        &self.store
    }
}
