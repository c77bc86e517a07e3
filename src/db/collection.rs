//! db/collection — именованный фасад коллекции.
//!
//! Тонкая обёртка без собственного состояния: имя коллекции — константа
//! вызова, вся работа уходит в db/read и db/write. Типизированные
//! представления (serde) живут только на этой границе — ядро движка
//! остаётся schema-agnostic.

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::dataset::Record;
use crate::query::{Query, Where};

use super::core::Db;

#[derive(Clone, Copy)]
pub struct Collection<'a> {
    db: &'a Db,
    name: &'a str,
}

impl<'a> Collection<'a> {
    pub(crate) fn new(db: &'a Db, name: &'a str) -> Self {
        Self { db, name }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name
    }

    // ----------------- чтения -----------------

    pub fn find_many(&self, q: &Query) -> Vec<Record> {
        self.db.find_many(self.name, q)
    }

    pub fn find_unique(&self, key: &Value) -> Option<Record> {
        self.db.find_unique(self.name, key)
    }

    pub fn count(&self, filter: Option<&Where>) -> usize {
        self.db.count(self.name, filter)
    }

    // ----------------- мутации -----------------

    pub fn create(&self, fields: Value) -> Result<Record> {
        self.db.create(self.name, fields)
    }

    pub fn update(&self, key: &Value, fields: Value) -> Result<Record> {
        self.db.update(self.name, key, fields)
    }

    pub fn delete(&self, key: &Value) -> Result<Record> {
        self.db.delete(self.name, key)
    }

    // ----------------- типизированная граница -----------------

    /// find_many с десериализацией каждой записи в T.
    /// Несовпадение формы — ошибка вызывающего (он выбрал тип).
    pub fn find_many_as<T: DeserializeOwned>(&self, q: &Query) -> Result<Vec<T>> {
        self.find_many(q)
            .into_iter()
            .map(|r| {
                serde_json::from_value(Value::Object(r))
                    .with_context(|| format!("{}: record does not fit requested type", self.name))
            })
            .collect()
    }

    /// find_unique с десериализацией в T.
    pub fn find_unique_as<T: DeserializeOwned>(&self, key: &Value) -> Result<Option<T>> {
        match self.find_unique(key) {
            None => Ok(None),
            Some(r) => serde_json::from_value(Value::Object(r))
                .map(Some)
                .with_context(|| format!("{}: record does not fit requested type", self.name)),
        }
    }

    /// create из сериализуемого значения (должно давать JSON-объект).
    pub fn create_from<T: Serialize>(&self, value: &T) -> Result<Record> {
        let v = serde_json::to_value(value)?;
        if !v.is_object() {
            return Err(anyhow!(
                "{}: create_from expects a struct/map value",
                self.name
            ));
        }
        self.create(v)
    }
}
