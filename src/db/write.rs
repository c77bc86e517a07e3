//! db/write — мутации: create / update / delete.
//!
//! Что внутри:
//! - create: свежий уникальный id (если не задан), createdAt/updatedAt
//!   (если не заданы), запись в конец коллекции.
//! - update: точечный поиск по ключу, NotFound при промахе, shallow-merge
//!   (переданное поле замещает целиком, включая вложенные структуры),
//!   updatedAt обновляется всегда.
//! - delete: удаление первой записи по ключу, NotFound при промахе.
//!
//! Все три идут через Store::update: клон набора → мутация → persist →
//! замена снапшота. Неудачная запись на диск при PersistMode::Degrade
//! не видна вызывающему (см. store/persist.rs).

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::dataset::Record;
use crate::error::NotFound;
use crate::metrics::record_mutation_applied;
use crate::query::exec::{key_object, matches_key};
use crate::util::{fresh_id, now_iso};

use super::core::Db;

impl Db {
    /// Создать запись. Возвращает её с присвоенными id/createdAt/updatedAt.
    pub fn create(&self, collection: &str, fields: Value) -> Result<Record> {
        let Value::Object(mut fields) = fields else {
            return Err(anyhow!("create: fields must be a JSON object"));
        };

        let rec = self.store().update(|ds| {
            // id: берём переданный (и проверяем уникальность), иначе генерируем.
            let id = match fields.get("id").and_then(Value::as_str) {
                Some(given) => {
                    if ds.has_id(collection, given) {
                        return Err(anyhow!(
                            "create: id '{given}' already exists in {collection}"
                        ));
                    }
                    given.to_string()
                }
                None => loop {
                    let candidate = fresh_id();
                    if !ds.has_id(collection, &candidate) {
                        break candidate;
                    }
                },
            };
            fields.insert("id".to_string(), Value::String(id));

            let now = now_iso();
            fields
                .entry("createdAt".to_string())
                .or_insert_with(|| Value::String(now.clone()));
            fields
                .entry("updatedAt".to_string())
                .or_insert_with(|| Value::String(now.clone()));

            // Порядок вставки — в конец коллекции.
            ds.records_mut(collection).push(fields.clone());
            Ok(fields.clone())
        })?;

        record_mutation_applied();
        Ok(rec)
    }

    /// Обновить единственную запись по ключу (shallow-merge полей).
    pub fn update(&self, collection: &str, key: &Value, fields: Value) -> Result<Record> {
        let Some(key) = key_object(key).cloned() else {
            return Err(anyhow!("update: key must be a JSON object"));
        };
        let Value::Object(fields) = fields else {
            return Err(anyhow!("update: fields must be a JSON object"));
        };

        let rec = self.store().update(|ds| {
            let records = ds.records_mut(collection);
            let Some(pos) = records.iter().position(|r| matches_key(r, &key)) else {
                return Err(NotFound::new(collection).into());
            };

            let rec = &mut records[pos];
            for (k, v) in fields {
                rec.insert(k, v); // полное замещение, в том числе вложенных структур
            }
            rec.insert("updatedAt".to_string(), Value::String(now_iso()));
            Ok(rec.clone())
        })?;

        record_mutation_applied();
        Ok(rec)
    }

    /// Удалить первую запись по ключу; вернуть удалённую.
    pub fn delete(&self, collection: &str, key: &Value) -> Result<Record> {
        let Some(key) = key_object(key).cloned() else {
            return Err(anyhow!("delete: key must be a JSON object"));
        };

        let rec = self.store().update(|ds| {
            let records = ds.records_mut(collection);
            let Some(pos) = records.iter().position(|r| matches_key(r, &key)) else {
                return Err(NotFound::new(collection).into());
            };
            Ok(records.remove(pos))
        })?;

        record_mutation_applied();
        Ok(rec)
    }
}
