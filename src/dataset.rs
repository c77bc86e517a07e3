// src/dataset.rs — SatchelDB dataset model
//
// Формат <file> (JSON, один корневой объект):
// {
//   "Blog":    [ { "id": "...", ... }, ... ],
//   "Project": [ ... ],
//   ...
// }
//
// Политика:
// - Порядок записей в массиве — порядок вставки; он сохраняется при load/persist
//   и служит стабильным tie-break для сортировки и пагинации.
// - Каждая запись несёт уникальный строковый `id` внутри своей коллекции.
// - Записи, прошедшие через мутации, несут `createdAt`/`updatedAt` (RFC 3339).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Одна запись: открытое отображение поле → значение (string/number/bool/null/array/object).
pub type Record = serde_json::Map<String, serde_json::Value>;

const NO_RECORDS: &[Record] = &[];

/// Полный набор коллекций, сериализуемый как один корневой JSON-объект.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    pub collections: BTreeMap<String, Vec<Record>>,
}

impl Dataset {
    /// Записи коллекции по имени; пустой срез для неизвестной коллекции.
    #[inline]
    pub fn records(&self, collection: &str) -> &[Record] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(NO_RECORDS)
    }

    /// Мутабельный доступ; неизвестная коллекция создаётся пустой.
    #[inline]
    pub fn records_mut(&mut self, collection: &str) -> &mut Vec<Record> {
        self.collections.entry(collection.to_string()).or_default()
    }

    /// Имена коллекций в порядке ключей корневого объекта.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Суммарное число записей по всем коллекциям.
    pub fn total_records(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    /// Есть ли в коллекции запись с данным id.
    pub fn has_id(&self, collection: &str, id: &str) -> bool {
        self.records(collection)
            .iter()
            .any(|r| r.get("id").and_then(serde_json::Value::as_str) == Some(id))
    }
}
