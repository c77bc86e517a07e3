//! db/read — операции чтения: find_many / count / find_unique.
//!
//! Чтения не возвращают ошибок: пустой результат и неизвестная коллекция —
//! валидные исходы. Нечитаемый backing-файл уже погашен уровнем Store
//! (fallback), сюда он не доходит.

use serde_json::Value;

use crate::dataset::Record;
use crate::metrics::record_query_served;
use crate::query::exec;
use crate::query::{Query, Where};

use super::core::Db;

impl Db {
    /// filter → sort → paginate по свежему снапшоту.
    pub fn find_many(&self, collection: &str, q: &Query) -> Vec<Record> {
        record_query_served();
        exec::find_many(&self.snapshot(), collection, q)
    }

    /// Число записей, проходящих фильтр.
    pub fn count(&self, collection: &str, filter: Option<&Where>) -> usize {
        record_query_served();
        exec::count(&self.snapshot(), collection, filter)
    }

    /// Первая запись с точным совпадением всех полей ключа.
    /// Ключ — JSON-объект; любой другой JSON — заведомо "не найдено".
    pub fn find_unique(&self, collection: &str, key: &Value) -> Option<Record> {
        record_query_served();
        let key = exec::key_object(key)?;
        exec::find_unique(&self.snapshot(), collection, key).cloned()
    }
}
