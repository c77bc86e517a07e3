//! query/exec — конвейер filter → sort → paginate над снапшотом.
//!
//! Контракт:
//! - find_many: фильтр, затем стабильная multi-key сортировка, затем срез
//!   skip/take. Ошибок нет: неизвестная коллекция и пустой результат — норма.
//! - count: только шаг фильтрации.
//! - find_unique: первая запись с точным совпадением всех полей ключа;
//!   отсутствие — валидный исход (None), не ошибка.
//! - skip/take: отрицательные и отсутствующие значения — значения по
//!   умолчанию (0 / остаток); skip за пределами — пустой результат.

use serde_json::Value;

use crate::dataset::{Dataset, Record};

use super::filter::Where;
use super::order::{sort_records, Direction};

/// Параметры запроса в fluent-стиле.
#[derive(Clone, Debug, Default)]
pub struct Query {
    pub filter: Option<Where>,
    pub order: Vec<(String, Direction)>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, w: Where) -> Self {
        self.filter = Some(w);
        self
    }

    /// Добавить ключ сортировки (по приоритету добавления).
    pub fn sort(mut self, field: &str, dir: Direction) -> Self {
        self.order.push((field.to_string(), dir));
        self
    }

    pub fn skip(mut self, n: i64) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn take(mut self, n: i64) -> Self {
        self.take = Some(n);
        self
    }
}

/// filter → sort → paginate. Возвращает копии подходящих записей.
pub fn find_many(ds: &Dataset, collection: &str, q: &Query) -> Vec<Record> {
    let mut out: Vec<Record> = ds
        .records(collection)
        .iter()
        .filter(|r| q.filter.as_ref().map_or(true, |w| w.matches(r)))
        .cloned()
        .collect();

    sort_records(&mut out, &q.order);

    let (start, end) = slice_bounds(out.len(), q.skip, q.take);
    if start > 0 || end < out.len() {
        out = out[start..end].to_vec();
    }
    out
}

/// Только шаг фильтрации.
pub fn count(ds: &Dataset, collection: &str, filter: Option<&Where>) -> usize {
    ds.records(collection)
        .iter()
        .filter(|r| filter.map_or(true, |w| w.matches(r)))
        .count()
}

/// Первая запись с точным совпадением всех полей ключа.
pub fn find_unique<'a>(ds: &'a Dataset, collection: &str, key: &Record) -> Option<&'a Record> {
    ds.records(collection).iter().find(|r| matches_key(r, key))
}

/// Точное равенство по всем парам ключа.
pub(crate) fn matches_key(rec: &Record, key: &Record) -> bool {
    key.iter().all(|(k, v)| rec.get(k) == Some(v))
}

/// Полуоткрытый срез [start, end) c дефолтами и зажимом к границам.
fn slice_bounds(len: usize, skip: Option<i64>, take: Option<i64>) -> (usize, usize) {
    let start = match skip {
        Some(n) if n > 0 => (n as usize).min(len),
        _ => 0,
    };
    let end = match take {
        Some(n) if n >= 0 => start.saturating_add(n as usize).min(len),
        _ => len,
    };
    (start, end)
}

/// Ключ из JSON-значения: объект → Map, иначе None.
pub(crate) fn key_object(key: &Value) -> Option<&Record> {
    match key {
        Value::Object(m) => Some(m),
        _ => None,
    }
}
