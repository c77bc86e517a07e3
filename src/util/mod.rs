//! util — общие утилиты (время, идентификаторы, коэрции).
//!
//! Содержит:
//! - now_iso(): текущее время в RFC 3339 (UTC, миллисекунды) — формат
//!   `createdAt`/`updatedAt` в документе на диске.
//! - fresh_id(): непрозрачный случайный идентификатор записи.
//! - date_millis(): коэрция значения к сравнимой дате для range-фильтров.
//! - coerce_text(): текстовая коэрция для `contains`.
//!
//! Задача: убрать дублирование простых хелперов по коду и централизовать поведение.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rand::RngCore;
use serde_json::Value;

/// Текущее время как RFC 3339 UTC с миллисекундами ("2026-08-07T12:34:56.789Z").
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Непрозрачный случайный идентификатор записи: 24 hex-символа (12 байт).
/// Уникальность внутри коллекции проверяет вызывающий код.
pub fn fresh_id() -> String {
    let mut bytes = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut out = String::with_capacity(24);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Привести значение к сравнимой дате (epoch millis) для range-фильтров.
///
/// - Строка: RFC 3339, либо дата без времени ("2024-03-05" → полночь UTC).
/// - Число: уже миллисекунды эпохи.
/// - Остальное (включая отсутствующее поле) — None: граница считается
///   нарушенной, как сравнение с NaN.
pub fn date_millis(v: &Value) -> Option<i64> {
    match v {
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.timestamp_millis());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| ndt.and_utc().timestamp_millis())
        }
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Текстовая коэрция для `contains`: строки как есть, остальное — JSON-вид.
pub fn coerce_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
