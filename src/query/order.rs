//! query/order — multi-key стабильная сортировка записей.
//!
//! Семантика:
//! - Ключи применяются по приоритету: равенство по первому — решает второй,
//!   и так далее; полное равенство сохраняет порядок вставки (sort_by у Vec
//!   стабилен, это и есть tie-break).
//! - Отсутствующее поле сортируется как null.
//! - Межтиповой порядок: null < bool < number < string < array < object.
//! - ISO-даты сортируются как строки — лексикографический порядок RFC 3339
//!   совпадает с хронологическим.

use serde_json::Value;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::dataset::Record;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("unknown sort direction '{other}' (asc|desc)")),
        }
    }
}

/// Отсортировать записи по списку (поле, направление).
/// Пустой список — порядок не меняется.
pub fn sort_records(records: &mut [Record], order: &[(String, Direction)]) {
    if order.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        for (field, dir) in order {
            let ord = value_cmp(a.get(field.as_str()), b.get(field.as_str()));
            let ord = match dir {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

#[inline]
fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Тотальный порядок значений; None (нет поля) = null.
pub(crate) fn value_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let fx = x.as_f64().unwrap_or(0.0);
            let fy = y.as_f64().unwrap_or(0.0);
            fx.partial_cmp(&fy).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        // Для составных значений — детерминизм через JSON-вид.
        _ => a.to_string().cmp(&b.to_string()),
    }
}
