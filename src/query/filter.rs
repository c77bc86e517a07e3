//! query/filter — декларативный фильтр записей.
//!
//! Форма фильтра повторяет ORM-словарь: поле → литерал ИЛИ операторный
//! набор {not, contains, gte, lte, gt, lt}, плюс верхнеуровневый OR со
//! списком вложенных фильтров. Выбор "литерал или операторы" делается при
//! построении (Cond — tagged union), а не инспекцией типов в рантайме.
//!
//! Семантика:
//! - Поля объединяются по AND.
//! - `contains` — регистронезависимое вхождение подстроки, обе стороны
//!   приводятся к тексту.
//! - Диапазон {gte,lte,gt,lt} — все заданные границы по AND; операнды
//!   приводятся к дате (epoch millis); неприводимое значение нарушает
//!   границу.
//! - Отсутствующий/null операнд — "нет ограничения" (отбрасывается при
//!   построении).
//! - OR при непустых полях ОБЪЕДИНЯЕТСЯ с ними (union по id), а не
//!   пересекается. Известная острая грань исходного контракта, сохранена
//!   намеренно; см. DESIGN.md.

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::dataset::Record;
use crate::util::{coerce_text, date_millis};

const OP_KEYS: &[&str] = &["not", "contains", "gte", "lte", "gt", "lt"];

/// Операторный набор для одного поля. Пустые слоты — нет ограничения.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpSet {
    pub not: Option<Value>,
    pub contains: Option<Value>,
    pub gte: Option<Value>,
    pub lte: Option<Value>,
    pub gt: Option<Value>,
    pub lt: Option<Value>,
}

impl OpSet {
    pub fn is_empty(&self) -> bool {
        self.not.is_none()
            && self.contains.is_none()
            && self.gte.is_none()
            && self.lte.is_none()
            && self.gt.is_none()
            && self.lt.is_none()
    }

    fn matches(&self, field: Option<&Value>) -> bool {
        if let Some(v) = &self.not {
            // Отсутствующее поле проходит not: нет значения — нет равенства.
            if field == Some(v) {
                return false;
            }
        }
        if let Some(needle) = &self.contains {
            let Some(hay) = field else { return false };
            let hay = coerce_text(hay).to_lowercase();
            let needle = coerce_text(needle).to_lowercase();
            if !hay.contains(&needle) {
                return false;
            }
        }
        // Диапазон: каждая заданная граница обязана выполниться.
        let field_ms = || field.and_then(date_millis);
        if let Some(b) = &self.gte {
            match (field_ms(), date_millis(b)) {
                (Some(f), Some(b)) if f >= b => {}
                _ => return false,
            }
        }
        if let Some(b) = &self.lte {
            match (field_ms(), date_millis(b)) {
                (Some(f), Some(b)) if f <= b => {}
                _ => return false,
            }
        }
        if let Some(b) = &self.gt {
            match (field_ms(), date_millis(b)) {
                (Some(f), Some(b)) if f > b => {}
                _ => return false,
            }
        }
        if let Some(b) = &self.lt {
            match (field_ms(), date_millis(b)) {
                (Some(f), Some(b)) if f < b => {}
                _ => return false,
            }
        }
        true
    }
}

/// Условие на одно поле: литеральное равенство либо операторный набор.
#[derive(Clone, Debug, PartialEq)]
pub enum Cond {
    Eq(Value),
    Ops(OpSet),
}

impl Cond {
    fn matches(&self, field: Option<&Value>) -> bool {
        match self {
            Cond::Eq(v) => field == Some(v),
            Cond::Ops(ops) => ops.matches(field),
        }
    }
}

/// Фильтр целиком: AND-поля + OR-ветки.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Where {
    fields: Vec<(String, Cond)>,
    any_of: Vec<Where>,
}

impl Where {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.any_of.is_empty()
    }

    // ----------------- построение (fluent) -----------------

    pub fn eq<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.fields.push((field.to_string(), Cond::Eq(value.into())));
        self
    }

    pub fn not<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.ops_slot(field).not = Some(value.into());
        self
    }

    pub fn contains<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.ops_slot(field).contains = Some(value.into());
        self
    }

    pub fn gte<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.ops_slot(field).gte = Some(value.into());
        self
    }

    pub fn lte<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.ops_slot(field).lte = Some(value.into());
        self
    }

    pub fn gt<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.ops_slot(field).gt = Some(value.into());
        self
    }

    pub fn lt<V: Into<Value>>(mut self, field: &str, value: V) -> Self {
        self.ops_slot(field).lt = Some(value.into());
        self
    }

    /// Добавить OR-ветку.
    pub fn or(mut self, branch: Where) -> Self {
        self.any_of.push(branch);
        self
    }

    /// Операторный набор поля; создаётся при первом операторе.
    fn ops_slot(&mut self, field: &str) -> &mut OpSet {
        let needs_new = !matches!(
            self.fields.last(),
            Some((f, Cond::Ops(_))) if f == field
        );
        if needs_new {
            self.fields
                .push((field.to_string(), Cond::Ops(OpSet::default())));
        }
        match &mut self.fields.last_mut().expect("slot just ensured").1 {
            Cond::Ops(ops) => ops,
            Cond::Eq(_) => unreachable!("last slot is an OpSet"),
        }
    }

    // ----------------- разбор из JSON -----------------

    /// Разобрать фильтр из динамического JSON (словарь ORM-вида).
    ///
    /// Правила:
    /// - значение null у поля — нет ограничения (поле отбрасывается);
    /// - объект, все ключи которого из {not, contains, gte, lte, gt, lt}, —
    ///   операторный набор (null-операнды отбрасываются);
    /// - любое другое значение — литеральное равенство;
    /// - ключ "OR" — массив вложенных фильтров.
    pub fn from_json(v: &Value) -> Result<Where> {
        let Value::Object(map) = v else {
            return Err(anyhow!("where must be a JSON object"));
        };

        let mut w = Where::new();
        for (key, val) in map {
            if key == "OR" {
                let Value::Array(branches) = val else {
                    return Err(anyhow!("OR must be an array of filter objects"));
                };
                for b in branches {
                    w.any_of.push(Where::from_json(b)?);
                }
                continue;
            }

            match val {
                Value::Null => {} // нет ограничения
                Value::Object(obj)
                    if !obj.is_empty() && obj.keys().all(|k| OP_KEYS.contains(&k.as_str())) =>
                {
                    let mut ops = OpSet::default();
                    for (op, operand) in obj {
                        if operand.is_null() {
                            continue; // нет ограничения
                        }
                        match op.as_str() {
                            "not" => ops.not = Some(operand.clone()),
                            "contains" => ops.contains = Some(operand.clone()),
                            "gte" => ops.gte = Some(operand.clone()),
                            "lte" => ops.lte = Some(operand.clone()),
                            "gt" => ops.gt = Some(operand.clone()),
                            "lt" => ops.lt = Some(operand.clone()),
                            _ => unreachable!("op keys pre-checked"),
                        }
                    }
                    if !ops.is_empty() {
                        w.fields.push((key.clone(), Cond::Ops(ops)));
                    }
                }
                other => w.fields.push((key.clone(), Cond::Eq(other.clone()))),
            }
        }
        Ok(w)
    }

    // ----------------- вычисление -----------------

    /// Проходит ли запись фильтр.
    pub fn matches(&self, rec: &Record) -> bool {
        let base = || self.fields.iter().all(|(f, c)| c.matches(rec.get(f)));
        let any_or = || self.any_of.iter().any(|b| b.matches(rec));

        match (self.fields.is_empty(), self.any_of.is_empty()) {
            (true, true) => true,
            (false, true) => base(),
            (true, false) => any_or(),
            // Острая грань: AND-поля и OR объединяются, не пересекаются.
            (false, false) => base() || any_or(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> Record {
        match v {
            Value::Object(m) => m,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn literal_equality() {
        let w = Where::new().eq("type", "CONTACT");
        assert!(w.matches(&rec(json!({"type": "CONTACT"}))));
        assert!(!w.matches(&rec(json!({"type": "QUOTE"}))));
        assert!(!w.matches(&rec(json!({"other": 1}))));
    }

    #[test]
    fn contains_is_case_insensitive() {
        let w = Where::new().contains("tags", "Tech");
        assert!(w.matches(&rec(json!({"tags": "technology, rust"}))));
        assert!(w.matches(&rec(json!({"tags": ["technology"]}))));
        assert!(!w.matches(&rec(json!({"tags": "design"}))));
        assert!(!w.matches(&rec(json!({}))));
    }

    #[test]
    fn not_excludes_exact_value_only() {
        let w = Where::new().not("status", "DRAFT");
        assert!(!w.matches(&rec(json!({"status": "DRAFT"}))));
        assert!(w.matches(&rec(json!({"status": "LIVE"}))));
        // отсутствующее поле проходит
        assert!(w.matches(&rec(json!({}))));
    }

    #[test]
    fn range_bounds_are_inclusive_where_specified() {
        let w = Where::new().gte("createdAt", "2024-02-01");
        assert!(w.matches(&rec(json!({"createdAt": "2024-02-01T00:00:00.000Z"}))));
        assert!(w.matches(&rec(json!({"createdAt": "2024-03-01T00:00:00.000Z"}))));
        assert!(!w.matches(&rec(json!({"createdAt": "2024-01-31T23:59:59.000Z"}))));
        // неприводимое значение нарушает границу
        assert!(!w.matches(&rec(json!({"createdAt": "garbage"}))));
        assert!(!w.matches(&rec(json!({}))));
    }

    #[test]
    fn range_group_is_and_combined() {
        let w = Where::new()
            .gte("date", "2024-01-01")
            .lt("date", "2024-02-01");
        assert!(w.matches(&rec(json!({"date": "2024-01-15"}))));
        assert!(!w.matches(&rec(json!({"date": "2024-02-01"}))));
        assert!(!w.matches(&rec(json!({"date": "2023-12-31"}))));
    }

    #[test]
    fn or_unions_with_plain_fields() {
        // Запись проходит, если проходит AND-часть ИЛИ любую OR-ветку.
        let w = Where::new()
            .eq("type", "CONTACT")
            .or(Where::new().eq("priority", "HIGH"));
        assert!(w.matches(&rec(json!({"type": "CONTACT", "priority": "LOW"}))));
        assert!(w.matches(&rec(json!({"type": "QUOTE", "priority": "HIGH"}))));
        assert!(!w.matches(&rec(json!({"type": "QUOTE", "priority": "LOW"}))));
    }

    #[test]
    fn from_json_tags_conditions_at_construction() {
        let w = Where::from_json(&json!({
            "type": "CONTACT",
            "title": {"contains": "tech"},
            "createdAt": {"gte": "2024-01-01", "lte": null},
            "skipped": null,
            "OR": [{"priority": "HIGH"}]
        }))
        .unwrap();

        assert!(w.matches(&rec(json!({
            "type": "CONTACT",
            "title": "Technology",
            "createdAt": "2024-06-01"
        }))));
        // null-операнд и null-поле не ограничивают
        assert!(w.matches(&rec(json!({
            "type": "QUOTE",
            "priority": "HIGH"
        }))));

        assert!(Where::from_json(&json!("not an object")).is_err());
        assert!(Where::from_json(&json!({"OR": "not an array"})).is_err());
    }

    #[test]
    fn from_json_object_with_unknown_keys_is_literal() {
        let w = Where::from_json(&json!({"meta": {"kind": "x"}})).unwrap();
        assert!(w.matches(&rec(json!({"meta": {"kind": "x"}}))));
        assert!(!w.matches(&rec(json!({"meta": {"kind": "y"}}))));
    }
}
