//! query — предикаты, сортировка и конвейер filter → sort → paginate.
//!
//! Разделение по подмодулям:
//! - filter.rs — Where/Cond: литералы, операторные наборы, OR-ветки
//! - order.rs  — multi-key стабильная сортировка, межтиповой порядок значений
//! - exec.rs   — find_many/count/find_unique над снапшотом + Query (skip/take)

pub mod exec;
pub mod filter;
pub mod order;

pub use exec::Query;
pub use filter::{Cond, OpSet, Where};
pub use order::Direction;
