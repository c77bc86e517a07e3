#![allow(non_snake_case)]

// Базовые модули
pub mod config;
pub mod dataset;
pub mod error;
pub mod fallback;
pub mod metrics;

// Модульная раскладка (папки с mod.rs)
pub mod store;  // src/store/{mod,core,load,persist}.rs
pub mod query;  // src/query/{mod,filter,order,exec}.rs
pub mod db;     // src/db/{mod,core,read,write,collection}.rs

// Блокировка backing-файла (fs2, best-effort)
pub mod lock;

// Утилиты (now_iso, fresh_id, date_millis, ...)
pub mod util;   // src/util/mod.rs

// Удобные реэкспорты
pub use config::{DbBuilder, PersistMode, SatchelConfig};
pub use dataset::{Dataset, Record};
pub use db::{Collection, Db};
pub use error::{is_not_found, NotFound};
pub use query::{Cond, Direction, OpSet, Query, Where};
pub use store::Store;
