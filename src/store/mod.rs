//! store — Dataset Store: backing-файл, снапшот в памяти, freshness-токен.
//!
//! Разделение по подмодулям:
//! - core.rs    — структура Store, состояние (snapshot, token), open()
//! - load.rs    — freshness-проверка, перечитывание файла, fallback
//! - persist.rs — атомарная запись (tmp+rename) и политика деградации
//!
//! Инварианты:
//! - (snapshot, token) — единственный разделяемый мутабельный ресурс движка;
//!   пара живёт под одним Mutex.
//! - Снапшот никогда не мутируется на месте: замена целиком (Arc swap).
//! - Чтения забирают Arc и работают без блокировки; reload и каждая мутация
//!   держат Mutex на весь свой read-modify-write.

pub mod core;
pub mod load;
pub mod persist;

pub use core::Store;
