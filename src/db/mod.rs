//! db — high-level API движка документов.
//!
//! Разделение по подмодулям:
//! - core.rs       — структура Db, open()/builder(), доступ к снапшоту
//! - read.rs       — find_many / count / find_unique
//! - write.rs      — create / update / delete (id, timestamps, persist)
//! - collection.rs — фасад Collection: именованная поверхность + типизированные
//!                   представления через serde на границе

pub mod collection;
pub mod core;
pub mod read;
pub mod write;

pub use collection::Collection;
pub use core::Db;
