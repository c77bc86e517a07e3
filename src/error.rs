//! Caller-visible domain errors.
//!
//! Filesystem and parse failures never leave the store (fallback/degrade
//! policy), so the only typed condition callers see is `NotFound` from
//! point mutations (`update`/`delete`). It is carried inside `anyhow::Error`
//! and can be recovered with `downcast_ref::<NotFound>()`.

use thiserror::Error;

/// Точечная мутация не нашла запись по заданному ключу.
#[derive(Debug, Error)]
#[error("{collection}: no record matches the given key")]
pub struct NotFound {
    pub collection: String,
}

impl NotFound {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
        }
    }
}

/// Удобный предикат для вызывающего кода: было ли это NotFound.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<NotFound>().is_some()
}
