//! Centralized configuration and builder for SatchelDB.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - SatchelConfig::from_env() reads SDB_* env vars; the builder overrides.
//! - Db consumes the finished config via open_with_config().
//!
//! Persist policy:
//! - Degrade (default): a failed write to the backing file is logged and the
//!   in-memory snapshot is updated anyway — the caller observes the write
//!   within the process (read-only deployment targets).
//! - Require: a failed write propagates to the caller.

use std::fmt;

use crate::dataset::Dataset;

/// Что делать, когда запись backing-файла не удалась.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistMode {
    /// Log and keep serving the in-memory snapshot (availability over durability).
    Degrade,
    /// Propagate the write error to the caller.
    Require,
}

/// Top-level configuration for SatchelDB.
#[derive(Clone, Debug)]
pub struct SatchelConfig {
    /// Persist failure policy.
    /// Env: SDB_PERSIST_REQUIRE (default false; "1|true|on|yes" => Require)
    pub persist_mode: PersistMode,

    /// Pretty-print the JSON document on persist (2-space indent).
    /// Env: SDB_PRETTY_JSON (default true; "0|false|off|no" => compact)
    pub pretty_json: bool,

    /// Advisory lock file "<file>.lock" next to the backing file (best-effort).
    /// Env: SDB_LOCK_FILE (default true)
    pub lock_file: bool,

    /// Optional path to a JSON document used as the fallback dataset instead
    /// of the built-in one.
    /// Env: SDB_FALLBACK_PATH = "/absolute/or/relative/path"
    pub fallback_path: Option<String>,

    /// Programmatic fallback dataset; takes precedence over fallback_path.
    /// Builder-only (not readable from env).
    pub fallback: Option<Dataset>,
}

impl Default for SatchelConfig {
    fn default() -> Self {
        Self {
            persist_mode: PersistMode::Degrade,
            pretty_json: true,
            lock_file: true,
            fallback_path: None,
            fallback: None,
        }
    }
}

fn env_truthy(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

fn env_falsy(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "0" || s == "false" || s == "off" || s == "no"
}

impl SatchelConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SDB_PERSIST_REQUIRE") {
            if env_truthy(&v) {
                cfg.persist_mode = PersistMode::Require;
            }
        }

        if let Ok(v) = std::env::var("SDB_PRETTY_JSON") {
            if env_falsy(&v) {
                cfg.pretty_json = false;
            }
        }

        if let Ok(v) = std::env::var("SDB_LOCK_FILE") {
            if env_falsy(&v) {
                cfg.lock_file = false;
            }
        }

        if let Ok(v) = std::env::var("SDB_FALLBACK_PATH") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.fallback_path = Some(s.to_string());
            }
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_persist_mode(mut self, mode: PersistMode) -> Self {
        self.persist_mode = mode;
        self
    }

    pub fn with_pretty_json(mut self, on: bool) -> Self {
        self.pretty_json = on;
        self
    }

    pub fn with_lock_file(mut self, on: bool) -> Self {
        self.lock_file = on;
        self
    }

    pub fn with_fallback_path<S: Into<String>>(mut self, path: Option<S>) -> Self {
        self.fallback_path = path.map(Into::into);
        self
    }

    pub fn with_fallback(mut self, ds: Option<Dataset>) -> Self {
        self.fallback = ds;
        self
    }
}

impl fmt::Display for SatchelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SatchelConfig {{ \
             persist_mode: {:?}, \
             pretty_json: {}, \
             lock_file: {}, \
             fallback_path: {}, \
             fallback: {} \
             }}",
            self.persist_mode,
            self.pretty_json,
            self.lock_file,
            self.fallback_path.as_deref().unwrap_or("default(built-in)"),
            if self.fallback.is_some() {
                "custom"
            } else {
                "default(built-in)"
            },
        )
    }
}

/// Lightweight builder that produces a SatchelConfig.
/// Db exposes `Db::builder()` returning this builder.
#[derive(Clone, Debug)]
pub struct DbBuilder {
    cfg: SatchelConfig,
}

impl Default for DbBuilder {
    fn default() -> Self {
        // Start from env to preserve deployment behavior, then allow overrides.
        Self {
            cfg: SatchelConfig::from_env(),
        }
    }
}

impl DbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: SatchelConfig::default(),
        }
    }

    pub fn persist_mode(mut self, mode: PersistMode) -> Self {
        self.cfg.persist_mode = mode;
        self
    }

    pub fn pretty_json(mut self, on: bool) -> Self {
        self.cfg.pretty_json = on;
        self
    }

    pub fn lock_file(mut self, on: bool) -> Self {
        self.cfg.lock_file = on;
        self
    }

    pub fn fallback_path<S: Into<String>>(mut self, path: Option<S>) -> Self {
        self.cfg.fallback_path = path.map(Into::into);
        self
    }

    pub fn fallback(mut self, ds: Option<Dataset>) -> Self {
        self.cfg.fallback = ds;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> SatchelConfig {
        self.cfg
    }
}
