use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Минимальный CLI для SatchelDB
#[derive(Parser, Debug)]
#[command(name = "satchel", version, about = "SatchelDB CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Write the built-in default dataset to a new backing file
    Seed {
        #[arg(long)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Query a collection: filter → sort → paginate, prints a JSON array
    ///
    /// Фильтр — JSON-словарь ORM-вида:
    ///   {"type":"CONTACT","title":{"contains":"tech"},"OR":[{"priority":"HIGH"}]}
    Find {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        collection: String,
        /// Filter as a JSON object
        #[arg(long = "where")]
        r#where: Option<String>,
        /// Sort key "field:asc" or "field:desc"; repeatable, priority in order
        #[arg(long)]
        order: Vec<String>,
        #[arg(long)]
        skip: Option<i64>,
        #[arg(long)]
        take: Option<i64>,
        /// Compact JSON output (single line)
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Count records passing a filter
    Count {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        collection: String,
        /// Filter as a JSON object
        #[arg(long = "where")]
        r#where: Option<String>,
    },
    /// Create a record (fields as JSON object or from file)
    Create {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        collection: String,
        /// Fields as a JSON object literal. Ignored if --fields-file is set.
        #[arg(long)]
        fields: Option<String>,
        /// Read the fields JSON from a file
        #[arg(long)]
        fields_file: Option<PathBuf>,
    },
    /// Update the record matching a key (shallow merge of fields)
    Update {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        collection: String,
        /// Key as a JSON object, e.g. {"id":"..."}
        #[arg(long)]
        key: String,
        /// Fields as a JSON object
        #[arg(long)]
        fields: String,
    },
    /// Delete the record matching a key
    Delete {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        collection: String,
        /// Key as a JSON object, e.g. {"id":"..."}
        #[arg(long)]
        key: String,
    },
    /// Print collections/metrics summary
    ///
    /// Пример:
    ///   satchel status --path ./content.json
    ///   satchel status --path ./content.json --json
    Status {
        #[arg(long)]
        path: PathBuf,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
