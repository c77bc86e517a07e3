use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod cmd_count;
mod cmd_create;
mod cmd_delete;
mod cmd_find;
mod cmd_seed;
mod cmd_status;
mod cmd_update;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug ./satchel ...
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Seed { path, force } =>
            cmd_seed::exec(path, force),

        cli::Cmd::Find { path, collection, r#where, order, skip, take, compact } =>
            cmd_find::exec(path, collection, r#where, order, skip, take, compact),

        cli::Cmd::Count { path, collection, r#where } =>
            cmd_count::exec(path, collection, r#where),

        cli::Cmd::Create { path, collection, fields, fields_file } =>
            cmd_create::exec(path, collection, fields, fields_file),

        cli::Cmd::Update { path, collection, key, fields } =>
            cmd_update::exec(path, collection, key, fields),

        cli::Cmd::Delete { path, collection, key } =>
            cmd_delete::exec(path, collection, key),

        // Status supports --json flag
        cli::Cmd::Status { path, json } =>
            cmd_status::exec(path, json),
    }
}
