use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;

use liftlog_client::app::cli::{self, Cli};

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("liftlog_client", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    cli::run(Cli::parse()).await
}
