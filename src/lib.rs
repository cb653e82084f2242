pub mod cli;
pub mod emit;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod io_utils;
pub mod pipeline;
pub mod resolve;
pub mod schema_script;
pub mod sniff;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::Args;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("permcsv", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();
    pipeline::execute(&args)
}
