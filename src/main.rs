use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use content_store::{http, CollectionService, DocumentStore};
use flexi_logger::Logger;
use log::{error, info};

/// Serve the site content collections over HTTP.
#[derive(Debug, Parser)]
#[command(name = "content-store", version, about)]
struct Args {
    /// JSON document holding the collections. Created if missing.
    #[arg(long, env = "CONTENT_STORE_DATA", default_value = "data.json")]
    data: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "CONTENT_STORE_ADDR", default_value = "0.0.0.0:5000")]
    addr: String,

    /// Write compact JSON instead of indented.
    #[arg(long)]
    compact: bool,

    /// Log spec, e.g. `info` or `content_store=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = match Logger::try_with_str(&args.log_level).and_then(|l| l.start()) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("failed to start logger: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = match DocumentStore::builder(&args.data)
        .pretty(!args.compact)
        .build()
    {
        Ok(store) => store,
        Err(e) => {
            error!("refusing to start: {e}");
            return ExitCode::FAILURE;
        }
    };
    let service = CollectionService::new(Arc::new(store));

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutting down");
    };
    if let Err(e) = http::serve(service, &args.addr, shutdown).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
