//! todo - minimal to-do list
//!
//! A single-binary CLI for adding, completing and clearing to-do items.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = todo::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
