use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use twigg::cli::{parse_args, run_cli_command, USAGE};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so progress output on stdout stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "twigg=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    run_cli_command(command).await
}
