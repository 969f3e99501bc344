use color_eyre::eyre::{Result, WrapErr};
use shoutsrv::config::{DEFAULT_BACKLOG, DEFAULT_PORT};
use shoutsrv::{Responder, ResponderConfig};
use tracing::info;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [port] [backlog]");
    eprintln!("  port:    Port to listen on, wildcard interface (default: {DEFAULT_PORT})");
    eprintln!("  backlog: Pending-connection queue length (default: {DEFAULT_BACKLOG})");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program}            # Listen on port {DEFAULT_PORT}");
    eprintln!("  {program} 7000       # Listen on port 7000");
    eprintln!("  {program} 7000 128   # Listen on port 7000 with backlog 128");
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("shoutsrv=info")
        .init();

    let args: Vec<String> = std::env::args().collect();

    let port = match args.get(1) {
        Some(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => usage(&args[0]),
        },
        None => DEFAULT_PORT,
    };
    let backlog = match args.get(2) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(backlog) => backlog,
            Err(_) => usage(&args[0]),
        },
        None => DEFAULT_BACKLOG,
    };

    let config = ResponderConfig::wildcard(port, backlog);
    info!(address = %config.bind_addr, backlog = config.backlog, "Starting responder");

    // A bind failure propagates out of main and exits non-zero
    let responder = Responder::bind(config).wrap_err("Failed to bind responder")?;
    responder.run().await.wrap_err("Failed to run responder")?;

    Ok(())
}
