//! simple-api entry point.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use simple_api::api::{create_router, AppState};
use simple_api::config::Config;
use simple_api::server::{Server, BIND_HOST};
use simple_api::utils::shutdown_signal;

/// Minimal HTTP service with a greeting and a health check.
#[derive(Parser, Debug)]
#[command(name = "simple-api")]
#[command(about = "Serves a static greeting on / and a health check on /health")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Listen port, overrides PORT.
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve HTTP (default).
    Serve,

    /// Print the resolved configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load()?;
    init_logging(&config, args.verbose);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let port = config.resolve_port(args.port);

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config, port),
        Some(Command::Serve) | None => cmd_serve(config, port).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("simple_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn cmd_check_config(config: &Config, port: u16) -> anyhow::Result<()> {
    println!("Bind address: {}:{}", BIND_HOST, port);
    println!("Greeting:     {}", config.greeting);
    println!("Log filter:   {}", config.rust_log);
    println!("JSON logs:    {}", config.log_json);
    Ok(())
}

async fn cmd_serve(config: Config, port: u16) -> anyhow::Result<()> {
    let server = Server::bind(port).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    let router = create_router(AppState::new(config.greeting));
    server.run(router, shutdown_signal()).await?;

    info!("Goodbye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_flag_rejects_zero() {
        assert!(Args::try_parse_from(["simple-api", "--port", "0"]).is_err());
    }

    #[test]
    fn port_flag_accepts_positive_values() {
        let args = Args::try_parse_from(["simple-api", "-p", "8080"]).unwrap();
        assert_eq!(args.port, Some(8080));

        let args = Args::try_parse_from(["simple-api"]).unwrap();
        assert_eq!(args.port, None);
    }
}
