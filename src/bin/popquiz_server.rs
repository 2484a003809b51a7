//! popquiz HTTP server
//!
//! Fetches and parses the ranked country list once at startup, then
//! serves guess-checking queries over HTTP until shut down.

use std::net::SocketAddr;

use tracing::{error, info};

use popquiz::extract::{Extractor, ExtractorConfig};
use popquiz::fetch::{FetchConfig, WikiClient};
use popquiz::guess::Matcher;
use popquiz::snapshot::{CacheState, Snapshot};
use popquiz::transport::{router, AppState};

/// Server configuration
struct Config {
    /// Address to bind to
    addr: SocketAddr,
    /// Article title to fetch
    page: String,
    /// Number of entities to cache
    target: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            page: FetchConfig::default().page,
            target: popquiz::extract::DEFAULT_TARGET,
        }
    }
}

fn parse_args() -> Config {
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    let port: u16 = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("error: invalid port number: {}", args[i + 1]);
                        std::process::exit(1);
                    });
                    config.addr.set_port(port);
                    i += 2;
                } else {
                    eprintln!("error: --port requires a value");
                    std::process::exit(1);
                }
            }
            "--page" => {
                if i + 1 < args.len() {
                    config.page = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("error: --page requires a value");
                    std::process::exit(1);
                }
            }
            "--count" | "-n" => {
                if i + 1 < args.len() {
                    let count: usize = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("error: invalid count: {}", args[i + 1]);
                        std::process::exit(1);
                    });
                    if count == 0 {
                        eprintln!("error: --count must be at least 1");
                        std::process::exit(1);
                    }
                    config.target = count;
                    i += 2;
                } else {
                    eprintln!("error: --count requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("popquiz-server - population quiz HTTP server");
                println!();
                println!("USAGE:");
                println!("    popquiz-server [OPTIONS]");
                println!();
                println!("OPTIONS:");
                println!("    -p, --port <PORT>     Port to listen on [default: 3000]");
                println!("        --page <TITLE>    Article title to fetch");
                println!("    -n, --count <N>       Entities to cache [default: 20]");
                println!("    -h, --help            Print help information");
                std::process::exit(0);
            }
            other => {
                eprintln!("error: unknown argument: {other}");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
    }

    config
}

/// Fetches the article and parses it into a snapshot.
///
/// Any failure here is fatal for this cache attempt but not for the
/// process: the caller serves an unavailable state instead.
async fn populate_cache(config: &Config) -> CacheState {
    let fetch_config = FetchConfig {
        page: config.page.clone(),
        ..FetchConfig::default()
    };

    let extractor_config = ExtractorConfig {
        target: config.target,
        ..ExtractorConfig::default()
    };
    let extractor = match Extractor::new(extractor_config) {
        Ok(extractor) => extractor,
        Err(e) => return CacheState::unavailable(e.to_string()),
    };

    let client = match WikiClient::new(fetch_config) {
        Ok(client) => client,
        Err(e) => return CacheState::unavailable(e.to_string()),
    };

    match client.fetch_wikitext().await {
        Ok(wikitext) => {
            let extraction = extractor.extract(&wikitext);
            info!(
                cached = extraction.len(),
                target = extraction.target(),
                "cached ranked country list"
            );
            CacheState::ready(Snapshot::from_extraction(extraction))
        }
        Err(e) => {
            error!(error = %e, "failed to fetch country data on startup");
            CacheState::unavailable(e.to_string())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "popquiz=info,tower_http=info".to_string()),
        )
        .init();

    let config = parse_args();

    info!(page = %config.page, target = config.target, "populating cache on startup");
    let cache = populate_cache(&config).await;
    if let Some(reason) = cache.reason() {
        error!(reason, "serving with unavailable cache");
    }

    let state = AppState::new(cache, Matcher::with_builtin_aliases());
    let app = router(state);

    info!(addr = %config.addr, "starting server");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
