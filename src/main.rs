use anyhow::Context;
use clap::Arg;
use market_access::{create_router, metadata::Metadata};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = clap::Command::new("Market Access")
        .arg(
            Arg::new("address")
                .short('a')
                .long("address")
                .value_name("ADDRESS")
                .help("Address to bind the server to")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to listen on")
                .default_value("8080"),
        )
        .arg(
            Arg::new("metadata")
                .short('m')
                .long("metadata")
                .value_name("METADATA")
                .help("Path to a YAML file with countries, sectors and statuses"),
        )
        .get_matches();

    let metadata = match matches.get_one::<String>("metadata") {
        Some(path) => Metadata::from_file(path)
            .with_context(|| format!("failed to load metadata from {}", path))?,
        None => Metadata::embedded(),
    };

    let address = matches
        .get_one::<String>("address")
        .map(|s| s.as_str())
        .unwrap_or("127.0.0.1");
    let port = matches
        .get_one::<String>("port")
        .map(|s| s.as_str())
        .unwrap_or("8080");

    let app = create_router(metadata);

    let bind = format!("{}:{}", address, port);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    tracing::info!("listening on http://{}", bind);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
