// src/main.rs

use std::sync::Arc;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use wellspring::api::http::http_router;
use wellspring::config::CONFIG;
use wellspring::llm::OpenAIClient;
use wellspring::state::create_app_state;

#[derive(Parser, Debug)]
#[command(name = "wellspring", about = "Wellbeing-coaching chat backend")]
struct Args {
    /// Bind host (overrides WELLSPRING_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides WELLSPRING_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Log level (overrides WELLSPRING_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(&CONFIG.log_level)
        .parse::<Level>()
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Wellspring backend");
    info!("Chat model: {}", CONFIG.chat_model);
    info!("Summary model: {}", CONFIG.summary_model);
    info!("Model call timeout: {}s", CONFIG.request_timeout_secs);

    let backend = Arc::new(OpenAIClient::from_env()?);
    let app_state = Arc::new(create_app_state(backend));
    let app = http_router(app_state);

    let bind_address = format!(
        "{}:{}",
        args.host.as_deref().unwrap_or(&CONFIG.host),
        args.port.unwrap_or(CONFIG.port)
    );
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
