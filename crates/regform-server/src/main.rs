use anyhow::Context;
use regform::{config::DEFAULT_CONFIG_PATH, Config};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Overrides the config file location
const CONFIG_ENV: &str = "REGFORM_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("regform=info,regform_server=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path))?;

    info!(
        uploads = %config.upload.dir.display(),
        static_dir = %config.form.static_dir.display(),
        courses = config.form.courses.len(),
        "regform starting"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = regform::router(config).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
