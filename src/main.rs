use chrono::Local;
use ea_manager::auth::StaticCredentials;
use ea_manager::lifecycle::normalize_statuses;
use ea_manager::storage::{load_accounts, persist_accounts, resolve_data_path};
use ea_manager::summary::TemplateAuditGenerator;
use ea_manager::{router, AppState};
use std::{env, net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut accounts = load_accounts(&data_path).await;
    normalize_statuses(&mut accounts, Local::now().date_naive());
    // write the (possibly seeded, possibly re-statused) collection back
    // so the file and memory agree from the start
    if let Err(err) = persist_accounts(&data_path, &accounts).await {
        error!("failed to write initial accounts file: {}", err.message);
    }

    let state = AppState::new(
        data_path,
        accounts,
        Arc::new(TemplateAuditGenerator),
        Arc::new(StaticCredentials::from_env()),
    );
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
