// src/main.rs
use department_backend::api::{app_router, AppState};
use department_backend::config::Config;
use department_backend::db;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "department_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Department Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env()?;
    tracing::info!(
        server_addr = %app_config.server_addr,
        schema = ?app_config.db_schema,
        max_connections = app_config.max_connections,
        "Configuration loaded"
    );

    let db_pool = db::connect(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.run_migrations {
        db::run_migrations(&db_pool).await?;
        tracing::info!("Migrations applied.");
    }

    let app_router = app_router(AppState::new(db_pool));

    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
