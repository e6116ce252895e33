// src/db.rs
use crate::config::Config;
use migration::Migrator;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr,
    Statement,
};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;

pub type DbPool = DatabaseConnection;

fn connect_options(config: &Config, schema: Option<&str>) -> ConnectOptions {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    // 接続オプションを設定
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(8 * 60))
        .sqlx_logging(false);

    if let Some(schema) = schema {
        opt.set_schema_search_path(schema.to_string());
    }

    opt
}

pub async fn create_db_pool(config: &Config) -> Result<DbPool, DbErr> {
    Database::connect(connect_options(config, None)).await
}

/// スキーマを search_path に設定した接続プールを作成する
pub async fn create_db_pool_with_schema(config: &Config, schema: &str) -> Result<DbPool, DbErr> {
    Database::connect(connect_options(config, Some(schema))).await
}

// スキーマが存在するか確認するヘルパー関数
pub async fn schema_exists(conn: &DbPool, schema: &str) -> Result<bool, DbErr> {
    let result_opt = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT EXISTS (SELECT 1 FROM information_schema.schemata WHERE schema_name = $1) AS exists",
            [schema.into()],
        ))
        .await?;

    // 結果が存在すれば処理、なければfalseを返す
    match result_opt {
        Some(result) => result.try_get("", "exists"),
        None => Ok(false),
    }
}

// スキーマを作成するヘルパー関数（識別子はバインドできないためクォートして埋め込む）
pub async fn create_schema(conn: &DbPool, schema: &str) -> Result<(), DbErr> {
    let create_schema = format!(
        "CREATE SCHEMA IF NOT EXISTS \"{}\";",
        schema.replace('"', "\"\"")
    );
    conn.execute(Statement::from_string(DatabaseBackend::Postgres, create_schema))
        .await?;
    Ok(())
}

/// 設定に従って接続プールを作成する（スキーマ指定時は必要に応じて作成する）
pub async fn connect(config: &Config) -> Result<DbPool, DbErr> {
    let Some(schema) = config.db_schema.as_deref() else {
        return create_db_pool(config).await;
    };

    tracing::info!(schema = %schema, "Using schema");

    let base_pool = create_db_pool(config).await?;
    if !schema_exists(&base_pool, schema).await? {
        tracing::info!(schema = %schema, "Schema does not exist, creating it");
        create_schema(&base_pool, schema).await?;
    }
    base_pool.close().await?;

    create_db_pool_with_schema(config, schema).await
}

pub async fn run_migrations(conn: &DbPool) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}
