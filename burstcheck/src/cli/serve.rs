//! serve サブコマンド
//!
//! ヘルスチェック/テスト用サーバーを起動します。

use crate::config::{ServerConfig, DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_PORT};
use crate::db::{bootstrap, bootstrap::database_label};
use crate::AppState;
use clap::Args;
use tracing::{error, info};

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "BURSTCHECK_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "BURSTCHECK_HOST")]
    pub host: String,

    /// SQLite database URL
    #[arg(long, default_value = DEFAULT_DATABASE_URL, env = "BURSTCHECK_DATABASE_URL")]
    pub database_url: String,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
        }
    }
}

/// Connect the database, make sure the users table exists, then serve.
///
/// A failed table bootstrap is logged and the server starts anyway.
pub async fn execute(config: ServerConfig) -> anyhow::Result<()> {
    let db_pool = bootstrap::connect(&config.database_url).await?;

    match bootstrap::ensure_users_table(&db_pool).await {
        Ok(()) => info!("Users table ready"),
        Err(e) => error!("Error creating users table: {}", e),
    }

    let state = AppState {
        db_pool,
        port: config.port,
        db_label: database_label(&config.database_url),
    };

    crate::server::run(state, &config.bind_addr()).await
}
