//! Read-only liveness probe
//!
//! Checks that the settings store is reachable and holds at least one row;
//! exits 0 on success and 1 on failure. Intended as a container healthcheck
//! alongside the main bot process.

use std::process::ExitCode;
use std::str::FromStr;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::ConnectOptions;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let url = std::env::var("CHATWARDEN_DATABASE__URL")
        .unwrap_or_else(|_| "sqlite://data/chatwarden.db".to_string());

    let options = match SqliteConnectOptions::from_str(&url) {
        Ok(options) => options.read_only(true),
        Err(e) => {
            eprintln!("Healthcheck failed: invalid database url: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut conn = match options.connect().await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Healthcheck failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let row: Result<Option<i64>, sqlx::Error> =
        sqlx::query_scalar("SELECT 1 FROM settings LIMIT 1")
            .fetch_optional(&mut conn)
            .await;

    match row {
        Ok(Some(_)) => {
            println!("Healthcheck passed");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("Healthcheck failed: no data returned from settings");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Healthcheck failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
