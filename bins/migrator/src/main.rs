//! Database migration runner for Voltra.
//!
//! Subcommands: up, down, status, fresh (drop everything and re-run).

use sea_orm_migration::prelude::*;
use voltra_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
