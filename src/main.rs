#![allow(clippy::result_large_err)]

use bank_model::{
    config::{database, seed},
    core::{debug::print_statement, integrity::check_integrity},
    entities::{Account, AccountStatus, account},
    errors::Result,
};
use dotenvy::dotenv;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use std::{env, path::Path};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure the schema exists
    if env::var("DATABASE_URL").is_err() {
        std::fs::create_dir_all("data")?;
    }
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 4. Seed reference data when a seed file is present
    let seed_path = env::var("SEED_CONFIG").unwrap_or_else(|_| seed::DEFAULT_SEED_PATH.to_string());
    if Path::new(&seed_path).exists() {
        let config = seed::load_seed_config(&seed_path)?;
        seed::seed_reference_data(&db, &config)
            .await
            .inspect_err(|e| error!("Failed to seed reference data: {}", e))?;
    } else {
        info!("No seed file at {}, skipping reference data.", seed_path);
    }

    // 5. Report on the state of the data
    let report = check_integrity(&db).await?;
    if report.is_clean() {
        info!("No integrity violations found.");
    } else {
        warn!("{} integrity violations found.", report.violations.len());
    }

    print_statement(&Account::find().filter(account::Column::Status.eq(AccountStatus::Active)))?;

    Ok(())
}
