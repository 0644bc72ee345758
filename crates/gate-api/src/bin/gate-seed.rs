//! Database seeding tool
//!
//! Creates the default admin account and the built-in rule set. Safe to run
//! repeatedly; existing data is left alone.
//!
//! ```bash
//! cargo run -p gate-api --bin gate-seed
//! ```

use gate_api::server::build_service_context;
use gate_common::{try_init_tracing, AppConfig};
use gate_db::{create_pool, run_migrations};
use gate_service::SeedService;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Seeding failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let db_config = gate_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let context = build_service_context(&pool)?;
    let outcome = SeedService::new(&context, config.seed.clone()).run().await?;

    if outcome.admin_created {
        info!(username = %config.seed.admin_username, "created admin user");
    } else {
        info!(username = %config.seed.admin_username, "admin user already exists");
    }
    info!(rules = outcome.rules_created, "default rules installed");

    // The only place the admin key is ever printed
    println!("Admin username: {}", config.seed.admin_username);
    println!("Admin API key:  {}", outcome.admin_api_key);

    Ok(())
}
