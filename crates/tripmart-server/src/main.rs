//! Tripmart Server — Application entry point.

use tracing_subscriber::EnvFilter;
use tripmart_approval::ApprovalEngine;
use tripmart_db::repository::{
    SurrealChatMessageRepository, SurrealUpdateRequestRepository, SurrealVendorRepository,
    SurrealVendorServiceRepository,
};
use tripmart_db::{DbConfig, DbManager};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tripmart=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Tripmart server...");

    let config = DbConfig::from_env();
    let manager = match DbManager::connect(&config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = tripmart_db::run_migrations(manager.client()).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    let db = manager.client().clone();
    let _engine = ApprovalEngine::new(
        SurrealVendorRepository::new(db.clone()),
        SurrealVendorServiceRepository::new(db.clone()),
        SurrealUpdateRequestRepository::new(db.clone()),
        SurrealChatMessageRepository::new(db),
    );

    tracing::info!("Approval engine initialised");

    // TODO: Start REST API server (route layer)

    tracing::info!("Tripmart server stopped.");
}
