use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;

use crate::server::{config::Config, error::Error, model::app::AppState, router, scheduler::Scheduler};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Register background jobs and start the scheduler
pub async fn start_scheduler(config: &Config, db: DatabaseConnection) -> Result<(), Error> {
    Scheduler::new(db, config).await?.start().await
}

/// Bind the HTTP listener and serve the API until the process exits
pub async fn serve(config: &Config, db: DatabaseConnection) -> Result<(), Error> {
    let app = router::routes().with_state(AppState {
        db,
        stats_row_budget: config.stats_row_budget,
    });

    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(bind_address = %config.bind_address, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
