use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Maximum number of orders a single dashboard computation reads
    pub stats_row_budget: u64,
}
