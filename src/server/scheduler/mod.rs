//! Scheduler for periodic background jobs.
//!
//! Currently runs the batch entitlement repair, which backfills course ids and enrollments
//! for paid orders the online grant path missed. Jobs run in-process on a cron schedule and
//! log their outcome; failures are retried with backoff and otherwise only logged.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    model::entitlement::RepairReport,
    server::{
        config::Config,
        error::Error,
        service::{entitlement::EntitlementService, retry::RetryContext},
    },
};

#[cfg(test)]
mod tests;

/// Job scheduler for background maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    sched: JobScheduler,
    entitlement_repair_cron: String,
    entitlement_repair_commit: bool,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, config: &Config) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self {
            db,
            sched,
            entitlement_repair_cron: config.entitlement_repair_cron.clone(),
            entitlement_repair_commit: config.entitlement_repair_commit,
        })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(())` - All jobs successfully registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or failure starting the scheduler
    pub async fn start(mut self) -> Result<(), Error> {
        let commit = self.entitlement_repair_commit;
        let cron = self.entitlement_repair_cron.clone();

        self.schedule_job(&cron, "entitlement repair", move |db| async move {
            run_entitlement_repair(&db, commit).await
        })
        .await?;

        self.sched.start().await?;

        tracing::info!(
            entitlement_repair_cron = %self.entitlement_repair_cron,
            entitlement_repair_commit = commit,
            "Scheduler started"
        );

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds (e.g., "0 0 4 * * *" for daily at 04:00)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job body, receiving a clone of the database connection
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<RepairReport, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(report) => tracing::info!(
                            job = %name,
                            dry_run = report.dry_run,
                            scanned_orders = report.scanned_orders,
                            enrollments_granted = report.enrollments_granted,
                            unresolved = report.unresolved_total,
                            "Scheduled job finished"
                        ),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

/// Runs the entitlement repair, retrying transient datastore failures
///
/// Without `commit` the run is a dry run that only reports what it would change.
pub async fn run_entitlement_repair(
    db: &DatabaseConnection,
    commit: bool,
) -> Result<RepairReport, Error> {
    RetryContext::new()
        .execute_with_retry("entitlement repair", move || async move {
            EntitlementService::new(db)
                .repair_entitlements(!commit)
                .await
        })
        .await
}
