//! Identity reconciliation.
//!
//! Customers created before stable-id identity existed are keyed by email or an arbitrary
//! generated id. On every login the merger makes sure exactly one record exists under the
//! stable id, migrating a legacy record onto it when one is found by email.

pub mod link;

#[cfg(test)]
mod tests;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::customer::IdentityAction,
    server::{
        data::customer::{enrollment::EnrollmentRepository, CustomerRepository},
        error::{identity::IdentityError, Error},
        model::db::{CustomerModel, EnrollmentModel},
        service::identity::link::OrderLinkService,
        util::email::{local_part, normalize_email},
    },
};

/// The customer record backing a login and how it was obtained
#[derive(Clone, Debug)]
pub struct ResolvedIdentity {
    pub customer: CustomerModel,
    pub action: IdentityAction,
}

/// Result of reconciling an authentication event
#[derive(Clone, Debug)]
pub struct AuthenticatedIdentity {
    pub customer: CustomerModel,
    pub action: IdentityAction,
    pub linked_orders: u64,
}

pub struct IdentityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> IdentityService<'a> {
    /// Creates a new instance of [`IdentityService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reconciles a login with the stored customer records, then re-owns historical orders
    ///
    /// Runs [`Self::resolve_identity`] followed by [`OrderLinkService::link_orders`]. Both
    /// steps are idempotent, so this is safe to call on every login.
    pub async fn on_authenticated(
        &self,
        stable_id: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<AuthenticatedIdentity, Error> {
        let resolved = self.resolve_identity(stable_id, email, display_name).await?;
        let linked_orders = OrderLinkService::new(self.db)
            .link_orders(stable_id, email)
            .await?;

        Ok(AuthenticatedIdentity {
            customer: resolved.customer,
            action: resolved.action,
            linked_orders,
        })
    }

    /// Ensures a customer record exists under `stable_id`
    ///
    /// # Behavior
    /// - A record already stored under `stable_id` is returned as [`IdentityAction::Unchanged`]
    /// - Otherwise the oldest record stored under the email is migrated onto `stable_id` in a
    ///   single transaction and deleted ([`IdentityAction::Migrated`])
    /// - Otherwise a fresh record is created ([`IdentityAction::Created`])
    ///
    /// Losing a race against a concurrent login for the same `stable_id` resolves to
    /// [`IdentityAction::Unchanged`] with the record the other login wrote.
    ///
    /// # Returns
    /// - `Ok(ResolvedIdentity)` - The record now stored under `stable_id`
    /// - `Err(Error::IdentityError)` - Empty stable id or malformed email
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn resolve_identity(
        &self,
        stable_id: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<ResolvedIdentity, Error> {
        let email = normalize_email(email);
        validate_identity(stable_id, &email)?;

        let customer_repo = CustomerRepository::new(self.db);

        if let Some(customer) = customer_repo.get_by_id(stable_id).await? {
            tracing::debug!(stable_id, "Customer already stored under stable id");

            return Ok(ResolvedIdentity {
                customer,
                action: IdentityAction::Unchanged,
            });
        }

        if let Some(legacy) = customer_repo.find_by_email(&email).await? {
            if let Some(resolved) = self.migrate_legacy(legacy, stable_id, &email).await? {
                return Ok(resolved);
            }
        }

        self.create_fresh(stable_id, &email, display_name).await
    }

    /// Gets a customer together with their enrollments
    pub async fn get_customer(
        &self,
        customer_id: &str,
    ) -> Result<(CustomerModel, Vec<EnrollmentModel>), Error> {
        let customer = CustomerRepository::new(self.db)
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| IdentityError::CustomerNotFound(customer_id.to_string()))?;
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_customer_id(customer_id)
            .await?;

        Ok((customer, enrollments))
    }

    /// Moves a legacy record onto `stable_id`
    ///
    /// Returns `None` when the legacy record was consumed by another identity before this
    /// transaction could delete it; the caller then creates a fresh record.
    async fn migrate_legacy(
        &self,
        legacy: CustomerModel,
        stable_id: &str,
        email: &str,
    ) -> Result<Option<ResolvedIdentity>, Error> {
        let legacy_id = legacy.id.clone();
        let migrated = CustomerModel {
            id: stable_id.to_string(),
            auth_uid: Some(stable_id.to_string()),
            email: email.to_string(),
            migrated_from: Some(legacy_id.clone()),
            ..legacy
        };

        let txn = self.db.begin().await?;
        let customer_repo = CustomerRepository::new(&txn);

        if !customer_repo.insert_if_absent(migrated.clone()).await? {
            txn.rollback().await?;
            tracing::debug!(
                stable_id,
                legacy_id = %legacy_id,
                "Stable id written by a concurrent login"
            );

            return self.already_resolved(stable_id).await;
        }

        let moved_enrollments = EnrollmentRepository::new(&txn)
            .reassign(&legacy_id, stable_id)
            .await?;

        if customer_repo.delete(&legacy_id).await?.rows_affected == 0 {
            txn.rollback().await?;
            tracing::debug!(
                stable_id,
                legacy_id = %legacy_id,
                "Legacy record consumed by a concurrent login"
            );

            return self.already_resolved(stable_id).await;
        }

        txn.commit().await?;

        tracing::info!(
            stable_id,
            legacy_id = %legacy_id,
            moved_enrollments,
            "Migrated legacy customer record onto stable id"
        );

        Ok(Some(ResolvedIdentity {
            customer: migrated,
            action: IdentityAction::Migrated,
        }))
    }

    async fn create_fresh(
        &self,
        stable_id: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<ResolvedIdentity, Error> {
        let name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| local_part(email))
            .to_string();

        let customer = CustomerModel {
            id: stable_id.to_string(),
            auth_uid: Some(stable_id.to_string()),
            email: email.to_string(),
            name,
            phone: None,
            dni: None,
            address: None,
            total_orders: 0,
            total_spent: 0,
            tags: serde_json::Value::Array(Vec::new()),
            migrated_from: None,
            created_at: Utc::now().naive_utc(),
            last_order_at: None,
        };

        if CustomerRepository::new(self.db)
            .insert_if_absent(customer.clone())
            .await?
        {
            tracing::info!(stable_id, "Created customer record");

            return Ok(ResolvedIdentity {
                customer,
                action: IdentityAction::Created,
            });
        }

        self.already_resolved(stable_id).await?.ok_or_else(|| {
            Error::InternalError(format!(
                "Customer {} neither inserted nor found after a conflicting insert",
                stable_id
            ))
        })
    }

    async fn already_resolved(&self, stable_id: &str) -> Result<Option<ResolvedIdentity>, Error> {
        let customer = CustomerRepository::new(self.db).get_by_id(stable_id).await?;

        Ok(customer.map(|customer| ResolvedIdentity {
            customer,
            action: IdentityAction::Unchanged,
        }))
    }
}

fn validate_identity(stable_id: &str, email: &str) -> Result<(), IdentityError> {
    let reason = if stable_id.trim().is_empty() {
        "stable id is empty"
    } else if !email.contains('@') || local_part(email).is_empty() {
        "email is not a valid address"
    } else {
        return Ok(());
    };

    Err(IdentityError::InvalidIdentity {
        stable_id: stable_id.to_string(),
        reason: reason.to_string(),
    })
}
