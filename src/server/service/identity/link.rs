//! Legacy order linking.
//!
//! Orders placed before the customer authenticated carry a snapshot of their email but an
//! anonymous or stale owner id. Linking re-owns them under the stable id and records the
//! previous owner in the order's metadata.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde_json::{json, Map, Value};

use crate::server::{
    data::{order::OrderRepository, BATCH_SIZE},
    error::Error,
    model::db::OrderModel,
    util::email::{capitalized_variant, normalize_email},
};

/// Metadata key holding the list of previous owners of an order
const LINK_HISTORY_KEY: &str = "linkHistory";

pub struct OrderLinkService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderLinkService<'a> {
    /// Creates a new instance of [`OrderLinkService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Re-owns every order placed under `email` by a different customer id
    ///
    /// Orders are looked up by the normalized email and, best effort, by its capitalized
    /// variant. Orders already owned by `stable_id` are skipped, so a second run links 0.
    /// Customer counters are never touched.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of orders re-owned by this call
    /// - `Err(Error::DbErr)` - The normalized email lookup failed
    /// - `Err(Error::PartialBatch)` - A chunk of writes failed, earlier chunks stay linked
    pub async fn link_orders(&self, stable_id: &str, email: &str) -> Result<u64, Error> {
        let normalized = normalize_email(email);
        let order_repo = OrderRepository::new(self.db);

        let mut candidates: BTreeMap<String, OrderModel> = BTreeMap::new();
        for order in order_repo
            .find_by_customer_emails(std::slice::from_ref(&normalized))
            .await?
        {
            candidates.insert(order.id.clone(), order);
        }

        if let Some(capitalized) = capitalized_variant(&normalized) {
            match order_repo.find_by_customer_emails(&[capitalized]).await {
                Ok(orders) => {
                    for order in orders {
                        candidates.entry(order.id.clone()).or_insert(order);
                    }
                }
                Err(e) => tracing::warn!(
                    stable_id,
                    "Skipping capitalized email lookup while linking orders: {}",
                    e
                ),
            }
        }

        let unlinked: Vec<OrderModel> = candidates
            .into_values()
            .filter(|order| order.customer_id != stable_id)
            .collect();

        if unlinked.is_empty() {
            tracing::debug!(stable_id, "No orders to link");
            return Ok(0);
        }

        let linked_at = Utc::now();
        let total_chunks = unlinked.len().div_ceil(BATCH_SIZE);
        let mut linked = 0;

        for (index, chunk) in unlinked.chunks(BATCH_SIZE).enumerate() {
            linked += self
                .link_chunk(stable_id, chunk, linked_at)
                .await
                .map_err(|source| Error::PartialBatch {
                    operation: format!("order link for {}", stable_id),
                    applied_chunks: index,
                    total_chunks,
                    source,
                })?;
        }

        tracing::info!(stable_id, linked, "Linked historical orders to customer");

        Ok(linked)
    }

    async fn link_chunk(
        &self,
        stable_id: &str,
        orders: &[OrderModel],
        linked_at: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;
        let order_repo = OrderRepository::new(&txn);
        let mut linked = 0;

        for order in orders {
            let metadata = with_link_entry(order.metadata.clone(), &order.customer_id, linked_at);
            linked += order_repo
                .reassign_customer(&order.id, stable_id, metadata, linked_at.naive_utc())
                .await?;
        }

        txn.commit().await?;

        Ok(linked)
    }
}

/// Appends `{previousCustomerId, linkedAt}` to the metadata's link history
///
/// Other metadata keys are preserved; non-object metadata is kept under `legacy`.
pub(crate) fn with_link_entry(
    metadata: Option<Value>,
    previous_customer_id: &str,
    linked_at: DateTime<Utc>,
) -> Value {
    let mut map = match metadata {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => Map::new(),
        Some(other) => {
            let mut map = Map::new();
            map.insert("legacy".to_string(), other);
            map
        }
    };

    let entry = json!({
        "previousCustomerId": previous_customer_id,
        "linkedAt": linked_at.to_rfc3339(),
    });

    match map.get_mut(LINK_HISTORY_KEY) {
        Some(Value::Array(history)) => history.push(entry),
        Some(existing) => {
            let previous = existing.take();
            *existing = Value::Array(vec![previous, entry]);
        }
        None => {
            map.insert(LINK_HISTORY_KEY.to_string(), Value::Array(vec![entry]));
        }
    }

    Value::Object(map)
}
