use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};

use crate::server::{data::order::OrderState, error::order::OrderError};

/// Named transitions of the order state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderAction {
    /// Payment confirmed by the gateway or an admin
    MarkAsPaid,
    MarkAsCancelled,
    MarkAsRefunded,
    /// Operator override of either field, without side effects on customer counters
    UpdateStatus {
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    },
}

impl OrderAction {
    /// Parses an action name as sent by the admin UI or the payment webhook
    ///
    /// `status` and `payment_status` are only read by `update_status`, which requires at
    /// least one of them.
    pub fn parse(
        order_id: &str,
        name: &str,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> Result<Self, OrderError> {
        let invalid = |reason: &str| OrderError::InvalidAction {
            order_id: order_id.to_string(),
            action: name.to_string(),
            reason: reason.to_string(),
        };

        match name.trim() {
            "mark_as_paid" => Ok(Self::MarkAsPaid),
            "mark_as_cancelled" => Ok(Self::MarkAsCancelled),
            "mark_as_refunded" => Ok(Self::MarkAsRefunded),
            "update_status" if status.is_none() && payment_status.is_none() => {
                Err(invalid("update_status requires a status or payment_status"))
            }
            "update_status" => Ok(Self::UpdateStatus {
                status,
                payment_status,
            }),
            _ => Err(invalid("unrecognized action")),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::MarkAsPaid => "mark_as_paid",
            Self::MarkAsCancelled => "mark_as_cancelled",
            Self::MarkAsRefunded => "mark_as_refunded",
            Self::UpdateStatus { .. } => "update_status",
        }
    }

    /// The state an order in `current` ends up in after this action
    pub fn apply(&self, current: OrderState) -> OrderState {
        match *self {
            Self::MarkAsPaid => OrderState {
                status: OrderStatus::Approved,
                payment_status: PaymentStatus::Paid,
            },
            Self::MarkAsCancelled => OrderState {
                status: OrderStatus::Cancelled,
                payment_status: match current.payment_status {
                    PaymentStatus::Paid => PaymentStatus::Refunded,
                    other => other,
                },
            },
            Self::MarkAsRefunded => OrderState {
                status: OrderStatus::Refunded,
                payment_status: PaymentStatus::Refunded,
            },
            Self::UpdateStatus {
                status,
                payment_status,
            } => OrderState {
                status: status.unwrap_or(current.status),
                payment_status: payment_status.unwrap_or(current.payment_status),
            },
        }
    }

    /// Whether applying the action to an order in `previous` records a sale on the owner
    ///
    /// Only `mark_as_paid` does, and only the first time the order becomes paid so a
    /// repeated gateway notification can't count the same order twice.
    pub fn records_sale(&self, previous: OrderState) -> bool {
        matches!(self, Self::MarkAsPaid) && previous.payment_status != PaymentStatus::Paid
    }
}
