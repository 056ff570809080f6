use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};
use storefront_test_utils::prelude::*;

use super::{item::OrderItemRepository, OrderRepository, OrderState};

mod order;
