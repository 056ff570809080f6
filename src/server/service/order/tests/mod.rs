use entity::sea_orm_active_enums::{OrderItemType, OrderStatus, PaymentMethod, PaymentStatus};
use storefront_test_utils::prelude::*;

use crate::{
    model::{
        customer::IdentityAction,
        order::{CreateOrderItemRequest, CreateOrderRequest},
    },
    server::{
        data::{
            customer::{enrollment::EnrollmentRepository, CustomerRepository},
            order::OrderRepository,
            review::EntitlementReviewRepository,
        },
        error::{order::OrderError, Error},
        service::{
            identity::IdentityService,
            order::{action::OrderAction, OrderService},
        },
    },
};
