use entity::sea_orm_active_enums::{OrderStatus, PaymentStatus};
use storefront_test_utils::prelude::*;

use crate::server::{
    data::{
        customer::{enrollment::EnrollmentRepository, CustomerRepository},
        order::{item::OrderItemRepository, OrderRepository},
        review::EntitlementReviewRepository,
    },
    model::db::{CourseModel, OrderModel},
    service::entitlement::{
        matcher::{CourseCatalog, LineItem, MatchRule},
        overrides::OverrideTable,
        resolve_item, EntitlementService, ItemResolution,
    },
};


fn course(id: &str, slug: &str, title: &str) -> CourseModel {
    factory::mock_course(id, slug, title)
}

fn item<'a>(product_id: Option<&'a str>, course_id: Option<&'a str>, name: &'a str) -> LineItem<'a> {
    LineItem {
        product_id,
        course_id,
        name,
    }
}

/// An approved and paid order, the state repair and grants operate on
fn paid_order(order_id: &str, customer_id: &str, email: &str, total: i64) -> OrderModel {
    OrderModel {
        status: OrderStatus::Approved,
        payment_status: PaymentStatus::Paid,
        ..factory::mock_order(order_id, customer_id, email, total)
    }
}
