use chrono::Utc;
use storefront_test_utils::prelude::*;

use super::{
    enrollment::{EnrollmentRepository, NewEnrollment},
    CustomerRepository,
};

mod enrollment;

fn new_enrollment(customer_id: &str, course_id: &str, order_id: &str) -> NewEnrollment {
    NewEnrollment {
        customer_id: customer_id.to_string(),
        course_id: course_id.to_string(),
        product_id: None,
        order_id: order_id.to_string(),
        access_from: Utc::now().naive_utc(),
    }
}
