use chrono::{Duration, Utc};
use storefront_test_utils::prelude::*;

use crate::{
    model::customer::IdentityAction,
    server::{
        data::{
            customer::{enrollment::EnrollmentRepository, CustomerRepository},
            order::OrderRepository,
        },
        error::{identity::IdentityError, Error},
        service::identity::{link::OrderLinkService, IdentityService},
    },
};

mod on_authenticated;
mod resolve_identity;
