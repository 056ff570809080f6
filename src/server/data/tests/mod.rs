use storefront_test_utils::prelude::*;

use super::{
    catalog::CatalogRepository,
    review::{EntitlementReviewRepository, NewReview},
};
