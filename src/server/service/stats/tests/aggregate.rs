use super::*;

#[test]
fn revenue_counts_only_approved_orders_per_window() {
    let orders = vec![
        order_at("o-1", OrderStatus::Approved, 15000, 0),
        order_at("o-2", OrderStatus::Approved, 1000, 3),
        order_at("o-3", OrderStatus::Approved, 500, 20),
        order_at("o-4", OrderStatus::Approved, 100, 90),
        order_at("o-5", OrderStatus::Pending, 99999, 0),
        order_at("o-6", OrderStatus::Rejected, 99999, 0),
    ];

    let figures = aggregate(&orders, &[], Utc::now());

    assert_eq!(figures.revenue.last_7_days, 16000);
    assert_eq!(figures.revenue.last_30_days, 16500);
    assert_eq!(figures.revenue.all_time, 16600);
    assert!(figures.revenue.today <= 16000);
    assert_eq!(figures.orders.total, 6);
    assert_eq!(figures.orders.approved, 4);
    assert_eq!(figures.orders.pending, 1);
    assert_eq!(figures.orders.rejected, 1);
}

#[test]
fn payment_methods_sorted_by_count() {
    let orders = vec![
        OrderModel {
            payment_method: PaymentMethod::Transfer,
            ..order_at("o-1", OrderStatus::Approved, 2000, 1)
        },
        OrderModel {
            payment_method: PaymentMethod::Transfer,
            ..order_at("o-2", OrderStatus::Pending, 3000, 1)
        },
        order_at("o-3", OrderStatus::Approved, 1000, 1),
    ];

    let figures = aggregate(&orders, &[], Utc::now());

    assert_eq!(figures.payment_methods.len(), 2);
    assert_eq!(figures.payment_methods[0].method, "transfer");
    assert_eq!(figures.payment_methods[0].count, 2);
    assert_eq!(figures.payment_methods[0].revenue, 2000);
    assert_eq!(figures.payment_methods[1].method, "gateway");
    assert_eq!(figures.payment_methods[1].revenue, 1000);
}

/// Only items of approved orders from the last 30 days rank, by quantity sold
#[test]
fn top_products_rank_recent_approved_items() {
    let orders = vec![
        order_at("o-1", OrderStatus::Approved, 0, 2),
        order_at("o-2", OrderStatus::Approved, 0, 45),
        order_at("o-3", OrderStatus::Pending, 0, 1),
    ];
    let mut items = vec![
        factory::mock_product_item("o-1", "p-1", "Tijera", 100),
        factory::mock_product_item("o-1", "p-2", "Centímetro", 50),
        factory::mock_product_item("o-2", "p-2", "Centímetro", 50),
        factory::mock_product_item("o-3", "p-2", "Centímetro", 50),
        factory::mock_course_item("o-1", None, Some("course-1"), "Moldería", 900),
    ];
    items[1].quantity = 3;

    let figures = aggregate(&orders, &items, Utc::now());

    let ranked: Vec<(&str, i64)> = figures
        .top_products
        .iter()
        .map(|product| (product.name.as_str(), product.quantity))
        .collect();
    assert_eq!(ranked, vec![("Centímetro", 3), ("Moldería", 1), ("Tijera", 1)]);
    assert_eq!(figures.top_products[1].product_id.as_deref(), Some("course-1"));
}

#[test]
fn top_products_keep_five() {
    let orders = vec![order_at("o-1", OrderStatus::Approved, 0, 0)];
    let items: Vec<_> = (0..8)
        .map(|i| factory::mock_product_item("o-1", &format!("p-{}", i), &format!("Producto {}", i), 10))
        .collect();

    let figures = aggregate(&orders, &items, Utc::now());

    assert_eq!(figures.top_products.len(), 5);
}
