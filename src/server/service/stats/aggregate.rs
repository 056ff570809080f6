//! Dashboard figures derived from one in-memory batch of orders.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{OrderStatus, PaymentMethod};

use crate::{
    model::stats::{OrderCountStats, PaymentMethodStat, RevenueStats, TopProductStat},
    server::{
        model::db::{OrderItemModel, OrderModel},
        util::time::StatsWindows,
    },
};

const TOP_PRODUCTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Figures {
    pub revenue: RevenueStats,
    pub orders: OrderCountStats,
    pub payment_methods: Vec<PaymentMethodStat>,
    pub top_products: Vec<TopProductStat>,
}

fn payment_method_name(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Gateway => "gateway",
        PaymentMethod::Transfer => "transfer",
        PaymentMethod::Cash => "cash",
        PaymentMethod::Other => "other",
    }
}

/// Approved orders of the last 30 days, the only ones whose items feed top products
pub fn top_product_order_ids(orders: &[OrderModel], now: DateTime<Utc>) -> Vec<String> {
    let windows = StatsWindows::at(now);

    orders
        .iter()
        .filter(|order| {
            order.status == OrderStatus::Approved && order.created_at >= windows.last_30_days
        })
        .map(|order| order.id.clone())
        .collect()
}

/// Computes every dashboard figure from `orders`
///
/// `items` may contain items of any order; only those of approved orders from the last
/// 30 days count towards top products.
pub fn aggregate(orders: &[OrderModel], items: &[OrderItemModel], now: DateTime<Utc>) -> Figures {
    let windows = StatsWindows::at(now);
    let mut revenue = RevenueStats::default();
    let mut counts = OrderCountStats::default();
    let mut methods: BTreeMap<&'static str, (u64, i64)> = BTreeMap::new();

    for order in orders {
        counts.total += 1;
        let approved = order.status == OrderStatus::Approved;

        match order.status {
            OrderStatus::Pending => counts.pending += 1,
            OrderStatus::Approved => counts.approved += 1,
            OrderStatus::Rejected => counts.rejected += 1,
            OrderStatus::Cancelled | OrderStatus::Refunded => {}
        }

        let method = methods
            .entry(payment_method_name(order.payment_method))
            .or_default();
        method.0 += 1;

        if approved {
            method.1 += order.total_amount;
            revenue.all_time += order.total_amount;
            if order.created_at >= windows.last_30_days {
                revenue.last_30_days += order.total_amount;
            }
            if order.created_at >= windows.last_7_days {
                revenue.last_7_days += order.total_amount;
            }
            if order.created_at >= windows.today {
                revenue.today += order.total_amount;
            }
        }
    }

    let mut payment_methods: Vec<PaymentMethodStat> = methods
        .into_iter()
        .map(|(method, (count, revenue))| PaymentMethodStat {
            method: method.to_string(),
            count,
            revenue,
        })
        .collect();
    payment_methods.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.method.cmp(&b.method)));

    Figures {
        revenue,
        orders: counts,
        payment_methods,
        top_products: top_products(orders, items, now),
    }
}

fn top_products(
    orders: &[OrderModel],
    items: &[OrderItemModel],
    now: DateTime<Utc>,
) -> Vec<TopProductStat> {
    let eligible: HashSet<String> = top_product_order_ids(orders, now).into_iter().collect();
    let mut products: HashMap<String, TopProductStat> = HashMap::new();

    for item in items.iter().filter(|item| eligible.contains(&item.order_id)) {
        let reference = item.product_id.clone().or_else(|| item.course_id.clone());
        let key = reference.clone().unwrap_or_else(|| item.name.clone());

        let entry = products.entry(key).or_insert_with(|| TopProductStat {
            product_id: reference,
            name: item.name.clone(),
            quantity: 0,
            revenue: 0,
        });
        entry.quantity += i64::from(item.quantity);
        entry.revenue += item.total;
    }

    let mut products: Vec<TopProductStat> = products.into_values().collect();
    products.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| b.revenue.cmp(&a.revenue))
            .then_with(|| a.name.cmp(&b.name))
    });
    products.truncate(TOP_PRODUCTS);

    products
}
