use sea_orm::{ActiveValue, EntityTrait, IntoActiveModel};

use crate::{error::TestError, factory, TestContext};

impl TestContext {
    pub fn order(&self) -> OrderFixtures<'_> {
        OrderFixtures { setup: self }
    }
}

pub struct OrderFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> OrderFixtures<'a> {
    /// Insert an order with a single product item worth the whole order total.
    pub async fn insert_order(
        &self,
        order: entity::order::Model,
    ) -> Result<(entity::order::Model, Vec<entity::order_item::Model>), TestError> {
        let item = factory::mock_product_item(&order.id, "product-1", "Test Product", order.total_amount);
        self.insert_order_with_items(order, vec![item]).await
    }

    /// Insert an order and the provided items, letting the database assign item ids.
    pub async fn insert_order_with_items(
        &self,
        order: entity::order::Model,
        items: Vec<entity::order_item::Model>,
    ) -> Result<(entity::order::Model, Vec<entity::order_item::Model>), TestError> {
        let order = entity::prelude::Order::insert(order.into_active_model())
            .exec_with_returning(&self.setup.db)
            .await?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let mut item = item.into_active_model();
            item.id = ActiveValue::NotSet;
            item.order_id = ActiveValue::Set(order.id.clone());

            inserted.push(
                entity::prelude::OrderItem::insert(item)
                    .exec_with_returning(&self.setup.db)
                    .await?,
            );
        }

        Ok((order, inserted))
    }
}
