//! 商品业务服务
//!
//! 每个操作都是一次完整的“读取整个目录 → 内存中修改 → 写回两个副本”。

use tracing::info;

use super::model::{next_id, Product, ProductInput};
use crate::core::error::CoreError;
use crate::infrastructure::store::CatalogStore;

#[derive(Clone)]
pub struct ProductService {
    store: CatalogStore,
}

impl ProductService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Vec<Product> {
        self.store.load().await
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<Product, CoreError> {
        let mut products = self.store.load().await;
        let id = next_id(&products)
            .ok_or_else(|| CoreError::InternalServerError("商品 ID 已用尽".to_string()))?;
        let product = input.into_product(id);

        products.push(product.clone());
        self.store.save(&products).await?;

        info!("商品 {} 已创建", id);
        Ok(product)
    }

    pub async fn update_product(&self, id: u64, input: ProductInput) -> Result<Product, CoreError> {
        let mut products = self.store.load().await;
        let product = products
            .iter_mut()
            .find(|p| p.id() == Some(id))
            .ok_or_else(|| product_not_found(id))?;

        input.apply_to(product);
        let updated = product.clone();
        self.store.save(&products).await?;

        info!("商品 {} 已更新", id);
        Ok(updated)
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), CoreError> {
        let mut products = self.store.load().await;
        let before = products.len();
        products.retain(|p| p.id() != Some(id));

        if products.len() == before {
            return Err(product_not_found(id));
        }

        self.store.save(&products).await?;

        info!("商品 {} 已删除", id);
        Ok(())
    }
}

fn product_not_found(id: u64) -> CoreError {
    CoreError::NotFound(format!("商品 {} 不存在", id))
}
