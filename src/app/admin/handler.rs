//! 商品 API 处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};

use super::{
    model::{Product, ProductInput},
    service::ProductService,
};
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.product_service.list_products().await)
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let Json(input) = payload?;
    let product = state.product_service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, CoreError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let product = state.product_service.update_product(id, input).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, CoreError> {
    let Path(id) = id?;
    state.product_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
