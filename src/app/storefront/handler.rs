//! 商店前台处理器

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::path::PathBuf;
use tokio::fs;
use tracing::error;

use crate::core::error::CoreError;

#[derive(Clone)]
pub struct StorefrontState {
    pub index_path: PathBuf,
    pub products_path: PathBuf,
}

/// 首页
pub async fn index(State(state): State<StorefrontState>) -> Response {
    match fs::read(&state.index_path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("读取首页 {} 失败: {}", state.index_path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "页面加载失败").into_response()
        }
    }
}

/// 商品列表：原样返回商品文件内容
pub async fn products(State(state): State<StorefrontState>) -> Result<Response, CoreError> {
    let data = fs::read(&state.products_path).await.map_err(|e| {
        error!("读取商品文件 {} 失败: {}", state.products_path.display(), e);
        CoreError::InternalServerError("商品加载失败".to_string())
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], data).into_response())
}
