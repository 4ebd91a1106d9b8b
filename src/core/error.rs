//! 核心错误处理模块

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;
use tracing::error;
use uuid::Uuid;

use crate::infrastructure::store::StoreError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub request_id: String,
    pub timestamp: String,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::BadRequest(msg) => write!(f, "请求无效: {}", msg),
            CoreError::NotFound(msg) => write!(f, "未找到: {}", msg),
            CoreError::InternalServerError(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, user_message) = match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg),
            CoreError::InternalServerError(msg) => ("INTERNAL_SERVER_ERROR", msg),
        };

        let error_response = ErrorResponse {
            error: error_message.to_string(),
            message: user_message,
            code: status.as_u16(),
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::BadRequest(format!("商品数据无效: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for CoreError {
    fn from(rejection: PathRejection) -> Self {
        CoreError::BadRequest(format!("商品 ID 无效: {}", rejection.body_text()))
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        error!("商品目录写入失败: {}", err);
        CoreError::InternalServerError("保存商品目录失败".to_string())
    }
}

/// 未匹配路由的兜底处理器
pub async fn route_not_found() -> CoreError {
    CoreError::NotFound("路由不存在".to_string())
}

/// 处理器 panic 时生成 500 响应，供 `CatchPanicLayer` 使用
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知 panic".to_string()
    };
    error!("请求处理发生 panic: {}", detail);

    CoreError::InternalServerError("服务器内部错误".to_string()).into_response()
}
