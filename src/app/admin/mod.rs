//! 管理后台：商品 CRUD API

pub mod handler;
pub mod model;
pub mod service;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use self::handler::AppState;
use crate::core::{
    error::{panic_response, route_not_found},
    middleware::request_logging_middleware,
};

/// 构建管理后台路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(handler::list_products)
                .post(handler::create_product)
                .fallback(route_not_found),
        )
        .route(
            "/api/products/:id",
            put(handler::update_product)
                .delete(handler::delete_product)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
