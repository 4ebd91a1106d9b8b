//! 商店前台：首页、只读商品列表和静态资源

pub mod handler;

use axum::{middleware, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use self::handler::StorefrontState;
use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::config::StorefrontConfig;

/// 构建前台路由，未匹配的路径交给静态文件服务
pub fn router(config: &StorefrontConfig) -> Router {
    let state = StorefrontState {
        index_path: config.index_path(),
        products_path: config.products_path(),
    };

    Router::new()
        .route("/", get(handler::index))
        .route("/products", get(handler::products))
        .fallback_service(ServeDir::new(&config.root_dir))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
