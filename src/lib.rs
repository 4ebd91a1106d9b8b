//! # 商品目录
//!
//! 两个独立的服务共用同一份商品数据：
//! - 管理后台：商品 CRUD API，每次修改都把整个目录写回两个 JSON 副本文件
//! - 商店前台：首页、只读商品列表和静态资源

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::core::error::CoreError;
pub use app::admin::model::{Product, ProductInput};
pub use infrastructure::config::Config;
pub use infrastructure::store::{CatalogStore, StoreError};
