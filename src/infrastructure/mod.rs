//! 基础设施层：配置、日志与商品文件存储

pub mod config;
pub mod logger;
pub mod store;
