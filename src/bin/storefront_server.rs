//! 商店前台服务

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use product_catalog::{
    app::storefront,
    infrastructure::{config::load_config, logger::Logger},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    Logger::init(&config.logging.level)?;

    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let storefront_config = config.storefront;
    let app = storefront::router(&storefront_config);

    let addr = storefront_config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 商店前台服务运行在 http://{}", addr);
    info!("   静态资源目录: {}", storefront_config.root_dir.display());

    axum::serve(listener, app).await.context("服务器运行失败")?;

    Ok(())
}
