//! 管理后台服务
//! 提供商品 CRUD API，并把每次修改同步到管理后台和前台两个商品文件

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use product_catalog::{
    app::admin::{self, handler::AppState, service::ProductService},
    infrastructure::{config::load_config, logger::Logger},
    CatalogStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    Logger::init(&config.logging.level)?;

    match source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let admin_config = config.admin;
    let store = CatalogStore::new(
        &admin_config.products_file,
        &admin_config.frontend_products_file,
    );
    store
        .ensure_initialized()
        .await
        .context("初始化商品文件失败")?;

    let state = AppState {
        product_service: ProductService::new(store.clone()),
    };
    let app = admin::router(state);

    let addr = admin_config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 管理后台服务运行在 http://{}", addr);
    info!("商品文件同步于:");
    info!("   - {}", store.admin_path().display());
    info!("   - {}", store.frontend_path().display());

    axum::serve(listener, app).await.context("服务器运行失败")?;

    Ok(())
}
