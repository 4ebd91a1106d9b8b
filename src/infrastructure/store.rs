//! 商品目录文件存储
//!
//! 目录以一个 JSON 数组保存在两个副本文件中：管理后台自己的文件和前台读取的文件。
//! 每次保存都按顺序完整重写两个副本。没有文件锁，也没有事务：
//! 并发写入时后写者覆盖先写者；第一个副本写成功而第二个失败时不会回滚，
//! 两个副本会保持不一致，直到下一次成功保存。

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::app::admin::model::Product;

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("商品目录序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("读取文件 {path} 失败: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析文件 {path} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("写入文件 {path} 失败: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 双副本商品目录
#[derive(Debug, Clone)]
pub struct CatalogStore {
    admin_path: PathBuf,
    frontend_path: PathBuf,
}

impl CatalogStore {
    pub fn new(admin_path: impl Into<PathBuf>, frontend_path: impl Into<PathBuf>) -> Self {
        Self {
            admin_path: admin_path.into(),
            frontend_path: frontend_path.into(),
        }
    }

    pub fn admin_path(&self) -> &Path {
        &self.admin_path
    }

    pub fn frontend_path(&self) -> &Path {
        &self.frontend_path
    }

    /// 写入顺序：先管理后台副本，再前台副本
    fn replicas(&self) -> [&Path; 2] {
        [&self.admin_path, &self.frontend_path]
    }

    /// 读取整个目录；文件缺失或内容无法解析时返回空目录
    pub async fn load(&self) -> Vec<Product> {
        match read_catalog(&self.admin_path).await {
            Ok(products) => products,
            Err(e) => {
                warn!("{}，按空目录处理", e);
                Vec::new()
            }
        }
    }

    /// 把整个目录写入两个副本
    pub async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(products)?;

        for path in self.replicas() {
            write_replica(path, data.as_bytes()).await?;
            info!("文件 {} 已更新", path.display());
        }

        Ok(())
    }

    /// 启动时为缺失的副本写入空数组，已有的副本保持不动
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        for path in self.replicas() {
            let exists = fs::try_exists(path).await.map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if exists {
                continue;
            }

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }

            write_replica(path, b"[]").await?;
            info!("已创建空商品文件 {}", path.display());
        }

        Ok(())
    }
}

async fn read_catalog(path: &Path) -> Result<Vec<Product>, StoreError> {
    let data = fs::read(path).await.map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&data).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_replica(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    fs::write(path, data)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}
