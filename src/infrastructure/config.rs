//! 配置基础设施
//!
//! 两个服务共用一份 TOML 配置，每个字段都有默认值，
//! 所以配置文件可以只写需要覆盖的部分，甚至完全不存在。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "CATALOG_CONFIG";

/// 未指定时依次尝试的配置文件路径
const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 系统配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 管理后台服务配置
    pub admin: AdminConfig,
    /// 商店前台服务配置
    pub storefront: StorefrontConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 管理后台服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 管理后台自己的商品文件
    pub products_file: PathBuf,
    /// 前台使用的商品文件副本
    pub frontend_products_file: PathBuf,
}

/// 商店前台服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 静态资源根目录
    pub root_dir: PathBuf,
    /// 首页文件（相对 root_dir）
    pub index_file: PathBuf,
    /// 商品文件（相对 root_dir）
    pub products_file: PathBuf,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            products_file: PathBuf::from("admin/products.json"),
            frontend_products_file: PathBuf::from("frontend/products.json"),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            root_dir: PathBuf::from("frontend"),
            index_file: PathBuf::from("index.html"),
            products_file: PathBuf::from("products.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AdminConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl StorefrontConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root_dir.join(&self.index_file)
    }

    pub fn products_path(&self) -> PathBuf {
        self.root_dir.join(&self.products_file)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.port == 0 || self.storefront.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.admin.bind_address.is_empty() || self.storefront.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }

        let paths = [
            &self.admin.products_file,
            &self.admin.frontend_products_file,
            &self.storefront.index_file,
            &self.storefront.products_file,
        ];
        if paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::Validation("文件路径不能为空".to_string()));
        }
        if self.admin.products_file == self.admin.frontend_products_file {
            return Err(ConfigError::Validation(
                "两个商品文件副本不能是同一个路径".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件或默认值加载配置，并返回实际使用的配置文件路径
///
/// 日志系统此时还没有初始化，所以由调用方负责记录配置来源。
pub fn load_config() -> Result<(Config, Option<PathBuf>), ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        let config = Config::load_from_file(&path)?;
        config.validate()?;
        return Ok((config, Some(path)));
    }

    for path in CONFIG_PATHS {
        let path = Path::new(path);
        if path.exists() {
            let config = Config::load_from_file(path)?;
            config.validate()?;
            return Ok((config, Some(path.to_path_buf())));
        }
    }

    Ok((Config::default(), None))
}
