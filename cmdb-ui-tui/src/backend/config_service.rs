//! 配置服务

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::view::theme::Theme;

/// 配置目录名
const APP_DIR: &str = "cmdb-ui-tui";

/// 获取配置目录路径
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// 界面状态文件（筛选条件）
pub fn state_file(dir: &Path) -> PathBuf {
    dir.join("state.json")
}

/// 日志文件
pub fn log_file(dir: &Path) -> PathBuf {
    dir.join("cmdb-ui-tui.log")
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// CMDB API 地址；为空时使用内存演示数据
    pub api_base_url: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    /// 提示消息显示时长
    pub toast_seconds: u64,
    /// 默认日志级别（`RUST_LOG` 优先）
    pub log_level: String,
    pub theme: Theme,
    /// 筛选条件的持久化键
    pub filter_storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_token: None,
            request_timeout_secs: 30,
            toast_seconds: 4,
            log_level: "info".to_string(),
            theme: Theme::Dark,
            filter_storage_key: "assets.filters".to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds.max(1))
    }
}

/// 配置服务 trait
pub trait ConfigService: Send + Sync {
    /// 加载配置
    fn load(&self) -> Result<AppConfig, ConfigError>;

    /// 保存配置
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;
}

/// 本地配置服务（`config.json`）
pub struct LocalConfigService {
    path: PathBuf,
}

impl LocalConfigService {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("config.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载配置；文件缺失时使用默认值，文件无效时记录警告并使用默认值
    pub fn load_or_default(&self) -> AppConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default configuration");
                AppConfig::default()
            }
        }
    }
}

impl ConfigService for LocalConfigService {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.path.exists() {
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}
