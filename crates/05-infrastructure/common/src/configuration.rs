//! 容器配置
//!
//! 配置可以来自配置文件（TOML / JSON / YAML，按扩展名识别）与
//! `DI_CONTAINER_` 前缀的环境变量，环境变量优先。

use crate::errors::{ConfigError, ConfigResult};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DI_CONTAINER";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 是否并行扫描模块与候选类型
    pub parallel_scan: bool,
    /// 扫描线程数，未设置时使用全局线程池
    pub worker_threads: Option<usize>,
    /// 接口重复绑定时是否输出警告
    pub warn_on_conflict: bool,
    /// 解析器配置
    pub kernel: KernelSettings,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            parallel_scan: true,
            worker_threads: None,
            warn_on_conflict: true,
            kernel: KernelSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ContainerConfig {
    /// 从配置文件加载，并叠加环境变量
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load(Some(path.as_ref()))
    }

    /// 仅从环境变量加载
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(None)
    }

    /// 加载配置
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.worker_threads == Some(0) {
            return Err(ConfigError::invalid_value(
                "worker_threads",
                "扫描线程数必须大于 0",
            ));
        }
        self.logging.validate()
    }

    /// 设置是否并行扫描
    pub fn with_parallel_scan(mut self, enabled: bool) -> Self {
        self.parallel_scan = enabled;
        self
    }

    /// 设置扫描线程数
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    /// 设置是否输出冲突警告
    pub fn with_conflict_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_conflict = enabled;
        self
    }
}

/// 解析器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KernelSettings {
    /// 是否允许注入非公开成员
    pub inject_non_public: bool,
    /// 接口转换失败时是否报错，关闭时按未绑定处理
    pub strict_cast: bool,
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            inject_non_public: true,
            strict_cast: true,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 解析日志级别
    pub fn tracing_level(&self) -> ConfigResult<tracing::Level> {
        self.level.parse().map_err(|_| {
            ConfigError::invalid_value("logging.level", format!("未知的日志级别: {}", self.level))
        })
    }

    fn validate(&self) -> ConfigResult<()> {
        self.tracing_level().map(|_| ())
    }
}
