//! 错误类型定义

use thiserror::Error;

/// 绑定声明与绑定注册错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("类型 '{type_name}' 不是接口类型，无法作为依赖注入的绑定目标")]
    InvalidBindingTarget { type_name: String },

    #[error("不支持的绑定作用域: {scope}, 实现类型: {implementation}")]
    UnsupportedScope {
        implementation: String,
        scope: String,
    },
}

impl BindingError {
    /// 创建无效绑定目标错误
    pub fn invalid_target(type_name: impl Into<String>) -> Self {
        Self::InvalidBindingTarget {
            type_name: type_name.into(),
        }
    }

    /// 创建不支持的作用域错误
    pub fn unsupported_scope(implementation: impl Into<String>, scope: impl ToString) -> Self {
        Self::UnsupportedScope {
            implementation: implementation.into(),
            scope: scope.to_string(),
        }
    }
}

/// 解析错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("接口未绑定: {interface}")]
    NotBound { interface: String },

    #[error("实例类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },
}

/// 配置错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置加载失败: {message}")]
    LoadFailed { message: String },

    #[error("配置值无效: {key}, 原因: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// 创建配置值无效错误
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(error: config::ConfigError) -> Self {
        Self::LoadFailed {
            message: error.to_string(),
        }
    }
}

/// 容器错误类型
///
/// 容器初始化只执行一次，失败结果会被缓存，因此该类型必须可克隆。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("绑定错误: {0}")]
    Binding(#[from] BindingError),

    #[error("解析错误: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("模块发现失败: {message}")]
    Discovery { message: String },

    #[error("扫描线程池创建失败: {message}")]
    WorkerPool { message: String },

    #[error("日志初始化失败: {message}")]
    Logging { message: String },

    #[error("全局容器已安装")]
    AlreadyInstalled,
}

impl ContainerError {
    /// 创建模块发现错误
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// 是否为绑定错误
    pub fn as_binding(&self) -> Option<&BindingError> {
        match self {
            Self::Binding(error) => Some(error),
            _ => None,
        }
    }

    /// 是否为解析错误
    pub fn as_resolution(&self) -> Option<&ResolutionError> {
        match self {
            Self::Resolution(error) => Some(error),
            _ => None,
        }
    }
}

/// 结果类型别名
pub type BindingResult<T> = Result<T, BindingError>;
pub type ResolutionResult<T> = Result<T, ResolutionError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ContainerResult<T> = Result<T, ContainerError>;
