//! 绑定声明
//!
//! 候选类型通过绑定声明说明自己实现了哪些接口、以何种作用域注册。
//! 声明在读取候选类型元数据时构建，构建即校验，之后不可变。

use crate::errors::{BindingError, ConfigError};
use crate::metadata::TypeInfo;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 绑定作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingScope {
    /// 未定义 - 不是合法的最终状态，绑定时报错
    Undefined,
    /// 瞬时模式 - 每次解析都创建新实例
    #[default]
    Transient,
    /// 线程模式 - 同一线程内共享实例
    Thread,
    /// 单例模式 - 进程生命周期内只创建一个实例
    Singleton,
}

impl BindingScope {
    /// 作用域名称
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Transient => "transient",
            Self::Thread => "thread",
            Self::Singleton => "singleton",
        }
    }
}

impl fmt::Display for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "undefined" => Ok(Self::Undefined),
            "transient" => Ok(Self::Transient),
            "thread" => Ok(Self::Thread),
            "singleton" => Ok(Self::Singleton),
            other => Err(ConfigError::invalid_value(
                "scope",
                format!("未知的绑定作用域: {other}"),
            )),
        }
    }
}

/// 绑定声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDeclaration {
    scope: BindingScope,
    interfaces: Vec<TypeInfo>,
}

impl BindingDeclaration {
    /// 创建绑定声明
    ///
    /// 每个绑定目标都必须是接口类型，否则返回
    /// [`BindingError::InvalidBindingTarget`]，不会产生任何声明。
    /// 接口顺序保持不变，允许重复。
    pub fn new(
        scope: BindingScope,
        interfaces: impl IntoIterator<Item = TypeInfo>,
    ) -> Result<Self, BindingError> {
        let interfaces: Vec<TypeInfo> = interfaces.into_iter().collect();

        if let Some(invalid) = interfaces.iter().find(|target| !target.is_interface()) {
            return Err(BindingError::invalid_target(invalid.short_name()));
        }

        Ok(Self { scope, interfaces })
    }

    /// 使用默认作用域（瞬时）创建绑定声明
    pub fn transient(interfaces: impl IntoIterator<Item = TypeInfo>) -> Result<Self, BindingError> {
        Self::new(BindingScope::default(), interfaces)
    }

    /// 绑定作用域
    pub const fn scope(&self) -> BindingScope {
        self.scope
    }

    /// 声明的接口列表
    pub fn interfaces(&self) -> &[TypeInfo] {
        &self.interfaces
    }

    /// 是否声明了指定接口
    pub fn provides(&self, interface: &TypeInfo) -> bool {
        self.interfaces.contains(interface)
    }
}
