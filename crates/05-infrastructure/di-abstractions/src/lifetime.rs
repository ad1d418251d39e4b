//! 实例生命周期抽象
//!
//! 绑定作用域在注册时一次性映射为生命周期管理器，
//! 之后所有解析都通过统一的 [`LifetimeManager::produce`] 获取实例。

use crate::factory::{Activator, Instance};
use infrastructure_common::{BindingError, BindingResult, BindingScope, TypeInfo};
use std::fmt;

/// 实例生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// 每次解析都创建新实例
    Transient,
    /// 每个线程一个实例
    Thread,
    /// 整个解析器生命周期内一个实例
    Singleton,
}

impl Lifetime {
    /// 将绑定作用域映射为实例生命周期
    ///
    /// [`BindingScope::Undefined`] 不是合法的最终状态，返回
    /// [`BindingError::UnsupportedScope`]。
    pub fn from_scope(scope: BindingScope, implementation: &TypeInfo) -> BindingResult<Self> {
        match scope {
            BindingScope::Transient => Ok(Self::Transient),
            BindingScope::Thread => Ok(Self::Thread),
            BindingScope::Singleton => Ok(Self::Singleton),
            BindingScope::Undefined => Err(BindingError::unsupported_scope(
                implementation.short_name(),
                scope,
            )),
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transient => "transient",
            Self::Thread => "thread",
            Self::Singleton => "singleton",
        };
        f.write_str(name)
    }
}

/// 生命周期管理器 trait
pub trait LifetimeManager: Send + Sync + fmt::Debug {
    /// 管理的生命周期
    fn lifetime(&self) -> Lifetime;

    /// 获取实例，必要时通过激活器创建
    fn produce(&self, activator: &Activator) -> Instance;

    /// 当前缓存的实例数量
    fn cached_instances(&self) -> usize;
}
