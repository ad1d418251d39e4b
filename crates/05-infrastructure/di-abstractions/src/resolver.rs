//! 解析器引擎抽象接口
//!
//! 注册层只负责组合对解析器的调用：检查接口是否可解析、
//! 注册绑定、按接口获取实例。实例化语义由解析器决定。

use crate::factory::{Activator, InterfaceCast};
use crate::lifetime::Lifetime;
use infrastructure_common::{ResolutionError, ResolutionResult, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 绑定请求
#[derive(Clone)]
pub struct BindingRequest {
    /// 接口类型
    pub interface: TypeInfo,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 实例生命周期
    pub lifetime: Lifetime,
    /// 激活器
    pub activator: Activator,
    /// 接口转换函数
    pub cast: InterfaceCast,
}

impl fmt::Debug for BindingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRequest")
            .field("interface", &self.interface)
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .field("activator", &"<function>")
            .field("cast", &"<function>")
            .finish()
    }
}

/// 绑定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    /// 新绑定已注册
    Registered,
    /// 接口已被其他绑定占用，本次请求被忽略
    AlreadyBound {
        /// 已注册的实现类型
        existing: TypeInfo,
    },
}

impl BindOutcome {
    /// 是否注册成功
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered)
    }
}

/// 已注册绑定的快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSnapshot {
    /// 接口类型
    pub interface: TypeInfo,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 实例生命周期
    pub lifetime: Lifetime,
}

/// 解析器引擎 trait
pub trait ResolverEngine: Send + Sync {
    /// 检查接口是否已有绑定
    fn can_resolve(&self, interface: TypeId) -> bool;

    /// 注册绑定
    ///
    /// 检查与插入必须是原子的：同一接口的并发请求只有一个返回
    /// [`BindOutcome::Registered`]，已有绑定永远不会被覆盖。
    fn bind(&self, request: BindingRequest) -> BindOutcome;

    /// 按接口解析实例，返回装箱的 `Arc<dyn Interface>`
    fn resolve_erased(&self, interface: &TypeInfo) -> ResolutionResult<Box<dyn Any>>;

    /// 所有已注册绑定
    fn bindings(&self) -> Vec<BindingSnapshot>;

    /// 检查接口是否已有绑定
    fn is_bound<I: ?Sized + 'static>(&self) -> bool
    where
        Self: Sized,
    {
        self.can_resolve(TypeId::of::<I>())
    }

    /// 按接口解析实例
    fn get<I: ?Sized + 'static>(&self) -> ResolutionResult<Arc<I>>
    where
        Self: Sized,
    {
        let interface = TypeInfo::of::<I>();
        self.resolve_erased(&interface)?
            .downcast::<Arc<I>>()
            .map(|instance| *instance)
            .map_err(|_| ResolutionError::TypeMismatch {
                expected: format!("Arc<{interface}>"),
                actual: "<erased>".to_string(),
            })
    }
}
