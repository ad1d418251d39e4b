//! 标准解析器实现

use crate::lifetime::manager_for;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::{
    Activator, BindOutcome, BindingRequest, BindingSnapshot, InterfaceCast, Lifetime,
    LifetimeManager, ResolverEngine,
};
use infrastructure_common::{KernelSettings, ResolutionError, ResolutionResult, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 解析器内部的绑定
#[derive(Clone)]
struct KernelBinding {
    interface: TypeInfo,
    implementation: TypeInfo,
    manager: Arc<dyn LifetimeManager>,
    activator: Activator,
    cast: InterfaceCast,
}

impl KernelBinding {
    fn snapshot(&self) -> BindingSnapshot {
        BindingSnapshot {
            interface: self.interface.clone(),
            implementation: self.implementation.clone(),
            lifetime: self.manager.lifetime(),
        }
    }
}

/// 标准解析器
///
/// 绑定表以接口 [`TypeId`] 为键，同一接口只保留第一个注册的绑定。
pub struct StandardKernel {
    settings: KernelSettings,
    bindings: DashMap<TypeId, KernelBinding>,
}

impl StandardKernel {
    /// 使用默认配置创建解析器
    pub fn new() -> Self {
        Self::with_settings(KernelSettings::default())
    }

    /// 使用指定配置创建解析器
    pub fn with_settings(settings: KernelSettings) -> Self {
        Self {
            settings,
            bindings: DashMap::new(),
        }
    }

    /// 解析器配置
    pub fn settings(&self) -> &KernelSettings {
        &self.settings
    }

    /// 已注册绑定数量
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// 查询接口绑定的实现类型
    pub fn implementation_of(&self, interface: TypeId) -> Option<TypeInfo> {
        self.bindings
            .get(&interface)
            .map(|binding| binding.implementation.clone())
    }

    /// 查询接口绑定的生命周期
    pub fn lifetime_of(&self, interface: TypeId) -> Option<Lifetime> {
        self.bindings
            .get(&interface)
            .map(|binding| binding.manager.lifetime())
    }
}

impl Default for StandardKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StandardKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardKernel")
            .field("settings", &self.settings)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl ResolverEngine for StandardKernel {
    fn can_resolve(&self, interface: TypeId) -> bool {
        self.bindings.contains_key(&interface)
    }

    fn bind(&self, request: BindingRequest) -> BindOutcome {
        match self.bindings.entry(request.interface.id) {
            Entry::Occupied(occupied) => BindOutcome::AlreadyBound {
                existing: occupied.get().implementation.clone(),
            },
            Entry::Vacant(vacant) => {
                debug!(
                    "注册绑定: {} -> {} ({})",
                    request.interface, request.implementation, request.lifetime
                );
                vacant.insert(KernelBinding {
                    manager: manager_for(request.lifetime),
                    interface: request.interface,
                    implementation: request.implementation,
                    activator: request.activator,
                    cast: request.cast,
                });
                BindOutcome::Registered
            }
        }
    }

    fn resolve_erased(&self, interface: &TypeInfo) -> ResolutionResult<Box<dyn Any>> {
        // 先复制出绑定再创建实例，激活器执行期间不持有分片锁
        let binding = self
            .bindings
            .get(&interface.id)
            .map(|binding| binding.value().clone())
            .ok_or_else(|| ResolutionError::NotBound {
                interface: interface.short_name().to_string(),
            })?;

        let instance = binding.manager.produce(&binding.activator);
        match (binding.cast)(instance) {
            Some(resolved) => Ok(resolved),
            None if self.settings.strict_cast => Err(ResolutionError::TypeMismatch {
                expected: interface.short_name().to_string(),
                actual: binding.implementation.short_name().to_string(),
            }),
            None => Err(ResolutionError::NotBound {
                interface: interface.short_name().to_string(),
            }),
        }
    }

    fn bindings(&self) -> Vec<BindingSnapshot> {
        let mut snapshots: Vec<BindingSnapshot> = self
            .bindings
            .iter()
            .map(|binding| binding.snapshot())
            .collect();
        snapshots.sort_by(|a, b| a.interface.type_name.cmp(b.interface.type_name));
        snapshots
    }
}
