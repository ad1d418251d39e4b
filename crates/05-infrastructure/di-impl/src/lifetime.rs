//! 生命周期管理器实现

use dashmap::DashMap;
use di_abstractions::{Activator, Instance, Lifetime, LifetimeManager};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// 瞬时生命周期：每次都创建新实例
#[derive(Debug, Default)]
pub struct TransientLifetime;

impl LifetimeManager for TransientLifetime {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Transient
    }

    fn produce(&self, activator: &Activator) -> Instance {
        activator()
    }

    fn cached_instances(&self) -> usize {
        0
    }
}

/// 线程生命周期：按线程缓存实例
///
/// 缓存随绑定存在，线程退出后其实例不会被回收。
#[derive(Debug, Default)]
pub struct ThreadLifetime {
    instances: DashMap<ThreadId, Instance>,
}

impl LifetimeManager for ThreadLifetime {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Thread
    }

    fn produce(&self, activator: &Activator) -> Instance {
        self.instances
            .entry(thread::current().id())
            .or_insert_with(|| activator())
            .clone()
    }

    fn cached_instances(&self) -> usize {
        self.instances.len()
    }
}

/// 单例生命周期：首次解析时创建唯一实例
#[derive(Debug, Default)]
pub struct SingletonLifetime {
    instance: OnceCell<Instance>,
}

impl LifetimeManager for SingletonLifetime {
    fn lifetime(&self) -> Lifetime {
        Lifetime::Singleton
    }

    fn produce(&self, activator: &Activator) -> Instance {
        self.instance.get_or_init(|| activator()).clone()
    }

    fn cached_instances(&self) -> usize {
        usize::from(self.instance.get().is_some())
    }
}

/// 为生命周期选择管理器
pub fn manager_for(lifetime: Lifetime) -> Arc<dyn LifetimeManager> {
    match lifetime {
        Lifetime::Transient => Arc::new(TransientLifetime),
        Lifetime::Thread => Arc::new(ThreadLifetime::default()),
        Lifetime::Singleton => Arc::new(SingletonLifetime::default()),
    }
}
