//! 进程级容器
//!
//! 首次使用时以 [`StaticCatalog`] 与环境变量配置创建；
//! 需要自定义模块来源时，在首次使用前调用 [`install`]。

use crate::catalog::StaticCatalog;
use crate::container::InjectionContainer;
use infrastructure_common::{ContainerConfig, ContainerError, ContainerResult};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::warn;

static GLOBAL: OnceCell<InjectionContainer> = OnceCell::new();

/// 安装进程级容器
///
/// 进程级容器已存在（已安装或已被使用）时返回 [`ContainerError::AlreadyInstalled`]。
pub fn install(container: InjectionContainer) -> ContainerResult<&'static InjectionContainer> {
    let mut pending = Some(container);
    let installed = GLOBAL.get_or_init(|| pending.take().unwrap_or_else(default_container));

    if pending.is_some() {
        return Err(ContainerError::AlreadyInstalled);
    }
    Ok(installed)
}

/// 进程级容器
pub fn global() -> &'static InjectionContainer {
    GLOBAL.get_or_init(default_container)
}

/// 预热进程级容器
pub fn start() -> ContainerResult<()> {
    global().start()
}

/// 从进程级容器解析接口实例
pub fn resolve<I: ?Sized + 'static>() -> ContainerResult<Arc<I>> {
    global().resolve::<I>()
}

fn default_container() -> InjectionContainer {
    let config = ContainerConfig::from_env().unwrap_or_else(|e| {
        warn!("读取容器配置失败，使用默认配置: {}", e);
        ContainerConfig::default()
    });
    InjectionContainer::with_config(StaticCatalog, config)
}
