//! # 依赖注入具体实现
//!
//! 基于约定的绑定注册容器：扫描候选模块，读取类型上的绑定声明，
//! 按"先注册者优先"的规则把接口绑定到实现，再按接口解析实例。
//!
//! ```ignore
//! use di_impl::{ExplicitModule, InjectionContainer, ModuleSet};
//!
//! let container = InjectionContainer::new(
//!     ModuleSet::new().with_module(ExplicitModule::new("billing").with(candidate)),
//! );
//! let repository = container.resolve::<dyn Repository>()?;
//! ```

pub mod catalog;
pub mod container;
pub mod global;
pub mod kernel;
pub mod lifetime;
pub mod logging;

pub use catalog::{
    submit, submitted_count, CandidateFactory, ExplicitModule, FnModuleSource, ModuleSet,
    StaticCatalog,
};
pub use container::{InjectionContainer, ScanReport};
pub use global::{global, install, resolve, start};
pub use kernel::StandardKernel;
pub use lifetime::{manager_for, SingletonLifetime, ThreadLifetime, TransientLifetime};
pub use logging::init_logging;

pub use di_abstractions::{
    BindOutcome, BindingSnapshot, CandidateModule, CandidateType, Lifetime, ModuleSource,
    ResolverEngine,
};
pub use infrastructure_common::{
    BindingError, BindingScope, ContainerConfig, ContainerError, ContainerResult,
    ResolutionError,
};
