//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义绑定注册和实例解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ResolverEngine`] - 解析器引擎接口
//! - [`LifetimeManager`] - 实例生命周期管理接口
//! - [`ModuleSource`] / [`CandidateModule`] - 候选类型发现接口
//! - [`CandidateType`] - 候选类型及其绑定声明

pub mod discovery;
pub mod factory;
pub mod lifetime;
pub mod resolver;

pub use discovery::*;
pub use factory::*;
pub use lifetime::*;
pub use resolver::*;
