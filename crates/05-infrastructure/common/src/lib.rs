//! # Infrastructure Common
//!
//! 依赖注入注册层的公共类型：类型元数据、绑定声明、错误与配置。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] - 类型信息，区分接口（trait object）与具体类型
//! - [`BindingDeclaration`] - 经过校验的不可变绑定声明
//! - [`BindingScope`] - 绑定作用域
//! - [`ContainerConfig`] - 容器配置

pub mod configuration;
pub mod declaration;
pub mod errors;
pub mod metadata;

pub use configuration::*;
pub use declaration::*;
pub use errors::*;
pub use metadata::*;
