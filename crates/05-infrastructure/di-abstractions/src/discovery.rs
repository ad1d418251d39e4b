//! 候选类型发现抽象接口
//!
//! 模块来源提供待扫描的模块，每个模块列出自己包含的候选类型。
//! 候选类型可以携带绑定声明，也可以不携带（扫描时直接忽略）。

use crate::factory::{self, Activator, InterfaceCast};
use infrastructure_common::{
    BindingDeclaration, BindingResult, BindingScope, ContainerResult, TypeInfo,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 模块来源 trait
///
/// 提供待扫描的候选模块集合
pub trait ModuleSource: Send + Sync {
    /// 获取所有候选模块
    fn modules(&self) -> ContainerResult<Vec<Arc<dyn CandidateModule>>>;
}

/// 候选模块 trait
pub trait CandidateModule: Send + Sync {
    /// 模块名称
    fn name(&self) -> &str;

    /// 模块包含的候选类型
    fn candidate_types(&self) -> Vec<CandidateType>;
}

/// 绑定目标：接口类型与对应的转换函数
#[derive(Clone)]
pub struct BindingTarget {
    /// 接口类型
    pub interface: TypeInfo,
    /// 接口转换函数
    pub cast: InterfaceCast,
}

impl fmt::Debug for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTarget")
            .field("interface", &self.interface)
            .field("cast", &"<function>")
            .finish()
    }
}

#[derive(Clone)]
struct DeclaredBinding {
    scope: BindingScope,
    targets: Vec<BindingTarget>,
    activator: Activator,
}

/// 候选类型
#[derive(Clone)]
pub struct CandidateType {
    implementation: TypeInfo,
    binding: Option<DeclaredBinding>,
}

impl CandidateType {
    /// 创建携带绑定声明的候选类型构建器
    pub fn builder<T, F>(factory: F) -> CandidateTypeBuilder<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        CandidateTypeBuilder {
            scope: BindingScope::default(),
            targets: Vec::new(),
            activator: factory::activator(factory),
            _marker: PhantomData,
        }
    }

    /// 创建不携带绑定声明的候选类型
    pub fn undeclared<T: ?Sized + 'static>() -> Self {
        Self {
            implementation: TypeInfo::of::<T>(),
            binding: None,
        }
    }

    /// 实现类型
    pub fn implementation(&self) -> &TypeInfo {
        &self.implementation
    }

    /// 是否携带绑定声明
    pub fn has_declaration(&self) -> bool {
        self.binding.is_some()
    }

    /// 读取绑定声明
    ///
    /// 每次读取都会重新构建并校验声明；未携带声明时返回 `None`。
    pub fn read_declaration(&self) -> Option<BindingResult<BindingDeclaration>> {
        self.binding.as_ref().map(|binding| {
            BindingDeclaration::new(
                binding.scope,
                binding.targets.iter().map(|target| target.interface.clone()),
            )
        })
    }

    /// 激活器
    pub fn activator(&self) -> Option<&Activator> {
        self.binding.as_ref().map(|binding| &binding.activator)
    }

    /// 查找接口对应的转换函数
    pub fn cast_for(&self, interface: &TypeInfo) -> Option<&InterfaceCast> {
        self.binding.as_ref().and_then(|binding| {
            binding
                .targets
                .iter()
                .find(|target| &target.interface == interface)
                .map(|target| &target.cast)
        })
    }
}

impl fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("CandidateType");
        debug.field("implementation", &self.implementation);
        if let Some(binding) = &self.binding {
            debug
                .field("scope", &binding.scope)
                .field("targets", &binding.targets);
        }
        debug.finish()
    }
}

/// 候选类型构建器
pub struct CandidateTypeBuilder<T> {
    scope: BindingScope,
    targets: Vec<BindingTarget>,
    activator: Activator,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CandidateTypeBuilder<T>
where
    T: Send + Sync + 'static,
{
    /// 设置绑定作用域
    pub fn scope(mut self, scope: BindingScope) -> Self {
        self.scope = scope;
        self
    }

    /// 声明实现的接口
    ///
    /// ```ignore
    /// CandidateType::builder(SqlRepository::default)
    ///     .provides::<dyn Repository, _>(|it| it as Arc<dyn Repository>)
    ///     .build();
    /// ```
    pub fn provides<I, F>(mut self, cast: F) -> Self
    where
        I: ?Sized + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        self.targets.push(BindingTarget {
            interface: TypeInfo::of::<I>(),
            cast: factory::interface_cast(cast),
        });
        self
    }

    /// 构建候选类型
    pub fn build(self) -> CandidateType {
        CandidateType {
            implementation: TypeInfo::of::<T>(),
            binding: Some(DeclaredBinding {
                scope: self.scope,
                targets: self.targets,
                activator: self.activator,
            }),
        }
    }
}
