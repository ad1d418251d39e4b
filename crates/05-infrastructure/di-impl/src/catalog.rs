//! 候选模块来源实现
//!
//! - [`ExplicitModule`] / [`ModuleSet`]：启动时显式注册的模块
//! - [`StaticCatalog`]：`#[bind_to]` 在程序启动时提交的候选类型，按 crate 分组

use di_abstractions::{CandidateModule, CandidateType, ModuleSource};
use infrastructure_common::ContainerResult;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 显式注册的候选模块
#[derive(Debug, Clone, Default)]
pub struct ExplicitModule {
    name: String,
    candidates: Vec<CandidateType>,
}

impl ExplicitModule {
    /// 创建空模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            candidates: Vec::new(),
        }
    }

    /// 通过注册函数创建模块
    pub fn from_registrar<F>(name: impl Into<String>, registrar: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut module = Self::new(name);
        registrar(&mut module);
        module
    }

    /// 添加候选类型
    pub fn add(&mut self, candidate: CandidateType) -> &mut Self {
        self.candidates.push(candidate);
        self
    }

    /// 添加候选类型（构建器风格）
    pub fn with(mut self, candidate: CandidateType) -> Self {
        self.candidates.push(candidate);
        self
    }
}

impl CandidateModule for ExplicitModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn candidate_types(&self) -> Vec<CandidateType> {
        self.candidates.clone()
    }
}

/// 模块集合
#[derive(Clone, Default)]
pub struct ModuleSet {
    modules: Vec<Arc<dyn CandidateModule>>,
}

impl ModuleSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加模块（构建器风格）
    pub fn with_module(mut self, module: impl CandidateModule + 'static) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    /// 添加共享模块
    pub fn push(&mut self, module: Arc<dyn CandidateModule>) {
        self.modules.push(module);
    }

    /// 模块数量
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for ModuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.modules.iter().map(|module| module.name()))
            .finish()
    }
}

impl ModuleSource for ModuleSet {
    fn modules(&self) -> ContainerResult<Vec<Arc<dyn CandidateModule>>> {
        Ok(self.modules.clone())
    }
}

impl<M: CandidateModule + 'static> FromIterator<M> for ModuleSet {
    fn from_iter<T: IntoIterator<Item = M>>(iter: T) -> Self {
        Self {
            modules: iter
                .into_iter()
                .map(|module| Arc::new(module) as Arc<dyn CandidateModule>)
                .collect(),
        }
    }
}

/// 基于函数的模块来源
pub struct FnModuleSource<F> {
    discover: F,
}

impl<F> FnModuleSource<F>
where
    F: Fn() -> ContainerResult<Vec<Arc<dyn CandidateModule>>> + Send + Sync,
{
    /// 创建模块来源
    pub fn new(discover: F) -> Self {
        Self { discover }
    }
}

impl<F> ModuleSource for FnModuleSource<F>
where
    F: Fn() -> ContainerResult<Vec<Arc<dyn CandidateModule>>> + Send + Sync,
{
    fn modules(&self) -> ContainerResult<Vec<Arc<dyn CandidateModule>>> {
        (self.discover)()
    }
}

/// 候选类型构造函数
pub type CandidateFactory = fn() -> CandidateType;

/// 静态目录：crate 名称 -> 候选类型构造函数
static STATIC_CATALOG: Lazy<RwLock<BTreeMap<String, Vec<CandidateFactory>>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

/// 提交候选类型到静态目录
///
/// 由 `#[bind_to]` 生成的启动函数调用，
/// `module_path` 为声明位置的 `module_path!()`。
pub fn submit(module_path: &'static str, factory: CandidateFactory) {
    let crate_name = module_path.split("::").next().unwrap_or(module_path);
    STATIC_CATALOG
        .write()
        .entry(crate_name.to_string())
        .or_default()
        .push(factory);
}

/// 静态目录中的候选类型数量
pub fn submitted_count() -> usize {
    STATIC_CATALOG.read().values().map(Vec::len).sum()
}

/// 静态目录模块来源
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl ModuleSource for StaticCatalog {
    fn modules(&self) -> ContainerResult<Vec<Arc<dyn CandidateModule>>> {
        let catalog = STATIC_CATALOG.read();
        Ok(catalog
            .iter()
            .map(|(name, factories)| {
                Arc::new(StaticModule {
                    name: name.clone(),
                    factories: factories.clone(),
                }) as Arc<dyn CandidateModule>
            })
            .collect())
    }
}

/// 静态目录中的一个 crate
#[derive(Debug)]
struct StaticModule {
    name: String,
    factories: Vec<CandidateFactory>,
}

impl CandidateModule for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn candidate_types(&self) -> Vec<CandidateType> {
        self.factories.iter().map(|factory| factory()).collect()
    }
}
