//! 绑定注册容器
//!
//! 首次解析（或显式 [`InjectionContainer::start`]）时扫描所有候选模块，
//! 读取每个候选类型的绑定声明并注册到解析器。扫描只执行一次，
//! 失败结果同样会被缓存，容器此后不可用。

use crate::kernel::StandardKernel;
use chrono::{DateTime, Utc};
use di_abstractions::{
    BindOutcome, BindingRequest, BindingSnapshot, CandidateModule, CandidateType, Lifetime,
    ModuleSource, ResolverEngine,
};
use infrastructure_common::{
    BindingResult, ContainerConfig, ContainerError, ContainerResult, TypeInfo,
};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// 扫描报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// 扫描的模块数量
    pub modules: usize,
    /// 候选类型数量
    pub candidate_types: usize,
    /// 携带绑定声明的类型数量
    pub declared_types: usize,
    /// 注册的绑定数量
    pub registered: usize,
    /// 因接口已绑定而跳过的数量
    pub skipped: usize,
    /// 扫描开始时间
    pub started_at: DateTime<Utc>,
    /// 扫描耗时
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
struct ScanCounters {
    modules: AtomicUsize,
    candidate_types: AtomicUsize,
    declared_types: AtomicUsize,
    registered: AtomicUsize,
    skipped: AtomicUsize,
}

impl ScanCounters {
    fn report(&self, started_at: DateTime<Utc>, elapsed: Duration) -> ScanReport {
        ScanReport {
            modules: self.modules.load(Ordering::Relaxed),
            candidate_types: self.candidate_types.load(Ordering::Relaxed),
            declared_types: self.declared_types.load(Ordering::Relaxed),
            registered: self.registered.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            started_at,
            elapsed,
        }
    }
}

#[derive(Debug, Clone)]
struct Initialized {
    kernel: Arc<StandardKernel>,
    report: ScanReport,
}

/// 绑定注册容器
pub struct InjectionContainer {
    source: Arc<dyn ModuleSource>,
    config: ContainerConfig,
    state: OnceCell<ContainerResult<Initialized>>,
    initialized: AtomicBool,
    scans: AtomicUsize,
}

impl InjectionContainer {
    /// 使用默认配置创建容器
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        Self::with_config(source, ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(source: impl ModuleSource + 'static, config: ContainerConfig) -> Self {
        Self::from_shared(Arc::new(source), config)
    }

    /// 使用共享的模块来源创建容器
    pub fn from_shared(source: Arc<dyn ModuleSource>, config: ContainerConfig) -> Self {
        Self {
            source,
            config,
            state: OnceCell::new(),
            initialized: AtomicBool::new(false),
            scans: AtomicUsize::new(0),
        }
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 预热容器
    ///
    /// 立即执行扫描与绑定；已初始化时不做任何事。
    pub fn start(&self) -> ContainerResult<()> {
        self.initialize().map(|_| ())
    }

    /// 解析接口实例
    pub fn resolve<I: ?Sized + 'static>(&self) -> ContainerResult<Arc<I>> {
        let initialized = self.initialize()?;
        Ok(initialized.kernel.get::<I>()?)
    }

    /// 底层解析器
    pub fn kernel(&self) -> ContainerResult<Arc<StandardKernel>> {
        self.initialize()
            .map(|initialized| Arc::clone(&initialized.kernel))
    }

    /// 所有已注册绑定
    pub fn registrations(&self) -> ContainerResult<Vec<BindingSnapshot>> {
        self.initialize()
            .map(|initialized| initialized.kernel.bindings())
    }

    /// 是否已成功初始化
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// 扫描报告，未初始化或初始化失败时为 `None`
    pub fn report(&self) -> Option<ScanReport> {
        match self.state.get() {
            Some(Ok(initialized)) => Some(initialized.report.clone()),
            _ => None,
        }
    }

    /// 扫描执行次数
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Acquire)
    }

    fn initialize(&self) -> ContainerResult<&Initialized> {
        self.state
            .get_or_init(|| self.scan_and_bind())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn scan_and_bind(&self) -> ContainerResult<Initialized> {
        self.scans.fetch_add(1, Ordering::AcqRel);
        let started_at = Utc::now();
        let timer = Instant::now();
        info!("开始扫描候选模块");

        let kernel = StandardKernel::with_settings(self.config.kernel.clone());
        let counters = ScanCounters::default();

        let result = self
            .source
            .modules()
            .and_then(|modules| self.bind_modules(&kernel, &modules, &counters));

        if let Err(e) = result {
            error!("容器初始化失败: {}", e);
            return Err(e);
        }

        let report = counters.report(started_at, timer.elapsed());
        info!(
            "容器初始化完成: {} 个模块, {} 个候选类型, 注册 {} 个绑定, 跳过 {} 个, 耗时 {:?}",
            report.modules,
            report.candidate_types,
            report.registered,
            report.skipped,
            report.elapsed
        );

        self.initialized.store(true, Ordering::Release);
        Ok(Initialized {
            kernel: Arc::new(kernel),
            report,
        })
    }

    fn bind_modules(
        &self,
        kernel: &StandardKernel,
        modules: &[Arc<dyn CandidateModule>],
        counters: &ScanCounters,
    ) -> ContainerResult<()> {
        if !self.config.parallel_scan {
            return modules
                .iter()
                .try_for_each(|module| self.bind_module(kernel, module.as_ref(), counters))
                .map_err(ContainerError::from);
        }

        let scan = || {
            modules
                .par_iter()
                .try_for_each(|module| self.bind_module(kernel, module.as_ref(), counters))
        };

        let result = match self.config.worker_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|index| format!("di-scan-{index}"))
                .build()
                .map_err(|e| ContainerError::WorkerPool {
                    message: e.to_string(),
                })?
                .install(scan),
            None => scan(),
        };

        result.map_err(ContainerError::from)
    }

    fn bind_module(
        &self,
        kernel: &StandardKernel,
        module: &dyn CandidateModule,
        counters: &ScanCounters,
    ) -> BindingResult<()> {
        let candidates = module.candidate_types();
        counters.modules.fetch_add(1, Ordering::Relaxed);
        counters
            .candidate_types
            .fetch_add(candidates.len(), Ordering::Relaxed);
        debug!("扫描模块: {} ({} 个候选类型)", module.name(), candidates.len());

        if self.config.parallel_scan {
            candidates
                .par_iter()
                .try_for_each(|candidate| self.bind_candidate(kernel, candidate, counters))
        } else {
            candidates
                .iter()
                .try_for_each(|candidate| self.bind_candidate(kernel, candidate, counters))
        }
    }

    fn bind_candidate(
        &self,
        kernel: &StandardKernel,
        candidate: &CandidateType,
        counters: &ScanCounters,
    ) -> BindingResult<()> {
        let Some(declaration) = candidate.read_declaration().transpose()? else {
            return Ok(());
        };
        let Some(activator) = candidate.activator() else {
            return Ok(());
        };
        counters.declared_types.fetch_add(1, Ordering::Relaxed);

        let implementation = candidate.implementation();
        for interface in declaration.interfaces() {
            // 已绑定的接口直接跳过，作用域只对空缺接口生效
            if let Some(existing) = kernel.implementation_of(interface.id) {
                self.skip_bound(interface, &existing, implementation, counters);
                continue;
            }

            let lifetime = Lifetime::from_scope(declaration.scope(), implementation)?;
            let Some(cast) = candidate.cast_for(interface) else {
                continue;
            };

            let outcome = kernel.bind(BindingRequest {
                interface: interface.clone(),
                implementation: implementation.clone(),
                lifetime,
                activator: Arc::clone(activator),
                cast: Arc::clone(cast),
            });

            match outcome {
                BindOutcome::Registered => {
                    counters.registered.fetch_add(1, Ordering::Relaxed);
                }
                BindOutcome::AlreadyBound { existing } => {
                    self.skip_bound(interface, &existing, implementation, counters);
                }
            }
        }

        Ok(())
    }

    fn skip_bound(
        &self,
        interface: &TypeInfo,
        existing: &TypeInfo,
        implementation: &TypeInfo,
        counters: &ScanCounters,
    ) {
        counters.skipped.fetch_add(1, Ordering::Relaxed);
        if existing == implementation || !self.config.warn_on_conflict {
            debug!("接口 {} 已绑定到 {}，跳过 {}", interface, existing, implementation);
        } else {
            warn!("接口 {} 已绑定到 {}，忽略 {} 的绑定声明", interface, existing, implementation);
        }
    }
}

impl fmt::Debug for InjectionContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionContainer")
            .field("config", &self.config)
            .field("initialized", &self.is_initialized())
            .field("scans", &self.scan_count())
            .finish()
    }
}
