//! 进程级容器测试
//!
//! 进程级容器每个测试进程只能安装一次，因此整个流程放在一个测试中。

use di_impl::{CandidateType, ContainerConfig, ContainerError, InjectionContainer, StaticCatalog};
use infrastructure_common::BindingScope;
use std::sync::Arc;

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

#[derive(Default)]
struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> u64 {
        42
    }
}

fn frozen_clock() -> CandidateType {
    CandidateType::builder(FrozenClock::default)
        .scope(BindingScope::Singleton)
        .provides::<dyn Clock, _>(|it| it as Arc<dyn Clock>)
        .build()
}

#[test]
fn test_global_container_lifecycle() {
    di_impl::submit(module_path!(), frozen_clock);

    let installed = di_impl::install(InjectionContainer::with_config(
        StaticCatalog,
        ContainerConfig::default().with_parallel_scan(false),
    ))
    .unwrap();
    assert!(!installed.is_initialized());

    let second = di_impl::install(InjectionContainer::new(StaticCatalog));
    assert!(matches!(second, Err(ContainerError::AlreadyInstalled)));

    di_impl::start().unwrap();
    let clock = di_impl::resolve::<dyn Clock>().unwrap();
    let again = di_impl::global().resolve::<dyn Clock>().unwrap();

    assert_eq!(clock.now(), 42);
    assert!(Arc::ptr_eq(&clock, &again));
    assert_eq!(di_impl::global().scan_count(), 1);
    assert!(!di_impl::global().config().parallel_scan);
}
