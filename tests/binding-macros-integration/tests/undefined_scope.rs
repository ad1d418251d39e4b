//! `undefined` 作用域会使整个容器初始化失败

use binding_macros::bind_to;
use di_impl::{BindingError, ContainerConfig, ContainerError};

pub trait Storage: Send + Sync {}

pub trait Mirror: Send + Sync {}

#[bind_to(undefined, to = dyn Storage)]
#[derive(Default)]
pub struct LegacyStorage;

impl Storage for LegacyStorage {}

#[bind_to(singleton, to = dyn Mirror)]
#[derive(Default)]
pub struct HealthyMirror;

impl Mirror for HealthyMirror {}

#[test]
fn test_undefined_scope_poisons_global_container() {
    di_impl::install(di_impl::InjectionContainer::with_config(
        di_impl::StaticCatalog,
        ContainerConfig::default(),
    ))
    .unwrap();

    let expected = ContainerError::Binding(BindingError::UnsupportedScope {
        implementation: "LegacyStorage".to_string(),
        scope: "undefined".to_string(),
    });

    assert_eq!(di_impl::start(), Err(expected.clone()));
    assert_eq!(di_impl::resolve::<dyn Mirror>().err(), Some(expected));
    assert!(!di_impl::global().is_initialized());
    assert_eq!(di_impl::global().scan_count(), 1);
}
