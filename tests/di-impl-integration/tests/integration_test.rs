//! 绑定注册容器的集中集成测试
use di_abstractions::{CandidateModule, ModuleSource, ResolverEngine};
use di_impl::{CandidateType, ContainerConfig, ContainerError, InjectionContainer, Lifetime};
use infrastructure_common::{BindingScope, ContainerResult, TypeInfo};
use std::io::Write;
use std::sync::Arc;

trait Notifier: Send + Sync {
    fn channel(&self) -> String;
}

trait Auditor: Send + Sync {
    fn audit(&self) -> usize;
}

#[derive(Default)]
struct MailNotifier;

impl Notifier for MailNotifier {
    fn channel(&self) -> String {
        "mail".to_string()
    }
}

impl Auditor for MailNotifier {
    fn audit(&self) -> usize {
        1
    }
}

/// 自定义候选模块
struct PluginModule {
    name: String,
    scope: BindingScope,
}

impl CandidateModule for PluginModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn candidate_types(&self) -> Vec<CandidateType> {
        vec![
            CandidateType::undeclared::<String>(),
            CandidateType::builder(MailNotifier::default)
                .scope(self.scope)
                .provides::<dyn Notifier, _>(|it| it as Arc<dyn Notifier>)
                .provides::<dyn Auditor, _>(|it| it as Arc<dyn Auditor>)
                .build(),
        ]
    }
}

/// 自定义模块来源
struct PluginDirectory {
    plugins: Vec<&'static str>,
    scope: BindingScope,
}

impl ModuleSource for PluginDirectory {
    fn modules(&self) -> ContainerResult<Vec<Arc<dyn CandidateModule>>> {
        if self.plugins.is_empty() {
            return Err(ContainerError::discovery("插件目录为空"));
        }
        Ok(self
            .plugins
            .iter()
            .map(|name| {
                Arc::new(PluginModule {
                    name: (*name).to_string(),
                    scope: self.scope,
                }) as Arc<dyn CandidateModule>
            })
            .collect())
    }
}

#[test]
fn test_custom_module_source() {
    let container = InjectionContainer::new(PluginDirectory {
        plugins: vec!["mail", "mail-backup"],
        scope: BindingScope::Singleton,
    });

    assert_eq!(container.resolve::<dyn Notifier>().unwrap().channel(), "mail");
    assert_eq!(container.resolve::<dyn Auditor>().unwrap().audit(), 1);

    let report = container.report().unwrap();
    assert_eq!(report.modules, 2);
    assert_eq!(report.candidate_types, 4);
    assert_eq!(report.declared_types, 2);
    assert_eq!(report.registered, 2);
    assert_eq!(report.skipped, 2);
}

#[test]
fn test_singleton_is_per_binding() {
    let container = InjectionContainer::new(PluginDirectory {
        plugins: vec!["mail"],
        scope: BindingScope::Singleton,
    });

    let kernel = container.kernel().unwrap();
    let notifier = kernel.get::<dyn Notifier>().unwrap();
    let again = kernel.get::<dyn Notifier>().unwrap();
    let auditor = kernel.get::<dyn Auditor>().unwrap();
    let auditor_again = kernel.get::<dyn Auditor>().unwrap();

    assert!(Arc::ptr_eq(&notifier, &again));
    assert!(Arc::ptr_eq(&auditor, &auditor_again));
    // 两个接口各自持有一个 MailNotifier 实例
    assert_ne!(
        Arc::as_ptr(&notifier) as *const (),
        Arc::as_ptr(&auditor) as *const ()
    );
    assert_eq!(
        kernel.lifetime_of(TypeInfo::of::<dyn Auditor>().id),
        Some(Lifetime::Singleton)
    );
}

#[test]
fn test_empty_directory_is_discovery_error() {
    let container = InjectionContainer::new(PluginDirectory {
        plugins: Vec::new(),
        scope: BindingScope::Transient,
    });

    assert!(matches!(
        container.resolve::<dyn Notifier>(),
        Err(ContainerError::Discovery { .. })
    ));
    assert!(container.registrations().is_err());
}

#[test]
fn test_container_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
parallel_scan = true
worker_threads = 3
warn_on_conflict = false
"#,
    )
    .unwrap();

    let config = ContainerConfig::from_file(file.path()).unwrap();
    let container = InjectionContainer::with_config(
        PluginDirectory {
            plugins: vec!["a", "b", "c", "d"],
            scope: BindingScope::Thread,
        },
        config,
    );

    container.start().unwrap();

    assert_eq!(container.config().worker_threads, Some(3));
    assert_eq!(container.registrations().unwrap().len(), 2);
    assert!(container
        .registrations()
        .unwrap()
        .iter()
        .all(|binding| binding.lifetime == Lifetime::Thread));
}

#[test]
fn test_undefined_scope_in_any_module_fails() {
    let container = InjectionContainer::new(PluginDirectory {
        plugins: vec!["mail"],
        scope: BindingScope::Undefined,
    });

    let error = container.start().unwrap_err();

    assert!(error.as_binding().is_some());
    assert!(container.resolve::<dyn Notifier>().is_err());
    assert_eq!(container.scan_count(), 1);
}
