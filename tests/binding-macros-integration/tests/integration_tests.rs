//! `#[bind_to]` 宏的集中集成测试

use binding_macros::bind_to;
use di_impl::{
    CandidateModule, InjectionContainer, Lifetime, ModuleSource, ResolutionError, StaticCatalog,
};
use infrastructure_common::{ContainerError, TypeInfo};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

pub trait Farewell: Send + Sync {
    fn bye(&self) -> String;
}

pub trait Ticket: Send + Sync {
    fn number(&self) -> usize;
}

pub trait Session: Send + Sync {
    fn owner(&self) -> usize;
}

pub trait Channel: Send + Sync {
    fn kind(&self) -> &'static str;
}

pub trait Unclaimed: Send + Sync {}

static TICKETS: AtomicUsize = AtomicUsize::new(0);
static SESSIONS: AtomicUsize = AtomicUsize::new(0);

#[bind_to(singleton, to = [dyn Greeter, dyn Farewell])]
#[derive(Debug, Default)]
pub struct PoliteService;

impl Greeter for PoliteService {
    fn greet(&self) -> String {
        "你好".to_string()
    }
}

impl Farewell for PoliteService {
    fn bye(&self) -> String {
        "再见".to_string()
    }
}

#[bind_to(to = dyn Ticket, factory = NumberedTicket::issue)]
pub struct NumberedTicket {
    number: usize,
}

impl NumberedTicket {
    fn issue() -> Self {
        Self {
            number: TICKETS.fetch_add(1, Ordering::SeqCst),
        }
    }
}

impl Ticket for NumberedTicket {
    fn number(&self) -> usize {
        self.number
    }
}

#[bind_to(thread, to = [dyn Session], factory = ThreadSession::open)]
pub struct ThreadSession {
    owner: usize,
}

impl ThreadSession {
    fn open() -> Self {
        Self {
            owner: SESSIONS.fetch_add(1, Ordering::SeqCst),
        }
    }
}

impl Session for ThreadSession {
    fn owner(&self) -> usize {
        self.owner
    }
}

mod channels {
    use super::{bind_to, Channel};

    #[bind_to(singleton, to = dyn Channel)]
    #[derive(Default)]
    pub struct SmsChannel;

    impl Channel for SmsChannel {
        fn kind(&self) -> &'static str {
            "sms"
        }
    }

    #[bind_to(singleton, to = dyn Channel)]
    #[derive(Default)]
    pub struct PushChannel;

    impl Channel for PushChannel {
        fn kind(&self) -> &'static str {
            "push"
        }
    }
}

/// 未声明接口的类型不会被注册
#[bind_to(singleton)]
#[derive(Default)]
pub struct MarkerOnly;

fn container() -> InjectionContainer {
    InjectionContainer::new(StaticCatalog)
}

#[test]
fn test_singleton_binding_from_macro() {
    let container = container();

    let greeter = container.resolve::<dyn Greeter>().unwrap();
    let again = container.resolve::<dyn Greeter>().unwrap();

    assert_eq!(greeter.greet(), "你好");
    assert_eq!(container.resolve::<dyn Farewell>().unwrap().bye(), "再见");
    assert!(Arc::ptr_eq(&greeter, &again));
}

#[test]
fn test_transient_binding_uses_factory() {
    let container = container();

    let first = container.resolve::<dyn Ticket>().unwrap().number();
    let second = container.resolve::<dyn Ticket>().unwrap().number();

    assert_ne!(first, second);
}

#[test]
fn test_thread_binding_from_macro() {
    let container = container();

    let local = container.resolve::<dyn Session>().unwrap().owner();
    let local_again = container.resolve::<dyn Session>().unwrap().owner();
    let remote = thread::scope(|scope| {
        scope
            .spawn(|| container.resolve::<dyn Session>().unwrap().owner())
            .join()
            .unwrap()
    });

    assert_eq!(local, local_again);
    assert_ne!(local, remote);
}

#[test]
fn test_conflicting_macros_resolve_consistently() {
    let container = container();

    let kind = container.resolve::<dyn Channel>().unwrap().kind();

    assert!(kind == "sms" || kind == "push");
    assert_eq!(container.resolve::<dyn Channel>().unwrap().kind(), kind);
    assert!(container.report().unwrap().skipped >= 1);
}

#[test]
fn test_registrations_reflect_declared_scopes() {
    let container = container();

    let registrations = container.registrations().unwrap();
    let lifetime_of = |interface: TypeInfo| {
        registrations
            .iter()
            .find(|binding| binding.interface == interface)
            .map(|binding| binding.lifetime)
    };

    assert_eq!(lifetime_of(TypeInfo::of::<dyn Greeter>()), Some(Lifetime::Singleton));
    assert_eq!(lifetime_of(TypeInfo::of::<dyn Ticket>()), Some(Lifetime::Transient));
    assert_eq!(lifetime_of(TypeInfo::of::<dyn Session>()), Some(Lifetime::Thread));
    assert_eq!(registrations.len(), 5);
}

#[test]
fn test_catalog_groups_this_crate() {
    let modules = StaticCatalog.modules().unwrap();

    let module = modules
        .iter()
        .find(|module| module.name() == "integration_tests")
        .unwrap();

    assert_eq!(module.candidate_types().len(), 6);
    assert!(di_impl::submitted_count() >= 6);
}

#[test]
fn test_unclaimed_interface_is_not_bound() {
    let container = container();

    assert!(matches!(
        container.resolve::<dyn Unclaimed>(),
        Err(ContainerError::Resolution(ResolutionError::NotBound { .. }))
    ));
}
