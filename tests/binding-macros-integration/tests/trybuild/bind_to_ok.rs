use binding_macros::bind_to;
use std::sync::Arc;

pub trait Repository: Send + Sync {
    fn table(&self) -> &'static str;
}

pub trait Cache: Send + Sync {}

#[bind_to(singleton, to = [dyn Repository, dyn Cache], factory = SqlRepository::connect)]
pub struct SqlRepository {
    table: &'static str,
}

impl SqlRepository {
    fn connect() -> Self {
        Self { table: "orders" }
    }
}

impl Repository for SqlRepository {
    fn table(&self) -> &'static str {
        self.table
    }
}

impl Cache for SqlRepository {}

fn main() {
    let container = di_impl::InjectionContainer::new(di_impl::StaticCatalog);
    let repository: Arc<dyn Repository> = container.resolve::<dyn Repository>().unwrap();
    assert_eq!(repository.table(), "orders");
}
