//! 实例工厂抽象
//!
//! 激活器负责创建具体类型的实例，接口转换函数负责把具体实例
//! 转换为接口（trait object）句柄。两者都以类型擦除的形式保存在绑定中。

use std::any::Any;
use std::sync::Arc;

/// 类型擦除的组件实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 激活器：创建具体类型的新实例
pub type Activator = Arc<dyn Fn() -> Instance + Send + Sync>;

/// 接口转换函数
///
/// 输入为激活器产生的具体实例，输出为装箱的 `Arc<dyn Interface>`。
/// 实例类型与转换函数不匹配时返回 `None`。
pub type InterfaceCast = Arc<dyn Fn(Instance) -> Option<Box<dyn Any>> + Send + Sync>;

/// 从构造函数创建激活器
pub fn activator<T, F>(factory: F) -> Activator
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(move || Arc::new(factory()) as Instance)
}

/// 从具体类型到接口的转换创建接口转换函数
pub fn interface_cast<T, I, F>(cast: F) -> InterfaceCast
where
    T: Send + Sync + 'static,
    I: ?Sized + 'static,
    F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
{
    Arc::new(move |instance: Instance| {
        instance
            .downcast::<T>()
            .ok()
            .map(|concrete| Box::new(cast(concrete)) as Box<dyn Any>)
    })
}
