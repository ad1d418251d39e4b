//! # Binding Macros
//!
//! 在类型定义处声明绑定，程序启动时自动提交到 `di_impl` 的静态目录。
//!
//! ## 使用示例
//!
//! ```ignore
//! use binding_macros::bind_to;
//!
//! pub trait Repository: Send + Sync {}
//!
//! #[derive(Default)]
//! #[bind_to(singleton, to = [dyn Repository])]
//! pub struct SqlRepository;
//!
//! impl Repository for SqlRepository {}
//! ```
//!
//! 使用方需要依赖 `di-impl` 与 `ctor`。

use proc_macro::TokenStream;

mod bind_to;

/// 绑定声明宏
///
/// # 参数
///
/// - `transient` / `thread` / `singleton` / `undefined` - 绑定作用域（默认 `transient`）
/// - `to = [dyn A, dyn B]` - 实现的接口列表，单个接口可省略方括号
/// - `factory = path::to::constructor` - 实例构造函数（默认 `Default::default`）
///
/// # 示例
///
/// ```ignore
/// #[bind_to(thread, to = dyn Session, factory = UserSession::new)]
/// pub struct UserSession {
///     // 字段
/// }
/// ```
#[proc_macro_attribute]
pub fn bind_to(args: TokenStream, input: TokenStream) -> TokenStream {
    bind_to::bind_to_impl(args, input)
}
