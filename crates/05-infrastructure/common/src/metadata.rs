//! 元数据定义
//!
//! 提供绑定目标与实现类型的类型信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// trait object 类型名称前缀
///
/// 依赖 `std::any::type_name` 的输出格式，该格式不是稳定约定。
const TRAIT_OBJECT_PREFIX: &str = "dyn ";

/// 类型信息
///
/// 相等性与哈希只取决于 [`TypeId`]，名称仅用于日志与错误信息。
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（含模块路径）
    pub type_name: &'static str,
    /// 简短类型名称（不含模块路径）
    pub name: String,
    /// `&T` 是否为胖指针（trait object、切片、`str`）
    wide_pointer: bool,
}

impl TypeInfo {
    /// 从类型获取类型信息
    ///
    /// 接口类型以 trait object 形式传入，例如 `TypeInfo::of::<dyn Repository>()`。
    pub fn of<T: ?Sized + 'static>() -> Self {
        let type_name = std::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            type_name,
            name: shorten_type_name(type_name),
            wide_pointer: mem::size_of::<&T>() == 2 * mem::size_of::<usize>(),
        }
    }

    /// 是否为接口类型（trait object）
    ///
    /// 只有胖指针类型才可能是 trait object；名称前缀用于排除切片与 `str`。
    pub fn is_interface(&self) -> bool {
        self.wide_pointer && self.type_name.starts_with(TRAIT_OBJECT_PREFIX)
    }

    /// 获取简短的类型名称
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 所属 crate 名称
    pub fn crate_name(&self) -> &str {
        let path = self
            .type_name
            .strip_prefix(TRAIT_OBJECT_PREFIX)
            .unwrap_or(self.type_name);
        path.split("::").next().unwrap_or(path)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// 去掉类型名称中所有的模块路径
///
/// `dyn app::IFoo + core::marker::Send` => `dyn IFoo + Send`
fn shorten_type_name(full: &str) -> String {
    let mut shortened = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if ch.is_alphanumeric() || ch == '_' {
            segment.push(ch);
        } else {
            shortened.push_str(&segment);
            segment.clear();
            shortened.push(ch);
        }
    }
    shortened.push_str(&segment);

    shortened
}
