//! 绑定声明宏实现

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{quote, ToTokens};
use syn::{
    bracketed, parse::Parse, parse::ParseStream, punctuated::Punctuated, token, Error, Expr,
    Ident, ItemStruct, Result, Token, Type,
};

/// 绑定作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindScope {
    Undefined,
    #[default]
    Transient,
    Thread,
    Singleton,
}

impl BindScope {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "undefined" => Some(Self::Undefined),
            "transient" => Some(Self::Transient),
            "thread" => Some(Self::Thread),
            "singleton" => Some(Self::Singleton),
            _ => None,
        }
    }

    fn variant(self) -> Ident {
        let name = match self {
            Self::Undefined => "Undefined",
            Self::Transient => "Transient",
            Self::Thread => "Thread",
            Self::Singleton => "Singleton",
        };
        Ident::new(name, Span::call_site())
    }
}

const SCOPE_HINT: &str = "作用域应为 transient、thread、singleton 或 undefined";

/// 绑定声明参数
#[derive(Default)]
pub struct BindToArgs {
    /// 绑定作用域
    pub scope: BindScope,
    /// 实现的接口
    pub interfaces: Vec<Type>,
    /// 自定义构造函数
    pub factory: Option<Expr>,
}

impl Parse for BindToArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = Self::default();
        let mut scope_given = false;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            if input.peek(Token![=]) {
                input.parse::<Token![=]>()?;
                if ident == "to" {
                    if input.peek(token::Bracket) {
                        let content;
                        bracketed!(content in input);
                        let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                        args.interfaces.extend(types);
                    } else {
                        args.interfaces.push(input.parse()?);
                    }
                } else if ident == "factory" {
                    if args.factory.is_some() {
                        return Err(Error::new(ident.span(), "`factory` 只能指定一次"));
                    }
                    args.factory = Some(input.parse()?);
                } else {
                    return Err(Error::new(ident.span(), format!("未知的参数: `{ident}`")));
                }
            } else {
                let scope = BindScope::from_ident(&ident).ok_or_else(|| {
                    Error::new(ident.span(), format!("未知的参数: `{ident}`，{SCOPE_HINT}"))
                })?;
                if scope_given {
                    return Err(Error::new(ident.span(), "作用域只能指定一次"));
                }
                scope_given = true;
                args.scope = scope;
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(args)
    }
}

/// 实现 #[bind_to] 宏
pub fn bind_to_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = match syn::parse::<BindToArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };
    let input_struct = match syn::parse::<ItemStruct>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    expand(&args, &input_struct)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// 生成结构体与启动时注册代码
fn expand(args: &BindToArgs, input_struct: &ItemStruct) -> Result<proc_macro2::TokenStream> {
    if !input_struct.generics.params.is_empty() {
        return Err(Error::new_spanned(&input_struct.generics, "#[bind_to] 不支持泛型类型"));
    }

    let struct_name = &input_struct.ident;
    let registration_fn_name = Ident::new(
        &format!("__bind_to_register_{}", struct_name.to_string().to_lowercase()),
        Span::call_site(),
    );

    let factory = args.factory.as_ref().map_or_else(
        || quote! { <#struct_name as ::core::default::Default>::default },
        |factory| factory.to_token_stream(),
    );
    let scope = args.scope.variant();
    let interfaces = &args.interfaces;

    Ok(quote! {
        #input_struct

        // 程序启动时提交到静态目录
        #[doc(hidden)]
        #[ctor::ctor]
        fn #registration_fn_name() {
            ::di_impl::catalog::submit(::core::module_path!(), || {
                ::di_impl::CandidateType::builder(#factory)
                    .scope(::di_impl::BindingScope::#scope)
                    #(
                        .provides::<#interfaces, _>(
                            |it: ::std::sync::Arc<#struct_name>| -> ::std::sync::Arc<#interfaces> {
                                it
                            }
                        )
                    )*
                    .build()
            });
        }
    })
}
