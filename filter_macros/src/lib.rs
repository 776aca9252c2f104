//! Registration attribute for sinogram filters.
//!
//! `#[register_filter]` on a struct implementing `SinogramFilter` emits a start-up
//! constructor that inserts a default instance into the crate's `FILTER_REGISTRY`.

extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemStruct};

#[proc_macro_attribute]
pub fn register_filter(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new_spanned(attr, "`register_filter` takes no arguments")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;

    let fn_name_str = heck::ToSnakeCase::to_snake_case(struct_name.to_string().as_str());
    let fn_name = syn::Ident::new(
        &format!("register_sinogram_filter_{}", fn_name_str),
        struct_name.span(),
    );

    let expanded = quote! {
        #input

        // runs before `main`, so the registry is populated on first access
        #[ctor::ctor]
        fn #fn_name() {
            crate::filters::filter::FilterRegistry::register_filter::<#struct_name>();
        }
    };

    TokenStream::from(expanded)
}
