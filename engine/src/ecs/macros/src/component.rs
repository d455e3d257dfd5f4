use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

pub fn derive_component(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // Get the struct name we are annotating, along with any generics it carries.
    let struct_name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    // Use ::sprite_engine::ecs::Component which works both inside and outside the crate.
    // Inside the crate, this works because of `extern crate self as sprite_engine;` in lib.rs
    // Outside the crate, this naturally resolves to the sprite_engine dependency.
    TokenStream::from(quote! {
        impl #impl_generics ::sprite_engine::ecs::Component for #struct_name #ty_generics #where_clause {
        }
    })
}
