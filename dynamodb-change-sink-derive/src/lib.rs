extern crate proc_macro2;
extern crate quote;
extern crate syn;

mod change_row;
mod settings;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[proc_macro_derive(ChangeRow, attributes(change_sink, sort_key, partition_key))]
pub fn derive_change_row(input: TokenStream) -> TokenStream {
    change_row::derive_change_row(parse_macro_input!(input as DeriveInput))
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
