use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_object;
mod from_objects;

#[proc_macro_derive(FromObject, attributes(name, attribute))]
pub fn derive_from_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_object::expand_from_object(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro_derive(FromObjects, attributes(set))]
pub fn derive_from_objects(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_objects::expand_from_objects(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
