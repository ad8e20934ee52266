use std::collections::HashMap;

use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitStr, Result, Token, Type,
    punctuated::Punctuated,
};

pub(crate) fn expand_from_objects(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromObjects` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromObjects` may only be derived on structs with named fields.",
        ))?
    };

    let mut claimed: HashMap<String, &Ident> = HashMap::new();
    let mut cases = Vec::new();

    for field in &fields.named {
        let Some(receiver) = Receiver::parse(field)? else {
            continue;
        };

        for set_type in &receiver.set_types {
            if let Some(other) = claimed.insert(set_type.value(), receiver.field) {
                Err(Error::new(
                    set_type.span(),
                    format!("Set type is already received by `{other}`."),
                ))?
            }
        }

        let set_types = &receiver.set_types;
        let body = receiver.collection.receive(receiver.field);

        cases.push(quote! { #(#set_types)|* => { #body } });
    }

    let name = &input.ident;

    let expanded = quote! {
        impl ::eflr::avec::FromObjects for #name {
            fn add_object(
                &mut self,
                set_type: &str,
            ) -> Option<&mut dyn ::eflr::avec::FromObject> {
                match set_type {
                    #(#cases)*
                    _ => None,
                }
            }
        }
    };

    Ok(expanded.into())
}

/// A field receiving the objects of one or more set types.
struct Receiver<'a> {
    field: &'a Ident,
    set_types: Vec<LitStr>,
    collection: Collection,
}

/// How a field holds received objects.
enum Collection {
    /// `Option<T>`: the latest object.
    Latest,
    /// `Vec<T>`: every object, in order.
    All,
}

impl<'a> Receiver<'a> {
    fn parse(field: &'a Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("set")) else {
            return Ok(None);
        };

        let set_types: Vec<LitStr> = attr
            .parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?
            .into_iter()
            .collect();

        if set_types.is_empty() {
            Err(Error::new_spanned(attr, "At least one set type is required."))?
        }

        let Some(field_name) = &field.ident else {
            Err(Error::new_spanned(field, "Receiving fields must be named."))?
        };

        Ok(Some(Self {
            field: field_name,
            set_types,
            collection: Collection::of(&field.ty)?,
        }))
    }
}

impl Collection {
    fn of(ty: &Type) -> Result<Self> {
        let segment = match ty {
            Type::Path(path) => path.path.segments.last(),
            _ => None,
        };

        match segment.map(|s| s.ident.to_string()).as_deref() {
            Some("Option") => Ok(Self::Latest),
            Some("Vec") => Ok(Self::All),
            _ => Err(Error::new_spanned(
                ty,
                "Field must have an `Option<T>` or `Vec<T>` type.",
            )),
        }
    }

    /// The statements handing out a receiver for a new object in `field`.
    fn receive(&self, field: &Ident) -> impl ToTokens {
        match self {
            Self::Latest => quote! {
                Some(self.#field.insert(Default::default()))
            },
            Self::All => quote! {
                self.#field.push(Default::default());
                self.#field.last_mut().map(|o| o as _)
            },
        }
    }
}
