use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, LitStr, Path, Result, Token,
    Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_from_object(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromObject` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromObject` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut name_field: Option<Ident> = None;
    let mut labels = HashSet::new();
    let mut cases = Vec::new();

    for field in fields {
        match field.identifier {
            FieldIdentifier::Name(path) => {
                if name_field.replace(field.name).is_some() {
                    Err(Error::new_spanned(path, "Only one field may receive the name."))?;
                }
            }
            FieldIdentifier::Label(label) => {
                if !labels.insert(label.value()) {
                    Err(Error::new(label.span(), "Attribute labels must be unique."))?;
                }

                let name = field.name;
                let assignment = if let Some((field_type, handler)) = field.handler {
                    let body = handler.body;
                    let acc = handler.inputs.iter().nth(0).unwrap();
                    let val = handler.inputs.iter().nth(1).unwrap();

                    quote! {
                        (|#acc: &mut #field_type, #val| { #body })(&mut self.#name, attribute)
                    }
                } else {
                    quote! {
                        self.#name = ::eflr::avec::FromValue::from_value(&attribute.value)
                    }
                };

                cases.push(quote! { #label => { #assignment; } });
            }
        }
    }

    let name_method = name_field.map(|field| {
        quote! {
            fn add_name(&mut self, name: &::eflr::avec::ObjectName) {
                self.#field = Some(name.clone());
            }
        }
    });

    let attribute_method = (!cases.is_empty()).then(|| {
        quote! {
            fn add_attribute(&mut self, label: &str, attribute: &::eflr::avec::Attribute) {
                match label {
                    #(#cases)*
                    _ => {}
                };
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl ::eflr::avec::FromObject for #name {
            #name_method
            #attribute_method
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    identifier: FieldIdentifier,
    handler: Option<(Type, ExprClosure)>,
}

#[derive(Debug)]
enum FieldIdentifier {
    Name(Path),
    Label(LitStr),
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        if let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("name")) {
            attr.meta.require_path_only()?;
            require_option(&field.ty)?;

            return Ok(Some(Self {
                name,
                identifier: FieldIdentifier::Name(attr.path().clone()),
                handler: None,
            }));
        }

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("attribute")) else {
            return Ok(None);
        };

        let AttributeAttribute { label, handler } = attr.meta.require_list()?.parse_args()?;

        if let Some(handler) = &handler {
            if handler.inputs.len() != 2 {
                Err(Error::new_spanned(
                    handler,
                    "Handler closure must have two parameters.",
                ))?
            }
        } else {
            require_option(&field.ty)?;
        }

        let handler = handler.map(|h| (field.ty.clone(), h));

        Ok(Some(Self {
            name,
            identifier: FieldIdentifier::Label(label),
            handler,
        }))
    }
}

fn require_option(ty: &Type) -> Result<()> {
    let Type::Path(path) = ty else {
        Err(Error::new_spanned(ty, "Field must have a type annotation."))?
    };

    let Some(segment) = path.path.segments.first() else {
        Err(Error::new_spanned(
            &path.path.segments,
            "Field must have a type annotation.",
        ))?
    };

    if segment.ident != "Option" {
        Err(Error::new_spanned(
            &segment.ident,
            "Field without a handler must have type `Option<T>`.",
        ))?
    }

    Ok(())
}

#[derive(Debug)]
struct AttributeAttribute {
    label: LitStr,
    handler: Option<ExprClosure>,
}

impl Parse for AttributeAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let label = input.parse::<LitStr>()?;

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { label, handler })
    }
}
