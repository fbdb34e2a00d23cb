use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Generics};

use crate::support::{attrs, diag};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    attrs::reject(&input.attrs, "types; use it on fields")?;

    let ident = &input.ident;
    let type_name = ident.to_string();
    let generics = add_reflect_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => struct_body(&type_name, &data.fields)?,
        Data::Enum(data) => {
            let mut arms = Vec::with_capacity(data.variants.len());
            for variant in &data.variants {
                attrs::reject(&variant.attrs, "enum variants")?;
                arms.push(variant_arm(&type_name, &variant.ident, &variant.fields)?);
            }
            if arms.is_empty() {
                return Err(diag::error_spanned(
                    ident,
                    "Reflect cannot be derived for an enum without variants",
                ));
            }
            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        Data::Union(_) => {
            return Err(syn::Error::new(
                ident.span(),
                "Reflect derive can only be used on structs and enums",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::unitils_types::Reflect for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn reflect(&self) -> ::unitils_types::ReflectResult<::unitils_types::Kind<'_>> {
                ::core::result::Result::Ok(#body)
            }
        }
    })
}

fn add_reflect_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::unitils_types::Reflect));
        }
    }
    generics
}

/// A field that takes part in reflection: its reported name and an
/// expression evaluating to `&FieldType`.
struct Reflected {
    name: String,
    access: TokenStream2,
}

fn object(type_name: &str, fields: &[Reflected]) -> TokenStream2 {
    let entries = fields.iter().map(|Reflected { name, access }| {
        quote!(::unitils_types::Field::new(#name, #access))
    });
    quote! {
        ::unitils_types::Kind::Object(::unitils_types::ObjectView::new(
            ::unitils_types::Identity::of(self),
            #type_name,
            ::std::vec![#(#entries),*],
        ))
    }
}

fn unit(type_name: &str, name: &str) -> TokenStream2 {
    quote! {
        ::unitils_types::Kind::Unit(::unitils_types::UnitView::new(#type_name, #name))
    }
}

fn struct_body(type_name: &str, fields: &Fields) -> syn::Result<TokenStream2> {
    if let Fields::Unit = fields {
        return Ok(unit(type_name, type_name));
    }

    let mut reflected = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let options = attrs::field_attrs(&field.attrs)?;
        if options.skip {
            continue;
        }
        let (default_name, access) = match &field.ident {
            Some(ident) => (ident.unraw().to_string(), quote!(&self.#ident)),
            None => {
                let member = syn::Index::from(index);
                (index.to_string(), quote!(&self.#member))
            }
        };
        reflected.push(Reflected {
            name: options.rename.unwrap_or(default_name),
            access,
        });
    }
    Ok(object(type_name, &reflected))
}

fn variant_arm(type_name: &str, variant: &syn::Ident, fields: &Fields) -> syn::Result<TokenStream2> {
    let qualified = format!("{type_name}::{variant}");

    match fields {
        Fields::Unit => {
            let name = variant.to_string();
            let kind = unit(type_name, &name);
            Ok(quote!(Self::#variant => #kind,))
        }
        Fields::Named(named) => {
            let mut patterns = Vec::new();
            let mut reflected = Vec::new();
            for field in &named.named {
                let options = attrs::field_attrs(&field.attrs)?;
                let Some(ident) = &field.ident else {
                    continue;
                };
                if options.skip {
                    continue;
                }
                let binding = format_ident!("__reflect_{}", ident);
                patterns.push(quote!(#ident: #binding));
                reflected.push(Reflected {
                    name: options.rename.unwrap_or_else(|| ident.unraw().to_string()),
                    access: quote!(#binding),
                });
            }
            let kind = object(&qualified, &reflected);
            Ok(quote!(Self::#variant { #(#patterns,)* .. } => #kind,))
        }
        Fields::Unnamed(unnamed) => {
            let mut patterns = Vec::new();
            let mut reflected = Vec::new();
            for (index, field) in unnamed.unnamed.iter().enumerate() {
                let options = attrs::field_attrs(&field.attrs)?;
                if options.skip {
                    patterns.push(quote!(_));
                    continue;
                }
                let binding = format_ident!("__reflect_{}", index);
                patterns.push(quote!(#binding));
                reflected.push(Reflected {
                    name: options.rename.unwrap_or_else(|| index.to_string()),
                    access: quote!(#binding),
                });
            }
            let kind = object(&qualified, &reflected);
            Ok(quote!(Self::#variant(#(#patterns),*) => #kind,))
        }
    }
}
