// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `#[derive(Record)]` for tiq
//!
//! ```ignore
//! #[derive(Default, Record)]
//! struct Column {
//!     #[tiq(json = "table", tag = "get(db, 'table')")]
//!     table: String,
//!     #[tiq(r#"json:"nullable""#)]
//!     nullable: Option<bool>,
//!     #[tiq(skip)]
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! `key = "value"` pairs are rendered as `key:"value"` annotations; a bare
//! string literal is copied verbatim. Multiple `#[tiq]` attributes on one
//! field are joined with a space.
//!
//! Every field that is not skipped must implement `tiq::FieldType`, tagged or
//! not, because it is exposed as a settable slot. Fields of any other type
//! need `#[tiq(skip)]` and are then invisible to inspection. Generic structs
//! get a `FieldType` bound for each field type.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Token, Type, parse_macro_input};

/// Derive `tiq::Record` and `tiq::Inspect` for a struct with named fields
#[proc_macro_derive(Record, attributes(tiq))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// One argument of a `#[tiq(...)]` attribute
enum TiqArg {
    Skip,
    Raw(LitStr),
    Pair { key: Ident, value: LitStr },
}

impl Parse for TiqArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(TiqArg::Raw(input.parse()?));
        }

        let key = Ident::parse_any(input)?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value = input.parse()?;
            return Ok(TiqArg::Pair { key, value });
        }

        if key == "skip" {
            Ok(TiqArg::Skip)
        } else {
            Err(syn::Error::new(
                key.span(),
                "expected `skip`, `name = \"value\"` or a string literal",
            ))
        }
    }
}

struct FieldDef<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    annotations: String,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(generate(input, &[]));
            }
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new_spanned(
                    fields,
                    "#[derive(Record)] requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Record)] can only be used on structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(annotations) = field_annotations(field)? else {
            continue;
        };
        if let Some(ident) = &field.ident {
            fields.push(FieldDef {
                ident,
                ty: &field.ty,
                annotations,
            });
        }
    }

    Ok(generate(input, &fields))
}

/// Annotation string of a field, or `None` when the field is skipped
fn field_annotations(field: &syn::Field) -> syn::Result<Option<String>> {
    let mut parts = Vec::new();
    let mut skip = false;

    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("tiq")) {
        let args = attr.parse_args_with(Punctuated::<TiqArg, Token![,]>::parse_terminated)?;
        for arg in args {
            match arg {
                TiqArg::Skip => skip = true,
                TiqArg::Raw(raw) => parts.push(raw.value()),
                TiqArg::Pair { key, value } => {
                    parts.push(format!("{}:{}", key.unraw(), quote_value(&value.value())));
                }
            }
        }
    }

    Ok(if skip { None } else { Some(parts.join(" ")) })
}

fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn generate(input: &DeriveInput, fields: &[FieldDef<'_>]) -> TokenStream2 {
    let name = &input.ident;
    let name_str = name.unraw().to_string();
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_some() {
        let where_clause = generics.make_where_clause();
        for field in fields {
            let ty = field.ty;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: ::tiq::FieldType));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let idents: Vec<_> = fields.iter().map(|f| f.ident).collect();
    let infos = fields.iter().map(|f| {
        let field_name = f.ident.unraw().to_string();
        let ty = f.ty;
        let annotations = &f.annotations;
        quote! {
            ::tiq::FieldInfo::new(
                #field_name,
                <#ty as ::tiq::FieldType>::type_info(),
                #annotations,
            )
        }
    });

    quote! {
        impl #impl_generics ::tiq::Record for #name #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #name_str
            }

            fn field_infos(&self) -> ::std::vec::Vec<::tiq::FieldInfo> {
                ::std::vec![#(#infos),*]
            }

            fn field_slots(&self) -> ::std::vec::Vec<&dyn ::tiq::Slot> {
                ::std::vec![#(&self.#idents as &dyn ::tiq::Slot),*]
            }

            fn field_slots_mut(&mut self) -> ::std::vec::Vec<&mut dyn ::tiq::Slot> {
                ::std::vec![#(&mut self.#idents as &mut dyn ::tiq::Slot),*]
            }
        }

        impl #impl_generics ::tiq::Inspect for #name #ty_generics #where_clause {
            fn inspect_ref(&self) -> ::tiq::Inspected<'_> {
                ::tiq::Inspected::Record(self)
            }

            fn inspect_mut(&mut self) -> ::tiq::InspectedMut<'_> {
                ::tiq::InspectedMut::Record(self)
            }
        }
    }
}
