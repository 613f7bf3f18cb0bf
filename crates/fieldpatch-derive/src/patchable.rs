use crate::util::{ident_name, normalize, str_lit};
use darling::{Error as DarlingError, FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeMap;
use syn::{DeriveInput, Generics, Ident, LitStr, Type};

///
/// PatchInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(patch), supports(struct_named))]
struct PatchInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, PatchField>,
}

///
/// PatchField
///

#[derive(Debug, FromField)]
#[darling(attributes(patch))]
struct PatchField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    ignore: bool,

    #[darling(default)]
    ignore_null: bool,

    #[darling(default)]
    identity: bool,

    #[darling(default)]
    skip: bool,

    #[darling(default)]
    rename: Option<String>,
}

///
/// SchemaField
/// One field that takes part in the generated schema.
///

struct SchemaField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: LitStr,
    ignore: bool,
    ignore_null: bool,
    identity: bool,
}

// derive_patchable
pub fn derive_patchable(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let input = match PatchInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.write_errors(),
    }
}

fn expand(input: &PatchInput) -> Result<TokenStream, DarlingError> {
    // the schema is cached in one static per impl
    if !input.generics.params.is_empty() {
        return Err(
            DarlingError::custom("Patchable cannot be derived for generic structs")
                .with_span(&input.generics),
        );
    }

    let Data::Struct(fields) = &input.data else {
        return Err(
            DarlingError::custom("Patchable can only be derived for structs with named fields")
                .with_span(&input.ident),
        );
    };

    let fields = schema_fields(&fields.fields)?;

    Ok(generate(&input.ident, &fields))
}

// Validate attributes and collect the fields that enter the schema.
fn schema_fields(fields: &[PatchField]) -> Result<Vec<SchemaField<'_>>, DarlingError> {
    let mut errors = DarlingError::accumulator();
    let mut seen = BTreeMap::<String, String>::new();
    let mut out = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        if field.skip {
            if field.ignore || field.ignore_null || field.identity || field.rename.is_some() {
                errors.push(
                    DarlingError::custom("`skip` cannot be combined with other patch attributes")
                        .with_span(ident),
                );
            }
            continue;
        }

        let name = field.rename.clone().unwrap_or_else(|| ident_name(ident));
        if name.is_empty() {
            errors.push(DarlingError::custom("patch field name cannot be empty").with_span(ident));
            continue;
        }

        if let Some(previous) = seen.insert(normalize(&name), name.clone()) {
            errors.push(
                DarlingError::custom(format!(
                    "patch field '{name}' collides with '{previous}' (names are case-insensitive)"
                ))
                .with_span(ident),
            );
            continue;
        }

        out.push(SchemaField {
            ident,
            ty: &field.ty,
            name: str_lit(&name, ident),
            ignore: field.ignore,
            ignore_null: field.ignore_null,
            identity: field.identity,
        });
    }

    errors.finish_with(out)
}

fn generate(ident: &Ident, fields: &[SchemaField<'_>]) -> TokenStream {
    let model_name = str_lit(&ident_name(ident), ident);

    let descriptors = fields.iter().map(|field| {
        let SchemaField { ty, name, .. } = field;
        let ignored = field.ignore.then(|| quote!(.ignored()));
        let ignore_null = field.ignore_null.then(|| quote!(.ignore_null()));

        quote! {
            .field(
                ::fieldpatch::model::FieldDescriptor::new(
                    #name,
                    <#ty as ::fieldpatch::traits::FieldValue>::kind(),
                )
                #ignored
                #ignore_null
            )
        }
    });

    let exclusions = fields
        .iter()
        .filter(|field| field.identity)
        .map(|field| {
            let name = &field.name;
            quote!(.exclude(#name))
        });

    let get_arms = fields.iter().map(|field| {
        let SchemaField { ident, ty, name, .. } = field;

        quote! {
            #name => <#ty as ::fieldpatch::traits::FieldValue>::to_value(&self.#ident),
        }
    });

    let set_arms = fields.iter().map(|field| {
        let SchemaField { ident, ty, name, .. } = field;

        quote! {
            #name => {
                self.#ident = <#ty as ::fieldpatch::traits::FieldValue>::from_value(&value)
                    .ok_or_else(|| {
                        ::fieldpatch::error::PatchError::field_write(
                            <Self as ::fieldpatch::traits::Path>::PATH,
                            field,
                            value.tag(),
                        )
                    })?;

                ::core::result::Result::Ok(())
            }
        }
    });

    quote! {
        impl ::fieldpatch::traits::Path for #ident {
            const PATH: &'static str = ::core::concat!(::core::module_path!(), "::", #model_name);
        }

        impl ::fieldpatch::traits::FieldValues for #ident {
            fn get_value(&self, field: &str) -> ::core::option::Option<::fieldpatch::value::Value> {
                let schema = <Self as ::fieldpatch::traits::Patchable>::schema();
                let descriptor = schema.field(field)?;

                ::core::option::Option::Some(match descriptor.name {
                    #(#get_arms)*
                    _ => return ::core::option::Option::None,
                })
            }
        }

        impl ::fieldpatch::traits::Patchable for #ident {
            fn schema() -> &'static ::fieldpatch::model::ModelSchema {
                static SCHEMA: ::std::sync::OnceLock<::fieldpatch::model::ModelSchema> =
                    ::std::sync::OnceLock::new();

                SCHEMA.get_or_init(|| {
                    let built = ::fieldpatch::model::ModelSchema::builder(
                        <Self as ::fieldpatch::traits::Path>::PATH,
                    )
                    #(#descriptors)*
                    #(#exclusions)*
                    .build();

                    // names were checked for collisions at expansion time
                    match built {
                        ::core::result::Result::Ok(schema) => schema,
                        ::core::result::Result::Err(err) => {
                            ::core::panic!("invalid patch schema: {err}")
                        }
                    }
                })
            }

            fn set_value(
                &mut self,
                field: &str,
                value: ::fieldpatch::value::Value,
            ) -> ::core::result::Result<(), ::fieldpatch::error::PatchError> {
                match field {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(
                        ::fieldpatch::error::PatchError::unknown_field(
                            <Self as ::fieldpatch::traits::Path>::PATH,
                            field,
                        ),
                    ),
                }
            }
        }
    }
}
