use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

enum PartitionSource {
    Constant(String),
    Field(Ident),
}

pub fn derive_table_entity(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let partition = match extract_constant_partition(input)? {
        Some(value) => PartitionSource::Constant(value),
        None => PartitionSource::Field(find_marked_field(input, "partition")?.ok_or_else(
            || {
                syn::Error::new(
                    Span::call_site(),
                    "TableEntity derive: mark a field with #[table(partition)] \
                     or add #[table(partition = \"...\")] to the struct",
                )
            },
        )?),
    };

    let row_field = match find_marked_field(input, "row")? {
        Some(field) => field,
        None => find_field_named(input, "id").ok_or_else(|| {
            syn::Error::new(
                Span::call_site(),
                "TableEntity derive: no field marked with #[table(row)] and no field named `id`",
            )
        })?,
    };

    let partition_body = match partition {
        PartitionSource::Constant(value) => quote! { #value },
        PartitionSource::Field(field) => quote! { &self.#field },
    };

    Ok(quote! {
        impl #impl_generics gift_registry::TableEntity for #name #ty_generics #where_clause {
            fn partition_key(&self) -> &str {
                #partition_body
            }

            fn row_key(&self) -> &str {
                &self.#row_field
            }
        }
    })
}

fn extract_constant_partition(input: &DeriveInput) -> syn::Result<Option<String>> {
    for attr in &input.attrs {
        if !attr.path().is_ident("table") {
            continue;
        }

        let mut partition = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("partition") {
                let value: LitStr = meta.value()?.parse()?;
                partition = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported struct-level table attribute"))
            }
        })?;

        if partition.is_some() {
            return Ok(partition);
        }
    }

    Ok(None)
}

fn named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => Ok(fields),
            _ => Err(syn::Error::new(
                Span::call_site(),
                "TableEntity derive requires a struct with named fields",
            )),
        },
        _ => Err(syn::Error::new(
            Span::call_site(),
            "TableEntity derive only supports structs",
        )),
    }
}

fn find_marked_field(input: &DeriveInput, marker: &str) -> syn::Result<Option<Ident>> {
    for field in &named_fields(input)?.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("table") {
                continue;
            }

            let mut marked = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("partition") || meta.path.is_ident("row") {
                    if meta.path.is_ident(marker) {
                        marked = true;
                    }
                    Ok(())
                } else {
                    Err(meta.error("expected `partition` or `row`"))
                }
            })?;

            if marked {
                return Ok(field.ident.clone());
            }
        }
    }

    Ok(None)
}

fn find_field_named(input: &DeriveInput, wanted: &str) -> Option<Ident> {
    let fields = named_fields(input).ok()?;
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == wanted)
        .cloned()
}
