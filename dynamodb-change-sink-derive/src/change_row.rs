use crate::settings::Settings;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

pub(crate) fn derive_change_row(input: DeriveInput) -> Result<TokenStream, syn::Error> {
    let settings = Settings::builder(&input)
        .field_attributes(&input)?
        .build()?;

    let ident = settings.ident();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let schema_fields = settings.fields().iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;

        quote! {
            .field(
                dynamodb_change_sink::schema::Field::new(
                    #name,
                    <#ty as dynamodb_change_sink::traits::FieldTyped>::field_type(),
                )
                .with_nullable(<#ty as dynamodb_change_sink::traits::FieldTyped>::nullable())
            )
        }
    });

    let values = settings.fields().iter().map(|field| {
        let field_ident = &field.ident;

        quote! {
            dynamodb_change_sink::record::FieldValue::from(self.#field_ident)
        }
    });

    let partition_key = &settings.partition_key_field;

    let sort_key_impl = settings
        .sort_key_field
        .as_ref()
        .map(|sort_key| quote! { .sort_key(#sort_key) });

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics dynamodb_change_sink::traits::ChangeRow for #ident #ty_generics #where_clause {
            fn physical_schema() -> Result<
                dynamodb_change_sink::schema::PhysicalSchema,
                dynamodb_change_sink::errors::SchemaError,
            > {
                dynamodb_change_sink::schema::PhysicalSchema::builder()
                    #(#schema_fields)*
                    .partition_key(#partition_key)
                    #sort_key_impl
                    .build()
            }

            fn into_values(self) -> Vec<dynamodb_change_sink::record::FieldValue> {
                vec![#(#values,)*]
            }
        }
    };

    Ok(expanded)
}
