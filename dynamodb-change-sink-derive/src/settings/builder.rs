use super::{FieldSettings, Settings};
use itertools::Itertools;
use proc_macro2::{Ident, Span};
use syn::{Data, DeriveInput, Fields, LitStr};

pub(crate) struct SettingsBuilder {
    ident: Ident,
    partition_key_field: Option<String>,
    sort_key_field: Option<String>,
    fields: Vec<FieldSettings>,
}

impl SettingsBuilder {
    pub(crate) fn new(input: &DeriveInput) -> Self {
        Self {
            ident: input.ident.clone(),
            partition_key_field: None,
            sort_key_field: None,
            fields: Vec::new(),
        }
    }

    pub(crate) fn field_attributes(
        mut self,
        DeriveInput { data, .. }: &DeriveInput,
    ) -> Result<Self, syn::Error> {
        // Only support structs with named fields
        let Data::Struct(data_struct) = data else {
            return Err(syn::Error::new(
                Span::call_site(),
                "ChangeRow can only be derived for structs",
            ));
        };

        let Fields::Named(fields_named) = &data_struct.fields else {
            return Err(syn::Error::new_spanned(
                &data_struct.fields,
                "ChangeRow can only be derived for structs with named fields",
            ));
        };

        for field in &fields_named.named {
            let ident = field.ident.clone().ok_or_else(|| {
                syn::Error::new_spanned(field, "internal error: identifier was not Some")
            })?;

            let mut name = ident.to_string();
            let mut skip = false;
            let mut is_partition_key = false;
            let mut is_sort_key = false;

            for attr in &field.attrs {
                if attr.path().is_ident("partition_key") {
                    is_partition_key = true;
                }

                if attr.path().is_ident("sort_key") {
                    is_sort_key = true;
                }

                if attr.path().is_ident("change_sink") {
                    attr.parse_nested_meta(|meta| {
                        let directive = meta.path.get_ident().map(|i| i.to_string());
                        match directive.as_deref() {
                            Some("rename") => {
                                let value = meta.value()?;
                                name = value.parse::<LitStr>()?.value();
                                Ok(())
                            }
                            Some("skip") => {
                                skip = true;
                                Ok(())
                            }
                            _ => Err(meta.error("unsupported attribute")),
                        }
                    })?;
                }
            }

            if skip && (is_partition_key || is_sort_key) {
                return Err(syn::Error::new_spanned(
                    field,
                    format!("field '{ident}' is part of the primary key and cannot be skipped"),
                ));
            }

            if is_partition_key {
                if let Some(f) = &self.partition_key_field {
                    return Err(syn::Error::new_spanned(
                        field,
                        format!("partition key was already specified to be '{f}'"),
                    ));
                }

                self.partition_key_field = Some(name.clone());
            }

            if is_sort_key {
                if let Some(f) = &self.sort_key_field {
                    return Err(syn::Error::new_spanned(
                        field,
                        format!("sort key was already specified to be '{f}'"),
                    ));
                }

                self.sort_key_field = Some(name.clone());
            }

            if !skip {
                self.fields.push(FieldSettings {
                    ident,
                    name,
                    ty: field.ty.clone(),
                });
            }
        }

        Ok(self)
    }

    pub(crate) fn build(self) -> Result<Settings, syn::Error> {
        let Some(partition_key_field) = self.partition_key_field else {
            return Err(syn::Error::new(
                Span::call_site(),
                "Missing required attribute for ChangeRow: #[partition_key]",
            ));
        };

        if let Some(duplicate) = self.fields.iter().map(|f| f.name.as_str()).duplicates().next() {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("field name '{duplicate}' is used more than once"),
            ));
        }

        Ok(Settings {
            ident: self.ident,
            partition_key_field,
            sort_key_field: self.sort_key_field,
            fields: self.fields,
        })
    }
}
