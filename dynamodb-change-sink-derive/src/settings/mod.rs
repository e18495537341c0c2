mod builder;
use self::builder::SettingsBuilder;
use proc_macro2::Ident;
use syn::{DeriveInput, Type};

pub(crate) struct FieldSettings {
    pub(crate) ident: Ident,
    /// Name of the field in the schema, after any rename
    pub(crate) name: String,
    pub(crate) ty: Type,
}

pub(crate) struct Settings {
    ident: Ident,
    pub(crate) partition_key_field: String,
    pub(crate) sort_key_field: Option<String>,

    /// Fields in declaration order, excluding skipped fields
    fields: Vec<FieldSettings>,
}

impl Settings {
    pub(crate) fn builder(input: &DeriveInput) -> SettingsBuilder {
        SettingsBuilder::new(input)
    }

    pub(crate) fn ident(&self) -> &Ident {
        &self.ident
    }

    pub(crate) fn fields(&self) -> &[FieldSettings] {
        &self.fields
    }
}
