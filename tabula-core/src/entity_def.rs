use crate::{GenerationMode, Value, quote_cow, quote_option};
use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::borrow::Cow;

/// Declared facts about one field, as written by the entity author.
///
/// Nothing is resolved yet: a blank `column_name` means "same as the field"
/// and `generation: None` means "not annotated", which is what lets the key
/// inference decide on an identity default.
#[derive(Debug, Default, Clone)]
pub struct FieldDef {
    pub name: Cow<'static, str>,
    pub column_name: Cow<'static, str>,
    /// Empty value describing the declared type of the field.
    pub value: Value,
    pub key: bool,
    pub generation: Option<GenerationMode>,
    /// Excluded from the mapping.
    pub ignored: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn column(mut self, column_name: impl Into<Cow<'static, str>>) -> Self {
        self.column_name = column_name.into();
        self
    }
    pub fn value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }
    pub fn key(mut self) -> Self {
        self.key = true;
        self
    }
    pub fn generation(mut self, generation: GenerationMode) -> Self {
        self.generation = Some(generation);
        self
    }
    pub fn identity(self) -> Self {
        self.generation(GenerationMode::Identity)
    }
    pub fn computed(self) -> Self {
        self.generation(GenerationMode::Computed)
    }
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

impl ToTokens for FieldDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = quote_cow(&self.name);
        let column_name = quote_cow(&self.column_name);
        let value = &self.value;
        let key = self.key;
        let generation = quote_option(&self.generation);
        let ignored = self.ignored;
        tokens.append_all(quote! {
            ::tabula::FieldDef {
                name: #name,
                column_name: #column_name,
                value: #value,
                key: #key,
                generation: #generation,
                ignored: #ignored,
            }
        });
    }
}

/// Structural description of an entity type: the input of the metadata builder.
#[derive(Debug, Default, Clone)]
pub struct EntityDef {
    /// Name of the Rust type, used for the default table name and key inference.
    pub type_name: Cow<'static, str>,
    /// Explicit table name, blank when not annotated.
    pub table_name: Cow<'static, str>,
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Default::default()
        }
    }
    pub fn table(mut self, table_name: impl Into<Cow<'static, str>>) -> Self {
        self.table_name = table_name.into();
        self
    }
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}
