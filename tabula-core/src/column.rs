use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use std::borrow::Cow;

/// Indicates who produces the value of a column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    /// The client supplies the value.
    #[default]
    None,
    /// The server assigns the value on insert, the client must omit it.
    Identity,
    /// The server derives the value from other columns, never written by the client but still readable.
    Computed,
}

impl ToTokens for GenerationMode {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(match self {
            GenerationMode::None => quote!(::tabula::GenerationMode::None),
            GenerationMode::Identity => quote!(::tabula::GenerationMode::Identity),
            GenerationMode::Computed => quote!(::tabula::GenerationMode::Computed),
        });
    }
}

/// Resolved mapping of one entity field to one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    /// Name of the field in the entity.
    pub field_name: Cow<'static, str>,
    /// Name of the column in the table.
    pub column_name: Cow<'static, str>,
    /// Participates in the key.
    pub key: bool,
    pub generation: GenerationMode,
}

impl ColumnDef {
    pub fn field_name(&self) -> &str {
        &self.field_name
    }
    pub fn column_name(&self) -> &str {
        &self.column_name
    }
    pub fn is_identity(&self) -> bool {
        self.generation == GenerationMode::Identity
    }
    pub fn is_computed(&self) -> bool {
        self.generation == GenerationMode::Computed
    }
}
