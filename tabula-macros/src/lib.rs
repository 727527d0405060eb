mod decode_column;
mod decode_table;
mod from_row;

use decode_table::decode_table;
use from_row::from_row;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, ext::IdentExt, parse_macro_input};

/// Implements `tabula::Entity` for a struct with named fields.
///
/// Container attributes: `name = "table"`, `rename_all = "snake_case"`.
/// Field attributes: `name = "column"`, `key`, `identity`, `computed`,
/// `generated = "none" | "identity" | "computed"`, `ignore`.
/// Mapped fields must implement `Clone` and `tabula::AsValue`.
#[proc_macro_derive(Entity, attributes(tabula))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let table = decode_table(parse_macro_input!(input as ItemStruct));
    let item = &table.item;
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let type_name = name.unraw().to_string();
    let table_name = &table.name;
    let field_defs = table.columns.iter().map(|c| &c.def);
    let row = table.columns.iter().filter(|c| !c.def.ignored).map(|c| {
        let ident = &c.ident;
        let field = c.def.name.as_ref();
        quote! {
            row.insert(
                #field,
                ::tabula::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)),
            );
        }
    });
    let capacity = table.columns.len();
    let from_row = from_row(&table);
    quote! {
        impl #impl_generics ::tabula::Entity for #name #ty_generics #where_clause {
            fn describe() -> ::tabula::EntityDef {
                ::tabula::EntityDef {
                    type_name: ::std::borrow::Cow::Borrowed(#type_name),
                    table_name: ::std::borrow::Cow::Borrowed(#table_name),
                    fields: vec![#(#field_defs),*],
                }
            }

            fn row(&self) -> ::tabula::Parameters {
                let mut row = ::tabula::Parameters::with_capacity(#capacity);
                #(#row)*
                row
            }

            fn from_row(row: ::tabula::RowLabeled) -> ::tabula::Result<Self> {
                #from_row
            }
        }
    }
    .into()
}
