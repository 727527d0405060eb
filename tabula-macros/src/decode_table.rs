use crate::decode_column::{ColumnParsed, decode_column};
use convert_case::{Case, Casing};
use quote::ToTokens;
use syn::{ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct TableParsed {
    pub(crate) item: ItemStruct,
    /// Explicit table name, empty when not annotated.
    pub(crate) name: String,
    pub(crate) columns: Vec<ColumnParsed>,
}

/// Applies a `rename_all` rule, `None` when the rule is unknown.
fn rename(value: &str, rule: &str) -> Option<String> {
    Some(match rule {
        "lowercase" => value.to_lowercase(),
        "UPPERCASE" => value.to_uppercase(),
        "snake_case" => value.to_case(Case::Snake),
        "SCREAMING_SNAKE_CASE" => value.to_case(Case::UpperSnake),
        "camelCase" => value.to_case(Case::Camel),
        "PascalCase" => value.to_case(Case::Pascal),
        "kebab-case" => value.to_case(Case::Kebab),
        _ => return None,
    })
}

pub(crate) fn decode_table(item: ItemStruct) -> TableParsed {
    let mut name = String::new();
    let mut rename_all = None;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("tabula") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `tabula`, use it like: `#[tabula(attribute = value, ..)]`"
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `name`, use it like: `#[tabula(name = \"my_table\")]`"
                        );
                    };
                    name = value.value();
                } else if arg.path.is_ident("rename_all") {
                    let rule = arg
                        .value()
                        .and_then(ParseBuffer::parse::<LitStr>)
                        .ok()
                        .map(|v| v.value())
                        .filter(|v| rename("", v).is_some());
                    let Some(rule) = rule else {
                        panic!(
                            "Error while parsing `rename_all`, use it like: `#[tabula(rename_all = \"snake_case\")]` (also lowercase, UPPERCASE, SCREAMING_SNAKE_CASE, camelCase, PascalCase, kebab-case)"
                        );
                    };
                    rename_all = Some(rule);
                } else {
                    panic!(
                        "Unknown attribute `{}` inside tabula macro",
                        arg.path.to_token_stream()
                    );
                }
                Ok(())
            });
        }
    }
    let columns = item
        .fields
        .iter()
        .map(|f| {
            let mut column = decode_column(f);
            if let Some(rule) = &rename_all
                && column.def.column_name.is_empty()
                && let Some(renamed) = rename(&column.def.name, rule)
            {
                column.def.column_name = renamed.into();
            }
            column
        })
        .collect();
    TableParsed {
        item,
        name,
        columns,
    }
}
