use quote::ToTokens;
use syn::{Field, Ident, LitStr, Type, ext::IdentExt, parse::ParseBuffer};
use tabula_core::{FieldDef, GenerationMode, TypeDecoded, decode_type};

pub(crate) struct ColumnParsed {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) def: FieldDef,
}

fn decode_generation(value: &str) -> Option<GenerationMode> {
    Some(match value {
        "none" => GenerationMode::None,
        "identity" => GenerationMode::Identity,
        "computed" => GenerationMode::Computed,
        _ => return None,
    })
}

pub(crate) fn decode_column(field: &Field) -> ColumnParsed {
    let TypeDecoded { value, .. } = decode_type(&field.ty);
    let ident = field
        .ident
        .clone()
        .expect("Entity fields are expected to have a name");
    let mut def = FieldDef::new(ident.unraw().to_string()).value(value);
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("tabula") {
            let Ok(list) = meta.require_list() else {
                panic!(
                    "Error while parsing `tabula`, use it like: `#[tabula(attribute = value, ...)]`",
                );
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("name") {
                    let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `name`, use it like: `#[tabula(name = \"my_column\")]`"
                        );
                    };
                    def.column_name = v.value().into();
                } else if arg.path.is_ident("key") {
                    let Err(..) = arg.value() else {
                        // value() is Err for Meta::Path
                        panic!("Error while parsing `key`, use it like: `#[tabula(key)]`");
                    };
                    def.key = true;
                } else if arg.path.is_ident("identity") || arg.path.is_ident("computed") {
                    let Err(..) = arg.value() else {
                        panic!(
                            "Error while parsing `{0}`, use it like: `#[tabula({0})]`",
                            arg.path.to_token_stream()
                        );
                    };
                    def.generation = Some(if arg.path.is_ident("identity") {
                        GenerationMode::Identity
                    } else {
                        GenerationMode::Computed
                    });
                } else if arg.path.is_ident("generated") {
                    let generation = arg
                        .value()
                        .and_then(ParseBuffer::parse::<LitStr>)
                        .ok()
                        .and_then(|v| decode_generation(&v.value()));
                    let Some(generation) = generation else {
                        panic!(
                            "Error while parsing `generated`, use it like: `#[tabula(generated = \"none\")]` (also \"identity\", \"computed\")"
                        );
                    };
                    def.generation = Some(generation);
                } else if arg.path.is_ident("ignore") {
                    let Err(..) = arg.value() else {
                        panic!("Error while parsing `ignore`, use it like: `#[tabula(ignore)]`");
                    };
                    def.ignored = true;
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
    ColumnParsed {
        ident,
        ty: field.ty.clone(),
        def,
    }
}
