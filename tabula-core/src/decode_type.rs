use crate::{Value, matches_path};
use std::mem;
use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Declared shape of a field type.
#[derive(Default, Debug)]
pub struct TypeDecoded {
    pub value: Value,
    pub nullable: bool,
}

/// Maps a field type to the empty [`Value`] it converts to.
///
/// Transparent wrappers (`Option`, `Box`, `Arc`, `Cow`) are peeled, `Option`
/// marks the field as nullable. Unknown types decode to `Value::Null`, they
/// still map as long as they implement `AsValue`.
pub fn decode_type(ty: &Type) -> TypeDecoded {
    let mut nullable = false;
    let value = 'value: {
        let Type::Path(TypePath { path, .. }) = ty else {
            break 'value Value::Null;
        };
        if let Some(ident) = path.get_ident() {
            if ident == "bool" {
                break 'value Value::Boolean(None);
            } else if ident == "i8" {
                break 'value Value::Int8(None);
            } else if ident == "i16" {
                break 'value Value::Int16(None);
            } else if ident == "i32" {
                break 'value Value::Int32(None);
            } else if ident == "i64" {
                break 'value Value::Int64(None);
            } else if ident == "u8" {
                break 'value Value::UInt8(None);
            } else if ident == "u16" {
                break 'value Value::UInt16(None);
            } else if ident == "u32" {
                break 'value Value::UInt32(None);
            } else if ident == "u64" {
                break 'value Value::UInt64(None);
            } else if ident == "isize" {
                break 'value if mem::size_of::<isize>() == mem::size_of::<i32>() {
                    Value::Int32(None)
                } else {
                    Value::Int64(None)
                };
            } else if ident == "usize" {
                break 'value if mem::size_of::<usize>() == mem::size_of::<u32>() {
                    Value::UInt32(None)
                } else {
                    Value::UInt64(None)
                };
            } else if ident == "f32" {
                break 'value Value::Float32(None);
            } else if ident == "f64" {
                break 'value Value::Float64(None);
            } else if ident == "char" {
                break 'value Value::Char(None);
            }
        }
        if matches_path(path, &["std", "string", "String"]) {
            break 'value Value::Varchar(None);
        } else if matches_path(path, &["rust_decimal", "Decimal"]) {
            break 'value Value::Decimal(None);
        } else if matches_path(path, &["time", "Time"]) {
            break 'value Value::Time(None);
        } else if matches_path(path, &["time", "Date"]) {
            break 'value Value::Date(None);
        } else if matches_path(path, &["time", "PrimitiveDateTime"]) {
            break 'value Value::Timestamp(None);
        } else if matches_path(path, &["uuid", "Uuid"]) {
            break 'value Value::Uuid(None);
        }
        let is_option = matches_path(path, &["std", "option", "Option"]);
        let is_wrapper = is_option
            || matches_path(path, &["std", "boxed", "Box"])
            || matches_path(path, &["std", "sync", "Arc"])
            || matches_path(path, &["std", "borrow", "Cow"]);
        let is_bytes = matches_path(path, &["std", "vec", "Vec"]);
        let Some(last) = path.segments.last() else {
            break 'value Value::Null;
        };
        let PathArguments::AngleBracketed(arguments) = &last.arguments else {
            break 'value Value::Null;
        };
        let inner = arguments.args.iter().find_map(|v| match v {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        });
        match inner {
            Some(Type::Path(TypePath { path, .. }))
                if is_bytes && path.get_ident().is_some_and(|v| v == "u8") =>
            {
                Value::Blob(None)
            }
            Some(Type::Path(TypePath { path, .. }))
                if is_wrapper && last.ident == "Cow" && path.get_ident().is_some_and(|v| v == "str") =>
            {
                Value::Varchar(None)
            }
            Some(Type::Slice(slice)) if is_wrapper && matches!(&*slice.elem, Type::Path(TypePath { path, .. }) if path.get_ident().is_some_and(|v| v == "u8")) => {
                Value::Blob(None)
            }
            Some(inner) if is_wrapper => {
                let decoded = decode_type(inner);
                nullable = is_option || decoded.nullable;
                decoded.value
            }
            _ => Value::Null,
        }
    };
    TypeDecoded { value, nullable }
}
