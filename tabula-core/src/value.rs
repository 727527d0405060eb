use proc_macro2::TokenStream;
use quote::{ToTokens, TokenStreamExt, quote};
use rust_decimal::Decimal;
use std::{
    fmt::{self, Display},
    mem::discriminant,
};
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Dynamically typed SQL value.
///
/// Every variant carries an `Option`: `None` is a NULL of that type. Empty
/// variants (`Value::Int32(None)`) are also used to describe the declared
/// type of a field.
#[derive(Default, Debug, Clone)]
pub enum Value {
    /// Untyped NULL.
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Char(Option<char>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    Uuid(Option<Uuid>),
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        discriminant(self) == discriminant(other)
    }

    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Int8(None)
                | Value::Int16(None)
                | Value::Int32(None)
                | Value::Int64(None)
                | Value::UInt8(None)
                | Value::UInt16(None)
                | Value::UInt32(None)
                | Value::UInt64(None)
                | Value::Float32(None)
                | Value::Float64(None)
                | Value::Decimal(None)
                | Value::Char(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Date(None)
                | Value::Time(None)
                | Value::Timestamp(None)
                | Value::Uuid(None)
        )
    }

    /// True for the signed and unsigned integer variants, regardless of the payload.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Value::Int8(..)
                | Value::Int16(..)
                | Value::Int32(..)
                | Value::Int64(..)
                | Value::UInt8(..)
                | Value::UInt16(..)
                | Value::UInt32(..)
                | Value::UInt64(..)
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Char(l), Self::Char(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            _ => self.same_type(other),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! display {
            ($v:expr) => {
                match $v {
                    Some(v) => write!(f, "{}", v),
                    None => f.write_str("NULL"),
                }
            };
        }
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => display!(v),
            Value::Int8(v) => display!(v),
            Value::Int16(v) => display!(v),
            Value::Int32(v) => display!(v),
            Value::Int64(v) => display!(v),
            Value::UInt8(v) => display!(v),
            Value::UInt16(v) => display!(v),
            Value::UInt32(v) => display!(v),
            Value::UInt64(v) => display!(v),
            Value::Float32(v) => display!(v),
            Value::Float64(v) => display!(v),
            Value::Decimal(v) => display!(v),
            Value::Char(v) => display!(v),
            Value::Varchar(v) => display!(v),
            Value::Blob(Some(v)) => write!(f, "<{} bytes>", v.len()),
            Value::Blob(None) => f.write_str("NULL"),
            Value::Date(v) => display!(v),
            Value::Time(v) => display!(v),
            Value::Timestamp(v) => display!(v),
            Value::Uuid(v) => display!(v),
        }
    }
}

/// Emits the empty variant, payloads are not carried over into generated code.
impl ToTokens for Value {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append_all(match self {
            Value::Null => quote!(::tabula::Value::Null),
            Value::Boolean(..) => quote!(::tabula::Value::Boolean(None)),
            Value::Int8(..) => quote!(::tabula::Value::Int8(None)),
            Value::Int16(..) => quote!(::tabula::Value::Int16(None)),
            Value::Int32(..) => quote!(::tabula::Value::Int32(None)),
            Value::Int64(..) => quote!(::tabula::Value::Int64(None)),
            Value::UInt8(..) => quote!(::tabula::Value::UInt8(None)),
            Value::UInt16(..) => quote!(::tabula::Value::UInt16(None)),
            Value::UInt32(..) => quote!(::tabula::Value::UInt32(None)),
            Value::UInt64(..) => quote!(::tabula::Value::UInt64(None)),
            Value::Float32(..) => quote!(::tabula::Value::Float32(None)),
            Value::Float64(..) => quote!(::tabula::Value::Float64(None)),
            Value::Decimal(..) => quote!(::tabula::Value::Decimal(None)),
            Value::Char(..) => quote!(::tabula::Value::Char(None)),
            Value::Varchar(..) => quote!(::tabula::Value::Varchar(None)),
            Value::Blob(..) => quote!(::tabula::Value::Blob(None)),
            Value::Date(..) => quote!(::tabula::Value::Date(None)),
            Value::Time(..) => quote!(::tabula::Value::Time(None)),
            Value::Timestamp(..) => quote!(::tabula::Value::Timestamp(None)),
            Value::Uuid(..) => quote!(::tabula::Value::Uuid(None)),
        });
    }
}
