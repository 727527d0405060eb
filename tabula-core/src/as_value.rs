use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use std::{any, borrow::Cow, sync::Arc};
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and [`Value`].
///
/// This is what moves entity fields into statement parameters and row values
/// back into entity fields.
///
/// # Conversion contract
/// - `as_empty_value` returns the NULL variant of the type, it also describes
///   the declared type of a field.
/// - `try_from_value` accepts the canonical variant of the type. Integer types
///   additionally accept every other integer variant after a range check, so a
///   generated identity decodes whatever width the backend reports.
///
/// ```rust
/// use tabula_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(Some(42)));
/// assert_eq!(i64::try_from_value(v).unwrap(), 42);
/// ```
pub trait AsValue {
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

macro_rules! impl_from_as_value {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    value.as_value()
                }
            }
        )+
    };
}
impl_from_as_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    Decimal,
    char,
    String,
    Cow<'static, str>,
    Box<[u8]>,
    Vec<u8>,
    Date,
    Time,
    PrimitiveDateTime,
    Uuid,
);

impl<T: AsValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.as_value()
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} to {}",
        value,
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                macro_rules! narrow {
                    ($v:expr) => {
                        <$source>::try_from($v).map_err(|_| {
                            Error::msg(format!(
                                "Value {} is out of range for {}",
                                $v,
                                any::type_name::<Self>(),
                            ))
                        })
                    };
                }
                #[allow(unreachable_patterns)]
                match value {
                    $destination(Some(v)) => Ok(v),
                    Value::Int8(Some(v)) => narrow!(v),
                    Value::Int16(Some(v)) => narrow!(v),
                    Value::Int32(Some(v)) => narrow!(v),
                    Value::Int64(Some(v)) => narrow!(v),
                    Value::UInt8(Some(v)) => narrow!(v),
                    Value::UInt16(Some(v)) => narrow!(v),
                    Value::UInt32(Some(v)) => narrow!(v),
                    Value::UInt64(Some(v)) => narrow!(v),
                    Value::Decimal(Some(v)) if v.fract().is_zero() => {
                        let text = v.trunc().to_string();
                        text.parse::<Self>().map_err(|_| {
                            Error::msg(format!(
                                "Value {} is out of range for {}",
                                text,
                                any::type_name::<Self>(),
                            ))
                        })
                    }
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    #[allow(unreachable_patterns)]
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int16(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::UInt16(Some(v)) => Ok(v != 0),
    Value::UInt32(Some(v)) => Ok(v != 0),
    Value::UInt64(Some(v)) => Ok(v != 0),
);
impl_as_value!(
    f32,
    Value::Float32,
    Value::Float64(Some(v)) => Ok(v as f32),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as f64),
    Value::Decimal(Some(v)) => rust_decimal::prelude::ToPrimitive::to_f64(&v)
        .ok_or_else(|| Error::msg(format!("Decimal {v} does not fit into f64"))),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int8(Some(v)) => Ok(Decimal::from(v)),
    Value::Int16(Some(v)) => Ok(Decimal::from(v)),
    Value::Int32(Some(v)) => Ok(Decimal::from(v)),
    Value::Int64(Some(v)) => Ok(Decimal::from(v)),
    Value::UInt8(Some(v)) => Ok(Decimal::from(v)),
    Value::UInt16(Some(v)) => Ok(Decimal::from(v)),
    Value::UInt32(Some(v)) => Ok(Decimal::from(v)),
    Value::UInt64(Some(v)) => Ok(Decimal::from(v)),
    Value::Float64(Some(v)) => Decimal::from_f64(v)
        .ok_or_else(|| Error::msg(format!("Cannot convert {v} to Decimal"))),
);
impl_as_value!(
    char,
    Value::Char,
    Value::Varchar(Some(ref v)) => {
        let mut chars = v.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::msg(format!("Cannot convert `{v}` to char"))),
        }
    },
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Char(Some(v)) => Ok(v.into()),
);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date, Value::Timestamp(Some(v)) => Ok(v.date()));
impl_as_value!(Time, Value::Time, Value::Timestamp(Some(v)) => Ok(v.time()));
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(ref v)) => Uuid::parse_str(v)
        .map_err(|e| Error::new(e).context(format!("Cannot parse `{v}` as Uuid"))),
    Value::Blob(Some(ref v)) => Uuid::from_slice(v)
        .map_err(|e| Error::new(e).context("Cannot read a Uuid from the blob")),
);

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Box::<[u8]>::try_from_value(value).map(Into::into)
    }
}

impl AsValue for Cow<'static, str> {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.into_owned()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        String::try_from_value(value).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::try_from_value(value).map(Some)
        }
    }
}

impl<T: AsValue + Clone> AsValue for Arc<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        Arc::unwrap_or_clone(self).as_value()
    }
    fn try_from_value(value: Value) -> Result<Self> {
        T::try_from_value(value).map(Arc::new)
    }
}

impl AsValue for Value {
    fn as_empty_value() -> Value {
        Value::Null
    }
    fn as_value(self) -> Value {
        self
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}
