use crate::{MappingError, Parameters, Result, TableMetadata, Value};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Identifies one row of a table.
///
/// A scalar identifies rows of a single field key, a set of fields identifies
/// rows of a composite key and must cover every key field.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Single(Value),
    Fields(Parameters),
}

impl Key {
    /// Identifier of an entity from its row (field name => value).
    pub fn of(metadata: &TableMetadata, row: &Parameters) -> Result<Key> {
        if metadata.has_composite_key() {
            Ok(Key::Fields(row.clone()))
        } else {
            let Some(field) = metadata.key_fields().first() else {
                return Err(MappingError::MissingKey {
                    entity: metadata.type_name().into(),
                }
                .into());
            };
            row.get(field).cloned().map(Key::Single).ok_or_else(|| {
                MappingError::IncompleteKey {
                    entity: metadata.type_name().into(),
                    field: field.clone(),
                }
                .into()
            })
        }
    }

    /// Binds the identifier to the key fields of `metadata`, one parameter per key field.
    pub fn to_parameters(&self, metadata: &TableMetadata) -> Result<Parameters> {
        let entity = || metadata.type_name().to_string();
        let keys = metadata.key_fields();
        if keys.is_empty() {
            return Err(MappingError::MissingKey { entity: entity() }.into());
        }
        let mut result = Parameters::with_capacity(keys.len());
        match self {
            Key::Single(value) => {
                if keys.len() > 1 {
                    return Err(MappingError::KeyShapeMismatch {
                        entity: entity(),
                        expected: keys.len(),
                    }
                    .into());
                }
                result.insert(keys[0].clone(), value.clone());
            }
            Key::Fields(fields) => {
                for key in keys {
                    let Some(value) = fields.get(key) else {
                        return Err(MappingError::IncompleteKey {
                            entity: entity(),
                            field: key.clone(),
                        }
                        .into());
                    };
                    result.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(result)
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Key::Single(value)
    }
}

impl From<Parameters> for Key {
    fn from(value: Parameters) -> Self {
        Key::Fields(value)
    }
}

macro_rules! impl_key_from {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for Key {
                fn from(value: $source) -> Self {
                    Key::Single(value.into())
                }
            }
        )+
    };
}
impl_key_from!(i8, i16, i32, i64, u8, u16, u32, u64, char, String, &str, Decimal, Uuid);
