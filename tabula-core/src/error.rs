use thiserror::Error;

/// Mapping and statement generation failures.
///
/// They travel inside [`crate::Error`], use `error.downcast_ref::<MappingError>()`
/// to tell them apart from executor failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Fields `{first}` and `{second}` of `{table}` are both mapped to column `{column}`")]
    DuplicateColumnMapping {
        table: String,
        column: String,
        first: String,
        second: String,
    },
    #[error("Field `{field}` is declared more than once in `{table}`")]
    DuplicateFieldMapping { table: String, field: String },
    #[error("No primary key specified for entity `{entity}`")]
    MissingKey { entity: String },
    #[error("Key field `{field}` is missing from the identifier given for `{entity}`")]
    IncompleteKey { entity: String, field: String },
    #[error("Entity `{entity}` has a composite key of {expected} fields, a single value cannot identify a row")]
    KeyShapeMismatch { entity: String, expected: usize },
    #[error("Nothing to insert into `{table}` once identity and computed columns are removed")]
    NoInsertableColumns { table: String },
    #[error("Nothing to update in `{table}` once key and computed columns are removed")]
    NoUpdatableColumns { table: String },
    #[error("Field `{field}` is not mapped to any column of `{table}`")]
    UnknownField { table: String, field: String },
    #[error("Expected at most one row from `{table}` but the query matched more")]
    AmbiguousResult { table: String },
}
