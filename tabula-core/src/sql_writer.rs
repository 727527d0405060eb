use crate::{
    Criteria, Key, MappingError, Parameters, Query, Result, TableMetadata, separated_by,
};

/// Dialect printer turning [`TableMetadata`] plus parameters into statements.
///
/// The `*_query` methods carry the statement shapes and the validations, the
/// `write_*` hooks are the points where dialects differ. Parameters are always
/// named after the entity fields.
pub trait SqlWriter {
    /// Character introducing a named parameter.
    fn parameter_sigil(&self) -> char {
        '@'
    }

    /// Table and column names are written as declared.
    fn write_identifier(&self, out: &mut String, value: &str) {
        out.push_str(value);
    }

    fn write_parameter(&self, out: &mut String, field: &str) {
        out.push(self.parameter_sigil());
        out.push_str(field);
    }

    /// Appended to an insert statement to read back the generated identity.
    fn write_identity_fetch(&self, out: &mut String, column: &str) {
        out.push_str(" RETURNING ");
        self.write_identifier(out, column);
    }

    /// `column AS field, ...` for every mapped column.
    fn write_select_list(&self, out: &mut String, metadata: &TableMetadata) {
        separated_by(
            out,
            metadata.columns(),
            |out, v| {
                self.write_identifier(out, v.column_name());
                out.push_str(" AS ");
                self.write_identifier(out, v.field_name());
            },
            ", ",
        );
    }

    /// `column=@field` joined by `separator`.
    fn write_assignments<'a>(
        &self,
        out: &mut String,
        metadata: &TableMetadata,
        fields: impl IntoIterator<Item = &'a str>,
        separator: &str,
    ) where
        Self: Sized,
    {
        separated_by(
            out,
            fields,
            |out, field| {
                self.write_identifier(out, metadata.column_name(field).unwrap_or(field));
                out.push('=');
                self.write_parameter(out, field);
            },
            separator,
        );
    }

    /// Free-form fragment with field names replaced by column names.
    fn write_fragment(&self, out: &mut String, metadata: &TableMetadata, fragment: &str) {
        out.push_str(metadata.rewrite_fragment(fragment.trim(), self.parameter_sigil()).as_str());
    }

    /// Insert of one row (field name => value).
    ///
    /// The identity key and the computed fields are dropped from the payload
    /// instead of rejected, a fully populated entity can be passed as it is.
    fn insert_query(&self, metadata: &TableMetadata, row: Parameters) -> Result<Query>
    where
        Self: Sized,
    {
        check_fields(metadata, &row)?;
        let identity = metadata.identity_field();
        let params: Parameters = metadata
            .columns()
            .iter()
            .filter(|c| Some(c.field_name()) != identity && !c.is_computed())
            .filter_map(|c| {
                row.get(c.field_name())
                    .map(|v| (c.field_name.clone(), v.clone()))
            })
            .collect();
        if params.is_empty() {
            return Err(MappingError::NoInsertableColumns {
                table: metadata.table_name().into(),
            }
            .into());
        }
        let mut sql = String::with_capacity(64 + params.len() * 32);
        sql.push_str("INSERT INTO ");
        self.write_identifier(&mut sql, metadata.table_name());
        sql.push_str(" (");
        separated_by(
            &mut sql,
            params.names(),
            |out, v| self.write_identifier(out, metadata.column_name(v).unwrap_or(v)),
            ", ",
        );
        sql.push_str(") VALUES (");
        separated_by(
            &mut sql,
            params.names(),
            |out, v| self.write_parameter(out, v),
            ", ",
        );
        sql.push(')');
        if let Some(field) = identity {
            self.write_identity_fetch(&mut sql, metadata.column_name(field).unwrap_or(field));
        }
        Ok(Query::new(sql, params))
    }

    /// Update of the row identified by `key`, `data` holds the new values.
    ///
    /// Key and computed fields are removed from `data`, the key values are bound
    /// from `key` only.
    fn update_query(&self, metadata: &TableMetadata, key: &Key, data: Parameters) -> Result<Query>
    where
        Self: Sized,
    {
        let keys = key.to_parameters(metadata)?;
        check_fields(metadata, &data)?;
        let mut params = data;
        params.retain(|name, _| !metadata.is_key(name) && !metadata.is_computed(name));
        if params.is_empty() {
            return Err(MappingError::NoUpdatableColumns {
                table: metadata.table_name().into(),
            }
            .into());
        }
        let mut sql = String::with_capacity(64 + (params.len() + keys.len()) * 32);
        sql.push_str("UPDATE ");
        self.write_identifier(&mut sql, metadata.table_name());
        sql.push_str(" SET ");
        self.write_assignments(&mut sql, metadata, params.names(), ", ");
        sql.push_str(" WHERE ");
        self.write_assignments(&mut sql, metadata, keys.names(), " AND ");
        params.extend(keys);
        Ok(Query::new(sql, params))
    }

    fn delete_query(&self, metadata: &TableMetadata, key: &Key) -> Result<Query>
    where
        Self: Sized,
    {
        let keys = key.to_parameters(metadata)?;
        let mut sql = String::with_capacity(64 + keys.len() * 32);
        sql.push_str("DELETE FROM ");
        self.write_identifier(&mut sql, metadata.table_name());
        sql.push_str(" WHERE ");
        self.write_assignments(&mut sql, metadata, keys.names(), " AND ");
        Ok(Query::new(sql, keys))
    }

    /// Select of the single row identified by `key`.
    fn get_query(&self, metadata: &TableMetadata, key: &Key) -> Result<Query>
    where
        Self: Sized,
    {
        let keys = key.to_parameters(metadata)?;
        let mut sql = String::with_capacity(64 + metadata.columns().len() * 32);
        sql.push_str("SELECT ");
        self.write_select_list(&mut sql, metadata);
        sql.push_str(" FROM ");
        self.write_identifier(&mut sql, metadata.table_name());
        sql.push_str(" WHERE ");
        self.write_assignments(&mut sql, metadata, keys.names(), " AND ");
        Ok(Query::new(sql, keys))
    }

    /// Select of the rows matching `criteria`, blank fragments are left out.
    fn select_query(&self, metadata: &TableMetadata, criteria: &Criteria) -> Query {
        let mut sql = String::with_capacity(
            64 + metadata.columns().len() * 32 + criteria.condition.len() + criteria.order_by.len(),
        );
        sql.push_str("SELECT ");
        self.write_select_list(&mut sql, metadata);
        sql.push_str(" FROM ");
        self.write_identifier(&mut sql, metadata.table_name());
        if criteria.has_condition() {
            sql.push_str(" WHERE ");
            self.write_fragment(&mut sql, metadata, &criteria.condition);
        }
        if criteria.has_order() {
            sql.push_str(" ORDER BY ");
            self.write_fragment(&mut sql, metadata, &criteria.order_by);
        }
        Query::new(sql, criteria.params.clone())
    }
}

fn check_fields(metadata: &TableMetadata, params: &Parameters) -> Result<()> {
    match params.names().find(|v| metadata.column_name(v).is_none()) {
        Some(field) => Err(MappingError::UnknownField {
            table: metadata.table_name().into(),
            field: field.into(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Fallback writer, reads the generated identity back with `RETURNING`.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericSqlWriter;
impl GenericSqlWriter {
    pub fn new() -> Self {
        Self {}
    }
}
impl SqlWriter for GenericSqlWriter {}

/// SQL Server flavour, reads the generated identity back with `SCOPE_IDENTITY()`.
#[derive(Default, Debug, Clone, Copy)]
pub struct SqlServerWriter;
impl SqlServerWriter {
    pub fn new() -> Self {
        Self {}
    }
}
impl SqlWriter for SqlServerWriter {
    fn write_identity_fetch(&self, out: &mut String, _column: &str) {
        out.push_str("; SELECT CAST(SCOPE_IDENTITY() AS INT)");
    }
}
