use crate::{ColumnDef, EntityDef, GenerationMode, MappingError, Result};
use regex::Regex;
use std::{borrow::Cow, collections::HashMap};

/// Everything the statement generator knows about the table of an entity.
///
/// Built once per entity type by [`TableMetadata::build`] and never mutated
/// afterwards. `field_to_column` and `column_to_field` are inverse of each
/// other over the mapped fields.
#[derive(Debug, Clone)]
pub struct TableMetadata {
    type_name: String,
    table_name: String,
    columns: Box<[ColumnDef]>,
    field_to_column: HashMap<String, String>,
    column_to_field: HashMap<String, String>,
    key_fields: Box<[String]>,
    computed_fields: Box<[String]>,
    rewriter: Option<FieldRewriter>,
}

impl TableMetadata {
    /// Resolves the declaration of an entity into table metadata.
    ///
    /// Table and column names fall back to the type and field names when not
    /// annotated. When no field is marked as key, a field named `id`, then
    /// `{type}id`, then `{type}_id` (case insensitive) becomes the key, and an
    /// integral one without a generation annotation becomes an identity.
    pub fn build(entity: &EntityDef) -> Result<TableMetadata> {
        let type_name = entity.type_name.to_string();
        let table_name = non_blank(&entity.table_name)
            .unwrap_or(&entity.type_name)
            .to_string();
        let fields = entity.fields.iter().filter(|f| !f.ignored);
        let mut columns: Vec<ColumnDef> = fields
            .clone()
            .map(|f| ColumnDef {
                field_name: f.name.clone(),
                column_name: Cow::Owned(non_blank(&f.column_name).unwrap_or(&f.name).to_string()),
                key: f.key,
                generation: f.generation.unwrap_or_default(),
            })
            .collect();
        if !columns.iter().any(|c| c.key) {
            let lowercase = type_name.to_lowercase();
            let candidates = ["id".to_string(), format!("{lowercase}id"), format!("{lowercase}_id")];
            let inferred = candidates.iter().find_map(|candidate| {
                fields
                    .clone()
                    .position(|f| f.name.eq_ignore_ascii_case(candidate))
            });
            if let Some(i) = inferred {
                let declared = fields.clone().nth(i);
                let column = &mut columns[i];
                column.key = true;
                if declared.is_some_and(|f| f.generation.is_none() && f.value.is_integral()) {
                    column.generation = GenerationMode::Identity;
                }
                log::trace!(
                    "Inferred key `{}` for `{}` ({:?})",
                    column.field_name,
                    type_name,
                    column.generation
                );
            }
        }
        let mut field_to_column = HashMap::with_capacity(columns.len());
        let mut column_to_field = HashMap::with_capacity(columns.len());
        for column in &columns {
            if field_to_column.contains_key(column.field_name()) {
                return Err(MappingError::DuplicateFieldMapping {
                    table: table_name,
                    field: column.field_name().into(),
                }
                .into());
            }
            if let Some(first) = column_to_field.get(column.column_name()) {
                return Err(MappingError::DuplicateColumnMapping {
                    table: table_name,
                    column: column.column_name().into(),
                    first: String::clone(first),
                    second: column.field_name().into(),
                }
                .into());
            }
            field_to_column.insert(column.field_name().to_string(), column.column_name().to_string());
            column_to_field.insert(column.column_name().to_string(), column.field_name().to_string());
        }
        let key_fields = columns
            .iter()
            .filter(|c| c.key)
            .map(|c| c.field_name().to_string())
            .collect();
        let computed_fields = columns
            .iter()
            .filter(|c| c.is_computed())
            .map(|c| c.field_name().to_string())
            .collect();
        let rewriter = FieldRewriter::new(&columns)?;
        log::trace!(
            "Built metadata for `{}`: table `{}`, {} columns",
            type_name,
            table_name,
            columns.len()
        );
        Ok(TableMetadata {
            type_name,
            table_name,
            columns: columns.into_boxed_slice(),
            field_to_column,
            column_to_field,
            key_fields,
            computed_fields,
            rewriter,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
    /// Mapped columns in declaration order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }
    pub fn field_to_column(&self) -> &HashMap<String, String> {
        &self.field_to_column
    }
    pub fn column_to_field(&self) -> &HashMap<String, String> {
        &self.column_to_field
    }
    pub fn column_name(&self, field: &str) -> Option<&str> {
        self.field_to_column.get(field).map(String::as_str)
    }
    pub fn field_name(&self, column: &str) -> Option<&str> {
        self.column_to_field.get(column).map(String::as_str)
    }
    /// Key fields in declaration order.
    pub fn key_fields(&self) -> &[String] {
        &self.key_fields
    }
    pub fn computed_fields(&self) -> &[String] {
        &self.computed_fields
    }
    pub fn is_key(&self, field: &str) -> bool {
        self.key_fields.iter().any(|v| v == field)
    }
    pub fn is_computed(&self, field: &str) -> bool {
        self.computed_fields.iter().any(|v| v == field)
    }
    pub fn has_key(&self) -> bool {
        !self.key_fields.is_empty()
    }
    pub fn has_composite_key(&self) -> bool {
        self.key_fields.len() > 1
    }
    pub fn has_identity_key(&self) -> bool {
        self.identity_field().is_some()
    }
    /// The key field when it is the only one and the server generates it.
    pub fn identity_field(&self) -> Option<&str> {
        let [key] = &*self.key_fields else {
            return None;
        };
        self.columns
            .iter()
            .find(|c| c.field_name() == key)
            .filter(|c| c.is_identity())
            .map(ColumnDef::field_name)
    }

    /// Replaces field names with column names in a free-form SQL fragment.
    ///
    /// Matches whole identifiers only, case insensitive, and leaves untouched
    /// the ones immediately preceded by `sigil` (parameter references). The
    /// fragment is copied verbatim otherwise, it must come from trusted code.
    pub fn rewrite_fragment(&self, fragment: &str, sigil: char) -> String {
        match &self.rewriter {
            Some(rewriter) => rewriter.rewrite(fragment, sigil),
            None => fragment.to_string(),
        }
    }
}

impl PartialEq for TableMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.table_name == other.table_name
            && self.columns == other.columns
            && self.field_to_column == other.field_to_column
            && self.column_to_field == other.column_to_field
            && self.key_fields == other.key_fields
            && self.computed_fields == other.computed_fields
    }
}

fn non_blank<'a>(value: &'a Cow<'static, str>) -> Option<&'a str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Clone)]
struct FieldRewriter {
    pattern: Regex,
    /// Lowercase field name => column name.
    columns: HashMap<String, String>,
}

impl FieldRewriter {
    fn new(columns: &[ColumnDef]) -> Result<Option<Self>> {
        if columns.is_empty() {
            return Ok(None);
        }
        let mut lookup = HashMap::with_capacity(columns.len());
        for column in columns {
            lookup
                .entry(column.field_name().to_lowercase())
                .or_insert_with(|| column.column_name().to_string());
        }
        let mut names: Vec<_> = columns.iter().map(|c| regex::escape(c.field_name())).collect();
        // Longest first so that alternation prefers the complete identifier.
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", names.join("|")))?;
        Ok(Some(Self {
            pattern,
            columns: lookup,
        }))
    }

    fn rewrite(&self, fragment: &str, sigil: char) -> String {
        let mut result = String::with_capacity(fragment.len() + 16);
        let mut position = 0;
        for found in self.pattern.find_iter(fragment) {
            result.push_str(&fragment[position..found.start()]);
            let is_parameter = fragment[..found.start()].chars().next_back() == Some(sigil);
            match self.columns.get(&found.as_str().to_lowercase()) {
                Some(column) if !is_parameter => result.push_str(column),
                _ => result.push_str(found.as_str()),
            }
            position = found.end();
        }
        result.push_str(&fragment[position..]);
        result
    }
}
