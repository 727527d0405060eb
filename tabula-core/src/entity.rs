use crate::{EntityDef, Parameters, Result, RowLabeled, TableMetadata, metadata_cache};
use std::sync::Arc;

/// A Rust type mapped to one table.
///
/// Usually derived with `#[derive(Entity)]`, which also reads the
/// `#[tabula(...)]` attributes:
///
/// ```ignore
/// #[derive(Entity)]
/// #[tabula(name = "posts")]
/// struct Post {
///     #[tabula(key, name = "blog_id")]
///     blog_id: i32,
///     #[tabula(key, name = "post_num")]
///     post_num: i32,
///     title: String,
///     #[tabula(computed)]
///     computed_value: Option<i32>,
/// }
/// ```
pub trait Entity: Send + Sync + Sized + 'static {
    /// Declared mapping facts, the input of [`TableMetadata::build`].
    fn describe() -> EntityDef;

    /// Current value of every mapped field, keyed by field name.
    fn row(&self) -> Parameters;

    /// Rebuilds the entity from a row labeled with field names.
    fn from_row(row: RowLabeled) -> Result<Self>;

    /// Resolved metadata, built on first use and shared afterwards.
    fn metadata() -> Result<Arc<TableMetadata>> {
        metadata_cache().get_or_build::<Self>()
    }
}
