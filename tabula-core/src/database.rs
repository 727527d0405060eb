use crate::{Entity, Executor, Result, Table};

/// Owns an executor and hands out a [`Table`] accessor per entity type.
///
/// Applications usually wrap it to name their tables:
///
/// ```ignore
/// struct BlogDb<X: Executor>(Database<X>);
/// impl<X: Executor> BlogDb<X> {
///     fn blogs(&mut self) -> Result<Table<'_, Blog, X>> {
///         self.0.table()
///     }
/// }
/// ```
pub struct Database<X: Executor> {
    executor: X,
}

impl<X: Executor> Database<X> {
    pub fn new(executor: X) -> Self {
        Self { executor }
    }

    /// Accessor for the table of `E`, borrowing the executor for its lifetime.
    pub fn table<E: Entity>(&mut self) -> Result<Table<'_, E, X>> {
        Table::new(&mut self.executor)
    }

    /// The underlying executor, for statements outside the entity mapping.
    pub fn executor(&mut self) -> &mut X {
        &mut self.executor
    }

    pub fn into_inner(self) -> X {
        self.executor
    }
}
