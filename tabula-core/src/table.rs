use crate::{
    Context, Criteria, Entity, Executor, Key, MappingError, Parameters, Query, Result,
    RowsAffected, SqlWriter, TableMetadata, Value,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::{marker::PhantomData, pin::pin, sync::Arc};

/// Typed access to the table of `E` through an executor.
///
/// Every method generates one statement from the cached metadata, runs it and
/// shapes the result. Nothing is retried, executor errors reach the caller
/// with the failing operation attached as context.
pub struct Table<'x, E: Entity, X: Executor> {
    executor: &'x mut X,
    metadata: Arc<TableMetadata>,
    _entity: PhantomData<fn() -> E>,
}

impl<'x, E: Entity, X: Executor> Table<'x, E, X> {
    /// Binds `executor` to the metadata of `E`, building it if this is the first use.
    pub fn new(executor: &'x mut X) -> Result<Self> {
        Ok(Self {
            executor,
            metadata: E::metadata()?,
            _entity: PhantomData,
        })
    }

    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Inserts `entity` and returns the identity generated by the server, if the
    /// table has one. Identity and computed fields of `entity` are not sent.
    pub async fn insert(&mut self, entity: &E) -> Result<Option<Value>> {
        let query = self
            .executor
            .sql_writer()
            .insert_query(&self.metadata, entity.row())?;
        log::debug!("{query}");
        let context = || format!("While inserting into `{}`", self.metadata.table_name());
        if !self.metadata.has_identity_key() {
            self.executor.execute(query).await.with_context(context)?;
            return Ok(None);
        }
        let mut rows = pin!(self.executor.fetch(query));
        let row = rows.next().await.transpose().with_context(context)?;
        let identity = row.and_then(|v| v.values.into_vec().into_iter().next());
        if identity.is_none() {
            log::warn!(
                "The insert into `{}` did not return the generated identity",
                self.metadata.table_name()
            );
        }
        Ok(identity)
    }

    /// Updates the fields in `data` of the row identified by `key`.
    ///
    /// `key` is a scalar for single field keys and a set of fields covering
    /// every key field otherwise. Key and computed fields in `data` are ignored.
    pub async fn update(
        &mut self,
        key: impl Into<Key>,
        data: impl Into<Parameters>,
    ) -> Result<RowsAffected> {
        let query = self
            .executor
            .sql_writer()
            .update_query(&self.metadata, &key.into(), data.into())?;
        self.execute(query, "updating").await
    }

    /// Writes every updatable field of `entity` to the row with the same key.
    pub async fn update_entity(&mut self, entity: &E) -> Result<RowsAffected> {
        let row = entity.row();
        let key = Key::of(&self.metadata, &row)?;
        let query = self
            .executor
            .sql_writer()
            .update_query(&self.metadata, &key, row)?;
        self.execute(query, "updating").await
    }

    pub async fn delete(&mut self, key: impl Into<Key>) -> Result<RowsAffected> {
        let query = self
            .executor
            .sql_writer()
            .delete_query(&self.metadata, &key.into())?;
        self.execute(query, "deleting from").await
    }

    pub async fn delete_entity(&mut self, entity: &E) -> Result<RowsAffected> {
        let key = Key::of(&self.metadata, &entity.row())?;
        self.delete(key).await
    }

    /// The row identified by `key`, `None` when there is no such row.
    ///
    /// Fails with [`MappingError::AmbiguousResult`] when more than one row
    /// matches, the key in the database is not what the mapping declares.
    pub async fn get(&mut self, key: impl Into<Key>) -> Result<Option<E>> {
        let query = self
            .executor
            .sql_writer()
            .get_query(&self.metadata, &key.into())?;
        log::debug!("{query}");
        let context = || format!("While reading from `{}`", self.metadata.table_name());
        let mut rows = pin!(self.executor.fetch(query));
        let Some(row) = rows.next().await.transpose().with_context(context)? else {
            return Ok(None);
        };
        if rows.next().await.transpose().with_context(context)?.is_some() {
            let error = MappingError::AmbiguousResult {
                table: self.metadata.table_name().into(),
            };
            log::error!("{error}");
            return Err(error.into());
        }
        E::from_row(row).map(Some)
    }

    /// Rows matching `criteria`, decoded as they arrive.
    pub fn stream(&mut self, criteria: impl Into<Criteria>) -> impl Stream<Item = Result<E>> + Send {
        let query = self
            .executor
            .sql_writer()
            .select_query(&self.metadata, &criteria.into());
        log::debug!("{query}");
        let table = self.metadata.table_name().to_string();
        self.executor.fetch(query).map(move |row| {
            row.with_context(|| format!("While reading from `{table}`"))
                .and_then(E::from_row)
        })
    }

    /// Rows matching `criteria`, collected.
    pub async fn all(&mut self, criteria: impl Into<Criteria>) -> Result<Vec<E>> {
        self.stream(criteria).try_collect().await
    }

    async fn execute(&mut self, query: Query, operation: &str) -> Result<RowsAffected> {
        log::debug!("{query}");
        self.executor.execute(query).await.with_context(|| {
            format!("While {operation} `{}`", self.metadata.table_name())
        })
    }
}
