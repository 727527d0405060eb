use crate::{
    Query, QueryResult, Result, RowLabeled, RowsAffected, SqlWriter,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

/// Runs statements against a database.
///
/// This is the only thing a backend has to provide: `run` sends a statement
/// with its named parameters and streams back rows and affected row counts.
/// Connections, transactions, timeouts and retries are the implementor's business.
pub trait Executor: Send + Sized {
    type SqlWriter: SqlWriter;

    /// Writer producing statements in the dialect of this executor.
    fn sql_writer(&self) -> Self::SqlWriter;

    /// General method to send any query and return any result type (either row or count)
    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send;

    /// Execute the query and returns the rows.
    fn fetch(&mut self, query: Query) -> impl Stream<Item = Result<RowLabeled>> + Send {
        self.run(query).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the query and return the total number of rows affected.
    fn execute(&mut self, query: Query) -> impl Future<Output = Result<RowsAffected>> + Send {
        self.run(query)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}
