use log::LevelFilter;
use std::{collections::VecDeque, env, marker::PhantomData, sync::Arc};
use tabula::{
    Error, Executor, GenericSqlWriter, Query, QueryResult, Result, RowLabeled, RowsAffected,
    SqlWriter, Value,
    stream::{self, Stream},
};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Records every statement and answers with the queued responses, one per statement.
pub struct RecordingExecutor<W: SqlWriter + Default + Send = GenericSqlWriter> {
    pub queries: Vec<Query>,
    pub responses: VecDeque<Vec<Result<QueryResult>>>,
    writer: PhantomData<W>,
}

impl<W: SqlWriter + Default + Send> RecordingExecutor<W> {
    pub fn new() -> Self {
        Self {
            queries: Vec::new(),
            responses: VecDeque::new(),
            writer: PhantomData,
        }
    }

    pub fn respond_rows<const N: usize>(&mut self, labels: [&str; N], rows: Vec<[Value; N]>) {
        let labels: Arc<[String]> = labels.iter().map(|v| v.to_string()).collect();
        self.responses.push_back(
            rows.into_iter()
                .map(|v| Ok(RowLabeled::new(labels.clone(), Box::new(v)).into()))
                .collect(),
        );
    }

    pub fn respond_affected(&mut self, rows_affected: u64) {
        self.responses.push_back(vec![Ok(RowsAffected {
            rows_affected,
            last_affected_id: None,
        }
        .into())]);
    }

    pub fn respond_error(&mut self, message: &'static str) {
        self.responses.push_back(vec![Err(Error::msg(message))]);
    }

    pub fn last_sql(&self) -> &str {
        self.queries.last().map(|v| v.sql.as_str()).unwrap_or_default()
    }
}

impl<W: SqlWriter + Default + Send> Executor for RecordingExecutor<W> {
    type SqlWriter = W;

    fn sql_writer(&self) -> W {
        W::default()
    }

    fn run(&mut self, query: Query) -> impl Stream<Item = Result<QueryResult>> + Send {
        self.queries.push(query);
        stream::iter(self.responses.pop_front().unwrap_or_default())
    }
}
