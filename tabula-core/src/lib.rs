mod as_value;
mod column;
mod criteria;
mod database;
mod decode_type;
mod entity;
mod entity_def;
mod error;
mod executor;
mod key;
mod metadata;
mod metadata_cache;
mod query;
mod sql_writer;
mod table;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use column::*;
pub use criteria::*;
pub use database::*;
pub use decode_type::*;
pub use entity::*;
pub use entity_def::*;
pub use error::*;
pub use executor::*;
pub use key::*;
pub use metadata::*;
pub use metadata_cache::*;
pub use query::*;
pub use sql_writer::*;
pub use table::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
