//! Table metadata and parameterized SQL for single entity CRUD.
//!
//! Derive [`Entity`] on a struct, hand an [`Executor`] to a [`Database`] and
//! use the [`Table`] accessors:
//!
//! ```ignore
//! #[derive(Entity, Clone)]
//! struct Blog {
//!     id: i32,
//!     name: String,
//! }
//!
//! let mut db = Database::new(executor);
//! let id = db.table::<Blog>()?.insert(&blog).await?;
//! let blog = db.table::<Blog>()?.get(5).await?;
//! ```
pub use tabula_core::*;
pub use tabula_macros::Entity;
