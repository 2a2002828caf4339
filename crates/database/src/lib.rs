pub mod db;
pub mod entities;
pub mod error;
pub mod memory;
pub mod pg_store;
pub mod services;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pg_store::PgStore;
pub use store::{CatalogStore, ScheduleStore};
