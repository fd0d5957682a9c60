pub mod postgres;
pub mod snapshot;

pub use postgres::create_pool;
pub use snapshot::{DatasetSnapshot, DatasetStore};
