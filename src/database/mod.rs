pub mod connection;
pub mod setup;
pub mod snapshots;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
