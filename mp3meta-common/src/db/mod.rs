//! Database initialization and schema operations

pub mod init;
pub mod schema;

pub use init::*;
pub use schema::*;
