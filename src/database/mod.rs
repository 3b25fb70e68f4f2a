pub mod connector;
pub mod database;
pub mod error;
pub mod execute_query;

pub use database::Database;
pub use error::DbError;
pub use execute_query::ExecuteQuery;
