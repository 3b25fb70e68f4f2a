use crate::database::error::DbError;
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;

pub struct Database {
    pub pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl Database {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, DbError> {
        // bb8はmax_sizeが0だとパニックするため事前に弾く
        if max_connections == 0 {
            return Err(DbError::Initialization);
        }
        let manager = PostgresConnectionManager::new_from_stringlike(connection_string, NoTls)?;
        let pool = Pool::builder()
            .max_size(max_connections)
            .build(manager)
            .await?;
        Ok(Self { pool })
    }
}
