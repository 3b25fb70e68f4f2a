use crate::config::app_config::DatabaseConfig;
use crate::database::database::Database;
use crate::database::error::DbError;
use log::info;

pub fn connection_string(config: &DatabaseConfig) -> String {
    format!(
        "host={} port={} user={} password={} dbname={}",
        config.host, config.port, config.username, config.password, config.database_name
    )
}

/// プールを作成し、接続を一本取得できることを確認してから返す
pub async fn connect(config: &DatabaseConfig) -> Result<Database, DbError> {
    let db = Database::new(&connection_string(config), config.max_connections).await?;
    db.pool.get().await?;
    info!(
        "データベースに接続しました: {}:{}/{}",
        config.host, config.port, config.database_name
    );
    Ok(db)
}
