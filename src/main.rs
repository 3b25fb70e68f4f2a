use log::{error, info};
use rule_search::config::{AppConfig, RuleSource};
use rule_search::database::connector;
use rule_search::error::{AppError, InitProcessError};
use rule_search::setup_logger::setup_logger;
use rule_search::storage::migrations::run_migrations;
use rule_search::storage::{MemoryRuleStore, PostgresRuleRepository, RuleStore};
use rule_search::{RuleQuery, RuleSearch};
use std::sync::Arc;

async fn open_store(source: &RuleSource) -> Result<Arc<dyn RuleStore>, InitProcessError> {
    match source {
        RuleSource::File(path) => {
            let store = MemoryRuleStore::from_json_file(path)
                .await
                .map_err(|e| InitProcessError::RuleFileError(format!("{}: {}", path.display(), e)))?;
            Ok(Arc::new(store))
        }
        RuleSource::Database(config) => {
            // データベースへの接続
            let db = connector::connect(config)
                .await
                .map_err(|e| InitProcessError::DatabaseConnectionError(e.to_string()))?;
            run_migrations(&db)
                .await
                .map_err(|e| InitProcessError::MigrationError(e.to_string()))?;
            Ok(Arc::new(PostgresRuleRepository::new(Arc::new(db))))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    setup_logger(config.log_level)?;

    let store = open_store(&config.rule_source).await?;

    // 例: rule-search "src=10.0.0.0%2F24&port=22"
    let query = RuleQuery::from_query_string(&std::env::args().nth(1).unwrap_or_default());
    info!("検索条件: {:?}", query);

    let response = match RuleSearch::new(store).search(&query).await {
        Ok(response) => response,
        Err(e) => {
            error!("ルール検索に失敗しました: {}", e);
            return Err(e.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
