use crate::database::database::Database;
use crate::database::execute_query::ExecuteQuery;
use crate::database::error::DbError;
use crate::storage::error::StoreError;
use crate::storage::models::rule::{Rule, RuleDocument, RuleId};
use crate::storage::RuleStore;
use async_trait::async_trait;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio_postgres::Row;

pub struct PostgresRuleRepository {
    db: Arc<Database>,
}

impl PostgresRuleRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn row_to_rule(row: &Row) -> Result<Rule, DbError> {
        let id = RuleId(row.try_get::<_, i64>("id")?);
        let data: serde_json::Value = row.try_get("data")?;
        Ok(Rule {
            id,
            data: RuleDocument::from_value_lenient(id, data),
        })
    }

    fn rows_to_rules(rows: Vec<Row>) -> Result<Vec<Rule>, StoreError> {
        let mut rules = Vec::with_capacity(rows.len());
        for row in rows {
            rules.push(Self::row_to_rule(&row)?);
        }
        Ok(rules)
    }
}

#[async_trait]
impl RuleStore for PostgresRuleRepository {
    async fn all_rules(&self) -> Result<Vec<Rule>, StoreError> {
        let rows = self
            .db
            .query("SELECT id, data FROM rules ORDER BY id ASC", &[])
            .await?;
        debug!("{}件のルールを取得しました", rows.len());
        Self::rows_to_rules(rows)
    }

    async fn by_ids(&self, ids: &BTreeSet<RuleId>) -> Result<Vec<Rule>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let rows = self
            .db
            .query(
                "SELECT id, data FROM rules WHERE id = ANY($1) ORDER BY id ASC",
                &[&ids],
            )
            .await?;
        Self::rows_to_rules(rows)
    }
}
