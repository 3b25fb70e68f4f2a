use crate::storage::error::StoreError;
use crate::storage::models::rule::{Rule, RuleId};
use crate::storage::RuleStore;
use async_trait::async_trait;
use log::info;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// メモリ上に保持するルールストア
#[derive(Clone, Default)]
pub struct MemoryRuleStore {
    rules: Arc<RwLock<Vec<Rule>>>,
}

impl MemoryRuleStore {
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| r.id);
        rules.dedup_by_key(|r| r.id);
        Self {
            rules: Arc::new(RwLock::new(rules)),
        }
    }

    /// `{id, data}`の配列を格納したJSONファイルから読み込む
    ///
    /// 壊れたルールがあってもファイル全体は失敗させず、そのルールだけを空またはスキップとして扱う。
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let items: Vec<Value> = serde_json::from_str(&content)?;
        let rules: Vec<Rule> = items.into_iter().filter_map(Rule::from_value_lenient).collect();
        info!("{}から{}件のルールを読み込みました", path.display(), rules.len());
        Ok(Self::new(rules))
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn all_rules(&self) -> Result<Vec<Rule>, StoreError> {
        Ok(self.rules.read().await.clone())
    }

    async fn by_ids(&self, ids: &BTreeSet<RuleId>) -> Result<Vec<Rule>, StoreError> {
        let rules = self.rules.read().await;
        Ok(rules.iter().filter(|r| ids.contains(&r.id)).cloned().collect())
    }
}
