use crate::storage::error::StoreError;
use crate::storage::models::rule::{Rule, RuleId};
use async_trait::async_trait;
use std::collections::BTreeSet;

pub mod error;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod repository;

pub use memory::MemoryRuleStore;
pub use repository::PostgresRuleRepository;

/// ルール文書の取得元
///
/// どちらの操作もID昇順で返す。
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn all_rules(&self) -> Result<Vec<Rule>, StoreError>;

    async fn by_ids(&self, ids: &BTreeSet<RuleId>) -> Result<Vec<Rule>, StoreError>;
}
