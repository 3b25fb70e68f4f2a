use crate::error::RuleError;
use crate::matching::executor::find_matching_rule_ids;
use crate::matching::query::RuleQuery;
use crate::storage::models::rule::Rule;
use crate::storage::RuleStore;
use log::info;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub result: Vec<Rule>,
}

pub struct RuleSearch {
    store: Arc<dyn RuleStore>,
}

impl RuleSearch {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }

    /// 条件が一つも指定されていなければ全ルールを返す
    pub async fn search(&self, query: &RuleQuery) -> Result<SearchResponse, RuleError> {
        let rules = self.store.all_rules().await?;
        if query.is_empty() {
            info!("検索条件なし: 全{}件のルールを返します", rules.len());
            return Ok(SearchResponse { result: rules });
        }

        let ids = find_matching_rule_ids(&rules, query)?;
        info!(
            "ルール検索 src={:?} dst={:?} port={:?}: {}/{}件が一致",
            query.src,
            query.dst,
            query.port,
            ids.len(),
            rules.len()
        );

        let result = if ids.is_empty() {
            Vec::new()
        } else {
            self.store.by_ids(&ids).await?
        };
        Ok(SearchResponse { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AddressFormatError;
    use crate::storage::MemoryRuleStore;
    use serde_json::json;

    fn store() -> Arc<dyn RuleStore> {
        let rules: Vec<Rule> = serde_json::from_value(json!([
            {"id": 2, "data": {
                "source": [{"ip": "10.0.1.5"}],
                "destination": [{"ip": "192.168.1.0/24"}],
                "service": [{"tcp": {"description": "http", "port": "80"}}]
            }},
            {"id": 1, "data": {
                "source": [{"ip": "10.0.0.0/24"}],
                "destination": [{"ip": "192.168.1.2"}],
                "service": [{"tcp": {"description": "ssh", "port": "22"}}]
            }},
            {"id": 3, "data": {
                "source": [{"ip": "10.0.0.10"}],
                "destination": [{"ip": "192.168.1.1"}],
                "service": [{"tcp": {"description": "ssh", "port": "22"}}]
            }}
        ]))
        .unwrap();
        Arc::new(MemoryRuleStore::new(rules))
    }

    fn ids(response: &SearchResponse) -> Vec<i64> {
        response.result.iter().map(|r| r.id.0).collect()
    }

    #[tokio::test]
    async fn empty_query_returns_every_rule() {
        let search = RuleSearch::new(store());
        let response = search.search(&RuleQuery::from_query_string("src=&dst=&port=")).await.unwrap();
        assert_eq!(ids(&response), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn returns_matching_rules_in_id_order() {
        let search = RuleSearch::new(store());

        let response = search.search(&RuleQuery::from_query_string("src=10.0.0.10")).await.unwrap();
        assert_eq!(ids(&response), vec![1, 3]);

        let response = search
            .search(&RuleQuery::from_query_string("src=10.0.0.10&dst=192.168.1.1&port=22"))
            .await
            .unwrap();
        assert_eq!(ids(&response), vec![3]);
    }

    #[tokio::test]
    async fn no_match_is_an_empty_result() {
        let search = RuleSearch::new(store());
        let response = search.search(&RuleQuery::new(None, None, Some("3306"))).await.unwrap();
        assert!(response.result.is_empty());
    }

    #[tokio::test]
    async fn empty_store_returns_empty_result() {
        let search = RuleSearch::new(Arc::new(MemoryRuleStore::default()));
        let response = search.search(&RuleQuery::new(Some("10.0.0.1"), None, None)).await.unwrap();
        assert!(response.result.is_empty());
    }

    #[tokio::test]
    async fn invalid_query_address_is_an_error() {
        let search = RuleSearch::new(store());
        let err = search
            .search(&RuleQuery::new(None, Some("192.168.1.0/40"), None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::AddressFormat(AddressFormatError(ref expr)) if expr == "192.168.1.0/40"
        ));
    }

    #[tokio::test]
    async fn response_is_wrapped_in_result() {
        let search = RuleSearch::new(store());
        let response = search.search(&RuleQuery::new(None, None, Some("80"))).await.unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"result": [{"id": 2, "data": {
                "source": [{"ip": "10.0.1.5"}],
                "destination": [{"ip": "192.168.1.0/24"}],
                "service": [{"tcp": {"description": "http", "port": "80"}}]
            }}]})
        );
    }
}
