use crate::storage::models::rule::ServiceEntry;
use serde_json::Value;

const DECLARED_PORT_KEYS: &[&str] = &["port", "ports", "dport", "sport", "dst_port", "src_port"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Description,
    DeclaredPort,
    // 未知の属性もポート候補として扱う
    Undeclared,
}

impl AttributeKind {
    pub fn classify(key: &str) -> Self {
        if key == "description" {
            AttributeKind::Description
        } else if DECLARED_PORT_KEYS.contains(&key) {
            AttributeKind::DeclaredPort
        } else {
            AttributeKind::Undeclared
        }
    }

    pub fn is_port_bearing(self) -> bool {
        !matches!(self, AttributeKind::Description)
    }
}

fn value_matches(value: &Value, target_port: &str) -> bool {
    match value {
        Value::String(s) => s == target_port,
        Value::Array(items) => items
            .iter()
            .any(|item| matches!(item, Value::String(s) if s == target_port)),
        _ => false,
    }
}

/// サービス一覧のいずれかの属性値が`target_port`と完全一致するか
pub fn port_matches(services: &[ServiceEntry], target_port: &str) -> bool {
    services.iter().any(|service| {
        service.0.values().any(|attrs| {
            attrs
                .attributes
                .iter()
                .filter(|(key, _)| AttributeKind::classify(key).is_port_bearing())
                .any(|(_, value)| value_matches(value, target_port))
        })
    })
}
