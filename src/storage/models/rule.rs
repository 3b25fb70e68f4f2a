use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub i64);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub data: RuleDocument,
}

#[derive(Deserialize)]
struct RawRule {
    id: RuleId,
    #[serde(default)]
    data: Value,
}

impl Rule {
    /// `{id, data}`形式の値から読み込む。IDが読めないものだけを捨て、
    /// 文書部分が壊れていても空のルールとして残す。
    pub fn from_value_lenient(value: Value) -> Option<Self> {
        match serde_json::from_value::<RawRule>(value) {
            Ok(raw) => Some(Rule {
                id: raw.id,
                data: RuleDocument::from_value_lenient(raw.id, raw.data),
            }),
            Err(e) => {
                warn!("IDを読み取れないルールをスキップします: {}", e);
                None
            }
        }
    }
}

/// 許可する送信元・宛先の範囲とサービス定義をまとめたルール文書
///
/// 各コレクションが欠けている、または配列でない場合は空として扱う。
/// 要素単位で解釈できないものは警告を出して捨て、残りの要素は保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default, deserialize_with = "lenient_list")]
    pub source: Vec<AddressSpec>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub destination: Vec<AddressSpec>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub service: Vec<ServiceEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RuleDocument {
    /// オブジェクトですらない文書は空のルールとして扱う
    pub fn from_value_lenient(id: RuleId, value: Value) -> Self {
        match serde_json::from_value(value) {
            Ok(document) => document,
            Err(e) => {
                warn!("ルール{}の文書を解析できないため空として扱います: {}", id, e);
                RuleDocument::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSpec {
    pub ip: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AddressSpec {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            extra: Map::new(),
        }
    }
}

/// プロトコル名 -> 属性マップ
///
/// 属性マップとして読めないプロトコルだけを捨て、同じエントリ内の他のプロトコルは残す。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ServiceEntry(pub BTreeMap<String, ServiceAttributes>);

impl<'de> Deserialize<'de> for ServiceEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let protocols = Map::<String, Value>::deserialize(deserializer)?;
        let entry = protocols
            .into_iter()
            .filter_map(|(protocol, attrs)| match serde_json::from_value(attrs) {
                Ok(attrs) => Some((protocol, attrs)),
                Err(e) => {
                    warn!("プロトコル{}の属性を解釈できないためスキップします: {}", protocol, e);
                    None
                }
            })
            .collect();
        Ok(ServiceEntry(entry))
    }
}

/// `description`は照合に使わないため型を問わない
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("配列ではないコレクションを空として扱います: {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("解釈できない要素をスキップします: {}", e);
                None
            }
        })
        .collect())
}
