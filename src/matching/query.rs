use url::form_urlencoded;

/// 送信元・宛先・ポートによる検索条件
///
/// 値が空文字列のパラメータは指定なしと同じ扱いになる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleQuery {
    pub src: Option<String>,
    pub dst: Option<String>,
    pub port: Option<String>,
}

fn supplied(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl RuleQuery {
    pub fn new(src: Option<&str>, dst: Option<&str>, port: Option<&str>) -> Self {
        Self {
            src: supplied(src),
            dst: supplied(dst),
            port: supplied(port),
        }
    }

    /// 同じキーが複数ある場合は後の値を採用する
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = RuleQuery::default();
        for (key, value) in params {
            let slot = match key.as_ref() {
                "src" => &mut query.src,
                "dst" => &mut query.dst,
                "port" => &mut query.port,
                _ => continue,
            };
            *slot = supplied(Some(value.as_ref()));
        }
        query
    }

    pub fn from_query_string(query_string: &str) -> Self {
        let query_string = query_string.trim_start_matches('?');
        Self::from_params(form_urlencoded::parse(query_string.as_bytes()))
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_none() && self.dst.is_none() && self.port.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percent_encoded_query_string() {
        let query = RuleQuery::from_query_string("?src=10.0.0.0%2F24&dst=192.168.1.1&port=22&page=2");
        assert_eq!(
            query,
            RuleQuery::new(Some("10.0.0.0/24"), Some("192.168.1.1"), Some("22"))
        );
    }

    #[test]
    fn empty_values_are_not_supplied() {
        let query = RuleQuery::from_query_string("src=&dst=192.168.1.1&port=");
        assert_eq!(query.src, None);
        assert_eq!(query.dst.as_deref(), Some("192.168.1.1"));
        assert_eq!(query.port, None);
        assert!(!query.is_empty());

        assert!(RuleQuery::from_query_string("src=&dst=&port=").is_empty());
        assert!(RuleQuery::from_query_string("").is_empty());
    }

    #[test]
    fn last_duplicate_key_wins() {
        let query = RuleQuery::from_params(vec![("port", "22"), ("port", "80")]);
        assert_eq!(query.port.as_deref(), Some("80"));
    }
}
